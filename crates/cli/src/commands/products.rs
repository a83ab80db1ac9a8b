//! List catalog products from the command line.

use kuyen_core::SortKey;
use kuyen_storefront::catalog::{Catalog, JsonCatalog, ProductQuery};
use kuyen_storefront::config::StorefrontConfig;
use tracing::info;

/// List products matching a query.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the sort key is
/// unknown, or the catalog file cannot be read.
pub async fn list(
    category: Option<String>,
    search: Option<String>,
    sort: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let sort = parse_sort(sort)?;

    let config = StorefrontConfig::from_env()?;
    let catalog = JsonCatalog::open(&config.catalog_path())?;

    let query = ProductQuery {
        category,
        search,
        sort,
        limit: None,
    };
    let products = catalog.list_products(&query).await?;

    if products.is_empty() {
        info!("No products match the query");
        return Ok(());
    }

    info!("{} product(s):", products.len());
    for product in products {
        let sale = if product.is_on_sale() { " [oferta]" } else { "" };
        let stock = if product.in_stock { "" } else { " [agotado]" };
        info!(
            "  {}. {} - {} ({}){sale}{stock}",
            product.id, product.name, product.price, product.category
        );
    }

    Ok(())
}

fn parse_sort(sort: &str) -> Result<SortKey, String> {
    match sort {
        "newest" => Ok(SortKey::Newest),
        "price_asc" => Ok(SortKey::PriceAsc),
        "price_desc" => Ok(SortKey::PriceDesc),
        other => Err(format!(
            "unknown sort key '{other}' (expected newest, price_asc, or price_desc)"
        )),
    }
}
