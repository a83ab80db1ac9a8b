//! Seed the catalog file with the sample collection.
//!
//! Writes the launch collection of dresses into `products.json` in the
//! configured data directory, so a fresh checkout of the repo has a
//! browsable catalog without the hosted data service.

use kuyen_core::Price;
use kuyen_storefront::catalog::{Catalog, JsonCatalog, NewProduct};
use kuyen_storefront::config::StorefrontConfig;
use tracing::info;

/// Seed the catalog file.
///
/// Refuses to touch an existing catalog unless `force` is set.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the existing file
/// cannot be removed, or a product cannot be written.
pub async fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let path = config.catalog_path();

    if path.exists() {
        if !force {
            return Err(format!(
                "catalog file already exists: {} (use --force to overwrite)",
                path.display()
            )
            .into());
        }
        std::fs::remove_file(&path)?;
        info!(path = %path.display(), "Removed existing catalog file");
    }

    let catalog = JsonCatalog::open(&path)?;
    let collection = sample_collection();
    let count = collection.len();

    for product in collection {
        let created = catalog.create_product(product).await?;
        info!("  {}. {} - {}", created.id, created.name, created.price);
    }

    info!(path = %path.display(), "Seeded {count} products");
    Ok(())
}

/// The launch collection.
fn sample_collection() -> Vec<NewProduct> {
    const ALL_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"];

    let names = |values: &[&str]| values.iter().map(ToString::to_string).collect::<Vec<_>>();

    vec![
        NewProduct {
            name: "Vestido Luna Nocturna".to_string(),
            description: "Elegancia gótica para noches especiales".to_string(),
            price: Price::from_pesos(89_990),
            original_price: Some(Price::from_pesos(109_990)),
            images: vec!["/images/luna-nocturna.webp".to_string()],
            category: "gotico".to_string(),
            sizes: names(&ALL_SIZES[..8]),
            colors: names(&["Negro", "Borgoña", "Azul Medianoche"]),
            in_stock: true,
            featured: true,
        },
        NewProduct {
            name: "Vestido Flor de Cerezo".to_string(),
            description: "Frescura primaveral con caída fluida".to_string(),
            price: Price::from_pesos(74_990),
            original_price: None,
            images: vec!["/images/flor-de-cerezo.webp".to_string()],
            category: "primaveral".to_string(),
            sizes: names(ALL_SIZES),
            colors: names(&["Rosa Suave", "Verde Menta", "Lavanda"]),
            in_stock: true,
            featured: false,
        },
        NewProduct {
            name: "Vestido Sol Radiante".to_string(),
            description: "Ligero y luminoso para días de verano".to_string(),
            price: Price::from_pesos(69_990),
            original_price: None,
            images: vec!["/images/sol-radiante.webp".to_string()],
            category: "veraniego".to_string(),
            sizes: names(ALL_SIZES),
            colors: names(&["Dorado", "Coral", "Turquesa"]),
            in_stock: true,
            featured: false,
        },
        NewProduct {
            name: "Vestido Tierra Ancestral".to_string(),
            description: "Tonos tierra con bordado artesanal".to_string(),
            price: Price::from_pesos(94_990),
            original_price: None,
            images: vec!["/images/tierra-ancestral.webp".to_string()],
            category: "gotico".to_string(),
            sizes: names(ALL_SIZES),
            colors: names(&["Tierra", "Cobre", "Óxido"]),
            in_stock: true,
            featured: false,
        },
        NewProduct {
            name: "Vestido Místico Lunar".to_string(),
            description: "Pieza de colección con detalles plateados".to_string(),
            price: Price::from_pesos(119_990),
            original_price: None,
            images: vec!["/images/mistico-lunar.webp".to_string()],
            category: "gotico".to_string(),
            sizes: names(&ALL_SIZES[1..8]),
            colors: names(&["Negro Lunar", "Plateado", "Azul Profundo"]),
            in_stock: true,
            featured: true,
        },
        NewProduct {
            name: "Vestido Brisa Marina".to_string(),
            description: "Inspirado en la costa del Pacífico".to_string(),
            price: Price::from_pesos(79_990),
            original_price: Some(Price::from_pesos(89_990)),
            images: vec!["/images/brisa-marina.webp".to_string()],
            category: "veraniego".to_string(),
            sizes: names(ALL_SIZES),
            colors: names(&["Azul Océano", "Verde Agua", "Blanco Espuma"]),
            in_stock: true,
            featured: false,
        },
    ]
}
