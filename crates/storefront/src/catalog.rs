//! Catalog query collaborator.
//!
//! Product storage is external; the storefront only needs to fetch,
//! filter, and sort. [`apply_query`] holds the filtering logic as a pure
//! function so both implementations (and the tests) share it, the way the
//! hosted data service would apply the same conditions server-side.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use kuyen_core::{Price, Product, ProductId, SortKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the given id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
    /// Reading or writing the backing file failed.
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a valid product list.
    #[error("catalog data error: {0}")]
    Data(#[from] serde_json::Error),
    /// The catalog lock was poisoned by a panicking writer.
    #[error("catalog lock poisoned")]
    Poisoned,
}

/// A catalog listing request: category, free-text search, sort, limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Category slug to filter on; `None` or `"all"` means every category.
    pub category: Option<String>,
    /// Case-insensitive match against name and description.
    pub search: Option<String>,
    /// Sort order; defaults to newest first.
    #[serde(default)]
    pub sort: SortKey,
    /// Maximum number of products to return.
    pub limit: Option<usize>,
}

impl ProductQuery {
    /// A query returning the whole catalog, newest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one category.
    #[must_use]
    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            ..Self::default()
        }
    }
}

/// Apply a query to a product list.
///
/// This is the storefront's client-side filtering: category equality,
/// case-insensitive name/description search, then sort and limit.
#[must_use]
pub fn apply_query(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let category = query
        .category
        .as_deref()
        .filter(|slug| !slug.is_empty() && *slug != "all");
    let search = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| category.is_none_or(|slug| product.category == slug))
        .filter(|product| {
            search.as_deref().is_none_or(|needle| {
                product.name.to_lowercase().contains(needle)
                    || product.description.to_lowercase().contains(needle)
            })
        })
        .cloned()
        .collect();

    match query.sort {
        SortKey::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    if let Some(limit) = query.limit {
        matched.truncate(limit);
    }

    matched
}

/// Input for creating a product; the catalog assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default = "NewProduct::default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
}

impl NewProduct {
    const fn default_in_stock() -> bool {
        true
    }

    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            images: self.images,
            category: self.category,
            sizes: self.sizes,
            colors: self.colors,
            in_stock: self.in_stock,
            featured: self.featured,
            rating: None,
            created_at: Utc::now(),
        }
    }
}

/// The catalog collaborator consumed by the storefront and back-office.
///
/// The read side serves product pages and the cart's add-time snapshot
/// lookup; the write side is the back-office CRUD surface.
pub trait Catalog {
    /// List products matching a query.
    fn list_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch a single product, or `None` if it does not exist.
    fn get_product_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Create a product, assigning it the next id.
    fn create_product(
        &self,
        input: NewProduct,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Replace a product record by its id.
    fn update_product(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Delete a product by id.
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), CatalogError>> + Send;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// An in-memory catalog for tests and seeding.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with products.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    fn next_id(products: &[Product]) -> ProductId {
        let max = products.iter().map(|p| p.id.as_i64()).max().unwrap_or(0);
        ProductId::new(max + 1)
    }
}

impl Catalog for InMemoryCatalog {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        Ok(apply_query(&products, query))
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let product = input.into_product(Self::next_id(&products));
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, product: Product) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let Some(existing) = products.iter_mut().find(|p| p.id == product.id) else {
            return Err(CatalogError::NotFound(product.id));
        };
        *existing = product.clone();
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }
}

// =============================================================================
// JSON-file implementation
// =============================================================================

/// A catalog backed by one JSON file of products.
///
/// Used by the CLI tooling: `seed` writes it, `products list` reads it.
/// Mutations rewrite the whole file; the catalog is small enough that
/// this stays simple and atomic enough for tooling use.
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    products: Mutex<Vec<Product>>,
}

impl JsonCatalog {
    /// Open a catalog file, creating an empty catalog if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file exists but cannot be read or
    /// is not a valid product list.
    #[instrument]
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let products = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            products: Mutex::new(products),
        })
    }

    /// The file backing this catalog.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, products: &[Product]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(products)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Catalog for JsonCatalog {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        Ok(apply_query(&products, query))
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let product = input.into_product(InMemoryCatalog::next_id(&products));
        products.push(product.clone());
        self.flush(&products)?;
        Ok(product)
    }

    async fn update_product(&self, product: Product) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let Some(existing) = products.iter_mut().find(|p| p.id == product.id) else {
            return Err(CatalogError::NotFound(product.id));
        };
        *existing = product.clone();
        self.flush(&products)?;
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut products = self.products.lock().map_err(|_| CatalogError::Poisoned)?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        self.flush(&products)?;
        Ok(())
    }
}
