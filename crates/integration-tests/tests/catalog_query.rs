//! Catalog queries exercised through the trait, against both backends.

use kuyen_core::SortKey;
use kuyen_integration_tests::fixture_catalog;
use kuyen_storefront::catalog::{Catalog, InMemoryCatalog, JsonCatalog, ProductQuery};

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn category_page_query() {
    let catalog = InMemoryCatalog::with_products(fixture_catalog());

    let gothic = catalog
        .list_products(&ProductQuery::category("gotico"))
        .await
        .unwrap();
    assert_eq!(gothic.len(), 2);
    // Newest first within the category.
    assert_eq!(gothic.first().unwrap().name, "Vestido Místico Lunar");

    let everything = catalog
        .list_products(&ProductQuery::category("all"))
        .await
        .unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn search_with_price_sort() {
    let catalog = InMemoryCatalog::with_products(fixture_catalog());

    let query = ProductQuery {
        search: Some("vestido".to_string()),
        sort: SortKey::PriceAsc,
        limit: Some(2),
        ..ProductQuery::default()
    };
    let cheapest = catalog.list_products(&query).await.unwrap();
    assert_eq!(cheapest.len(), 2);
    assert_eq!(cheapest.first().unwrap().name, "Vestido Sol Radiante");
    assert_eq!(cheapest.get(1).unwrap().name, "Vestido Flor de Cerezo");
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn search_misses_return_empty() {
    let catalog = InMemoryCatalog::with_products(fixture_catalog());

    let query = ProductQuery {
        search: Some("chaqueta".to_string()),
        ..ProductQuery::default()
    };
    assert!(catalog.list_products(&query).await.unwrap().is_empty());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn json_catalog_answers_the_same_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(
        &path,
        serde_json::to_string_pretty(&fixture_catalog()).unwrap(),
    )
    .unwrap();

    let catalog = JsonCatalog::open(&path).unwrap();

    let newest = catalog.list_products(&ProductQuery::all()).await.unwrap();
    let ids: Vec<i64> = newest.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);

    let priciest = catalog
        .list_products(&ProductQuery {
            sort: SortKey::PriceDesc,
            limit: Some(1),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(priciest.first().unwrap().name, "Vestido Místico Lunar");
}
