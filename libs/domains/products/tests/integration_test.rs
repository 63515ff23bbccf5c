//! Integration tests for PgProductRepository against a real PostgreSQL
//!
//! Each test starts its own container with the products schema applied.
//! Run with `cargo test -p domain_products -- --ignored` when Docker is available.

use domain_products::*;
use test_utils::assertions::{assert_price_eq, assert_some};
use test_utils::{TestDataBuilder, TestDatabase};

fn service(db: &TestDatabase) -> ProductService<PgProductRepository> {
    ProductService::new(PgProductRepository::new(db.connection()))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_round_trip() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let builder = TestDataBuilder::from_test_name("pg_round_trip");

    let input = ProductInput {
        name: builder.product_name("main"),
        price: builder.price(),
    };
    let created = service.create(input.clone()).await.unwrap();

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, input.name);
    assert_price_eq(fetched.price, input.price, "round trip price");
    assert_eq!(fetched.creation_date, created.creation_date);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_catalog_scenario() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    for (name, price) in [("Phone", 1000.0), ("Car", 15000.0), ("Playstation", 800.0)] {
        service
            .create(ProductInput {
                name: name.to_string(),
                price,
            })
            .await
            .unwrap();
    }

    let by_price: Vec<String> = service
        .list(Some("price"))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(by_price, vec!["Playstation", "Phone", "Car"]);

    let by_name: Vec<String> = service
        .list(Some("name"))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(by_name, vec!["Car", "Phone", "Playstation"]);

    let phones = service.get_by_name("Phone").await.unwrap();
    assert_eq!(phones.len(), 1);

    db.truncate_products().await;
    assert!(service.list(None).await.unwrap().is_empty());

    let fresh = service
        .create(ProductInput {
            name: "Bike".to_string(),
            price: 300.0,
        })
        .await
        .unwrap();
    assert_eq!(fresh.id, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let created = service
        .create(ProductInput {
            name: "Phone".to_string(),
            price: 1000.0,
        })
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            ProductInput {
                name: "Tablet".to_string(),
                price: 450.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);

    let stored = assert_some(
        service.get_by_name("Tablet").await.unwrap().into_iter().next(),
        "updated product",
    );
    assert_eq!(stored.id, created.id);

    service.delete(created.id).await.unwrap();
    service.delete(created.id).await.unwrap();

    assert!(matches!(
        service.get_by_id(created.id).await.unwrap_err(),
        ProductError::NotFound(_)
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_database_rejects_names_the_service_would_reject() {
    use sea_orm::ConnectionTrait;

    let db = TestDatabase::new().await;

    let result = db
        .connection
        .execute_unprepared(
            "INSERT INTO products (name, price, creation_date) VALUES ('x', 1.0, NOW())",
        )
        .await;

    assert!(result.is_err());
}
