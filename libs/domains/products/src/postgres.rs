use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    repository::ProductRepository,
};

fn storage_error(e: DbErr) -> ProductError {
    ProductError::Storage(format!("Database error: {}", e))
}

/// PostgreSQL implementation of ProductRepository. Store order is id order.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: NewProduct) -> ProductResult<i64> {
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.insert(&self.db).await.map_err(storage_error)?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.id)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn replace(&self, product: Product) -> ProductResult<()> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let result = entity::Entity::update_many()
            .set(active_model)
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(())
    }

    async fn remove_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, name: &str, price: f64) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            price,
            creation_date: Utc
                .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
                .unwrap()
                .into(),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(11, "Phone", 1000.0)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let id = repo
            .insert(NewProduct {
                name: "Phone".to_string(),
                price: 1000.0,
                creation_date: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(id, 11);
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "Car", 15000.0)]])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let found = repo.find_by_id(3).await.unwrap().unwrap();
        assert_eq!(found.name, "Car");
        assert_eq!(found.price, 15000.0);
        assert_eq!(
            found.creation_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );

        assert!(repo.find_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_preserves_store_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(1, "Phone", 1000.0),
                model(2, "Car", 15000.0),
            ]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let all = repo.find_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_replace_and_remove_tolerate_missing_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0), exec(0)])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let ghost = model(99, "Ghost", 1.0).into();
        assert!(repo.replace(ghost).await.is_ok());
        assert!(repo.remove_by_id(99).await.is_ok());
    }

    #[tokio::test]
    async fn test_query_failure_becomes_storage_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.find_by_name("Phone").await.unwrap_err();

        assert!(matches!(err, ProductError::Storage(msg) if msg.contains("connection reset")));
    }
}
