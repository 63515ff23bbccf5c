use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, ProductDto, ProductInput, truncate_to_second};
use crate::repository::ProductRepository;
use crate::sort::{SortCriteria, sort_products};

/// Service layer for the product catalog
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, stamp the creation date and store a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<ProductDto> {
        input.validate()?;

        let product = NewProduct::stamped(input, Utc::now());
        let id = self.repository.insert(product.clone()).await?;

        Ok(product.with_id(id).into())
    }

    #[instrument(skip(self), fields(product_id = id))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<ProductDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(ProductError::NotFound(id))
    }

    /// Products with exactly this name, in store order
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> ProductResult<Vec<ProductDto>> {
        let products = self.repository.find_by_name(name).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// All products ordered by `sort` (see [`SortCriteria::resolve`])
    #[instrument(skip(self))]
    pub async fn list(&self, sort: Option<&str>) -> ProductResult<Vec<ProductDto>> {
        let mut products = self.repository.find_all().await?;
        sort_products(&mut products, SortCriteria::resolve(sort));
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Replace name and price. The creation date is restamped.
    #[instrument(skip(self, input), fields(product_id = id))]
    pub async fn update(&self, id: i64, input: ProductInput) -> ProductResult<ProductDto> {
        input.validate()?;

        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.name = input.name;
        product.price = input.price;
        product.creation_date = truncate_to_second(Utc::now());

        self.repository.replace(product.clone()).await?;

        Ok(product.into())
    }

    /// Missing ids are not an error.
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        self.repository.remove_by_id(id).await
    }
}
