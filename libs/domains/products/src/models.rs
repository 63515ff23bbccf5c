use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Catalog entity as held by persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub creation_date: DateTime<Utc>,
}

/// A product that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub creation_date: DateTime<Utc>,
}

impl NewProduct {
    /// Builds the record to insert, stamped with `now`.
    pub fn stamped(input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            price: input.price,
            creation_date: truncate_to_second(now),
        }
    }

    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            creation_date: self.creation_date,
        }
    }
}

/// Fields a caller may supply when creating or updating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    /// Product name (2-30 characters)
    #[serde(default)]
    #[validate(length(
        min = 2,
        max = 30,
        message = "Product name must be between 2 and 30 characters"
    ))]
    #[schema(example = "Phone", min_length = 2, max_length = 30)]
    pub name: String,
    /// Unit price, zero or more
    #[validate(range(min = 0.0, message = "Product price must not be negative"))]
    #[schema(example = 1000.0, minimum = 0.0)]
    pub price: f64,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Creation or last update time, whole seconds
    pub creation_date: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            creation_date: product.creation_date,
        }
    }
}

/// Query parameters for listing products
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// `name`, `price` or `date`; anything else sorts by name
    #[param(example = "price")]
    pub sort: Option<String>,
}

/// Query parameters for searching products by name
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductSearch {
    /// Exact product name; when absent nothing matches
    #[param(example = "Phone")]
    pub name: Option<String>,
}

/// Drops sub-second precision.
pub fn truncate_to_second(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}
