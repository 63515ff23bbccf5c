use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub creation_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            creation_date: model.creation_date.with_timezone(&Utc),
        }
    }
}

impl From<NewProduct> for ActiveModel {
    fn from(product: NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price),
            creation_date: Set(product.creation_date.into()),
        }
    }
}

/// Everything but the id, for updates keyed by a filter
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price),
            creation_date: Set(product.creation_date.into()),
        }
    }
}
