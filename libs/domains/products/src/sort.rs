//! Ordering policy for product listings.

use std::cmp::Ordering;
use strum::{Display, EnumString};

use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortCriteria {
    #[default]
    Name,
    Price,
    Date,
}

impl SortCriteria {
    /// Unknown, empty or absent values fall back to [`SortCriteria::Name`].
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortCriteria::Name => a.name.cmp(&b.name),
            SortCriteria::Price => a.price.total_cmp(&b.price),
            SortCriteria::Date => a.creation_date.cmp(&b.creation_date),
        }
    }
}

/// Stable ascending sort; equal keys keep their input order.
pub fn sort_products(products: &mut [Product], criteria: SortCriteria) {
    products.sort_by(|a, b| criteria.compare(a, b));
}
