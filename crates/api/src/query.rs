//! Product search parameters and their translation into store queries.

use serde::Deserialize;

use crate::db::Filter;
use crate::models::Product;

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
}

impl ProductQuery {
    /// Store-side filter: exact brand/ram/storage, minimum rating and a
    /// name-or-brand substring search, all ANDed.
    ///
    /// Empty strings and a `minRating` of exactly zero are treated as absent.
    #[must_use]
    pub fn filter(&self) -> Filter {
        let mut clauses = Vec::new();

        for (field, value) in [
            ("brand", &self.brand),
            ("ram", &self.ram),
            ("storage", &self.storage),
        ] {
            if let Some(value) = non_empty(value.as_deref()) {
                clauses.push(Filter::eq(field, value));
            }
        }

        if let Some(min_rating) = self.min_rating.filter(|r| *r != 0.0) {
            clauses.push(Filter::gte("rating", min_rating));
        }

        if let Some(needle) = non_empty(self.search.as_deref()) {
            clauses.push(Filter::or(vec![
                Filter::contains_ignore_case("name", needle),
                Filter::contains_ignore_case("brand", needle),
            ]));
        }

        Filter::and(clauses)
    }

    /// Post-fetch price bounds.
    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        PriceRange {
            min: self.min_price,
            max: self.max_price,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Inclusive bounds on a product's best price.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `price` lies within the bounds.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| min <= price) && self.max.is_none_or(|max| price <= max)
    }

    /// Keep the products whose best price is within the bounds, preserving
    /// order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_unbounded() {
            return products;
        }
        products
            .into_iter()
            .filter(|p| self.contains(p.best_price()))
            .collect()
    }
}
