//! Public catalog responses.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A storefront category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
}

/// A published product as the storefront renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub stock: i32,
    pub created_at: i64,
}

/// Query parameters for the product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Category slug; values that do not resolve as a slug are retried as a
    /// numeric category id.
    pub category: Option<String>,
}
