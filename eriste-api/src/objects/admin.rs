//! Wire types for the admin panel API.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::orders::OrderStatus;
use super::sellers::SellerApplicationStatus;

/// Request header carrying the plaintext admin secret.
pub const ADMIN_AUTH_HEADER: &str = "Eriste-Admin-Authorization";

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Full order detail for the admin API (includes customer contact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderResponse {
    pub order_id: Uuid,
    pub order_ref: String,
    pub amount: Decimal,
    pub currency: CompactString,
    pub status: OrderStatus,
    pub created_at: i64,
    pub paid_at: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
}

/// A product as the admin panel sees it, published or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProductResponse {
    pub id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub stock: i32,
    pub published: bool,
    pub created_at: i64,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters for `GET /api/admin/orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub status: Option<OrderStatus>,
    pub order_ref: Option<String>,
}

/// Filters for `GET /api/admin/seller-applications`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSellerApplicationsQuery {
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub status: Option<SellerApplicationStatus>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/admin/seller-applications/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSellerApplicationRequest {
    pub approve: bool,
}

/// Body of `POST /api/admin/categories`.
///
/// When `slug` is absent it is derived from `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub slug: Option<CompactString>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Body of `POST /api/admin/products`.
///
/// When `slug` is absent it is derived from `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub slug: Option<CompactString>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub stock: i32,
    #[serde(default)]
    pub published: bool,
}

/// Body of `PUT /api/admin/products/{id}`; absent fields stay unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub stock: Option<i32>,
    pub published: Option<bool>,
}
