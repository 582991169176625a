//! Order state, checkout request, and public order responses.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle state on the wire.
///
/// The sqlx-aware twin lives in `eriste-core::entities`; this one stays
/// free of database derives so API consumers never pull in sqlx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Expired => write!(f, "expired"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub cart_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
}

/// One line of an order, snapshotted at checkout time.
///
/// `product_id` is null when the product was deleted after the purchase;
/// the snapshot keeps the name and price the customer bought at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: Option<i64>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// An order as customers see it, addressed by its public reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_ref: String,
    pub status: OrderStatus,
    pub amount: Decimal,
    pub currency: CompactString,
    pub created_at: i64,
    pub paid_at: Option<i64>,
    pub items: Vec<OrderItemResponse>,
}
