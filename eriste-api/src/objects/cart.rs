//! Cart wire types.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One cart line, joined with the product it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub product_id: i64,
    pub slug: CompactString,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// A cart with its current lines and running total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub cart_id: Uuid,
    pub lines: Vec<CartLineResponse>,
    pub total: Decimal,
    pub updated_at: i64,
}

/// Body of `PUT /api/cart/{cart_id}/items`.
///
/// Quantity zero removes the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCartItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}
