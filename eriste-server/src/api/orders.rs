//! Public order lookup.
//!
//! # Endpoints
//!
//! - `GET /{order_ref}` – fetch an order by its public reference

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use eriste_api::objects::orders::{OrderItemResponse, OrderResponse};
use eriste_core::entities::orders::{GetOrderByRef, GetOrderItems, Order, OrderItem};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::state::AppState;

/// Build the public orders router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{order_ref}", get(get_order))
}

/// Convert an `Order` plus its lines (DB models) into an `OrderResponse`
/// (API model).
pub(crate) fn order_to_response(order: &Order, items: &[OrderItem]) -> OrderResponse {
    OrderResponse {
        order_ref: order.order_ref.clone(),
        status: order.status.into(),
        amount: order.amount,
        currency: order.currency.clone(),
        created_at: order.created_at.assume_utc().unix_timestamp(),
        paid_at: order.paid_at.map(|t| t.assume_utc().unix_timestamp()),
        items: items
            .iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id,
                name: item.name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect(),
    }
}

/// `GET /{order_ref}` — fetch an order by the reference the customer was
/// given at checkout.
async fn get_order(
    state: State<AppState>,
    Path(order_ref): Path<String>,
) -> Result<impl IntoResponse, OrderApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order = processor
        .process(GetOrderByRef { order_ref })
        .await
        .map_err(OrderApiError::Database)?
        .ok_or(OrderApiError::NotFound)?;

    let items = processor
        .process(GetOrderItems { order_id: order.id })
        .await
        .map_err(OrderApiError::Database)?;

    Ok(Json(order_to_response(&order, &items)))
}

/// Errors that can occur in order lookup handlers.
#[derive(Debug)]
enum OrderApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested order was not found.
    NotFound,
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            OrderApiError::Database(e) => {
                tracing::error!(error = %e, "Order API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            OrderApiError::NotFound => (StatusCode::NOT_FOUND, "order not found").into_response(),
        }
    }
}
