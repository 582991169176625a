//! Cart endpoints.
//!
//! Carts are anonymous and addressed by the UUID handed out at creation.
//! All storage access goes through the [`CartManager`] seam on `AppState`.
//!
//! # Endpoints
//!
//! - `POST   /`                              – create an empty cart
//! - `GET    /{cart_id}`                     – fetch a cart
//! - `DELETE /{cart_id}`                     – remove every line, keep the cart
//! - `PUT    /{cart_id}/items`               – set one line's quantity
//! - `DELETE /{cart_id}/items/{product_id}`  – remove one line
//!
//! [`CartManager`]: eriste_core::cart_manager::CartManager

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use eriste_api::objects::cart::{CartLineResponse, CartResponse};
use eriste_core::cart_manager::CartError;
use eriste_core::entities::carts::CartSnapshot;

use crate::state::AppState;

mod clear_cart;
mod create_cart;
mod get_cart;
mod remove_item;
mod set_item;

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart::create_cart))
        .route(
            "/{cart_id}",
            get(get_cart::get_cart).delete(clear_cart::clear_cart),
        )
        .route("/{cart_id}/items", put(set_item::set_item))
        .route(
            "/{cart_id}/items/{product_id}",
            delete(remove_item::remove_item),
        )
}

/// Convert a `CartSnapshot` (manager model) into a `CartResponse` (API model).
fn to_response(snapshot: &CartSnapshot) -> CartResponse {
    CartResponse {
        cart_id: snapshot.cart_id,
        lines: snapshot
            .lines
            .iter()
            .map(|line| CartLineResponse {
                product_id: line.product_id,
                slug: line.slug.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect(),
        total: snapshot.total,
        updated_at: snapshot.updated_at.assume_utc().unix_timestamp(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Wrapper mapping [`CartError`] onto HTTP responses.
#[derive(Debug)]
struct CartApiError(CartError);

impl From<CartError> for CartApiError {
    fn from(err: CartError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CartApiError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            CartError::CartNotFound => (StatusCode::NOT_FOUND, "cart not found").into_response(),
            err @ CartError::ProductUnavailable(_) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            err @ CartError::InsufficientStock { .. } => {
                (StatusCode::CONFLICT, err.to_string()).into_response()
            }
            CartError::QuantityOutOfRange => {
                (StatusCode::BAD_REQUEST, "quantity out of range").into_response()
            }
            CartError::Database(e) => {
                tracing::error!(error = %e, "Cart API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
