use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use super::{CartApiError, to_response};
use crate::state::AppState;

/// `DELETE /{cart_id}/items/{product_id}` — remove one line.
///
/// Removing a line that is not in the cart is not an error.
pub(super) async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, i64)>,
) -> Result<impl IntoResponse, CartApiError> {
    let snapshot = state.cart_manager.remove_item(cart_id, product_id).await?;
    Ok(Json(to_response(&snapshot)))
}
