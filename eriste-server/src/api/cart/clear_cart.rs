use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use super::{CartApiError, to_response};
use crate::state::AppState;

/// `DELETE /{cart_id}` — remove every line, keeping the cart usable.
pub(super) async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, CartApiError> {
    let snapshot = state.cart_manager.clear(cart_id).await?;
    Ok(Json(to_response(&snapshot)))
}
