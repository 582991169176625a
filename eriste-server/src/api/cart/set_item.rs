use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use eriste_api::objects::cart::SetCartItemRequest;
use uuid::Uuid;

use super::{CartApiError, to_response};
use crate::state::AppState;

/// `PUT /{cart_id}/items` — set one line's quantity.
///
/// Quantity zero removes the line; quantities above the per-line ceiling
/// clamp down to it.
pub(super) async fn set_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<SetCartItemRequest>,
) -> Result<impl IntoResponse, CartApiError> {
    let snapshot = state
        .cart_manager
        .set_item(cart_id, request.product_id, request.quantity)
        .await?;
    Ok(Json(to_response(&snapshot)))
}
