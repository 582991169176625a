use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use super::{CartApiError, to_response};
use crate::state::AppState;

/// `GET /{cart_id}` — fetch a cart with its lines and running total.
pub(super) async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, CartApiError> {
    let snapshot = state.cart_manager.fetch(cart_id).await?;
    Ok(Json(to_response(&snapshot)))
}
