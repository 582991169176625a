use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::{CartApiError, to_response};
use crate::state::AppState;

/// `POST /` — create an empty cart.
///
/// Returns 201 with the new cart's id for the client to keep.
pub(super) async fn create_cart(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CartApiError> {
    let snapshot = state.cart_manager.create().await?;
    Ok((StatusCode::CREATED, Json(to_response(&snapshot))))
}
