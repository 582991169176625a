use axum::{extract::Path, http::StatusCode, response::IntoResponse};
use eriste_core::entities::products::DeleteProduct;
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::AdminApiError;

/// `DELETE /products/{id}` — delete a product.
///
/// Order lines that snapshotted this product keep their name and price;
/// their `product_id` goes null.
pub async fn delete_product(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deleted = processor
        .process(DeleteProduct { id })
        .await
        .map_err(AdminApiError::Database)?;
    if !deleted {
        return Err(AdminApiError::NotFound);
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
