use axum::{Json, extract::Path, response::IntoResponse};
use eriste_api::objects::admin::UpdateProductRequest;
use eriste_core::entities::products::{GetProductById, UpdateProduct};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, product_to_admin_response};

/// `PUT /products/{id}` — update a product.
///
/// Fields absent from the body keep their current values; the slug never
/// changes after creation.
pub async fn update_product(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let product = processor
        .process(GetProductById { id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    let price = request.price.unwrap_or(product.price);
    if price.is_sign_negative() {
        return Err(AdminApiError::Invalid("price must not be negative"));
    }
    let stock = request.stock.unwrap_or(product.stock);
    if stock < 0 {
        return Err(AdminApiError::Invalid("stock must not be negative"));
    }
    let name = match request.name {
        Some(name) if name.trim().is_empty() => {
            return Err(AdminApiError::Invalid("product name must not be empty"));
        }
        Some(name) => name.trim().to_string(),
        None => product.name,
    };

    let updated = processor
        .process(UpdateProduct {
            id,
            category_id: request.category_id.unwrap_or(product.category_id),
            slug: product.slug,
            name,
            description: request.description.or(product.description),
            price,
            stock,
            published: request.published.unwrap_or(product.published),
        })
        .await
        .map_err(AdminApiError::from_write_error)?
        .ok_or(AdminApiError::NotFound)?;

    tracing::info!(product_id = updated.id, "Product updated");

    Ok(Json(product_to_admin_response(&updated)))
}
