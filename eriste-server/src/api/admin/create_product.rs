use axum::{Json, http::StatusCode, response::IntoResponse};
use eriste_api::objects::admin::CreateProductRequest;
use eriste_core::entities::products::CreateProduct;
use eriste_core::framework::DatabaseProcessor;
use eriste_core::utils::slug::slugify;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, product_to_admin_response};

/// `POST /products` — create a product.
///
/// The slug is derived from the name when not given explicitly. Referencing
/// a category that does not exist answers 400; a slug collision answers 409.
pub async fn create_product(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AdminApiError::Invalid("product name must not be empty"));
    }
    if request.price.is_sign_negative() {
        return Err(AdminApiError::Invalid("price must not be negative"));
    }
    if request.stock < 0 {
        return Err(AdminApiError::Invalid("stock must not be negative"));
    }

    let slug = request
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&name));
    if slug.is_empty() {
        return Err(AdminApiError::Invalid(
            "product name does not produce a usable slug",
        ));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let product = processor
        .process(CreateProduct {
            category_id: request.category_id,
            slug,
            name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            published: request.published,
        })
        .await
        .map_err(AdminApiError::from_write_error)?;

    tracing::info!(product_id = product.id, slug = %product.slug, "Product created");

    Ok((StatusCode::CREATED, Json(product_to_admin_response(&product))))
}
