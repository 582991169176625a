use axum::{Json, http::StatusCode, response::IntoResponse};
use eriste_api::objects::admin::CreateCategoryRequest;
use eriste_api::objects::catalog::CategoryResponse;
use eriste_core::entities::categories::CreateCategory;
use eriste_core::framework::DatabaseProcessor;
use eriste_core::utils::slug::slugify;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::AdminApiError;

/// `POST /categories` — create a category.
///
/// The slug is derived from the name when not given explicitly.
pub async fn create_category(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AdminApiError::Invalid("category name must not be empty"));
    }

    let slug = request
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&name));
    if slug.is_empty() {
        return Err(AdminApiError::Invalid(
            "category name does not produce a usable slug",
        ));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let category = processor
        .process(CreateCategory {
            slug,
            name,
            description: request.description,
            position: request.position,
        })
        .await
        .map_err(AdminApiError::from_write_error)?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            position: category.position,
        }),
    ))
}
