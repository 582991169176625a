//! Public catalog endpoints.
//!
//! # Endpoints
//!
//! - `GET /categories`       – list categories in menu order
//! - `GET /products`         – list published products (paginated, category filter)
//! - `GET /products/{slug}`  – fetch one published product

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use eriste_api::objects::catalog::{CategoryResponse, ListProductsQuery, ProductResponse};
use eriste_api::objects::clamp_pagination;
use eriste_core::entities::categories::{
    Category, GetCategoryById, GetCategoryBySlug, ListCategories,
};
use eriste_core::entities::products::{GetPublishedProductBySlug, ListPublishedProducts, Product};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::state::AppState;

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
        .route("/products/{slug}", get(get_product))
}

fn category_to_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        slug: category.slug.clone(),
        name: category.name.clone(),
        description: category.description.clone(),
        position: category.position,
    }
}

fn product_to_response(product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id,
        slug: product.slug.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        category_id: product.category_id,
        stock: product.stock,
        created_at: product.created_at.assume_utc().unix_timestamp(),
    }
}

/// `GET /categories` — list every category in menu order.
async fn list_categories(
    state: State<AppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let categories = processor
        .process(ListCategories)
        .await
        .map_err(CatalogApiError::Database)?;

    Ok(Json(
        categories
            .iter()
            .map(category_to_response)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /products` — list published products, newest first.
///
/// The `category` query parameter takes a category slug; a value that does
/// not resolve as a slug is retried as a numeric category id before the
/// listing answers 404.
async fn list_products(
    state: State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let category_id = match query.category {
        None => None,
        Some(selector) => Some(resolve_category(&processor, selector).await?),
    };

    let (limit, offset) = clamp_pagination(query.limit, query.offset);
    let products = processor
        .process(ListPublishedProducts {
            category_id,
            limit,
            offset,
        })
        .await
        .map_err(CatalogApiError::Database)?;

    Ok(Json(
        products.iter().map(product_to_response).collect::<Vec<_>>(),
    ))
}

/// Resolve a category selector: slug first, then numeric id.
async fn resolve_category(
    processor: &DatabaseProcessor,
    selector: String,
) -> Result<i64, CatalogApiError> {
    if let Some(category) = processor
        .process(GetCategoryBySlug {
            slug: selector.clone(),
        })
        .await
        .map_err(CatalogApiError::Database)?
    {
        return Ok(category.id);
    }

    if let Ok(id) = selector.parse::<i64>() {
        if let Some(category) = processor
            .process(GetCategoryById { id })
            .await
            .map_err(CatalogApiError::Database)?
        {
            return Ok(category.id);
        }
    }

    Err(CatalogApiError::CategoryNotFound)
}

/// `GET /products/{slug}` — fetch one published product.
async fn get_product(
    state: State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let product = processor
        .process(GetPublishedProductBySlug { slug })
        .await
        .map_err(CatalogApiError::Database)?
        .ok_or(CatalogApiError::ProductNotFound)?;

    Ok(Json(product_to_response(&product)))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in catalog handlers.
#[derive(Debug)]
enum CatalogApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested product was not found or is not published.
    ProductNotFound,
    /// The category filter matched neither a slug nor an id.
    CategoryNotFound,
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CatalogApiError::Database(e) => {
                tracing::error!(error = %e, "Catalog API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            CatalogApiError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "product not found").into_response()
            }
            CatalogApiError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "category not found").into_response()
            }
        }
    }
}
