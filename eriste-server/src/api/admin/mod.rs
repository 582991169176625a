//! Admin panel endpoints.
//!
//! All of them sit behind the `Eriste-Admin-Authorization` header carrying
//! the plaintext admin secret.
//!
//! # Endpoints
//!
//! - `GET    /orders`                           – list orders (paginated, filterable)
//! - `POST   /orders/{order_id}/mark-paid`      – settle an order by hand
//! - `GET    /seller-applications`              – list seller applications
//! - `POST   /seller-applications/{id}/review`  – approve or reject an application
//! - `POST   /categories`                       – create a category
//! - `POST   /products`                         – create a product
//! - `PUT    /products/{id}`                    – update a product
//! - `DELETE /products/{id}`                    – delete a product

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::state::AppState;

mod create_category;
mod create_product;
mod delete_product;
mod list_orders;
mod list_seller_applications;
mod mark_paid;
mod review_seller_application;
mod update_product;

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders::list_orders))
        .route("/orders/{order_id}/mark-paid", post(mark_paid::mark_paid))
        .route(
            "/seller-applications",
            get(list_seller_applications::list_seller_applications),
        )
        .route(
            "/seller-applications/{id}/review",
            post(review_seller_application::review_seller_application),
        )
        .route("/categories", post(create_category::create_category))
        .route("/products", post(create_product::create_product))
        .route(
            "/products/{id}",
            put(update_product::update_product).delete(delete_product::delete_product),
        )
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// One error enum for every admin handler.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    Database(sqlx::Error),
    NotFound,
    AlreadyReviewed,
    DuplicateSlug,
    UnknownCategory,
    Invalid(&'static str),
}

impl AdminApiError {
    /// Classify constraint violations raised by catalog writes.
    fn from_write_error(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => return Self::DuplicateSlug,
                sqlx::error::ErrorKind::ForeignKeyViolation => return Self::UnknownCategory,
                _ => {}
            }
        }
        Self::Database(e)
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "Admin API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AdminApiError::NotFound => {
                (StatusCode::NOT_FOUND, "resource not found").into_response()
            }
            AdminApiError::AlreadyReviewed => {
                (StatusCode::CONFLICT, "application already reviewed").into_response()
            }
            AdminApiError::DuplicateSlug => {
                (StatusCode::CONFLICT, "slug already in use").into_response()
            }
            AdminApiError::UnknownCategory => {
                (StatusCode::BAD_REQUEST, "unknown category").into_response()
            }
            AdminApiError::Invalid(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

use eriste_api::objects::admin::{AdminOrderResponse, AdminProductResponse};
use eriste_api::objects::sellers::SellerApplicationResponse;
use eriste_core::entities::orders::Order;
use eriste_core::entities::products::Product;
use eriste_core::entities::seller_applications::SellerApplication;

pub(crate) fn order_to_admin_response(order: &Order) -> AdminOrderResponse {
    AdminOrderResponse {
        order_id: order.id,
        order_ref: order.order_ref.clone(),
        amount: order.amount,
        currency: order.currency.clone(),
        status: order.status.into(),
        created_at: order.created_at.assume_utc().unix_timestamp(),
        paid_at: order.paid_at.map(|t| t.assume_utc().unix_timestamp()),
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
    }
}

pub(crate) fn product_to_admin_response(product: &Product) -> AdminProductResponse {
    AdminProductResponse {
        id: product.id,
        slug: product.slug.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        category_id: product.category_id,
        stock: product.stock,
        published: product.published,
        created_at: product.created_at.assume_utc().unix_timestamp(),
    }
}

pub(crate) fn application_to_response(
    application: &SellerApplication,
) -> SellerApplicationResponse {
    SellerApplicationResponse {
        id: application.id,
        shop_name: application.shop_name.clone(),
        contact_name: application.contact_name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        website: application.website.clone(),
        message: application.message.clone(),
        status: application.status.into(),
        created_at: application.created_at.assume_utc().unix_timestamp(),
        reviewed_at: application
            .reviewed_at
            .map(|t| t.assume_utc().unix_timestamp()),
    }
}
