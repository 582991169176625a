//! Seller onboarding endpoint.
//!
//! # Endpoints
//!
//! - `POST /apply` – submit a seller application

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use eriste_api::objects::sellers::{SellerApplicationRequest, SellerApplicationResponse};
use eriste_core::entities::seller_applications::{
    CreateSellerApplication, HasPendingApplication, SellerApplication,
};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::state::AppState;

/// Build the seller onboarding router.
pub fn router() -> Router<AppState> {
    Router::new().route("/apply", post(apply))
}

/// Convert a `SellerApplication` (DB model) into a `SellerApplicationResponse`
/// (API model).
fn to_response(application: &SellerApplication) -> SellerApplicationResponse {
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

/// `POST /apply` — submit a seller application.
///
/// One application per email may await review at a time; a second submit
/// while the first is pending answers 409.
async fn apply(
    state: State<AppState>,
    Json(request): Json<SellerApplicationRequest>,
) -> Result<impl IntoResponse, SellerApiError> {
    validate_application(&request).map_err(SellerApiError::InvalidApplication)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let pending = processor
        .process(HasPendingApplication {
            email: request.email.trim().to_string(),
        })
        .await
        .map_err(SellerApiError::Database)?;
    if pending {
        return Err(SellerApiError::DuplicateApplication);
    }

    let application = processor
        .process(CreateSellerApplication {
            shop_name: request.shop_name.trim().to_string(),
            contact_name: request.contact_name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: trimmed_opt(request.phone),
            website: trimmed_opt(request.website),
            message: trimmed_opt(request.message),
        })
        .await
        .map_err(SellerApiError::Database)?;

    tracing::info!(
        application_id = application.id,
        shop_name = %application.shop_name,
        "Seller application received"
    );

    Ok((StatusCode::CREATED, Json(to_response(&application))))
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_application(request: &SellerApplicationRequest) -> Result<(), &'static str> {
    if request.shop_name.trim().is_empty() {
        return Err("shop name must not be empty");
    }
    if request.contact_name.trim().is_empty() {
        return Err("contact name must not be empty");
    }
    let email = request.email.trim();
    if email.is_empty() {
        return Err("email must not be empty");
    }
    if !email.contains('@') {
        return Err("email is not valid");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in seller onboarding handlers.
#[derive(Debug)]
enum SellerApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The email already has an application awaiting review.
    DuplicateApplication,
    /// A field failed validation.
    InvalidApplication(&'static str),
}

impl IntoResponse for SellerApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SellerApiError::Database(e) => {
                tracing::error!(error = %e, "Seller API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            SellerApiError::DuplicateApplication => (
                StatusCode::CONFLICT,
                "an application for this email is already awaiting review",
            )
                .into_response(),
            SellerApiError::InvalidApplication(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SellerApplicationRequest {
        SellerApplicationRequest {
            shop_name: "Ev Yapımı Erişteci".to_string(),
            contact_name: "Mehmet Demir".to_string(),
            email: "mehmet@eristeci.example".to_string(),
            phone: None,
            website: None,
            message: Some("El açması erişte üretiyoruz.".to_string()),
        }
    }

    #[test]
    fn complete_application_passes_validation() {
        assert!(validate_application(&request()).is_ok());
    }

    #[test]
    fn blank_shop_name_is_rejected() {
        let mut req = request();
        req.shop_name = " ".to_string();
        assert!(validate_application(&req).is_err());
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut req = request();
        req.email = "mehmet.eristeci.example".to_string();
        assert!(validate_application(&req).is_err());
    }

    #[test]
    fn optional_fields_are_trimmed_to_none() {
        assert_eq!(trimmed_opt(Some("  ".to_string())), None);
        assert_eq!(trimmed_opt(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(trimmed_opt(None), None);
    }
}
