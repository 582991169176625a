use axum::{
    Json,
    extract::Path,
    response::IntoResponse,
};
use eriste_api::objects::admin::ReviewSellerApplicationRequest;
use eriste_core::entities::SellerApplicationStatus;
use eriste_core::entities::seller_applications::{
    GetSellerApplicationById, ReviewSellerApplication,
};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, application_to_response};

/// `POST /seller-applications/{id}/review` — approve or reject an
/// application.
///
/// Only applications still in the `received` state can be reviewed.
pub async fn review_seller_application(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<i64>,
    Json(request): Json<ReviewSellerApplicationRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let application = processor
        .process(GetSellerApplicationById { id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    if application.status != SellerApplicationStatus::Received {
        return Err(AdminApiError::AlreadyReviewed);
    }

    let status = if request.approve {
        SellerApplicationStatus::Approved
    } else {
        SellerApplicationStatus::Rejected
    };

    let reviewed = processor
        .process(ReviewSellerApplication { id, status })
        .await
        .map_err(AdminApiError::Database)?
        // Raced with another reviewer between the fetch and the update
        .ok_or(AdminApiError::AlreadyReviewed)?;

    tracing::info!(
        application_id = reviewed.id,
        status = %eriste_api::objects::sellers::SellerApplicationStatus::from(reviewed.status),
        "Seller application reviewed"
    );

    Ok(Json(application_to_response(&reviewed)))
}
