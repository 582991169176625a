use axum::{Json, extract::Query, response::IntoResponse};
use eriste_api::objects::admin::ListSellerApplicationsQuery;
use eriste_api::objects::clamp_pagination;
use eriste_core::entities::seller_applications::ListSellerApplications;
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, application_to_response};

/// `GET /seller-applications` — list applications, oldest unreviewed first.
pub async fn list_seller_applications(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListSellerApplicationsQuery>,
) -> Result<impl IntoResponse, AdminApiError> {
    let (limit, offset) = clamp_pagination(query.limit, query.offset);

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let applications = processor
        .process(ListSellerApplications {
            limit,
            offset,
            status: query.status.map(Into::into),
        })
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(
        applications
            .iter()
            .map(application_to_response)
            .collect::<Vec<_>>(),
    ))
}
