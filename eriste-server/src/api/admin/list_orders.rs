use axum::{Json, extract::Query, response::IntoResponse};
use eriste_api::objects::admin::ListOrdersQuery;
use eriste_api::objects::clamp_pagination;
use eriste_core::entities::orders::ListOrders;
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, order_to_admin_response};

/// `GET /orders` — list orders, newest first.
///
/// Supports pagination plus optional `status` and `order_ref` filters.
pub async fn list_orders(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, AdminApiError> {
    let (limit, offset) = clamp_pagination(query.limit, query.offset);

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let orders = processor
        .process(ListOrders {
            limit,
            offset,
            status: query.status.map(Into::into),
            order_ref: query.order_ref,
        })
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(
        orders
            .iter()
            .map(order_to_admin_response)
            .collect::<Vec<_>>(),
    ))
}
