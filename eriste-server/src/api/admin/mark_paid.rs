use axum::{Json, extract::Path, response::IntoResponse};
use eriste_core::entities::OrderStatus;
use eriste_core::entities::orders::{GetOrderById, MarkOrderPaid};
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, order_to_admin_response};

/// `POST /orders/{order_id}/mark-paid` — settle an order by hand.
///
/// Idempotent: marking an already-paid order returns it unchanged.
pub async fn mark_paid(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order = processor
        .process(GetOrderById { order_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    if order.status == OrderStatus::Paid {
        return Ok(Json(order_to_admin_response(&order)));
    }

    if let Some(updated) = processor
        .process(MarkOrderPaid { order_id })
        .await
        .map_err(AdminApiError::Database)?
    {
        tracing::info!(order_ref = %updated.order_ref, "Order manually marked paid");
        return Ok(Json(order_to_admin_response(&updated)));
    }

    // Lost the race to a gateway callback; the order is paid either way.
    let settled = processor
        .process(GetOrderById { order_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    Ok(Json(order_to_admin_response(&settled)))
}
