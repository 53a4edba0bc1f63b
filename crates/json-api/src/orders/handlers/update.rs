//! Update Order Status Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderEnvelope, UpdateOrderStatusRequest},
    },
};

/// Update Order Status Handler
///
/// Moves an order along its lifecycle.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let order = order.into_inner();
    let status = json.into_inner().status;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", tracing::field::display(&status));

    let updated = state
        .app
        .orders
        .update_status(order.into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, status = %updated.status, "updated order status");

    Ok(Json(updated.into()))
}
