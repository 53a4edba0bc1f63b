//! Reorder Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::ReorderEnvelope},
};

/// Reorder Handler
///
/// Returns the cart lines that reproduce a past order, at the prices it was placed with.
#[endpoint(
    tags("orders"),
    summary = "Reorder",
    responses(
        (status_code = StatusCode::OK, description = "Cart lines rebuilt"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReorderEnvelope>, StatusError> {
    let state = depot.state_or_500()?;

    let items = state
        .app
        .orders
        .reorder(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReorderEnvelope {
        success: true,
        items: items.into_iter().map(Into::into).collect(),
    }))
}
