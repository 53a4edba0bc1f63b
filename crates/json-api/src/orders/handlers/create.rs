//! Create Order Handler

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{CreateOrderRequest, OrderEnvelope},
    },
};

/// Create Order Handler
///
/// Places an order from a cart snapshot.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner().into_new_order_request(state.currency)?;

    let order = state
        .app
        .orders
        .create_order(request)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
