//! Order Index Handler

use salvo::prelude::*;

use morsel::orders::{MAX_RECENT_ORDERS, OrderNumber, UserId};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersEnvelope},
};

/// Order Index Handler
///
/// Looks up one order with `?orderNumber=`, a user's history with `?userId=`, or otherwise the
/// most recent orders, at most `?limit=` of them.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "No order has that number"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let orders = &state.app.orders;

    if let Some(number) = req.query::<String>("orderNumber") {
        let number: OrderNumber = number.parse().or_400("invalid orderNumber")?;

        let order = orders
            .get_order_by_number(number)
            .await
            .map_err(into_status_error)?;

        return Ok(Json(OrdersEnvelope::single(order)));
    }

    let listed = if let Some(user) = req.query::<String>("userId") {
        let user = UserId::new(user).or_400("invalid userId")?;

        orders.list_user_orders(user).await
    } else {
        let limit = req
            .query::<String>("limit")
            .map(|limit| limit.parse::<u32>())
            .transpose()
            .or_400("invalid limit")?
            .unwrap_or(MAX_RECENT_ORDERS);

        orders.list_recent_orders(limit).await
    };

    Ok(Json(OrdersEnvelope::many(
        listed.map_err(into_status_error)?,
    )))
}
