//! App Router

use salvo::Router;

use crate::{healthcheck, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler)
                        .push(Router::with_path("reorder").get(orders::reorder::handler)),
                ),
        )
}
