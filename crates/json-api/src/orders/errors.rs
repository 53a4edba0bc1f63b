//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use morsel::orders::{ErrorKind, OrderError};

pub(crate) fn into_status_error(error: OrderError) -> StatusError {
    match error.kind() {
        ErrorKind::Validation => {
            warn!(%error, "rejected order request");

            StatusError::bad_request().brief(error.to_string())
        }
        ErrorKind::NotFound => StatusError::not_found().brief("Order not found"),
        ErrorKind::Conflict => {
            warn!(%error, "conflicting order request");

            StatusError::conflict().brief(error.to_string())
        }
        ErrorKind::Persistence => {
            error!(error = ?error, "order storage failed");

            StatusError::internal_server_error()
        }
    }
}
