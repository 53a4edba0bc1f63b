//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Helpers for pulling injected values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The injected application state.
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>()
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(
                type_name = std::any::type_name::<T>(),
                "depot value was not injected"
            );

            StatusError::internal_server_error()
        })
    }
}
