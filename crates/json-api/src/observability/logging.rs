//! Log output

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, logging::LogFormat};

use super::ObservabilityError;

/// Transport and driver crates stay at `warn` unless the operator names them explicitly.
const QUIET_DEPENDENCIES: &str = "h2=warn,hyper=warn,sqlx=warn";

pub(super) fn install(config: &ServerConfig) -> Result<(), ObservabilityError> {
    let filter = order_filter(&config.logging.log_level)?;

    match config.logging.log_format {
        LogFormat::Compact => install_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true),
        ),
        LogFormat::Json => install_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false),
        ),
    }
}

/// Directives in `log_level` replace the quiet defaults for the same target.
fn order_filter(log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    Ok(EnvFilter::try_new(format!("{QUIET_DEPENDENCIES},{log_level}"))?)
}

fn install_layer<L>(filter: EnvFilter, layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_and_per_target_directives_parse() {
        assert!(order_filter("info").is_ok());
        assert!(order_filter("warn,morsel=debug,sqlx=info").is_ok());
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let result = order_filter("morsel=chatty");

        assert!(
            matches!(result, Err(ObservabilityError::InvalidFilter(_))),
            "expected InvalidFilter, got {result:?}"
        );
    }
}
