use crate::config::{LogFormat, TelemetryConfig};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("a global subscriber is already installed")]
    Subscriber(#[from] TryInitError),
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.log_level)?,
    };

    let layer = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .compact()
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
        value: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_filter_for_module_directives() {
        assert!(build_filter("info,munda_ai=debug").is_ok());
    }

    #[test]
    fn rejects_malformed_directive() {
        match build_filter("munda_ai=loud") {
            Err(TelemetryError::EnvFilter { value, .. }) => assert_eq!(value, "munda_ai=loud"),
            other => panic!("expected env filter error, got {other:?}"),
        }
    }

    #[test]
    fn json_subscriber_installs_once() {
        let config = TelemetryConfig {
            log_level: "munda_ai=debug".to_string(),
            format: LogFormat::Json,
        };

        // The first call may lose to another test that installed a subscriber.
        let _ = init(&config);
        match init(&config) {
            Err(TelemetryError::Subscriber(_)) => {}
            other => panic!("expected a second install to fail, got {other:?}"),
        }
    }
}
