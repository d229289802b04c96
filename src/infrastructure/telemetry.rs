use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "authgate=debug,sqlx=warn";

/// Installs the global tracing subscriber
///
/// Honors `RUST_LOG` and falls back to [`DEFAULT_LOG_FILTER`]. Fails if a
/// subscriber was already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .try_init()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_second_init_fails() {
    // Another test may have installed a subscriber first; either way the
    // second call must report it instead of panicking
    let _ = init_tracing();
    assert!(init_tracing().is_err());
  }
}
