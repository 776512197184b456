// src/utils/logging.rs

use crate::config::{HarnessConfig, LOG_LEVEL_ENV};
use env_logger::{Builder, Env};
use std::sync::Once;

/// Ensures that logging is initialized only once
static INIT: Once = Once::new();

/// Initializes logging using `env_logger`.
///
/// The filter comes from the `HARNESS_LOG_LEVEL` environment variable and falls
/// back to `config.log_level`. Output goes through the test writer so it is
/// captured per test. Later calls are no-ops, and a logger installed elsewhere
/// is left in place.
pub fn initialize_logging(config: &HarnessConfig) {
  INIT.call_once(|| {
    let env = Env::default().filter_or(LOG_LEVEL_ENV, config.log_level.as_str());
    if let Err(e) = Builder::from_env(env).is_test(true).try_init() {
      eprintln!("Logger already initialized: {}", e);
    }
    log::debug!("Logging initialized");
  });
}
