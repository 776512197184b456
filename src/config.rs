// src/config.rs

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::env;

pub const LOG_LEVEL_ENV: &str = "HARNESS_LOG_LEVEL";
pub const COLOR_DIFF_ENV: &str = "HARNESS_COLOR_DIFF";

/// Settings shared by every harness in a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
  /// Fallback `env_logger` filter when `HARNESS_LOG_LEVEL` is unset.
  pub log_level: String,
  /// Color the diff lines of logged assertion failures.
  pub color_diff: bool,
}

impl Default for HarnessConfig {
  fn default() -> Self {
    HarnessConfig {
      log_level: "warn".to_string(),
      color_diff: false,
    }
  }
}

impl HarnessConfig {
  /// Defaults overridden by `HARNESS_LOG_LEVEL` and `HARNESS_COLOR_DIFF`.
  pub fn from_env() -> Self {
    let mut config = HarnessConfig::default();
    if let Ok(level) = env::var(LOG_LEVEL_ENV) {
      if !level.trim().is_empty() {
        config.log_level = level.trim().to_string();
      }
    }
    if let Ok(flag) = env::var(COLOR_DIFF_ENV) {
      config.color_diff = matches!(
        flag.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
      );
    }
    config
  }

  pub fn from_json(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }
}
