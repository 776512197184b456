// src/error.rs

use crate::assertion::AssertionError;
use crate::selector::SelectorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
  #[error(transparent)]
  Assertion(#[from] AssertionError),

  #[error("Harness only supports widget types as constructors, got registry entry `{0}`")]
  UnsupportedConstructor(String),

  #[error("Harnessed widget changed constructor from `{expected}` to `{actual}`")]
  ConstructorChanged { expected: &'static str, actual: String },

  #[error(transparent)]
  Selector(#[from] SelectorError),

  #[error("Index of \"{0}\" is not resolving to a valid target")]
  InvalidIndex(String),

  #[error("Invalid harness configuration: {0}")]
  Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
