// src/assertion/compare.rs

use crate::virtual_dom::{Properties, PropertyValue};
use serde::Serialize;
use std::fmt;

/// One difference between two property maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PropertyDelta {
  /// Present on both sides with different values.
  Changed(String),
  /// Only present on the expected side.
  Added(String),
  /// Only present on the actual side.
  Removed(String),
}

impl PropertyDelta {
  pub fn key(&self) -> &str {
    match self {
      PropertyDelta::Changed(key) | PropertyDelta::Added(key) | PropertyDelta::Removed(key) => key,
    }
  }
}

impl fmt::Display for PropertyDelta {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PropertyDelta::Changed(key) => write!(f, "~{}", key),
      PropertyDelta::Added(key) => write!(f, "+{}", key),
      PropertyDelta::Removed(key) => write!(f, "-{}", key),
    }
  }
}

/// Compares two property maps and returns the keys that differ, in key order.
///
/// Key order never matters. Values are compared with `values_equal`.
pub fn diff_properties(actual: &Properties, expected: &Properties) -> Vec<PropertyDelta> {
  let mut deltas = Vec::new();

  // Find changed or removed properties
  for (key, actual_value) in actual {
    match expected.get(key) {
      Some(expected_value) if !values_equal(actual_value, expected_value) => {
        deltas.push(PropertyDelta::Changed(key.clone()));
      }
      None => {
        deltas.push(PropertyDelta::Removed(key.clone()));
      }
      _ => {}
    }
  }

  // Find properties only the expected side declares
  for key in expected.keys() {
    if !actual.contains_key(key) {
      deltas.push(PropertyDelta::Added(key.clone()));
    }
  }

  deltas.sort_by(|a, b| a.key().cmp(b.key()));
  deltas
}

/// Semantic equality of two property values.
///
/// Functions match any function. Sets match by size and membership, maps by
/// size and key/value pairs, objects recursively; lists are positional.
pub fn values_equal(actual: &PropertyValue, expected: &PropertyValue) -> bool {
  use PropertyValue::*;

  match (actual, expected) {
    (Null, Null) => true,
    (Bool(a), Bool(b)) => a == b,
    // NaN matches NaN so a render always equals itself
    (Number(a), Number(b)) => a == b || (a.is_nan() && b.is_nan()),
    (String(a), String(b)) => a == b,
    (Function(_), Function(_)) => true,
    (List(a), List(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y)),
    (Set(a), Set(b)) => pairs_off(a, b, values_equal),
    (Map(a), Map(b)) => pairs_off(a, b, |(key, value), (other_key, other_value)| {
      values_equal(key, other_key) && values_equal(value, other_value)
    }),
    (Object(a), Object(b)) => diff_properties(a, b).is_empty(),
    (Sentinel(a), Sentinel(b)) => a == b,
    _ => false,
  }
}

/// Whether every item of `a` can be matched to a distinct item of `b`, with
/// both sides the same size.
fn pairs_off<T, F>(a: &[T], b: &[T], eq: F) -> bool
where
  F: Fn(&T, &T) -> bool,
{
  if a.len() != b.len() {
    return false;
  }
  let mut taken = vec![false; b.len()];
  a.iter().all(|item| {
    match (0..b.len()).find(|&candidate| !taken[candidate] && eq(item, &b[candidate])) {
      Some(candidate) => {
        taken[candidate] = true;
        true
      }
      None => false,
    }
  })
}
