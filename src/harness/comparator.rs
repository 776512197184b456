// src/harness/comparator.rs

use crate::selector::{Selector, SelectorError};
use crate::virtual_dom::{PropertyValue, Render};
use log::trace;
use std::fmt;
use std::rc::Rc;

type Predicate = Rc<dyn Fn(&PropertyValue) -> bool>;

/// Replaces exact comparison of one property with a predicate.
///
/// Useful for values a test cannot predict, such as generated ids.
#[derive(Clone)]
pub struct CustomComparator {
  pub selector: String,
  pub property: String,
  comparator: Predicate,
}

impl CustomComparator {
  pub fn new<F>(selector: impl Into<String>, property: impl Into<String>, comparator: F) -> Self
  where
    F: Fn(&PropertyValue) -> bool + 'static,
  {
    CustomComparator {
      selector: selector.into(),
      property: property.into(),
      comparator: Rc::new(comparator),
    }
  }

  /// Whether the actual value satisfies the predicate.
  pub fn accepts(&self, value: &PropertyValue) -> bool {
    (self.comparator)(value)
  }

  fn label(&self) -> String {
    format!("comparator(selector={}, {})", self.selector, self.property)
  }
}

impl fmt::Debug for CustomComparator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustomComparator")
      .field("selector", &self.selector)
      .field("property", &self.property)
      .finish()
  }
}

/// Swaps compared properties for sentinels on both sides.
///
/// The expected side always receives the plain sentinel; the actual side
/// receives it only when the predicate accepts the value, so a rejected value
/// surfaces as a ` FAILED` sentinel in the diff. Nodes lacking the property
/// are left alone.
pub fn apply_comparators(
  comparators: &[CustomComparator],
  actual: &mut Render,
  expected: &mut Render,
) -> Result<(), SelectorError> {
  for comparator in comparators {
    let selector = Selector::parse(&comparator.selector)?;
    let label = comparator.label();

    for path in selector.select_paths(expected) {
      let slot = expected
        .node_at_mut(&path)
        .and_then(|node| node.properties_mut())
        .and_then(|props| props.get_mut(&comparator.property));
      if let Some(value) = slot {
        *value = PropertyValue::Sentinel(label.clone());
      }
    }

    for path in selector.select_paths(actual) {
      let slot = actual
        .node_at_mut(&path)
        .and_then(|node| node.properties_mut())
        .and_then(|props| props.get_mut(&comparator.property));
      if let Some(value) = slot {
        let accepted = comparator.accepts(value);
        trace!("{} accepted {:?}: {}", label, value, accepted);
        *value = if accepted {
          PropertyValue::Sentinel(label.clone())
        } else {
          PropertyValue::Sentinel(format!("{} FAILED", label))
        };
      }
    }
  }
  Ok(())
}
