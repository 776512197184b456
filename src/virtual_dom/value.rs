// src/virtual_dom/value.rs

use log::warn;
use serde::{Serialize, Serializer};
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Properties attached to an element or widget node, keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

type HandlerFn = dyn Fn(&mut dyn Any, &[PropertyValue]);

/// An opaque function reference stored in a node's properties, e.g. an event handler.
///
/// Two handlers always compare equal: assertions can pass throwaway stand-ins
/// (`Handler::noop()`) where the widget renders its real handlers.
#[derive(Clone)]
pub struct Handler {
  func: Rc<HandlerFn>,
}

impl Handler {
  /// Wraps a closure that does not need the widget instance.
  pub fn new<F>(f: F) -> Self
  where
    F: Fn(&[PropertyValue]) + 'static,
  {
    Handler {
      func: Rc::new(move |_: &mut dyn Any, args: &[PropertyValue]| f(args)),
    }
  }

  /// Wraps a closure bound to a widget of type `W`.
  ///
  /// When the harness triggers the handler it passes its own widget instance,
  /// so the closure can mutate widget state and invalidate it.
  pub fn bound<W, F>(f: F) -> Self
  where
    W: Any,
    F: Fn(&mut W, &[PropertyValue]) + 'static,
  {
    Handler {
      func: Rc::new(move |instance: &mut dyn Any, args: &[PropertyValue]| {
        match instance.downcast_mut::<W>() {
          Some(widget) => f(widget, args),
          None => warn!(
            "Handler bound to {} was invoked on a different widget type",
            type_name::<W>()
          ),
        }
      }),
    }
  }

  /// A handler that does nothing.
  pub fn noop() -> Self {
    Handler::new(|_| {})
  }

  /// Invokes the handler against `instance`.
  pub fn call(&self, instance: &mut dyn Any, args: &[PropertyValue]) {
    (self.func)(instance, args)
  }
}

impl fmt::Debug for Handler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[function]")
  }
}

impl Serialize for Handler {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("[function]")
  }
}

/// A value held in a node property.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
  Null,
  Bool(bool),
  Number(f64),
  String(String),
  Function(Handler),
  /// Ordered sequence, compared position by position.
  List(Vec<PropertyValue>),
  /// Unordered collection, compared by size and membership.
  Set(Vec<PropertyValue>),
  /// Key/value collection, compared by size and pairs regardless of order.
  Map(Vec<(PropertyValue, PropertyValue)>),
  /// Nested plain structure.
  Object(Properties),
  /// Placeholder written by comparator substitution.
  Sentinel(String),
}

impl PropertyValue {
  /// Builds a `Set`, dropping members equal to one already present.
  pub fn set<I, V>(members: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<PropertyValue>,
  {
    let mut unique: Vec<PropertyValue> = Vec::new();
    for member in members.into_iter().map(Into::into) {
      if !unique.iter().any(|existing| existing == &member) {
        unique.push(member);
      }
    }
    PropertyValue::Set(unique)
  }

  /// Builds a `Map`; a later pair replaces an earlier pair with an equal key.
  pub fn map<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<PropertyValue>,
    V: Into<PropertyValue>,
  {
    let mut entries: Vec<(PropertyValue, PropertyValue)> = Vec::new();
    for (key, value) in pairs {
      let key = key.into();
      let value = value.into();
      match entries.iter_mut().find(|(existing, _)| existing == &key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
      }
    }
    PropertyValue::Map(entries)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      PropertyValue::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      PropertyValue::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_handler(&self) -> Option<&Handler> {
    match self {
      PropertyValue::Function(handler) => Some(handler),
      _ => None,
    }
  }

  /// Label of a comparator placeholder.
  pub fn as_sentinel(&self) -> Option<&str> {
    match self {
      PropertyValue::Sentinel(label) => Some(label),
      _ => None,
    }
  }

  /// Truthiness as used by bare `[attr]` selectors.
  pub fn is_truthy(&self) -> bool {
    match self {
      PropertyValue::Null => false,
      PropertyValue::Bool(b) => *b,
      PropertyValue::Number(n) => *n != 0.0 && !n.is_nan(),
      PropertyValue::String(s) => !s.is_empty(),
      _ => true,
    }
  }
}

impl PartialEq for PropertyValue {
  fn eq(&self, other: &Self) -> bool {
    crate::assertion::compare::values_equal(self, other)
  }
}

impl From<&str> for PropertyValue {
  fn from(value: &str) -> Self {
    PropertyValue::String(value.to_string())
  }
}

impl From<String> for PropertyValue {
  fn from(value: String) -> Self {
    PropertyValue::String(value)
  }
}

impl From<bool> for PropertyValue {
  fn from(value: bool) -> Self {
    PropertyValue::Bool(value)
  }
}

impl From<f64> for PropertyValue {
  fn from(value: f64) -> Self {
    PropertyValue::Number(value)
  }
}

macro_rules! number_from {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for PropertyValue {
        fn from(value: $ty) -> Self {
          PropertyValue::Number(value as f64)
        }
      }
    )*
  };
}

number_from!(i32, i64, u32, u64, usize, f32);

impl From<Handler> for PropertyValue {
  fn from(value: Handler) -> Self {
    PropertyValue::Function(value)
  }
}

impl From<Vec<PropertyValue>> for PropertyValue {
  fn from(value: Vec<PropertyValue>) -> Self {
    PropertyValue::List(value)
  }
}

impl From<Properties> for PropertyValue {
  fn from(value: Properties) -> Self {
    PropertyValue::Object(value)
  }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(PropertyValue::Null, Into::into)
  }
}

/// Helper function to create `Properties` from a list of key-value pairs.
pub fn properties<I, K>(pairs: I) -> Properties
where
  I: IntoIterator<Item = (K, PropertyValue)>,
  K: Into<String>,
{
  pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  #[derive(Default)]
  struct Counter {
    hits: u32,
  }

  #[test]
  fn test_set_deduplicates_members() {
    let set = PropertyValue::set(["a", "b", "a"]);
    match set {
      PropertyValue::Set(members) => assert_eq!(members.len(), 2),
      other => panic!("Expected Set, got {:?}", other),
    }
  }

  #[test]
  fn test_map_last_pair_wins() {
    let map = PropertyValue::map([("a", 1), ("a", 2)]);
    assert_eq!(map, PropertyValue::map([("a", 2)]));
  }

  #[test]
  fn test_truthiness() {
    assert!(!PropertyValue::Null.is_truthy());
    assert!(!PropertyValue::from("").is_truthy());
    assert!(!PropertyValue::from(0).is_truthy());
    assert!(!PropertyValue::Number(f64::NAN).is_truthy());
    assert!(PropertyValue::from("x").is_truthy());
    assert!(PropertyValue::from(Handler::noop()).is_truthy());
    assert!(PropertyValue::List(vec![]).is_truthy());
  }

  #[test]
  fn test_bound_handler_receives_instance() {
    let handler = Handler::bound::<Counter, _>(|counter, args| {
      counter.hits += args.len() as u32 + 1;
    });
    let mut counter = Counter::default();
    handler.call(&mut counter, &[PropertyValue::from(1)]);
    assert_eq!(counter.hits, 2);
  }

  #[test]
  fn test_bound_handler_ignores_other_instances() {
    let handler = Handler::bound::<Counter, _>(|counter, _| counter.hits += 1);
    let mut other = String::from("not a counter");
    handler.call(&mut other, &[]);
    assert_eq!(other, "not a counter");
  }

  #[test]
  fn test_unbound_handler_receives_args() {
    let seen = std::rc::Rc::new(Cell::new(0.0));
    let sink = seen.clone();
    let handler = Handler::new(move |args| {
      sink.set(args.first().and_then(PropertyValue::as_number).unwrap_or(-1.0));
    });
    handler.call(&mut (), &[PropertyValue::from(7)]);
    assert_eq!(seen.get(), 7.0);
  }

  #[test]
  fn test_properties_helper() {
    let props = properties([("key", "one".into()), ("count", 3.into())]);
    assert_eq!(props.get("key").and_then(PropertyValue::as_str), Some("one"));
    assert_eq!(props.get("count").and_then(PropertyValue::as_number), Some(3.0));
  }
}
