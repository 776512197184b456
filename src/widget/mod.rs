// src/widget/mod.rs

/// The `widget` module describes the boundary with the widget lifecycle: the
/// `Widget` trait a harnessed widget implements, widget constructor identity,
/// and the invalidation signal a widget uses to report stale output.
pub mod invalidator;

pub use invalidator::Invalidator;

use crate::virtual_dom::{Properties, Render, RenderNode};
use serde::{Serialize, Serializer};
use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Access to a widget as `Any`, so bound handlers can reach the concrete type.
pub trait AsAny: Any {
  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }
}

/// Lifecycle operations the harness drives on a widget instance.
pub trait Widget: AsAny {
  /// Replaces the widget's current properties.
  fn set_properties(&mut self, _properties: Properties) {}

  /// Replaces the widget's current children.
  fn set_children(&mut self, _children: Vec<RenderNode>) {}

  /// Produces the widget's render tree.
  fn render(&mut self) -> Render;

  /// Called once after creation with the signal to fire after internal state changes.
  fn attach_invalidator(&mut self, _invalidator: Invalidator) {}
}

/// A concrete widget type usable as a constructor reference.
#[derive(Clone, Copy)]
pub struct WidgetType {
  id: TypeId,
  name: &'static str,
  factory: fn() -> Box<dyn Widget>,
}

fn create<W: Widget + Default>() -> Box<dyn Widget> {
  Box::new(W::default())
}

impl WidgetType {
  /// The constructor reference for `W`.
  ///
  /// Two references are equal exactly when they name the same type. The
  /// factory builds `W::default()`, which is how a harness creates the widget
  /// under test.
  pub fn of<W: Widget + Default>() -> Self {
    WidgetType {
      id: TypeId::of::<W>(),
      name: type_name::<W>(),
      factory: create::<W>,
    }
  }

  /// The Rust type name, used in diffs and error messages.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Creates a fresh instance of the widget.
  pub fn instantiate(&self) -> Box<dyn Widget> {
    (self.factory)()
  }
}

impl PartialEq for WidgetType {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for WidgetType {}

impl fmt::Debug for WidgetType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// How a widget node names the widget it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetConstructor {
  /// A concrete widget type, equal only to the same type.
  Type(WidgetType),
  /// An opaque registry entry, equal only to the same name.
  Registry(String),
}

impl WidgetConstructor {
  pub fn name(&self) -> &str {
    match self {
      WidgetConstructor::Type(widget_type) => widget_type.name(),
      WidgetConstructor::Registry(name) => name,
    }
  }
}

impl fmt::Display for WidgetConstructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Serialize for WidgetConstructor {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}
