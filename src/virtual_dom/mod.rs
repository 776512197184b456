// src/virtual_dom/mod.rs

// Declare submodules within the virtual_dom module
pub mod children;
pub mod printing;
pub mod traverse;
pub mod value;

use crate::widget::{Widget, WidgetConstructor, WidgetType};
use serde::Serialize;
use std::slice;

// Re-export relevant types and functions from the submodules so they can be accessed directly when importing virtual_dom
pub use children::{
  assign_child_properties, assign_properties, replace_child, replace_child_properties,
  replace_properties, ChildIndex,
};
pub use printing::{print_node, print_render};
pub use traverse::{IndexedNode, NodePath, TreeIndex};
pub use value::{properties, Handler, Properties, PropertyValue};

/// A node of a render tree.
#[derive(Debug, Clone, Serialize)]
pub enum RenderNode {
  /// A markup-like tag with properties and children.
  Element(ElementNode),
  /// An embedded widget, identified by its constructor.
  Widget(WidgetNode),
  /// A text leaf.
  Text(String),
  /// Nothing rendered in this position.
  Empty,
}

/// Represents an element in the render tree.
#[derive(Debug, Clone, Serialize)]
pub struct ElementNode {
  /// The tag name, e.g., "div", "span", etc.
  pub tag: String,
  pub properties: Properties,
  /// `None` when the element was declared without a children list.
  pub children: Option<Vec<RenderNode>>,
}

/// Represents a nested widget in the render tree.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetNode {
  pub constructor: WidgetConstructor,
  pub properties: Properties,
  /// `None` when the widget was declared without a children list.
  pub children: Option<Vec<RenderNode>>,
}

/// The output of one render pass: a single node or a fragment.
#[derive(Debug, Clone, Serialize)]
pub enum Render {
  Node(RenderNode),
  Fragment(Vec<RenderNode>),
  /// Stands in for a node a selector failed to find. Never equal to anything.
  Missing,
}

impl ElementNode {
  /// Creates an element without properties or children.
  pub fn new(tag: impl Into<String>) -> Self {
    ElementNode {
      tag: tag.into(),
      properties: Properties::new(),
      children: None,
    }
  }

  pub fn with_properties(mut self, properties: Properties) -> Self {
    self.properties = properties;
    self
  }

  pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
    self.children = Some(children);
    self
  }
}

impl WidgetNode {
  pub fn new(constructor: WidgetConstructor, properties: Properties) -> Self {
    WidgetNode {
      constructor,
      properties,
      children: None,
    }
  }

  pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
    self.children = Some(children);
    self
  }
}

impl RenderNode {
  pub fn is_element_node(&self) -> bool {
    matches!(self, RenderNode::Element(_))
  }

  pub fn is_widget_node(&self) -> bool {
    matches!(self, RenderNode::Widget(_))
  }

  /// Properties of element and widget nodes.
  pub fn properties(&self) -> Option<&Properties> {
    match self {
      RenderNode::Element(elem) => Some(&elem.properties),
      RenderNode::Widget(widget) => Some(&widget.properties),
      _ => None,
    }
  }

  pub fn properties_mut(&mut self) -> Option<&mut Properties> {
    match self {
      RenderNode::Element(elem) => Some(&mut elem.properties),
      RenderNode::Widget(widget) => Some(&mut widget.properties),
      _ => None,
    }
  }

  /// Declared children of element and widget nodes.
  pub fn children(&self) -> Option<&Vec<RenderNode>> {
    match self {
      RenderNode::Element(elem) => elem.children.as_ref(),
      RenderNode::Widget(widget) => widget.children.as_ref(),
      _ => None,
    }
  }

  /// The children slot itself, for nodes that can hold children.
  pub fn children_slot_mut(&mut self) -> Option<&mut Option<Vec<RenderNode>>> {
    match self {
      RenderNode::Element(elem) => Some(&mut elem.children),
      RenderNode::Widget(widget) => Some(&mut widget.children),
      _ => None,
    }
  }

  /// Looks up a single property.
  pub fn property(&self, name: &str) -> Option<&PropertyValue> {
    self.properties().and_then(|props| props.get(name))
  }
}

impl PartialEq for RenderNode {
  fn eq(&self, other: &Self) -> bool {
    crate::assertion::nodes_equal(self, other)
  }
}

impl Render {
  /// The top-level nodes of this render.
  pub fn roots(&self) -> &[RenderNode] {
    match self {
      Render::Node(node) => slice::from_ref(node),
      Render::Fragment(nodes) => nodes,
      Render::Missing => &[],
    }
  }

  pub fn roots_mut(&mut self) -> &mut [RenderNode] {
    match self {
      Render::Node(node) => slice::from_mut(node),
      Render::Fragment(nodes) => nodes,
      Render::Missing => &mut [],
    }
  }

  /// Resolves an index path produced by `TreeIndex`.
  pub fn node_at(&self, path: &[usize]) -> Option<&RenderNode> {
    let (first, rest) = path.split_first()?;
    let mut node = self.roots().get(*first)?;
    for index in rest {
      node = node.children()?.get(*index)?;
    }
    Some(node)
  }

  pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut RenderNode> {
    let (first, rest) = path.split_first()?;
    let mut node = self.roots_mut().get_mut(*first)?;
    for index in rest {
      node = node.children_slot_mut()?.as_mut()?.get_mut(*index)?;
    }
    Some(node)
  }
}

impl From<RenderNode> for Render {
  fn from(node: RenderNode) -> Self {
    Render::Node(node)
  }
}

impl From<Vec<RenderNode>> for Render {
  fn from(nodes: Vec<RenderNode>) -> Self {
    Render::Fragment(nodes)
  }
}

impl From<WidgetNode> for Render {
  fn from(node: WidgetNode) -> Self {
    Render::Node(node.into())
  }
}

impl From<ElementNode> for Render {
  fn from(node: ElementNode) -> Self {
    Render::Node(node.into())
  }
}

impl From<ElementNode> for RenderNode {
  fn from(node: ElementNode) -> Self {
    RenderNode::Element(node)
  }
}

impl From<WidgetNode> for RenderNode {
  fn from(node: WidgetNode) -> Self {
    RenderNode::Widget(node)
  }
}

impl From<&str> for RenderNode {
  fn from(text: &str) -> Self {
    RenderNode::Text(text.to_string())
  }
}

impl From<String> for RenderNode {
  fn from(text: String) -> Self {
    RenderNode::Text(text)
  }
}

impl PartialEq for Render {
  fn eq(&self, other: &Self) -> bool {
    crate::assertion::renders_equal(self, other)
  }
}

pub fn is_element_node(node: &RenderNode) -> bool {
  node.is_element_node()
}

pub fn is_widget_node(node: &RenderNode) -> bool {
  node.is_widget_node()
}

/// Creates an element node with a children list.
///
/// # Parameters
/// - `tag`: The tag name, e.g. "div".
/// - `properties`: The element's properties.
/// - `children`: Child nodes in order. Use `ElementNode::new` for an element
///   declared without a children list.
///
/// # Returns
/// A `RenderNode::Element`.
pub fn v(tag: impl Into<String>, properties: Properties, children: Vec<RenderNode>) -> RenderNode {
  RenderNode::Element(
    ElementNode::new(tag)
      .with_properties(properties)
      .with_children(children),
  )
}

/// Creates a text node.
pub fn text(content: impl Into<String>) -> RenderNode {
  RenderNode::Text(content.into())
}

/// Creates a widget node for the widget type `W`.
///
/// # Parameters
/// - `properties`: The properties passed to the widget.
///
/// # Returns
/// A `WidgetNode` without children; add them with `WidgetNode::with_children`.
/// Convert with `.into()` where a `RenderNode` or `Render` is needed.
pub fn w<W: Widget + Default>(properties: Properties) -> WidgetNode {
  WidgetNode::new(WidgetConstructor::Type(WidgetType::of::<W>()), properties)
}

/// Creates a widget node that refers to a registry entry by name.
pub fn registry(name: impl Into<String>, properties: Properties) -> WidgetNode {
  WidgetNode::new(WidgetConstructor::Registry(name.into()), properties)
}
