// src/assertion/error.rs

use super::compare::PropertyDelta;
use super::report::diff_lines;
use crate::virtual_dom::printing::{print_node, print_nodes, print_properties, print_render};
use crate::virtual_dom::{NodePath, Properties, Render, RenderNode};
use crate::widget::WidgetConstructor;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub(crate) const RENDER_FAIL_MESSAGE: &str = "Render unexpected";

/// What kind of difference stopped the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MismatchKind {
  /// The two sides are different kinds of node.
  NodeKind,
  Tag,
  Constructor,
  Properties(Vec<PropertyDelta>),
  /// Child sequences of different lengths.
  Length,
  /// Only one widget node declares children.
  Children,
  Text,
}

impl fmt::Display for MismatchKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MismatchKind::NodeKind => f.write_str("node kinds differ"),
      MismatchKind::Tag => f.write_str("tags differ"),
      MismatchKind::Constructor => f.write_str("widget constructors differ"),
      MismatchKind::Properties(deltas) => {
        let keys: Vec<String> = deltas.iter().map(ToString::to_string).collect();
        write!(f, "properties differ ({})", keys.join(", "))
      }
      MismatchKind::Length => f.write_str("child counts differ"),
      MismatchKind::Children => f.write_str("only one widget node declares children"),
      MismatchKind::Text => f.write_str("text differs"),
    }
  }
}

/// One side of a failed comparison.
#[derive(Debug, Clone, Serialize)]
pub enum Operand {
  Render(Render),
  Node(RenderNode),
  Nodes(Vec<RenderNode>),
  Tag(String),
  Constructor(WidgetConstructor),
  Properties(Properties),
  Children(Option<Vec<RenderNode>>),
}

impl Operand {
  /// Text form used for the line diff.
  pub fn print(&self) -> String {
    match self {
      Operand::Render(render) => print_render(render),
      Operand::Node(node) => print_node(node),
      Operand::Nodes(nodes) => print_nodes(nodes),
      Operand::Tag(tag) => tag.clone(),
      Operand::Constructor(constructor) => constructor.to_string(),
      Operand::Properties(props) => print_properties(props),
      Operand::Children(Some(children)) => print_nodes(children),
      Operand::Children(None) => "(no children)".to_string(),
    }
  }
}

/// Raised when an actual render does not match the expected one.
///
/// Displays as the message, the mismatch kind with its path, and a plain line
/// diff of the two operands.
#[derive(Error, Debug, Clone, Serialize)]
#[error("{message}\n{kind} at [{}]\n{}", format_path(.path), plain_diff(.actual, .expected))]
pub struct AssertionError {
  pub message: String,
  pub kind: MismatchKind,
  /// Index path of the node where the mismatch was detected.
  pub path: NodePath,
  pub actual: Operand,
  pub expected: Operand,
}

impl AssertionError {
  pub(crate) fn new(
    message: Option<&str>,
    kind: MismatchKind,
    path: NodePath,
    actual: Operand,
    expected: Operand,
  ) -> Self {
    let message = match message {
      Some(annotation) => format!("{}: {}", RENDER_FAIL_MESSAGE, annotation),
      None => RENDER_FAIL_MESSAGE.to_string(),
    };
    AssertionError {
      message,
      kind,
      path,
      actual,
      expected,
    }
  }

  /// Line diff of the serialized operands.
  pub fn diff(&self, color: bool) -> String {
    diff_lines(&self.actual.print(), &self.expected.print(), color)
  }

  pub fn actual_json(&self) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(&self.actual)
  }

  pub fn expected_json(&self) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(&self.expected)
  }
}

fn format_path(path: &[usize]) -> String {
  let parts: Vec<String> = path.iter().map(ToString::to_string).collect();
  parts.join(", ")
}

fn plain_diff(actual: &Operand, expected: &Operand) -> String {
  diff_lines(&actual.print(), &expected.print(), false)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::virtual_dom::text;

  #[test]
  fn test_display_layout() {
    let err = AssertionError::new(
      Some("note"),
      MismatchKind::Text,
      vec![0, 2],
      Operand::Node(text("a")),
      Operand::Node(text("b")),
    );
    assert_eq!(
      err.to_string(),
      "Render unexpected: note\ntext differs at [0, 2]\n- actual\n+ expected\n- \"a\"\n+ \"b\"\n"
    );
  }
}
