// src/assertion/mod.rs

// Structural equality of render trees.

pub mod compare;
pub mod error;
pub mod report;

pub use compare::{diff_properties, values_equal, PropertyDelta};
pub use error::{AssertionError, MismatchKind, Operand};
pub use report::diff_lines;

use crate::virtual_dom::{NodePath, Properties, Render, RenderNode};
use log::trace;

struct Failure {
  kind: MismatchKind,
  path: NodePath,
  actual: Operand,
  expected: Operand,
}

impl Failure {
  fn into_error(self, message: Option<&str>) -> AssertionError {
    AssertionError::new(message, self.kind, self.path, self.actual, self.expected)
  }
}

type Compared = Result<(), Failure>;

fn fail(kind: MismatchKind, path: &NodePath, actual: Operand, expected: Operand) -> Compared {
  Err(Failure {
    kind,
    path: path.clone(),
    actual,
    expected,
  })
}

/// Asserts that `actual` matches `expected`.
///
/// Fragments compare element-wise and in order; the first mismatch stops the
/// comparison. `message` is appended to the failure message.
pub fn assert_render(
  actual: &Render,
  expected: &Render,
  message: Option<&str>,
) -> Result<(), AssertionError> {
  trace!("Asserting render, message: {:?}", message);
  compare_renders(actual, expected).map_err(|failure| failure.into_error(message))
}

/// Whether two renders match under `assert_render`.
pub fn renders_equal(actual: &Render, expected: &Render) -> bool {
  compare_renders(actual, expected).is_ok()
}

/// Whether two nodes match under `assert_render`.
pub fn nodes_equal(actual: &RenderNode, expected: &RenderNode) -> bool {
  compare_nodes(actual, expected, &mut vec![0]).is_ok()
}

fn compare_renders(actual: &Render, expected: &Render) -> Compared {
  let mut path = NodePath::new();
  match (actual, expected) {
    (Render::Fragment(a), Render::Fragment(e)) => compare_sequences(a, e, &mut path),
    (Render::Node(a), Render::Node(e)) => {
      path.push(0);
      compare_nodes(a, e, &mut path)
    }
    _ => fail(
      MismatchKind::NodeKind,
      &path,
      Operand::Render(actual.clone()),
      Operand::Render(expected.clone()),
    ),
  }
}

fn compare_sequences(actual: &[RenderNode], expected: &[RenderNode], path: &mut NodePath) -> Compared {
  if actual.len() != expected.len() {
    return fail(
      MismatchKind::Length,
      path,
      Operand::Nodes(actual.to_vec()),
      Operand::Nodes(expected.to_vec()),
    );
  }
  for (position, (actual_child, expected_child)) in actual.iter().zip(expected).enumerate() {
    path.push(position);
    let result = compare_nodes(actual_child, expected_child, path);
    path.pop();
    // Report against the whole sequence rather than the offending child
    result.map_err(|failure| Failure {
      actual: Operand::Nodes(actual.to_vec()),
      expected: Operand::Nodes(expected.to_vec()),
      ..failure
    })?;
  }
  Ok(())
}

fn compare_properties(actual: &Properties, expected: &Properties, path: &NodePath) -> Compared {
  let deltas = diff_properties(actual, expected);
  if deltas.is_empty() {
    return Ok(());
  }
  fail(
    MismatchKind::Properties(deltas),
    path,
    Operand::Properties(actual.clone()),
    Operand::Properties(expected.clone()),
  )
}

fn compare_nodes(actual: &RenderNode, expected: &RenderNode, path: &mut NodePath) -> Compared {
  match (actual, expected) {
    (RenderNode::Element(a), RenderNode::Element(e)) => {
      if a.tag != e.tag {
        return fail(
          MismatchKind::Tag,
          path,
          Operand::Tag(a.tag.clone()),
          Operand::Tag(e.tag.clone()),
        );
      }
      compare_properties(&a.properties, &e.properties, path)?;
      // Absent children and an empty list are the same for elements
      compare_sequences(
        a.children.as_deref().unwrap_or(&[]),
        e.children.as_deref().unwrap_or(&[]),
        path,
      )
    }
    (RenderNode::Widget(a), RenderNode::Widget(e)) => {
      if a.constructor != e.constructor {
        return fail(
          MismatchKind::Constructor,
          path,
          Operand::Constructor(a.constructor.clone()),
          Operand::Constructor(e.constructor.clone()),
        );
      }
      compare_properties(&a.properties, &e.properties, path)?;
      match (&a.children, &e.children) {
        (Some(actual_children), Some(expected_children)) => {
          compare_sequences(actual_children, expected_children, path)
        }
        (None, None) => Ok(()),
        _ => fail(
          MismatchKind::Children,
          path,
          Operand::Children(a.children.clone()),
          Operand::Children(e.children.clone()),
        ),
      }
    }
    (RenderNode::Text(a), RenderNode::Text(e)) if a == e => Ok(()),
    (RenderNode::Text(_), RenderNode::Text(_)) => fail(
      MismatchKind::Text,
      path,
      Operand::Node(actual.clone()),
      Operand::Node(expected.clone()),
    ),
    (RenderNode::Empty, RenderNode::Empty) => Ok(()),
    _ => fail(
      MismatchKind::NodeKind,
      path,
      Operand::Node(actual.clone()),
      Operand::Node(expected.clone()),
    ),
  }
}
