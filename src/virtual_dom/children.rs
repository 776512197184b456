// src/virtual_dom/children.rs

// In-place rewrites of expected trees: patch properties or swap children of a
// node addressed by index or by a comma-separated index path.

use super::{Properties, RenderNode};
use crate::error::{HarnessError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Addresses a child: a direct position or a path such as `"1,0,2"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildIndex {
  Position(usize),
  Path(String),
}

impl From<usize> for ChildIndex {
  fn from(position: usize) -> Self {
    ChildIndex::Position(position)
  }
}

impl From<&str> for ChildIndex {
  fn from(path: &str) -> Self {
    ChildIndex::Path(path.to_string())
  }
}

impl fmt::Display for ChildIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChildIndex::Position(position) => write!(f, "{}", position),
      ChildIndex::Path(path) => f.write_str(path),
    }
  }
}

impl ChildIndex {
  fn positions(&self) -> Result<Vec<usize>> {
    match self {
      ChildIndex::Position(position) => Ok(vec![*position]),
      ChildIndex::Path(path) => path
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| self.invalid()),
    }
  }

  fn invalid(&self) -> HarnessError {
    HarnessError::InvalidIndex(self.to_string())
  }
}

/// Merges `properties` into the target's properties.
pub fn assign_properties(target: &mut RenderNode, properties: Properties) -> Result<()> {
  let props = target
    .properties_mut()
    .ok_or_else(|| HarnessError::InvalidIndex("<target>".to_string()))?;
  props.extend(properties);
  Ok(())
}

/// Replaces the target's properties.
pub fn replace_properties(target: &mut RenderNode, properties: Properties) -> Result<()> {
  let props = target
    .properties_mut()
    .ok_or_else(|| HarnessError::InvalidIndex("<target>".to_string()))?;
  *props = properties;
  Ok(())
}

/// Merges `properties` into the child addressed by `index`.
///
/// # Parameters
/// - `target`: The node whose subtree is edited.
/// - `index`: A child position or a comma-separated path such as `"0,1"`.
/// - `properties`: Entries added to, or overwriting, the child's properties.
///
/// # Returns
/// `HarnessError::InvalidIndex` when the index does not lead to an element or
/// widget node.
pub fn assign_child_properties(
  target: &mut RenderNode,
  index: impl Into<ChildIndex>,
  properties: Properties,
) -> Result<()> {
  let index = index.into();
  let child = resolve_child(target, &index)?;
  let props = child.properties_mut().ok_or_else(|| index.invalid())?;
  props.extend(properties);
  Ok(())
}

/// Replaces the properties of the child addressed by `index`.
///
/// Same addressing and errors as `assign_child_properties`.
pub fn replace_child_properties(
  target: &mut RenderNode,
  index: impl Into<ChildIndex>,
  properties: Properties,
) -> Result<()> {
  let index = index.into();
  let child = resolve_child(target, &index)?;
  let props = child.properties_mut().ok_or_else(|| index.invalid())?;
  *props = properties;
  Ok(())
}

/// Sets the child at `index`.
///
/// # Parameters
/// - `target`: The node whose subtree is edited.
/// - `index`: A position among `target`'s children, or a comma-separated path
///   such as `"1,0"` through nested children.
/// - `replacement`: The node to place at the addressed position.
///
/// # Returns
/// `HarnessError::InvalidIndex` when the path runs through a node without
/// children, or when the last position lies beyond the end of its list. The
/// final container gets a children list if it had none, and a position equal
/// to the list length appends.
pub fn replace_child(
  target: &mut RenderNode,
  index: impl Into<ChildIndex>,
  replacement: RenderNode,
) -> Result<()> {
  let index = index.into();
  let mut positions = index.positions()?;
  let last = positions.pop().ok_or_else(|| index.invalid())?;

  let mut container = target;
  for position in positions {
    container = container
      .children_slot_mut()
      .and_then(|slot| slot.as_mut())
      .and_then(|children| children.get_mut(position))
      .ok_or_else(|| index.invalid())?;
  }

  let children = container
    .children_slot_mut()
    .ok_or_else(|| index.invalid())?
    .get_or_insert_with(Vec::new);
  match last.cmp(&children.len()) {
    Ordering::Less => children[last] = replacement,
    Ordering::Equal => children.push(replacement),
    Ordering::Greater => return Err(index.invalid()),
  }
  Ok(())
}

fn resolve_child<'a>(target: &'a mut RenderNode, index: &ChildIndex) -> Result<&'a mut RenderNode> {
  let positions = index.positions()?;
  let mut node = target;
  for position in positions {
    node = node
      .children_slot_mut()
      .and_then(|slot| slot.as_mut())
      .and_then(|children| children.get_mut(position))
      .ok_or_else(|| index.invalid())?;
  }
  Ok(node)
}
