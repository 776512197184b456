// src/virtual_dom/traverse.rs

use super::{Render, RenderNode};

/// Position of a node: index among the render roots, then child indexes.
pub type NodePath = Vec<usize>;

/// An element or widget node recorded by `TreeIndex`.
#[derive(Debug, Clone)]
pub struct IndexedNode<'a> {
  pub node: &'a RenderNode,
  pub path: NodePath,
  /// Entry index of the closest element or widget ancestor.
  pub parent: Option<usize>,
}

/// Pre-order index of the element and widget nodes of a render.
///
/// Each entry keeps a back-reference to its parent entry, so ancestry checks
/// walk upwards instead of searching again from the roots. Text and empty
/// leaves are skipped but still count towards their siblings' positions.
#[derive(Debug, Clone)]
pub struct TreeIndex<'a> {
  entries: Vec<IndexedNode<'a>>,
}

impl<'a> TreeIndex<'a> {
  /// Indexes `render` in one pre-order pass over its roots.
  ///
  /// # Returns
  /// An index whose entry numbers follow document order; an empty index for
  /// `Render::Missing`.
  pub fn build(render: &'a Render) -> Self {
    let mut index = TreeIndex {
      entries: Vec::new(),
    };
    let mut path = NodePath::new();
    for (position, node) in render.roots().iter().enumerate() {
      path.push(position);
      index.visit(node, None, &mut path);
      path.pop();
    }
    index
  }

  fn visit(&mut self, node: &'a RenderNode, parent: Option<usize>, path: &mut NodePath) {
    if !(node.is_element_node() || node.is_widget_node()) {
      return;
    }
    let entry = self.entries.len();
    self.entries.push(IndexedNode {
      node,
      path: path.clone(),
      parent,
    });
    if let Some(children) = node.children() {
      for (position, child) in children.iter().enumerate() {
        path.push(position);
        self.visit(child, Some(entry), path);
        path.pop();
      }
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, entry: usize) -> Option<&IndexedNode<'a>> {
    self.entries.get(entry)
  }

  /// Entries in document order.
  pub fn iter(&self) -> impl Iterator<Item = &IndexedNode<'a>> {
    self.entries.iter()
  }

  pub fn parent(&self, entry: usize) -> Option<usize> {
    self.entries.get(entry).and_then(|indexed| indexed.parent)
  }

  /// Entry indexes of all ancestors, closest first.
  pub fn ancestors(&self, entry: usize) -> Ancestors<'_, 'a> {
    Ancestors {
      index: self,
      next: self.parent(entry),
    }
  }
}

pub struct Ancestors<'i, 'a> {
  index: &'i TreeIndex<'a>,
  next: Option<usize>,
}

impl Iterator for Ancestors<'_, '_> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    let current = self.next?;
    self.next = self.index.parent(current);
    Some(current)
  }
}
