// src/selector/mod.rs

//! A small CSS subset for locating nodes in a render tree.
//!
//! Supported: type selectors (`div`), the universal selector (`*`), classes
//! (`.foo`), ids (`#main`), attribute presence (`[key]`) and equality
//! (`[key="value"]`), compounds of those, and the descendant (` `) and child
//! (`>`) combinators.
//!
//! Type and class-only selectors find element nodes. Widget nodes are found
//! through `*` or a compound with an attribute or id condition, which is how a
//! test addresses a nested widget by its `key`.

mod parser;

use crate::virtual_dom::{NodePath, PropertyValue, Render, RenderNode, TreeIndex};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
  #[error("Empty selector")]
  Empty,
  #[error("Unexpected input at offset {offset} in selector `{selector}`")]
  Unexpected { selector: String, offset: usize },
  #[error("Combinator without a compound on both sides in selector `{0}`")]
  DanglingCombinator(String),
  #[error("Type selector must start its compound in selector `{0}`")]
  MisplacedTag(String),
  #[error("Selector token pattern failed to compile: {0}")]
  Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
  Descendant,
  Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagMatch {
  #[default]
  Unspecified,
  Any,
  Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatch {
  /// `[name]`: present and truthy.
  Present(String),
  /// `[name="value"]`: a string property equal to the value.
  Equals(String, String),
}

impl AttributeMatch {
  fn matches(&self, node: &RenderNode) -> bool {
    match self {
      AttributeMatch::Present(name) => node.property(name).is_some_and(PropertyValue::is_truthy),
      AttributeMatch::Equals(name, value) => {
        node.property(name).and_then(PropertyValue::as_str) == Some(value.as_str())
      }
    }
  }
}

/// Conditions that must all hold on one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
  pub tag: TagMatch,
  pub classes: Vec<String>,
  pub id: Option<String>,
  pub attributes: Vec<AttributeMatch>,
}

impl Compound {
  fn is_empty(&self) -> bool {
    self.tag == TagMatch::Unspecified
      && self.classes.is_empty()
      && self.id.is_none()
      && self.attributes.is_empty()
  }

  pub fn matches(&self, node: &RenderNode) -> bool {
    match (&self.tag, node) {
      (_, RenderNode::Text(_)) | (_, RenderNode::Empty) => return false,
      (TagMatch::Named(tag), RenderNode::Element(elem)) if &elem.tag != tag => return false,
      (TagMatch::Named(_), RenderNode::Widget(_)) => return false,
      (TagMatch::Unspecified, RenderNode::Widget(_))
        if self.attributes.is_empty() && self.id.is_none() =>
      {
        return false
      }
      _ => {}
    }

    if !self.classes.is_empty() {
      let classes = node.property("classes").map(class_list).unwrap_or_default();
      if !self.classes.iter().all(|class| classes.contains(&class.as_str())) {
        return false;
      }
    }

    if let Some(id) = &self.id {
      if node.property("id").and_then(PropertyValue::as_str) != Some(id.as_str()) {
        return false;
      }
    }

    self.attributes.iter().all(|attribute| attribute.matches(node))
  }
}

/// Class names carried by a `classes` property.
///
/// Accepts a whitespace-separated string, a list of strings, or a mapping of
/// class name to `true`.
fn class_list(value: &PropertyValue) -> Vec<&str> {
  match value {
    PropertyValue::String(classes) => classes.split_whitespace().collect(),
    PropertyValue::List(items) => items
      .iter()
      .filter_map(PropertyValue::as_str)
      .flat_map(str::split_whitespace)
      .collect(),
    PropertyValue::Object(flags) => flags
      .iter()
      .filter(|(_, enabled)| matches!(enabled, PropertyValue::Bool(true)))
      .map(|(name, _)| name.as_str())
      .collect(),
    PropertyValue::Map(pairs) => pairs
      .iter()
      .filter(|(_, enabled)| matches!(enabled, PropertyValue::Bool(true)))
      .filter_map(|(name, _)| name.as_str())
      .collect(),
    _ => Vec::new(),
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  /// How this compound relates to the previous one. Ignored on the first step.
  pub combinator: Combinator,
  pub compound: Compound,
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
  source: String,
  steps: Vec<Step>,
}

impl Selector {
  /// Parses selector text such as `div > span[key="span"]`.
  ///
  /// # Returns
  /// The parsed selector, or a `SelectorError` for empty input, a combinator
  /// without a compound on each side, a type selector after other conditions,
  /// or unsupported syntax.
  pub fn parse(source: &str) -> Result<Self, SelectorError> {
    Ok(Selector {
      source: source.to_string(),
      steps: parser::parse_steps(source)?,
    })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  /// Whether the indexed entry matches, ancestors included.
  pub fn matches(&self, index: &TreeIndex<'_>, entry: usize) -> bool {
    self.matches_step(index, entry, self.steps.len() - 1)
  }

  fn matches_step(&self, index: &TreeIndex<'_>, entry: usize, step: usize) -> bool {
    let Some(indexed) = index.get(entry) else {
      return false;
    };
    if !self.steps[step].compound.matches(indexed.node) {
      return false;
    }
    if step == 0 {
      return true;
    }
    match self.steps[step].combinator {
      Combinator::Child => index
        .parent(entry)
        .is_some_and(|parent| self.matches_step(index, parent, step - 1)),
      Combinator::Descendant => index
        .ancestors(entry)
        .any(|ancestor| self.matches_step(index, ancestor, step - 1)),
    }
  }

  /// Matching nodes in document order.
  pub fn select<'a>(&self, render: &'a Render) -> Vec<&'a RenderNode> {
    let index = TreeIndex::build(render);
    (0..index.len())
      .filter(|&entry| self.matches(&index, entry))
      .filter_map(|entry| index.get(entry).map(|indexed| indexed.node))
      .collect()
  }

  pub fn select_first<'a>(&self, render: &'a Render) -> Option<&'a RenderNode> {
    let index = TreeIndex::build(render);
    (0..index.len())
      .find(|&entry| self.matches(&index, entry))
      .and_then(|entry| index.get(entry).map(|indexed| indexed.node))
  }

  /// Index paths of matching nodes in document order.
  ///
  /// Paths stay valid for `Render::node_at_mut` on the same tree, so callers
  /// can rewrite matches in place without holding borrows from the search.
  ///
  /// # Parameters
  /// - `render`: The tree to search.
  ///
  /// # Returns
  /// One path per match; empty when nothing matches.
  pub fn select_paths(&self, render: &Render) -> Vec<NodePath> {
    let index = TreeIndex::build(render);
    (0..index.len())
      .filter(|&entry| self.matches(&index, entry))
      .filter_map(|entry| index.get(entry).map(|indexed| indexed.path.clone()))
      .collect()
  }
}

impl FromStr for Selector {
  type Err = SelectorError;

  fn from_str(source: &str) -> Result<Self, Self::Err> {
    Selector::parse(source)
  }
}

/// Finds every node matching `selector`, in document order.
pub fn select<'a>(selector: &str, render: &'a Render) -> Result<Vec<&'a RenderNode>, SelectorError> {
  Ok(Selector::parse(selector)?.select(render))
}

/// Finds the first node matching `selector`.
pub fn select_first<'a>(selector: &str, render: &'a Render) -> Result<Option<&'a RenderNode>, SelectorError> {
  Ok(Selector::parse(selector)?.select_first(render))
}
