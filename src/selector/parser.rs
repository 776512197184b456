// src/selector/parser.rs

use super::{AttributeMatch, Combinator, Compound, SelectorError, Step, TagMatch};
use once_cell::sync::OnceCell;
use regex::Regex;

const TOKEN_PATTERN: &str = r##"^(?:(?P<combinator>\s*>\s*|\s+)|(?P<universal>\*)|(?P<tag>[A-Za-z][\w-]*)|\.(?P<class>[\w-]+)|#(?P<id>[\w-]+)|\[\s*(?P<attr>[\w-]+)\s*(?:=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[\w-]+))\s*)?\])"##;

static TOKEN: OnceCell<Regex> = OnceCell::new();

fn token_pattern() -> Result<&'static Regex, SelectorError> {
  TOKEN
    .get_or_try_init(|| Regex::new(TOKEN_PATTERN))
    .map_err(SelectorError::from)
}

/// Splits selector text into compounds joined by combinators.
pub(super) fn parse_steps(selector: &str) -> Result<Vec<Step>, SelectorError> {
  let pattern = token_pattern()?;
  let source = selector.trim();
  if source.is_empty() {
    return Err(SelectorError::Empty);
  }

  let mut steps = Vec::new();
  let mut current = Compound::default();
  let mut pending = Combinator::Descendant;
  let mut offset = 0;

  while offset < source.len() {
    let unexpected = || SelectorError::Unexpected {
      selector: selector.to_string(),
      offset,
    };
    let caps = pattern.captures(&source[offset..]).ok_or_else(unexpected)?;
    let consumed = caps.get(0).map_or(0, |m| m.end());
    if consumed == 0 {
      return Err(unexpected());
    }

    if let Some(combinator) = caps.name("combinator") {
      if current.is_empty() {
        return Err(SelectorError::DanglingCombinator(selector.to_string()));
      }
      steps.push(Step {
        combinator: pending,
        compound: std::mem::take(&mut current),
      });
      pending = if combinator.as_str().contains('>') {
        Combinator::Child
      } else {
        Combinator::Descendant
      };
    } else if caps.name("universal").is_some() {
      set_tag(&mut current, TagMatch::Any, selector)?;
    } else if let Some(tag) = caps.name("tag") {
      set_tag(&mut current, TagMatch::Named(tag.as_str().to_string()), selector)?;
    } else if let Some(class) = caps.name("class") {
      current.classes.push(class.as_str().to_string());
    } else if let Some(id) = caps.name("id") {
      current.id = Some(id.as_str().to_string());
    } else if let Some(name) = caps.name("attr") {
      let value = caps
        .name("dq")
        .or_else(|| caps.name("sq"))
        .or_else(|| caps.name("bare"))
        .map(|value| value.as_str().to_string());
      let name = name.as_str().to_string();
      current.attributes.push(match value {
        Some(value) => AttributeMatch::Equals(name, value),
        None => AttributeMatch::Present(name),
      });
    }

    offset += consumed;
  }

  if current.is_empty() {
    return Err(SelectorError::DanglingCombinator(selector.to_string()));
  }
  steps.push(Step {
    combinator: pending,
    compound: current,
  });
  Ok(steps)
}

fn set_tag(compound: &mut Compound, tag: TagMatch, selector: &str) -> Result<(), SelectorError> {
  // A type selector can only open a compound
  if !compound.is_empty() {
    return Err(SelectorError::MisplacedTag(selector.to_string()));
  }
  compound.tag = tag;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_compound() {
    let steps = parse_steps(r#"div.foo.bar[key="bar"][hidden]#main"#).unwrap();
    assert_eq!(steps.len(), 1);
    let compound = &steps[0].compound;
    assert_eq!(compound.tag, TagMatch::Named("div".to_string()));
    assert_eq!(compound.classes, vec!["foo".to_string(), "bar".to_string()]);
    assert_eq!(compound.id.as_deref(), Some("main"));
    assert_eq!(
      compound.attributes,
      vec![
        AttributeMatch::Equals("key".to_string(), "bar".to_string()),
        AttributeMatch::Present("hidden".to_string()),
      ]
    );
  }

  #[test]
  fn test_parse_combinators() {
    let steps = parse_steps(".root  span > em").unwrap();
    let combinators: Vec<Combinator> = steps.iter().map(|step| step.combinator).collect();
    assert_eq!(
      combinators,
      vec![Combinator::Descendant, Combinator::Descendant, Combinator::Child]
    );
    assert_eq!(steps[2].compound.tag, TagMatch::Named("em".to_string()));
  }

  #[test]
  fn test_parse_attribute_quoting() {
    let steps = parse_steps(r#"*[key='a b'][role=nav][title="x y"]"#).unwrap();
    let compound = &steps[0].compound;
    assert_eq!(compound.tag, TagMatch::Any);
    assert_eq!(
      compound.attributes,
      vec![
        AttributeMatch::Equals("key".to_string(), "a b".to_string()),
        AttributeMatch::Equals("role".to_string(), "nav".to_string()),
        AttributeMatch::Equals("title".to_string(), "x y".to_string()),
      ]
    );
  }

  #[test]
  fn test_parse_errors() {
    assert!(matches!(parse_steps("   "), Err(SelectorError::Empty)));
    assert!(matches!(parse_steps("div >"), Err(SelectorError::DanglingCombinator(_))));
    assert!(matches!(parse_steps("> div"), Err(SelectorError::DanglingCombinator(_))));
    assert!(matches!(parse_steps("[key]div"), Err(SelectorError::MisplacedTag(_))));
    assert!(matches!(
      parse_steps("div:hover"),
      Err(SelectorError::Unexpected { offset: 3, .. })
    ));
  }
}
