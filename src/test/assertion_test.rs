// src/test/assertion_test.rs

#[cfg(test)]
mod tests {
  use super::super::support::{ChildWidget, OtherWidget};
  use crate::assertion::{assert_render, MismatchKind, Operand};
  use crate::virtual_dom::{properties, text, v, w, Properties, PropertyValue, Render, RenderNode};
  use crate::widget::Widget;

  fn widget_with_collections() -> Render {
    w::<ChildWidget>(properties([
      ("foo", PropertyValue::map([("a", "a")])),
      ("bar", PropertyValue::set(["foo"])),
    ]))
    .into()
  }

  #[test]
  fn test_rendered_output_matches_itself() {
    let render = OtherWidget.render();
    assert!(assert_render(&render, &render, None).is_ok());
  }

  #[test]
  fn test_property_order_does_not_matter() {
    let expected: Render = v(
      "div",
      properties([("classes", "class".into()), ("key", "one".into())]),
      vec![text("text node"), RenderNode::Empty, w::<ChildWidget>(Properties::new()).into()],
    )
    .into();
    assert!(assert_render(&OtherWidget.render(), &expected, None).is_ok());
  }

  #[test]
  fn test_different_children_fail() {
    let expected: Render = v(
      "div",
      properties([("key", "one".into()), ("classes", "class".into())]),
      vec![text("text node"), v("span", Properties::new(), vec![])],
    )
    .into();
    let err = assert_render(&OtherWidget.render(), &expected, None).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Length);
    assert_eq!(err.path, vec![0]);
    assert!(matches!(err.expected, Operand::Nodes(ref nodes) if nodes.len() == 2));
  }

  #[test]
  fn test_equal_map_and_set_properties() {
    let expected: Render = w::<ChildWidget>(properties([
      ("bar", PropertyValue::set(["foo"])),
      ("foo", PropertyValue::map([("a", "a")])),
    ]))
    .into();
    assert!(assert_render(&widget_with_collections(), &expected, None).is_ok());
  }

  #[test]
  fn test_unequal_map_property() {
    let expected: Render = w::<ChildWidget>(properties([
      ("bar", PropertyValue::set(["foo"])),
      ("foo", PropertyValue::map([("a", "b")])),
    ]))
    .into();
    let err = assert_render(&widget_with_collections(), &expected, None).unwrap_err();
    assert!(matches!(err.kind, MismatchKind::Properties(ref deltas) if deltas.len() == 1 && deltas[0].key() == "foo"));
  }

  #[test]
  fn test_unequal_set_property() {
    let expected: Render = w::<ChildWidget>(properties([
      ("bar", PropertyValue::set(["bar"])),
      ("foo", PropertyValue::map([("a", "a")])),
    ]))
    .into();
    let err = assert_render(&widget_with_collections(), &expected, None).unwrap_err();
    assert!(matches!(err.kind, MismatchKind::Properties(ref deltas) if deltas[0].key() == "bar"));
  }

  #[test]
  fn test_nested_mismatch_path() {
    let actual: Render = vec![
      text("lead"),
      v("ul", Properties::new(), vec![v("li", Properties::new(), vec![text("one")])]),
    ]
    .into();
    let expected: Render = vec![
      text("lead"),
      v("ul", Properties::new(), vec![v("li", Properties::new(), vec![text("two")])]),
    ]
    .into();
    let err = assert_render(&actual, &expected, Some("list item")).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Text);
    assert_eq!(err.path, vec![1, 0, 0]);
    assert_eq!(err.message, "Render unexpected: list item");
    assert!(err
      .diff(false)
      .lines()
      .any(|line| line.starts_with("- ") && line.ends_with("\"one\"")));
  }
}
