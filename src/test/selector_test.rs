// src/test/selector_test.rs

#[cfg(test)]
mod tests {
  use super::super::support::MyWidget;
  use crate::selector::{select, select_first, Selector, SelectorError};
  use crate::virtual_dom::{properties, text, v, PropertyValue, Render, RenderNode, TreeIndex};
  use crate::widget::Widget;

  fn key_of(node: &RenderNode) -> Option<&str> {
    node.property("key").and_then(PropertyValue::as_str)
  }

  #[test]
  fn test_key_selectors_on_widget_output() {
    let render = MyWidget::default().render();

    let span = select_first(r#"*[key="span"]"#, &render).unwrap();
    assert!(span.is_some_and(RenderNode::is_element_node));

    let widget = select_first(r#"*[key="widget"]"#, &render).unwrap();
    assert!(widget.is_some_and(RenderNode::is_widget_node));

    let registry = select_first(r#"[key='registry']"#, &render).unwrap();
    assert_eq!(registry.and_then(key_of), Some("registry"));
  }

  #[test]
  fn test_tag_selector_skips_widgets() {
    let render = MyWidget::default().render();
    let divs = select("div", &render).unwrap();
    // ChildWidget renders a div of its own, but only the outer div is in the tree
    assert_eq!(divs.len(), 1);
    assert!(key_of(divs[0]).is_none());
  }

  #[test]
  fn test_fragment_roots_are_searched() {
    let render: Render = vec![
      v("p", properties([("key", "a".into())]), vec![text("x")]),
      text("between"),
      v("p", properties([("key", "b".into())]), vec![v("p", properties([("key", "c".into())]), vec![])]),
    ]
    .into();
    let keys: Vec<&str> = select("p", &render).unwrap().into_iter().filter_map(key_of).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);

    let nested: Vec<&str> = select("p p", &render).unwrap().into_iter().filter_map(key_of).collect();
    assert_eq!(nested, vec!["c"]);
  }

  #[test]
  fn test_matches_against_index() {
    let render = MyWidget::default().render();
    let index = TreeIndex::build(&render);
    let selector: Selector = r#"div > [key="widget"]"#.parse().unwrap();
    let matched: Vec<usize> = (0..index.len()).filter(|&entry| selector.matches(&index, entry)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(index.get(matched[0]).map(|entry| entry.path.clone()), Some(vec![0, 1]));
    assert_eq!(selector.source(), r#"div > [key="widget"]"#);
  }

  #[test]
  fn test_malformed_selectors() {
    let render = MyWidget::default().render();
    assert!(matches!(select("", &render), Err(SelectorError::Empty)));
    assert!(matches!(select("div >> span", &render), Err(SelectorError::DanglingCombinator(_))));
    assert!(matches!(select("div::after", &render), Err(SelectorError::Unexpected { .. })));
  }
}
