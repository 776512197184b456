// src/test/support.rs

// Widgets shared by the scenario suites.

use crate::virtual_dom::{properties, registry, text, v, w, Handler, Properties, PropertyValue, Render, RenderNode};
use crate::widget::{Invalidator, Widget};

#[derive(Default)]
pub struct ChildWidget;

impl Widget for ChildWidget {
  fn render(&mut self) -> Render {
    v("div", Properties::new(), vec![]).into()
  }
}

#[derive(Default)]
pub struct OtherWidget;

impl Widget for OtherWidget {
  fn render(&mut self) -> Render {
    v(
      "div",
      properties([("key", "one".into()), ("classes", "class".into())]),
      vec![text("text node"), RenderNode::Empty, w::<ChildWidget>(Properties::new()).into()],
    )
    .into()
  }
}

/// Counts clicks on its span; a click on the outer div jumps the count.
#[derive(Default)]
pub struct MyWidget {
  count: i64,
  invalidator: Option<Invalidator>,
}

impl MyWidget {
  fn on_click(&mut self, _args: &[PropertyValue]) {
    self.count += 1;
    self.invalidate();
  }

  fn other_on_click(&mut self, args: &[PropertyValue]) {
    self.count = args
      .first()
      .and_then(PropertyValue::as_number)
      .map_or(50, |count| count as i64);
    self.invalidate();
  }

  fn invalidate(&self) {
    if let Some(invalidator) = &self.invalidator {
      invalidator.invalidate();
    }
  }
}

impl Widget for MyWidget {
  fn attach_invalidator(&mut self, invalidator: Invalidator) {
    self.invalidator = Some(invalidator);
  }

  fn render(&mut self) -> Render {
    v(
      "div",
      properties([("onclick", Handler::bound::<MyWidget, _>(MyWidget::other_on_click).into())]),
      vec![
        v(
          "span",
          properties([
            ("key", "span".into()),
            ("onclick", Handler::bound::<MyWidget, _>(MyWidget::on_click).into()),
          ]),
          vec![text(format!("hello {}", self.count))],
        ),
        w::<ChildWidget>(properties([("key", "widget".into())])).into(),
        registry("registry-item", properties([("key", "registry".into())])).into(),
      ],
    )
    .into()
  }
}

/// What `MyWidget` renders for `count`, with stand-in handlers.
pub fn expected_my_widget(count: i64) -> Render {
  v(
    "div",
    properties([("onclick", Handler::noop().into())]),
    vec![
      v(
        "span",
        properties([("key", "span".into()), ("onclick", Handler::noop().into())]),
        vec![text(format!("hello {}", count))],
      ),
      w::<ChildWidget>(properties([("key", "widget".into())])).into(),
      registry("registry-item", properties([("key", "registry".into())])).into(),
    ],
  )
  .into()
}

/// Echoes its `id` and `title` properties and wraps its children.
#[derive(Default)]
pub struct EchoWidget {
  properties: Properties,
  children: Vec<RenderNode>,
}

impl Widget for EchoWidget {
  fn set_properties(&mut self, properties: Properties) {
    self.properties = properties;
  }

  fn set_children(&mut self, children: Vec<RenderNode>) {
    self.children = children;
  }

  fn render(&mut self) -> Render {
    let mut props = Properties::new();
    for name in ["id", "title"] {
      if let Some(value) = self.properties.get(name) {
        props.insert(name.to_string(), value.clone());
      }
    }
    v("section", props, self.children.clone()).into()
  }
}
