// src/harness/mod.rs

//! Drives a single widget through render, assertion and simulated events.
//!
//! A harness owns one widget instance. Each read pulls a fresh descriptor from
//! the render function, pushes changed properties or children into the widget
//! and renders again only when the widget was invalidated, so any number of
//! mutations between two reads cost a single render pass.

pub mod comparator;

pub use comparator::{apply_comparators, CustomComparator};

use crate::assertion::{assert_render, diff_properties};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::selector::Selector;
use crate::utils::logging::initialize_logging;
use crate::virtual_dom::{Properties, PropertyValue, Render, RenderNode, WidgetNode};
use crate::widget::{AsAny, Invalidator, Widget, WidgetConstructor, WidgetType};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type RenderFn = Box<dyn Fn() -> WidgetNode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
  /// Nothing rendered yet.
  Uninitialized,
  /// The cached render reflects the widget.
  Valid,
  /// The widget reported a change since the last render.
  Invalidated,
}

pub struct Harness {
  render_fn: RenderFn,
  comparators: Vec<CustomComparator>,
  widget_type: WidgetType,
  widget: Box<dyn Widget>,
  invalidator: Invalidator,
  listener_id: u32,
  invalidated: Arc<AtomicBool>,
  applied_properties: Option<Properties>,
  applied_children: Option<Vec<RenderNode>>,
  last_render: Option<Render>,
  render_count: usize,
  config: HarnessConfig,
}

impl Harness {
  /// Creates a harness with configuration read from the environment.
  pub fn new<F>(render_fn: F, comparators: Vec<CustomComparator>) -> Result<Self>
  where
    F: Fn() -> WidgetNode + 'static,
  {
    Self::with_config(render_fn, comparators, HarnessConfig::from_env())
  }

  /// Creates a harness for the widget `render_fn` describes.
  ///
  /// `render_fn` is called once here to find the widget type, then again on
  /// every read to pick up changed properties and children. Logging is
  /// initialized from `config` on first use.
  ///
  /// # Parameters
  /// - `render_fn`: Produces the widget node to harness, e.g. `|| w::<MyWidget>(props)`.
  /// - `comparators`: Predicates that replace exact comparison of selected properties.
  /// - `config`: Log level and diff coloring.
  ///
  /// # Returns
  /// The harness, or `HarnessError::UnsupportedConstructor` when `render_fn`
  /// names a registry entry instead of a widget type.
  pub fn with_config<F>(
    render_fn: F,
    comparators: Vec<CustomComparator>,
    config: HarnessConfig,
  ) -> Result<Self>
  where
    F: Fn() -> WidgetNode + 'static,
  {
    initialize_logging(&config);

    let widget_type = match render_fn().constructor {
      WidgetConstructor::Type(widget_type) => widget_type,
      WidgetConstructor::Registry(name) => return Err(HarnessError::UnsupportedConstructor(name)),
    };

    let mut widget = widget_type.instantiate();
    let invalidator = Invalidator::new();
    let invalidated = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&invalidated);
    let listener_id = invalidator.subscribe(move || flag.store(true, Ordering::SeqCst));
    widget.attach_invalidator(invalidator.clone());
    debug!("Harness created for {}", widget_type.name());

    Ok(Harness {
      render_fn: Box::new(render_fn),
      comparators,
      widget_type,
      widget,
      invalidator,
      listener_id,
      invalidated,
      applied_properties: None,
      applied_children: None,
      last_render: None,
      render_count: 0,
      config,
    })
  }

  /// Where the harness is in its render cycle.
  pub fn state(&self) -> HarnessState {
    if self.last_render.is_none() {
      HarnessState::Uninitialized
    } else if self.invalidated.load(Ordering::SeqCst) {
      HarnessState::Invalidated
    } else {
      HarnessState::Valid
    }
  }

  /// Brings the widget up to date and returns its current render.
  ///
  /// Pending property or child changes are pushed and an invalidated widget
  /// renders again before the tree is returned.
  ///
  /// # Returns
  /// The current render, or `HarnessError::ConstructorChanged` when the render
  /// function stopped producing the harnessed widget type.
  pub fn get_render(&mut self) -> Result<&Render> {
    self.refresh()
  }

  /// The most recent render, without triggering a new one. `None` until the
  /// first read.
  pub fn last_render(&self) -> Option<&Render> {
    self.last_render.as_ref()
  }

  /// Number of render passes performed so far.
  pub fn render_count(&self) -> usize {
    self.render_count
  }

  /// Asserts the widget's whole render against `expected`.
  pub fn expect<F>(&mut self, expected: F) -> Result<()>
  where
    F: FnOnce() -> Render,
  {
    let actual = self.refresh()?.clone();
    self.assert_against(actual, expected(), None)
  }

  /// Like `expect`, with `message` appended to a failure.
  pub fn expect_with_message<F>(&mut self, expected: F, message: &str) -> Result<()>
  where
    F: FnOnce() -> Render,
  {
    let actual = self.refresh()?.clone();
    self.assert_against(actual, expected(), Some(message))
  }

  /// Asserts the first node matching `selector` against `expected`.
  ///
  /// When nothing matches, `Render::Missing` is compared, which never equals
  /// any expectation.
  pub fn expect_partial<F>(&mut self, selector: &str, expected: F) -> Result<()>
  where
    F: FnOnce() -> Render,
  {
    let selector = Selector::parse(selector)?;
    let actual = match selector.select_first(self.refresh()?) {
      Some(node) => Render::Node(node.clone()),
      None => {
        debug!("No node matched `{}` for partial expectation", selector.source());
        Render::Missing
      }
    };
    self.assert_against(actual, expected(), None)
  }

  /// Calls the handler stored under `property` on the first node matching
  /// `selector`, passing the harnessed widget and `args`.
  ///
  /// A missing node or a property that is not a function is silently ignored.
  pub fn trigger(&mut self, selector: &str, property: &str, args: &[PropertyValue]) -> Result<()> {
    let selector = Selector::parse(selector)?;
    let handler = selector
      .select_first(self.refresh()?)
      .and_then(|node| node.property(property))
      .and_then(PropertyValue::as_handler)
      .cloned();

    match handler {
      Some(handler) => {
        trace!("Triggering `{}` on `{}`", property, selector.source());
        handler.call(AsAny::as_any_mut(&mut *self.widget), args);
      }
      None => debug!(
        "Trigger of `{}` on `{}` found no handler",
        property,
        selector.source()
      ),
    }
    Ok(())
  }

  fn assert_against(&self, mut actual: Render, mut expected: Render, message: Option<&str>) -> Result<()> {
    apply_comparators(&self.comparators, &mut actual, &mut expected)?;
    assert_render(&actual, &expected, message).map_err(|err| {
      debug!("{}\n{}", err.message, err.diff(self.config.color_diff));
      HarnessError::from(err)
    })
  }

  /// Brings the widget up to date with the render function and returns the
  /// current render.
  fn refresh(&mut self) -> Result<&Render> {
    let descriptor = (self.render_fn)();
    if descriptor.constructor != WidgetConstructor::Type(self.widget_type) {
      return Err(HarnessError::ConstructorChanged {
        expected: self.widget_type.name(),
        actual: descriptor.constructor.to_string(),
      });
    }

    let properties = descriptor.properties;
    let properties_changed = self
      .applied_properties
      .as_ref()
      .map_or(true, |applied| !diff_properties(applied, &properties).is_empty());
    if properties_changed {
      trace!("Pushing properties to {}", self.widget_type.name());
      self.widget.set_properties(properties.clone());
      self.applied_properties = Some(properties);
      self.invalidated.store(true, Ordering::SeqCst);
    }

    let children = descriptor.children.unwrap_or_default();
    if self.applied_children.as_ref() != Some(&children) {
      trace!("Pushing {} children to {}", children.len(), self.widget_type.name());
      self.widget.set_children(children.clone());
      self.applied_children = Some(children);
      self.invalidated.store(true, Ordering::SeqCst);
    }

    if self.invalidated.swap(false, Ordering::SeqCst) || self.last_render.is_none() {
      self.render_count += 1;
      trace!("Render pass {} of {}", self.render_count, self.widget_type.name());
      self.last_render = Some(self.widget.render());
    }

    Ok(&*self.last_render.get_or_insert(Render::Missing))
  }
}

impl Drop for Harness {
  fn drop(&mut self) {
    self.invalidator.unsubscribe(self.listener_id);
  }
}
