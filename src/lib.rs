// src/lib.rs

// Re-exporting modules for easier access
pub mod assertion;
pub mod config;
pub mod error;
pub mod harness;
pub mod selector;
#[cfg(test)]
mod test;
pub mod utils;
pub mod virtual_dom;
pub mod widget;

pub use assertion::{assert_render, AssertionError};
pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use harness::{CustomComparator, Harness, HarnessState};
pub use selector::{select, select_first, Selector, SelectorError};
pub use utils::logging::initialize_logging;
pub use virtual_dom::{
  properties, registry, text, v, w, ElementNode, Handler, Properties, PropertyValue, Render,
  RenderNode, WidgetNode,
};
pub use widget::{Invalidator, Widget, WidgetConstructor, WidgetType};
