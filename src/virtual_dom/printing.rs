// src/virtual_dom/printing.rs

// Text form of render trees, one node per line, used for failure diffs.

use super::{Properties, PropertyValue, Render, RenderNode};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Prints a node as `tag(props)[children]`, children indented below it.
pub fn print_node(node: &RenderNode) -> String {
  let mut out = String::new();
  write_node(&mut out, node, 0);
  out
}

pub fn print_render(render: &Render) -> String {
  match render {
    Render::Node(node) => print_node(node),
    Render::Fragment(nodes) => print_nodes(nodes),
    Render::Missing => "undefined\n".to_string(),
  }
}

/// Prints a sequence of nodes as a bracketed list.
pub fn print_nodes(nodes: &[RenderNode]) -> String {
  let mut out = String::new();
  write_children(&mut out, Some(nodes), 0);
  out.push('\n');
  out
}

/// Prints a property map with one property per line.
pub fn print_properties(props: &Properties) -> String {
  if props.is_empty() {
    return "{}\n".to_string();
  }
  let mut out = String::from("{\n");
  for (key, value) in props {
    let _ = writeln!(out, "{}{}: {}", INDENT, key, format_value(value));
  }
  out.push_str("}\n");
  out
}

/// Single-line form of a property value.
pub fn format_value(value: &PropertyValue) -> String {
  match value {
    PropertyValue::Null => "null".to_string(),
    PropertyValue::Bool(b) => b.to_string(),
    PropertyValue::Number(n) => format_number(*n),
    PropertyValue::String(s) => format!("{:?}", s),
    PropertyValue::Function(_) => "[function]".to_string(),
    PropertyValue::List(items) => format!("[{}]", join(items.iter().map(format_value))),
    PropertyValue::Set(members) => format!("Set {{{}}}", join(members.iter().map(format_value))),
    PropertyValue::Map(pairs) => format!(
      "Map {{{}}}",
      join(
        pairs
          .iter()
          .map(|(k, v)| format!("{} => {}", format_value(k), format_value(v)))
      )
    ),
    PropertyValue::Object(props) => format!("{{{}}}", inline_properties(props)),
    PropertyValue::Sentinel(label) => format!("<{}>", label),
  }
}

fn format_number(n: f64) -> String {
  if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    n.to_string()
  }
}

fn join<I: Iterator<Item = String>>(parts: I) -> String {
  parts.collect::<Vec<_>>().join(", ")
}

fn inline_properties(props: &Properties) -> String {
  join(
    props
      .iter()
      .map(|(key, value)| format!("{}: {}", key, format_value(value))),
  )
}

fn write_node(out: &mut String, node: &RenderNode, depth: usize) {
  let indent = INDENT.repeat(depth);
  match node {
    RenderNode::Element(elem) => {
      let _ = write!(out, "{}{}({})", indent, elem.tag, inline_properties(&elem.properties));
      write_children(out, elem.children.as_deref(), depth);
    }
    RenderNode::Widget(widget) => {
      let _ = write!(
        out,
        "{}w<{}>({})",
        indent,
        widget.constructor,
        inline_properties(&widget.properties)
      );
      write_children(out, widget.children.as_deref(), depth);
    }
    RenderNode::Text(content) => {
      let _ = write!(out, "{}{:?}", indent, content);
    }
    RenderNode::Empty => {
      let _ = write!(out, "{}null", indent);
    }
  }
  if depth > 0 {
    out.push('\n');
  }
}

fn write_children(out: &mut String, children: Option<&[RenderNode]>, depth: usize) {
  match children {
    None => {}
    Some([]) => out.push_str("[]"),
    Some(children) => {
      out.push_str("[\n");
      for child in children {
        write_node(out, child, depth + 1);
      }
      out.push_str(&INDENT.repeat(depth));
      out.push(']');
    }
  }
}

impl fmt::Display for RenderNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&print_node(self))
  }
}
