// src/assertion/report.rs

use crossterm::style::Stylize;

/// A line of a line-based diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
  Same(&'a str),
  /// Only in the actual text.
  Actual(&'a str),
  /// Only in the expected text.
  Expected(&'a str),
}

/// Line diff of `actual` against `expected` using a longest common subsequence.
pub fn diff<'a>(actual: &'a str, expected: &'a str) -> Vec<DiffLine<'a>> {
  let a: Vec<&str> = actual.lines().collect();
  let b: Vec<&str> = expected.lines().collect();

  // lcs[i][j] = common subsequence length of a[i..] and b[j..]
  let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
  for i in (0..a.len()).rev() {
    for j in (0..b.len()).rev() {
      lcs[i][j] = if a[i] == b[j] {
        lcs[i + 1][j + 1] + 1
      } else {
        lcs[i + 1][j].max(lcs[i][j + 1])
      };
    }
  }

  let mut lines = Vec::with_capacity(a.len().max(b.len()));
  let (mut i, mut j) = (0, 0);
  while i < a.len() && j < b.len() {
    if a[i] == b[j] {
      lines.push(DiffLine::Same(a[i]));
      i += 1;
      j += 1;
    } else if lcs[i + 1][j] >= lcs[i][j + 1] {
      lines.push(DiffLine::Actual(a[i]));
      i += 1;
    } else {
      lines.push(DiffLine::Expected(b[j]));
      j += 1;
    }
  }
  lines.extend(a[i..].iter().map(|line| DiffLine::Actual(line)));
  lines.extend(b[j..].iter().map(|line| DiffLine::Expected(line)));
  lines
}

/// Renders a diff with a `- actual` / `+ expected` legend, optionally colored.
pub fn diff_lines(actual: &str, expected: &str, color: bool) -> String {
  let mut out = if color {
    format!("{}\n{}\n", "- actual".red(), "+ expected".green())
  } else {
    "- actual\n+ expected\n".to_string()
  };
  for line in diff(actual, expected) {
    let rendered = match line {
      DiffLine::Same(text) => format!("  {}", text),
      DiffLine::Actual(text) if color => format!("{}", format!("- {}", text).red()),
      DiffLine::Actual(text) => format!("- {}", text),
      DiffLine::Expected(text) if color => format!("{}", format!("+ {}", text).green()),
      DiffLine::Expected(text) => format!("+ {}", text),
    };
    out.push_str(&rendered);
    out.push('\n');
  }
  out
}
