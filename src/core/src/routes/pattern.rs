/* src/core/src/routes/pattern.rs */

use std::cmp::Ordering;
use std::path::{Component, Path};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Segment {
  /// Literal text, matched exactly.
  Static(String),
  /// `[id]`: one path segment.
  Param(String),
  /// `[...rest]`: the remaining segments, possibly none.
  CatchAll(String),
}

impl Segment {
  pub fn parse(raw: &str) -> Self {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
      if let Some(name) = inner.strip_prefix("...") {
        return Self::CatchAll(name.to_string());
      }
      return Self::Param(inner.to_string());
    }
    Self::Static(raw.to_string())
  }

  /// Static before param before catch-all.
  fn rank(&self) -> u8 {
    match self {
      Self::Static(_) => 0,
      Self::Param(_) => 1,
      Self::CatchAll(_) => 2,
    }
  }

  pub fn is_dynamic(&self) -> bool {
    !matches!(self, Self::Static(_))
  }

  pub(super) fn name(&self) -> &str {
    match self {
      Self::Static(s) | Self::Param(s) | Self::CatchAll(s) => s,
    }
  }

  fn render(&self) -> String {
    match self {
      Self::Static(s) => s.clone(),
      Self::Param(name) => format!(":{name}"),
      Self::CatchAll(name) => format!(":{name}(.*)*"),
    }
  }

  /// Pattern text with parameter names erased; two routes with the same
  /// shape match exactly the same requests.
  fn shape(&self) -> String {
    match self {
      Self::Static(s) => s.clone(),
      Self::Param(_) => ":".to_string(),
      Self::CatchAll(_) => "*".to_string(),
    }
  }
}

/// `users/[id].vue` -> [users, :id]; a trailing `index` adds no segment.
pub(super) fn segments_for(rel: &Path) -> Vec<Segment> {
  let mut parts: Vec<String> = rel
    .components()
    .filter_map(|c| match c {
      Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
      _ => None,
    })
    .collect();
  if let Some(last) = parts.last_mut() {
    if let Some(stem) = Path::new(last.as_str()).file_stem() {
      *last = stem.to_string_lossy().into_owned();
    }
  }
  if parts.last().is_some_and(|l| l == "index") {
    parts.pop();
  }
  parts.iter().map(|p| Segment::parse(p)).collect()
}

pub(super) fn render_path(segments: &[Segment]) -> String {
  let body: Vec<String> = segments.iter().map(Segment::render).collect();
  format!("/{}", body.join("/"))
}

pub(super) fn render_shape(segments: &[Segment]) -> String {
  let body: Vec<String> = segments.iter().map(Segment::shape).collect();
  format!("/{}", body.join("/"))
}

/// Route name: segment names joined with `-`; the root is `index`.
pub(super) fn route_name(segments: &[Segment]) -> String {
  if segments.is_empty() {
    return "index".to_string();
  }
  segments.iter().map(Segment::name).collect::<Vec<_>>().join("-")
}

/// Segment by segment: lower rank first, static text alphabetically;
/// on a shared prefix the shorter route comes first.
pub(super) fn compare_specificity(a: &[Segment], b: &[Segment]) -> Ordering {
  for (x, y) in a.iter().zip(b) {
    let ord = x.rank().cmp(&y.rank()).then_with(|| match (x, y) {
      (Segment::Static(l), Segment::Static(r)) => l.cmp(r),
      _ => Ordering::Equal,
    });
    if ord != Ordering::Equal {
      return ord;
    }
  }
  a.len().cmp(&b.len())
}
