/* src/core/src/routes/table.rs */

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::pattern::{compare_specificity, render_path, render_shape, route_name, segments_for};
use super::Segment;
use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
  pub name: String,
  pub path: String,
  /// Project-relative file id with `/` separators, e.g. `src/pages/users/[id].vue`.
  pub file: String,
  #[serde(skip)]
  pub segments: Vec<Segment>,
}

impl RouteEntry {
  /// `rel` is the path inside the pages directory, `file` the project-relative id.
  pub fn from_file(rel: &Path, file: impl Into<String>) -> Self {
    let segments = segments_for(rel);
    Self { name: route_name(&segments), path: render_path(&segments), file: file.into(), segments }
  }

  pub fn has_params(&self) -> bool {
    self.segments.iter().any(Segment::is_dynamic)
  }

  fn shape(&self) -> String {
    render_shape(&self.segments)
  }

  /// A parameter needs a name, and a catch-all only works as the last segment.
  fn check(&self) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRoute {
      file: self.file.clone(),
      reason: reason.to_string(),
    };
    let last = self.segments.len().saturating_sub(1);
    for (idx, segment) in self.segments.iter().enumerate() {
      match segment {
        Segment::Static(_) => {}
        Segment::Param(name) | Segment::CatchAll(name) if name.is_empty() => {
          return Err(invalid("empty parameter name"));
        }
        Segment::CatchAll(name) if idx != last => {
          return Err(invalid(&format!("catch-all [...{name}] must be the last segment")));
        }
        _ => {}
      }
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
  pub route: &'a RouteEntry,
  pub params: BTreeMap<String, String>,
}

/// Routes in match order. Built only through `from_entries`, so the order
/// and the no-ambiguity guarantee always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteTable {
  routes: Vec<RouteEntry>,
}

impl RouteTable {
  pub fn from_entries(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, ConfigError> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut routes = Vec::new();
    for entry in entries {
      entry.check()?;
      let shape = entry.shape();
      if let Some(first) = seen.get(&shape) {
        let (first, second) = ordered(first.clone(), entry.file.clone());
        return Err(ConfigError::RouteCollision { pattern: entry.path, first, second });
      }
      seen.insert(shape, entry.file.clone());
      routes.push(entry);
    }
    routes.sort_by(|a, b| {
      compare_specificity(&a.segments, &b.segments).then_with(|| a.path.cmp(&b.path))
    });
    Ok(Self { routes })
  }

  pub fn routes(&self) -> &[RouteEntry] {
    &self.routes
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }

  /// First route in specificity order that matches the request path.
  /// Query strings and fragments are ignored.
  pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    self.routes.iter().find_map(|route| {
      let params = match_segments(&route.segments, &parts)?;
      Some(RouteMatch { route, params })
    })
  }
}

fn ordered(a: String, b: String) -> (String, String) {
  if a <= b { (a, b) } else { (b, a) }
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> Option<BTreeMap<String, String>> {
  let mut params = BTreeMap::new();
  let mut i = 0;
  for (idx, segment) in segments.iter().enumerate() {
    match segment {
      Segment::Static(text) => {
        if parts.get(i) != Some(&text.as_str()) {
          return None;
        }
        i += 1;
      }
      Segment::Param(name) => {
        let value = parts.get(i)?;
        params.insert(name.clone(), (*value).to_string());
        i += 1;
      }
      Segment::CatchAll(name) => {
        params.insert(name.clone(), parts[i.min(parts.len())..].join("/"));
        return (idx + 1 == segments.len()).then_some(params);
      }
    }
  }
  (i == parts.len()).then_some(params)
}
