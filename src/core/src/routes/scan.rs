/* src/core/src/routes/scan.rs */

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use super::table::{RouteEntry, RouteTable};
use crate::errors::{ConfigError, PlaitError};
use crate::pipeline::{ChangeKind, FileChange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteScanOptions {
  /// Absolute pages directory.
  pub dir: PathBuf,
  /// Extensions without the dot.
  pub extensions: Vec<String>,
  /// Path segment names to skip anywhere below `dir`.
  pub exclude: Vec<String>,
}

/// Keeps one entry per page file so a change event only touches that file.
#[derive(Debug)]
pub struct RouteScanner {
  root: PathBuf,
  options: RouteScanOptions,
  files: BTreeMap<PathBuf, RouteEntry>,
}

impl RouteScanner {
  pub fn new(root: impl Into<PathBuf>, options: RouteScanOptions) -> Self {
    Self { root: root.into(), options, files: BTreeMap::new() }
  }

  pub fn dir(&self) -> &Path {
    &self.options.dir
  }

  /// Full walk of the pages directory.
  pub fn scan(&mut self) -> Result<RouteTable, PlaitError> {
    let dir = self.options.dir.clone();
    if !dir.is_dir() {
      return Err(ConfigError::RoutesDirMissing { dir }.into());
    }
    self.files.clear();
    self.insert_tree(&dir)?;
    debug!(dir = %dir.display(), files = self.files.len(), "pages scanned");
    Ok(self.table()?)
  }

  /// Apply one change. `Ok(None)` when the path is not a page file.
  /// An ambiguity is reported as an error; the file set still reflects the
  /// change so a later fix resolves it.
  pub fn apply(&mut self, change: &FileChange) -> Result<Option<RouteTable>, PlaitError> {
    let Some(rel) = self.relative(&change.path) else {
      return Ok(None);
    };
    let before = self.files.len();
    match change.kind {
      ChangeKind::Removed => {
        self.files.retain(|path, _| !path.starts_with(&rel));
        if self.files.len() == before {
          return Ok(None);
        }
      }
      ChangeKind::Created | ChangeKind::Modified => {
        if change.path.is_dir() {
          self.insert_tree(&change.path)?;
        } else if self.accepts(&rel) {
          if self.files.contains_key(&rel) {
            // Content edits do not change the route table.
            return Ok(None);
          }
          self.insert(rel);
        } else {
          return Ok(None);
        }
      }
    }
    trace!(path = %change.path.display(), kind = ?change.kind, "pages changed");
    Ok(Some(self.table()?))
  }

  pub fn table(&self) -> Result<RouteTable, ConfigError> {
    RouteTable::from_entries(self.files.values().cloned())
  }

  fn insert_tree(&mut self, start: &Path) -> Result<(), PlaitError> {
    let walker = WalkDir::new(start).sort_by_file_name().into_iter();
    for entry in walker.filter_entry(|e| !is_hidden(e.file_name())) {
      let entry = entry.map_err(|e| {
        let path = e.path().unwrap_or(start).to_path_buf();
        PlaitError::io(path, e.into())
      })?;
      if !entry.file_type().is_file() {
        continue;
      }
      if let Some(rel) = self.relative(entry.path()) {
        if self.accepts(&rel) {
          self.insert(rel);
        }
      }
    }
    Ok(())
  }

  fn insert(&mut self, rel: PathBuf) {
    let file_id = self.file_id(&rel);
    let entry = RouteEntry::from_file(&rel, file_id);
    self.files.insert(rel, entry);
  }

  fn relative(&self, path: &Path) -> Option<PathBuf> {
    let rel = path.strip_prefix(&self.options.dir).ok()?;
    if rel.as_os_str().is_empty() {
      return None;
    }
    Some(rel.to_path_buf())
  }

  fn accepts(&self, rel: &Path) -> bool {
    let skipped = rel.components().any(|c| match c {
      Component::Normal(name) => {
        is_hidden(name) || self.options.exclude.iter().any(|x| name == x.as_str())
      }
      _ => true,
    });
    if skipped {
      return false;
    }
    let ext = rel.extension().and_then(|e| e.to_str()).unwrap_or_default();
    self.options.extensions.iter().any(|e| e == ext)
  }

  /// `src/pages/users/[id].vue`, relative to the project root when possible.
  fn file_id(&self, rel: &Path) -> String {
    let abs = self.options.dir.join(rel);
    let shown = abs.strip_prefix(&self.root).unwrap_or(&abs);
    shown
      .components()
      .filter_map(|c| match c {
        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
        _ => None,
      })
      .collect::<Vec<_>>()
      .join("/")
  }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
  name.to_str().is_some_and(|n| n.starts_with('.'))
}
