/* src/core/src/pipeline/plugin.rs */

use std::path::{Path, PathBuf};

use crate::errors::{BoxError, PlaitError};
use crate::source::SourceFile;

/// What a pipeline entry did with a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  /// Not handled; the file passes to the next entry unchanged.
  Decline,
  /// Replaced content (and possibly language); the next entry sees the result.
  Transform(SourceFile),
  /// Replaced content and skip the remaining entries.
  Finish(SourceFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
  Created,
  Modified,
  Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
  pub path: PathBuf,
  pub kind: ChangeKind,
}

impl FileChange {
  pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
    Self { path: path.into(), kind }
  }
}

/// Read-only facts every hook can rely on.
#[derive(Debug, Clone)]
pub struct PluginContext {
  pub root: PathBuf,
  pub watch: bool,
}

impl PluginContext {
  pub fn new(root: impl Into<PathBuf>, watch: bool) -> Self {
    Self { root: root.into(), watch }
  }
}

/// A build-phase plugin. Every hook except `name` is optional.
pub trait Plugin: Send + Sync {
  fn name(&self) -> &str;

  /// Setup before any file is transformed. Code generators write their artifacts here.
  fn build_start(&self, _ctx: &PluginContext) -> Result<(), PlaitError> {
    Ok(())
  }

  /// Claim a specifier, typically to serve a virtual module.
  fn resolve_id(&self, _specifier: &str, _importer: Option<&Path>) -> Option<String> {
    None
  }

  fn load(&self, _id: &str) -> Result<Option<String>, PlaitError> {
    Ok(None)
  }

  fn transform(&self, _file: &SourceFile) -> Result<Stage, BoxError> {
    Ok(Stage::Decline)
  }

  /// React to a file change in watch mode. Returns whether the plugin's state changed.
  fn watch_change(&self, _ctx: &PluginContext, _change: &FileChange) -> Result<bool, PlaitError> {
    Ok(false)
  }
}
