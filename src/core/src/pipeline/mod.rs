/* src/core/src/pipeline/mod.rs */

// Ordered plugin pipeline. Order is fixed when the pipeline is built and
// encodes precedence: for one file, entries run strictly left to right.

mod plugin;


use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::errors::{ConfigError, PlaitError, TransformError};
use crate::source::SourceFile;

pub use plugin::{ChangeKind, FileChange, Plugin, PluginContext, Stage};

pub struct Pipeline {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

impl Pipeline {
  /// Plugin names are identities; a name may appear once.
  pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Result<Self, ConfigError> {
    for (second, plugin) in plugins.iter().enumerate() {
      if let Some(first) = plugins[..second].iter().position(|p| p.name() == plugin.name()) {
        return Err(ConfigError::DuplicatePlugin { name: plugin.name().to_string(), first, second });
      }
    }
    Ok(Self { plugins })
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.plugins.iter().map(|p| p.name())
  }

  pub fn len(&self) -> usize {
    self.plugins.len()
  }

  pub fn is_empty(&self) -> bool {
    self.plugins.is_empty()
  }

  /// Run every `build_start` hook in declared order. The first failure stops startup.
  pub fn build_start(&self, ctx: &PluginContext) -> Result<(), PlaitError> {
    for plugin in &self.plugins {
      debug!(plugin = plugin.name(), "build_start");
      plugin.build_start(ctx)?;
    }
    info!(plugins = self.plugins.len(), "pipeline started");
    Ok(())
  }

  /// First plugin to claim the specifier wins.
  pub fn resolve_id(&self, specifier: &str, importer: Option<&Path>) -> Option<String> {
    self.plugins.iter().find_map(|p| {
      let id = p.resolve_id(specifier, importer)?;
      trace!(plugin = p.name(), specifier, id = %id, "resolve_id claimed");
      Some(id)
    })
  }

  /// First plugin to provide content for the id wins.
  pub fn load(&self, id: &str) -> Result<Option<String>, PlaitError> {
    for plugin in &self.plugins {
      if let Some(code) = plugin.load(id)? {
        trace!(plugin = plugin.name(), id, "load");
        return Ok(Some(code));
      }
    }
    Ok(None)
  }

  /// Offer the file to each entry in order. `Finish` skips the remaining entries;
  /// a failing entry aborts this file only.
  pub fn transform(&self, file: SourceFile) -> Result<SourceFile, TransformError> {
    let mut current = file;
    for plugin in &self.plugins {
      let stage = plugin.transform(&current).map_err(|source| TransformError {
        plugin: plugin.name().to_string(),
        file: current.id.clone(),
        source,
      })?;
      match stage {
        Stage::Decline => {}
        Stage::Transform(next) => {
          trace!(plugin = plugin.name(), id = %current.id.display(), lang = %next.lang, "transformed");
          current = next;
        }
        Stage::Finish(next) => {
          trace!(plugin = plugin.name(), id = %current.id.display(), "finished early");
          return Ok(next);
        }
      }
    }
    Ok(current)
  }

  /// Notify every plugin of a change; returns the names of plugins that reacted.
  pub fn watch_change(
    &self,
    ctx: &PluginContext,
    change: &FileChange,
  ) -> Result<Vec<String>, PlaitError> {
    let mut reacted = Vec::new();
    for plugin in &self.plugins {
      if plugin.watch_change(ctx, change)? {
        reacted.push(plugin.name().to_string());
      }
    }
    Ok(reacted)
  }
}
