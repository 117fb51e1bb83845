/* src/cli/core/src/plugins/auto_import.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use plait_codegen::generate_declarations;
use plait_core::{
  ConfigError, ImportSource, ImportTable, PlaitError, Plugin, PluginContext, PresetRegistry,
};
use serde::Deserialize;
use tracing::info;

use crate::build::output::write_if_changed;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoImportOptions {
  #[serde(default)]
  pub imports: Vec<ImportSource>,
  /// Declaration file, relative to the project root.
  #[serde(default = "default_dts")]
  pub dts: String,
  /// Extra or replacement presets for bare module sources.
  #[serde(default)]
  pub presets: BTreeMap<String, Vec<String>>,
}

impl Default for AutoImportOptions {
  fn default() -> Self {
    Self { imports: Vec::new(), dts: default_dts(), presets: BTreeMap::new() }
  }
}

fn default_dts() -> String {
  "auto-imports.d.ts".to_string()
}

#[derive(Debug)]
struct Generation {
  options: AutoImportOptions,
  table: ImportTable,
  dts_path: PathBuf,
}

impl Generation {
  fn new(root: &Path, options: AutoImportOptions) -> Result<Self, ConfigError> {
    let presets = options
      .presets
      .iter()
      .fold(PresetRegistry::builtin(), |reg, (module, symbols)| reg.with_preset(module, symbols.clone()));
    let table = ImportTable::build(&options.imports, &presets)?;
    let dts_path = root.join(&options.dts);
    Ok(Self { options, table, dts_path })
  }
}

/// Owns the import table and keeps the declaration file in sync with it.
#[derive(Debug)]
pub struct AutoImportPlugin {
  root: PathBuf,
  current: RwLock<Arc<Generation>>,
}

impl AutoImportPlugin {
  pub fn new(root: &Path, options: AutoImportOptions) -> Result<Self, ConfigError> {
    let generation = Generation::new(root, options)?;
    Ok(Self { root: root.to_path_buf(), current: RwLock::new(Arc::new(generation)) })
  }

  fn snapshot(&self) -> Arc<Generation> {
    Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
  }

  pub fn table(&self) -> ImportTable {
    self.snapshot().table.clone()
  }

  pub fn dts_path(&self) -> PathBuf {
    self.snapshot().dts_path.clone()
  }

  pub fn options(&self) -> AutoImportOptions {
    self.snapshot().options.clone()
  }

  /// Write the declaration file. Returns whether its content changed.
  pub fn write_declarations(&self) -> Result<bool, PlaitError> {
    let generation = self.snapshot();
    let code = generate_declarations(&generation.table);
    let changed = write_if_changed(&generation.dts_path, &code)
      .map_err(|e| PlaitError::io(&generation.dts_path, e))?;
    if changed {
      info!(path = %generation.dts_path.display(), symbols = generation.table.len(), "declarations written");
    }
    Ok(changed)
  }

  /// Swap in new options and regenerate. On a configuration error the
  /// previous table stays in place.
  pub fn reconfigure(&self, options: AutoImportOptions) -> Result<bool, PlaitError> {
    if self.options() == options {
      return Ok(false);
    }
    let generation = Generation::new(&self.root, options)?;
    *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(generation);
    self.write_declarations()
  }
}

impl Plugin for AutoImportPlugin {
  fn name(&self) -> &str {
    "auto-import"
  }

  fn build_start(&self, _ctx: &PluginContext) -> Result<(), PlaitError> {
    self.write_declarations().map(|_| ())
  }
}
