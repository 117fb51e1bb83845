/* src/cli/core/src/plugins/pages.rs */

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use plait_codegen::generate_routes_module;
use plait_core::{
  FileChange, PlaitError, Plugin, PluginContext, RouteScanOptions, RouteScanner, RouteTable,
};
use serde::Deserialize;
use tracing::{debug, warn};

pub const PAGES_VIRTUAL_ID: &str = "virtual:generated-pages";
const PAGES_SHORT_ID: &str = "~pages";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagesOptions {
  #[serde(default = "default_dir")]
  pub dir: String,
  #[serde(default = "default_extensions")]
  pub extensions: Vec<String>,
  #[serde(default)]
  pub exclude: Vec<String>,
}

impl Default for PagesOptions {
  fn default() -> Self {
    Self { dir: default_dir(), extensions: default_extensions(), exclude: Vec::new() }
  }
}

fn default_dir() -> String {
  "src/pages".to_string()
}

fn default_extensions() -> Vec<String> {
  ["vue", "ts", "js"].into_iter().map(String::from).collect()
}

/// Filesystem routing. The scanner is mutated under a lock; readers only
/// ever see a complete published table.
#[derive(Debug)]
pub struct PagesPlugin {
  dir: PathBuf,
  scanner: Mutex<RouteScanner>,
  published: RwLock<Arc<RouteTable>>,
}

impl PagesPlugin {
  pub fn new(root: &Path, options: PagesOptions) -> Self {
    let dir = root.join(&options.dir);
    let scan = RouteScanOptions {
      dir: dir.clone(),
      extensions: options.extensions.iter().map(|e| e.trim_start_matches('.').to_string()).collect(),
      exclude: options.exclude,
    };
    Self {
      dir,
      scanner: Mutex::new(RouteScanner::new(root, scan)),
      published: RwLock::new(Arc::new(RouteTable::default())),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Last valid route table.
  pub fn table(&self) -> Arc<RouteTable> {
    Arc::clone(&self.published.read().unwrap_or_else(PoisonError::into_inner))
  }

  pub fn rescan(&self) -> Result<Arc<RouteTable>, PlaitError> {
    let table = self.scanner.lock().unwrap_or_else(PoisonError::into_inner).scan()?;
    Ok(self.publish(table))
  }

  fn publish(&self, table: RouteTable) -> Arc<RouteTable> {
    let table = Arc::new(table);
    *self.published.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&table);
    debug!(routes = table.len(), "route table published");
    table
  }
}

impl Plugin for PagesPlugin {
  fn name(&self) -> &str {
    "pages"
  }

  fn build_start(&self, _ctx: &PluginContext) -> Result<(), PlaitError> {
    self.rescan().map(|_| ())
  }

  fn resolve_id(&self, specifier: &str, _importer: Option<&Path>) -> Option<String> {
    (specifier == PAGES_VIRTUAL_ID || specifier == PAGES_SHORT_ID)
      .then(|| PAGES_VIRTUAL_ID.to_string())
  }

  fn load(&self, id: &str) -> Result<Option<String>, PlaitError> {
    if id != PAGES_VIRTUAL_ID {
      return Ok(None);
    }
    Ok(Some(generate_routes_module(&self.table())))
  }

  fn watch_change(&self, _ctx: &PluginContext, change: &FileChange) -> Result<bool, PlaitError> {
    let result = self.scanner.lock().unwrap_or_else(PoisonError::into_inner).apply(change);
    match result {
      Ok(Some(table)) => {
        self.publish(table);
        Ok(true)
      }
      Ok(None) => Ok(false),
      Err(e) => {
        warn!(error = %e, "keeping previous route table");
        Err(e)
      }
    }
  }
}
