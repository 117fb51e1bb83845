/* src/core/src/auto_import/mod.rs */

// Compile-time injection table: which symbols are available without an
// import statement, and which module each one comes from.

mod presets;
mod source;


use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::ConfigError;

pub use presets::PresetRegistry;
pub use source::{ImportBinding, ImportSource};

/// Bindings keyed by local name, so iteration order is canonical regardless
/// of the order sources were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
  bindings: BTreeMap<String, ImportBinding>,
}

impl ImportTable {
  /// Expand every source into bindings. Fails closed on the first local name
  /// provided twice; no origin is ever picked silently.
  pub fn build(sources: &[ImportSource], presets: &PresetRegistry) -> Result<Self, ConfigError> {
    let mut bindings: BTreeMap<String, ImportBinding> = BTreeMap::new();
    for source in sources {
      for binding in source.expand(presets)? {
        if let Some(existing) = bindings.get(&binding.local) {
          return Err(ConfigError::SymbolCollision {
            name: binding.local,
            first: existing.module.clone(),
            second: binding.module,
          });
        }
        bindings.insert(binding.local.clone(), binding);
      }
    }
    debug!(symbols = bindings.len(), sources = sources.len(), "import table built");
    Ok(Self { bindings })
  }

  pub fn bindings(&self) -> impl Iterator<Item = &ImportBinding> {
    self.bindings.values()
  }

  pub fn get(&self, local: &str) -> Option<&ImportBinding> {
    self.bindings.get(local)
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  /// Distinct origin modules, sorted.
  pub fn modules(&self) -> Vec<&str> {
    let mut modules: Vec<&str> = self.bindings.values().map(|b| b.module.as_str()).collect();
    modules.sort_unstable();
    modules.dedup();
    modules
  }
}
