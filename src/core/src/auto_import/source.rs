/* src/core/src/auto_import/source.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::presets::PresetRegistry;
use crate::errors::ConfigError;

/// One entry of the auto-import source list.
///
/// In TOML: `"vue"` for a whole preset, or
/// `{ "vue-router" = ["useRoute", "useRouter"] }` for named symbols.
/// A named symbol may be renamed locally with `"useStorage as useLocalStore"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportSource {
  Module(String),
  Named(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportBinding {
  /// Name usable in source files.
  pub local: String,
  pub module: String,
  /// Name the module exports it under.
  pub export: String,
}

impl ImportBinding {
  pub fn new(module: &str, spec: &str) -> Result<Self, ConfigError> {
    let invalid = || ConfigError::InvalidSymbol { module: module.to_string(), symbol: spec.to_string() };
    let (export, local) = match spec.split_once(" as ") {
      Some((export, local)) => (export.trim(), local.trim()),
      None => (spec.trim(), spec.trim()),
    };
    if !is_identifier(export) || !is_identifier(local) {
      return Err(invalid());
    }
    Ok(Self { local: local.to_string(), module: module.to_string(), export: export.to_string() })
  }

  pub fn is_renamed(&self) -> bool {
    self.local != self.export
  }
}

impl ImportSource {
  pub(super) fn expand(&self, presets: &PresetRegistry) -> Result<Vec<ImportBinding>, ConfigError> {
    match self {
      Self::Module(module) => {
        let symbols =
          presets.get(module).ok_or_else(|| ConfigError::UnknownPreset { module: module.clone() })?;
        symbols.iter().map(|s| ImportBinding::new(module, s)).collect()
      }
      Self::Named(map) => map
        .iter()
        .flat_map(|(module, symbols)| symbols.iter().map(move |s| ImportBinding::new(module, s)))
        .collect(),
    }
  }
}

/// JavaScript identifier, ASCII subset.
fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
