/* src/cli/core/src/plugins/mod.rs */

// Turns `[[plugins]]` entries into pipeline entries.

mod auto_import;
mod command;
mod pages;


use std::path::Path;
use std::sync::Arc;

use plait_core::{ConfigError, Pipeline, Plugin};
use serde::de::DeserializeOwned;

use crate::config::{PlaitConfig, PluginEntry};

pub use auto_import::{AutoImportOptions, AutoImportPlugin};
pub use command::CommandPlugin;
pub use pages::PagesPlugin;

/// The pipeline plus typed handles to the built-in plugins in it.
pub struct BuiltPlugins {
  pub pipeline: Pipeline,
  pub auto_import: Option<Arc<AutoImportPlugin>>,
  pub pages: Option<Arc<PagesPlugin>>,
}

pub fn build_plugins(config: &PlaitConfig, root: &Path) -> Result<BuiltPlugins, ConfigError> {
  let mut entries: Vec<Arc<dyn Plugin>> = Vec::with_capacity(config.plugins.len());
  let mut auto_import = None;
  let mut pages = None;

  for entry in &config.plugins {
    match (entry.name.as_str(), &entry.command) {
      (_, Some(command)) => {
        if !entry.options.is_empty() {
          return Err(unknown_options(entry));
        }
        let plugin = CommandPlugin::new(&entry.name, command, &entry.extensions, root);
        entries.push(Arc::new(plugin));
      }
      ("auto-import", None) => {
        let plugin = Arc::new(AutoImportPlugin::new(root, parse_options(entry)?)?);
        auto_import = Some(Arc::clone(&plugin));
        entries.push(plugin);
      }
      ("pages", None) => {
        let plugin = Arc::new(PagesPlugin::new(root, parse_options(entry)?));
        pages = Some(Arc::clone(&plugin));
        entries.push(plugin);
      }
      (name, None) => {
        return Err(ConfigError::Plugin {
          name: name.to_string(),
          message: "unknown plugin; set `command` to run an external plugin".to_string(),
        });
      }
    }
  }

  let pipeline = Pipeline::new(entries)?;
  Ok(BuiltPlugins { pipeline, auto_import, pages })
}

/// Deserialize the free-form option keys of an entry into the plugin's option type.
pub(crate) fn parse_options<T: DeserializeOwned>(entry: &PluginEntry) -> Result<T, ConfigError> {
  toml::Value::Table(entry.options.clone())
    .try_into()
    .map_err(|e| ConfigError::Plugin {
      name: entry.name.clone(),
      message: e.to_string().trim().to_string(),
    })
}

fn unknown_options(entry: &PluginEntry) -> ConfigError {
  let keys: Vec<&str> = entry.options.keys().map(String::as_str).collect();
  ConfigError::Plugin {
    name: entry.name.clone(),
    message: format!("command plugins take no options (found {})", keys.join(", ")),
  }
}
