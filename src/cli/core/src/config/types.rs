/* src/cli/core/src/config/types.rs */

use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;

/// Names handled by the CLI itself; every other plugin needs a `command`.
pub const BUILTIN_PLUGINS: &[&str] = &["auto-import", "pages"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaitConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub resolve: ResolveSection,
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub dev: DevSection,
  #[serde(default)]
  pub plugins: Vec<PluginEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResolveSection {
  /// Prefix -> directory, relative to the project root.
  #[serde(default)]
  pub alias: BTreeMap<String, String>,
  pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildSection {
  #[serde(default = "default_src_dir")]
  pub src_dir: String,
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self { src_dir: default_src_dir(), out_dir: default_out_dir() }
  }
}

fn default_src_dir() -> String {
  "src".to_string()
}

fn default_out_dir() -> String {
  ".plait/dist".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DevSection {
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
}

impl Default for DevSection {
  fn default() -> Self {
    Self { debounce_ms: default_debounce_ms() }
  }
}

fn default_debounce_ms() -> u64 {
  300
}

/// One `[[plugins]]` table. Keys other than `name`, `command` and
/// `extensions` are plugin options, checked by the plugin itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginEntry {
  pub name: String,
  pub command: Option<String>,
  #[serde(default)]
  pub extensions: Vec<String>,
  #[serde(flatten)]
  pub options: toml::Table,
}

impl PluginEntry {
  pub fn is_builtin(&self) -> bool {
    BUILTIN_PLUGINS.contains(&self.name.as_str())
  }
}

impl PlaitConfig {
  pub fn validate(&self) -> Result<()> {
    if self.project.name.trim().is_empty() {
      bail!("project.name must not be empty");
    }
    if self.build.out_dir.trim().is_empty() {
      bail!("build.out_dir must not be empty");
    }
    let src_dir = project_relative("build.src_dir", &self.build.src_dir)?;
    let out_dir = project_relative("build.out_dir", &self.build.out_dir)?;
    if out_dir.as_os_str().is_empty() {
      bail!("build.out_dir \"{}\" is the project root", self.build.out_dir);
    }
    if src_dir.starts_with(&out_dir) {
      bail!(
        "build.out_dir \"{}\" must not be build.src_dir or contain it",
        self.build.out_dir
      );
    }
    let mut seen = HashSet::new();
    for (i, entry) in self.plugins.iter().enumerate() {
      if entry.name.trim().is_empty() {
        bail!("plugins[{i}]: name must not be empty");
      }
      if !seen.insert(entry.name.as_str()) {
        bail!("plugins[{i}]: duplicate plugin name \"{}\"", entry.name);
      }
      match (&entry.command, entry.is_builtin()) {
        (Some(_), true) => {
          bail!("plugins[{i}]: \"{}\" is built in and does not take a command", entry.name)
        }
        (Some(_), false) if entry.extensions.is_empty() => {
          bail!("plugins[{i}]: \"{}\" has a command but no extensions", entry.name)
        }
        (None, false) => bail!(
          "plugins[{i}]: unknown plugin \"{}\" (built in: {}; set `command` for an external plugin)",
          entry.name,
          BUILTIN_PLUGINS.join(", ")
        ),
        _ => {}
      }
      if let Some(dts) = entry.options.get("dts").and_then(toml::Value::as_str) {
        let dts = project_relative(&format!("plugins[{i}].dts"), dts)?;
        if dts.as_os_str().is_empty() {
          bail!("plugins[{i}].dts must name a file");
        }
      }
    }
    Ok(())
  }

  pub fn plugin(&self, name: &str) -> Option<&PluginEntry> {
    self.plugins.iter().find(|p| p.name == name)
  }

  /// Whether two configs differ only in the options of the named plugin.
  pub fn differs_only_in(&self, other: &Self, name: &str) -> bool {
    let strip = |c: &Self| {
      let mut c = c.clone();
      for p in &mut c.plugins {
        if p.name == name {
          p.options.clear();
        }
      }
      c
    };
    strip(self) == strip(other)
  }
}

/// Lexically normalize a configured path against the project root.
/// Absolute paths and paths that climb above the root are rejected;
/// the root itself comes back empty.
fn project_relative(field: &str, value: &str) -> Result<PathBuf> {
  let mut normalized = PathBuf::new();
  for component in Path::new(value).components() {
    match component {
      Component::CurDir => {}
      Component::Normal(part) => normalized.push(part),
      Component::ParentDir => {
        if !normalized.pop() {
          bail!("{field} \"{value}\" points outside the project root");
        }
      }
      Component::RootDir | Component::Prefix(_) => {
        bail!("{field} \"{value}\" must be relative to the project root")
      }
    }
  }
  Ok(normalized)
}
