/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::PlaitConfig;

pub const CONFIG_FILE: &str = "plait.toml";

/// Walk upward from `start` to find `plait.toml`, like Cargo.toml discovery
pub fn find_plait_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_plait_config(path: &Path) -> Result<PlaitConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_plait_config(&content).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_plait_config(content: &str) -> Result<PlaitConfig> {
  let config: PlaitConfig = toml::from_str(content).context("failed to parse")?;
  config.validate()?;
  Ok(config)
}
