/* src/cli/core/src/clean.rs */

// `plait clean`: removes build output and the generated declaration file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PlaitConfig;
use crate::plugins::{AutoImportOptions, parse_options};
use crate::ui;

/// Works from the config alone, so a project whose aliases or pages
/// directory are currently broken can still be cleaned.
pub fn run_clean(config: &PlaitConfig, base_dir: &Path) -> Result<()> {
  ui::arrow("cleaning project");
  config.validate()?;

  delete_dir_if_exists(&base_dir.join(&config.build.out_dir))?;
  if let Some(entry) = config.plugin("auto-import") {
    let options: AutoImportOptions = parse_options(entry)?;
    delete_file_if_exists(&base_dir.join(&options.dts))?;
  }

  ui::ok("clean complete");
  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}

fn delete_file_if_exists(path: &Path) -> Result<()> {
  if path.is_file() {
    std::fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}
