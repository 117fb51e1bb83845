/* src/cli/core/src/session.rs */

// Everything a command needs, built once from plait.toml.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use plait_core::{AliasMap, Pipeline, PluginContext, Resolver};

use crate::config::{PlaitConfig, load_plait_config};
use crate::plugins::{AutoImportPlugin, PagesPlugin, build_plugins};

pub struct Session {
  pub config: PlaitConfig,
  pub config_path: PathBuf,
  /// Directory holding plait.toml, canonicalized.
  pub root: PathBuf,
  pub resolver: Resolver,
  pub pipeline: Arc<Pipeline>,
  pub auto_import: Option<Arc<AutoImportPlugin>>,
  pub pages: Option<Arc<PagesPlugin>>,
  pub ctx: PluginContext,
}

impl Session {
  pub fn open(config_path: &Path, watch: bool) -> Result<Self> {
    let config = load_plait_config(config_path)?;
    Self::from_config(config, config_path, watch)
  }

  pub fn from_config(config: PlaitConfig, config_path: &Path, watch: bool) -> Result<Self> {
    let root = project_root(config_path)?;
    let aliases = AliasMap::new(&root, config.resolve.alias.iter())
      .with_context(|| format!("invalid [resolve] in {}", config_path.display()))?;
    let resolver = Resolver::new(root.clone(), aliases, config.resolve.extensions.clone());
    let built = build_plugins(&config, &root)
      .with_context(|| format!("invalid [[plugins]] in {}", config_path.display()))?;
    let ctx = PluginContext::new(root.clone(), watch);
    // Absolute, like the paths in watcher events
    let config_path = match config_path.file_name() {
      Some(name) => root.join(name),
      None => config_path.to_path_buf(),
    };
    Ok(Self {
      config,
      config_path,
      root,
      resolver,
      pipeline: Arc::new(built.pipeline),
      auto_import: built.auto_import,
      pages: built.pages,
      ctx,
    })
  }

  /// Run every plugin's `build_start` in declared order.
  pub fn start(&self) -> Result<()> {
    self.pipeline.build_start(&self.ctx)?;
    Ok(())
  }

  pub fn src_dir(&self) -> PathBuf {
    self.root.join(&self.config.build.src_dir)
  }

  pub fn out_dir(&self) -> PathBuf {
    self.root.join(&self.config.build.out_dir)
  }

  /// Project-relative display form of a path.
  pub fn display<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(&self.root).unwrap_or(path).display()
  }
}

pub(crate) fn project_root(config_path: &Path) -> Result<PathBuf> {
  let dir = match config_path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  dir.canonicalize().with_context(|| format!("failed to canonicalize {}", dir.display()))
}
