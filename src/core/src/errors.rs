/* src/core/src/errors.rs */

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type plugins return from their hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Problems in the configuration itself. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("alias prefix must not be empty")]
  EmptyAliasPrefix,
  #[error("alias \"{prefix}\" must not end with '/'")]
  TrailingSlashAlias { prefix: String },
  #[error("duplicate alias \"{prefix}\"")]
  DuplicateAlias { prefix: String },
  #[error("alias \"{prefix}\" target is not a directory: {}", target.display())]
  AliasTargetMissing { prefix: String, target: PathBuf },
  #[error("alias \"{prefix}\" target is outside the project root: {}", target.display())]
  AliasTargetOutsideRoot { prefix: String, target: PathBuf },
  #[error("duplicate plugin \"{name}\" (positions {first} and {second})")]
  DuplicatePlugin { name: String, first: usize, second: usize },
  #[error("plugin \"{name}\": {message}")]
  Plugin { name: String, message: String },
  #[error("auto-import: \"{name}\" is provided by both '{first}' and '{second}'")]
  SymbolCollision { name: String, first: String, second: String },
  #[error("auto-import: no preset for '{module}' (list its symbols explicitly or add a preset)")]
  UnknownPreset { module: String },
  #[error("auto-import: invalid symbol \"{symbol}\" from '{module}'")]
  InvalidSymbol { module: String, symbol: String },
  #[error("routes: directory not found: {}", dir.display())]
  RoutesDirMissing { dir: PathBuf },
  #[error("routes: {file}: {reason}")]
  InvalidRoute { file: String, reason: String },
  #[error("routes: {pattern} is produced by both {first} and {second}")]
  RouteCollision { pattern: String, first: String, second: String },
}

/// Module-not-found class failures, reported where the specifier is used.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("module not found: '{specifier}'{}", importer_suffix(importer.as_deref()))]
  NotFound { specifier: String, importer: Option<PathBuf> },
  #[error("module not found: '{specifier}' resolves outside the project root ({})", path.display())]
  OutsideRoot { specifier: String, path: PathBuf },
}

fn importer_suffix(importer: Option<&Path>) -> String {
  importer.map(|p| format!(" (imported from {})", p.display())).unwrap_or_default()
}

/// A pipeline entry failed on one file.
#[derive(Debug, Error)]
#[error("[{plugin}] {}: {source}", file.display())]
pub struct TransformError {
  pub plugin: String,
  pub file: PathBuf,
  #[source]
  pub source: BoxError,
}

#[derive(Debug, Error)]
pub enum PlaitError {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error(transparent)]
  Transform(#[from] TransformError),
  #[error(transparent)]
  Resolve(#[from] ResolveError),
  #[error("failed to access {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl PlaitError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  /// Short label for diagnostics: which part of the build the failure belongs to.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Config(_) => "config",
      Self::Transform(_) => "transform",
      Self::Resolve(_) => "resolve",
      Self::Io { .. } => "io",
    }
  }
}
