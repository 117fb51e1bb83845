/* src/core/src/resolve.rs */

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::alias::AliasMap;
use crate::errors::ResolveError;
use crate::pipeline::Pipeline;

/// Extensions probed when a specifier names a file without one.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".mjs", ".js", ".mts", ".ts", ".jsx", ".tsx", ".json"];

/// Where a specifier ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedId {
  File(PathBuf),
  /// Claimed by a plugin's `resolve_id` hook; content comes from its `load` hook.
  Virtual(String),
}

#[derive(Debug, Clone)]
pub struct Resolver {
  root: PathBuf,
  aliases: AliasMap,
  extensions: Vec<String>,
}

impl Resolver {
  pub fn new(root: impl Into<PathBuf>, aliases: AliasMap, extensions: Option<Vec<String>>) -> Self {
    let extensions = extensions
      .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect())
      .into_iter()
      .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
      .collect();
    Self { root: root.into(), aliases, extensions }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn aliases(&self) -> &AliasMap {
    &self.aliases
  }

  /// Aliases first, then default resolution.
  pub fn resolve(&self, specifier: &str, importer: Option<&Path>) -> Result<PathBuf, ResolveError> {
    if let Some(candidate) = self.aliases.rewrite(specifier) {
      return self.resolve_candidate(specifier, &candidate, importer);
    }
    self.resolve_default(specifier, importer)
  }

  /// Aliases, then plugin `resolve_id` hooks in pipeline order, then default resolution.
  pub fn resolve_with(
    &self,
    pipeline: &Pipeline,
    specifier: &str,
    importer: Option<&Path>,
  ) -> Result<ResolvedId, ResolveError> {
    if let Some(candidate) = self.aliases.rewrite(specifier) {
      return self.resolve_candidate(specifier, &candidate, importer).map(ResolvedId::File);
    }
    if let Some(id) = pipeline.resolve_id(specifier, importer) {
      return Ok(ResolvedId::Virtual(id));
    }
    self.resolve_default(specifier, importer).map(ResolvedId::File)
  }

  fn resolve_default(
    &self,
    specifier: &str,
    importer: Option<&Path>,
  ) -> Result<PathBuf, ResolveError> {
    if is_relative(specifier) {
      let base = importer.and_then(Path::parent).unwrap_or(&self.root);
      return self.resolve_candidate(specifier, &base.join(specifier), importer);
    }
    if Path::new(specifier).is_absolute() {
      return self.resolve_candidate(specifier, Path::new(specifier), importer);
    }
    self.resolve_package(specifier, importer)
  }

  /// Resolve a filesystem candidate: the file itself, then with each extension,
  /// then as a directory with an index file.
  pub fn resolve_path(&self, specifier: &str, candidate: &Path) -> Result<PathBuf, ResolveError> {
    self.resolve_candidate(specifier, candidate, None)
  }

  fn resolve_candidate(
    &self,
    specifier: &str,
    candidate: &Path,
    importer: Option<&Path>,
  ) -> Result<PathBuf, ResolveError> {
    let path = normalize(candidate);
    if !path.starts_with(&self.root) {
      return Err(ResolveError::OutsideRoot { specifier: specifier.to_string(), path });
    }
    let resolved = self.probe(&path).ok_or_else(|| ResolveError::NotFound {
      specifier: specifier.to_string(),
      importer: importer.map(Path::to_path_buf),
    })?;
    debug!(specifier, resolved = %resolved.display(), "resolved");
    Ok(resolved)
  }

  fn probe(&self, path: &Path) -> Option<PathBuf> {
    if path.is_file() {
      return Some(path.to_path_buf());
    }
    for ext in &self.extensions {
      let candidate = append_extension(path, ext);
      if candidate.is_file() {
        return Some(candidate);
      }
    }
    if path.is_dir() {
      for ext in &self.extensions {
        let candidate = path.join(format!("index{ext}"));
        if candidate.is_file() {
          return Some(candidate);
        }
      }
    }
    None
  }

  /// Node-style lookup: walk `node_modules` directories from the importer up to the root.
  fn resolve_package(
    &self,
    specifier: &str,
    importer: Option<&Path>,
  ) -> Result<PathBuf, ResolveError> {
    let not_found = || ResolveError::NotFound {
      specifier: specifier.to_string(),
      importer: importer.map(Path::to_path_buf),
    };
    let (name, subpath) = split_package(specifier).ok_or_else(not_found)?;
    let start = importer.and_then(Path::parent).unwrap_or(&self.root);

    for dir in start.ancestors() {
      if !dir.starts_with(&self.root) {
        break;
      }
      let package_dir = dir.join("node_modules").join(name);
      if !package_dir.is_dir() {
        continue;
      }
      let resolved = match subpath {
        Some(sub) => self.probe(&package_dir.join(sub)),
        None => self.package_entry(&package_dir),
      };
      match resolved {
        Some(path) => return Ok(path),
        None => trace!(dir = %package_dir.display(), "package entry not found, trying parent"),
      }
    }
    Err(not_found())
  }

  /// Package entry point: `module`, then `main`, then `index`.
  fn package_entry(&self, package_dir: &Path) -> Option<PathBuf> {
    let manifest = std::fs::read_to_string(package_dir.join("package.json"))
      .ok()
      .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok());
    if let Some(manifest) = manifest {
      for field in ["module", "main"] {
        if let Some(entry) = manifest.get(field).and_then(|v| v.as_str()) {
          if let Some(found) = self.probe(&normalize(&package_dir.join(entry))) {
            return Some(found);
          }
        }
      }
    }
    self.probe(&package_dir.join("index"))
  }
}

fn is_relative(specifier: &str) -> bool {
  specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// `@scope/name/sub/path` -> (`@scope/name`, `sub/path`), `name` -> (`name`, None)
fn split_package(specifier: &str) -> Option<(&str, Option<&str>)> {
  let split_at = if specifier.starts_with('@') {
    let slash = specifier.find('/')?;
    specifier[slash + 1..].find('/').map(|i| slash + 1 + i)
  } else {
    specifier.find('/')
  };
  let (name, rest) = match split_at {
    Some(i) => (&specifier[..i], Some(&specifier[i + 1..])),
    None => (specifier, None),
  };
  if name.is_empty() || name.ends_with('/') {
    return None;
  }
  Some((name, rest.filter(|r| !r.is_empty())))
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
  let mut s = path.as_os_str().to_owned();
  s.push(ext);
  PathBuf::from(s)
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push(component);
        }
      }
      other => out.push(other),
    }
  }
  out
}

#[cfg(test)]
mod tests;
