/* src/core/src/alias.rs */

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::ConfigError;
use crate::resolve::normalize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
  pub prefix: String,
  pub target: PathBuf,
}

impl AliasRule {
  /// Exact-prefix match: the specifier is the prefix itself or continues with `/`.
  /// Returns the remainder after the separator.
  fn strip<'a>(&self, specifier: &'a str) -> Option<&'a str> {
    let rest = specifier.strip_prefix(self.prefix.as_str())?;
    if rest.is_empty() {
      return Some(rest);
    }
    rest.strip_prefix('/')
  }
}

/// Alias rules, loaded once and immutable afterwards. Longest prefix wins.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
  rules: Vec<AliasRule>,
}

impl AliasMap {
  /// Validate and build the rules. Relative targets resolve against `root`,
  /// which must already be absolute.
  pub fn new<I, K, P>(root: &Path, entries: I) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = (K, P)>,
    K: Into<String>,
    P: AsRef<Path>,
  {
    let mut rules: Vec<AliasRule> = Vec::new();
    for (prefix, target) in entries {
      let prefix = prefix.into();
      if prefix.is_empty() {
        return Err(ConfigError::EmptyAliasPrefix);
      }
      if prefix.ends_with('/') {
        return Err(ConfigError::TrailingSlashAlias { prefix });
      }
      if rules.iter().any(|r| r.prefix == prefix) {
        return Err(ConfigError::DuplicateAlias { prefix });
      }
      let target = normalize(&root.join(target.as_ref()));
      if !target.starts_with(root) {
        return Err(ConfigError::AliasTargetOutsideRoot { prefix, target });
      }
      if !target.is_dir() {
        return Err(ConfigError::AliasTargetMissing { prefix, target });
      }
      rules.push(AliasRule { prefix, target });
    }
    rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()).then_with(|| a.prefix.cmp(&b.prefix)));
    Ok(Self { rules })
  }

  pub fn rules(&self) -> &[AliasRule] {
    &self.rules
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Substitute the matching prefix with its target directory.
  /// `None` means no alias applies and default resolution should run.
  pub fn rewrite(&self, specifier: &str) -> Option<PathBuf> {
    let (rule, rest) = self.rules.iter().find_map(|r| r.strip(specifier).map(|rest| (r, rest)))?;
    trace!(specifier, prefix = %rule.prefix, "alias matched");
    if rest.is_empty() { Some(rule.target.clone()) } else { Some(rule.target.join(rest)) }
  }
}
