/* src/core/src/source.rs */

use std::path::{Path, PathBuf};

/// A module flowing through the pipeline. `lang` starts as the file extension
/// and changes when a plugin compiles the module to another language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  pub id: PathBuf,
  pub code: String,
  pub lang: String,
}

impl SourceFile {
  pub fn new(id: impl Into<PathBuf>, code: impl Into<String>) -> Self {
    let id = id.into();
    let lang = lang_of(&id);
    Self { id, code: code.into(), lang }
  }

  pub fn with_code(&self, code: impl Into<String>) -> Self {
    Self { id: self.id.clone(), code: code.into(), lang: self.lang.clone() }
  }

  pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
    self.lang = lang.into();
    self
  }

  /// Whether a plugin changed the module's language.
  pub fn lang_changed(&self) -> bool {
    lang_of(&self.id) != self.lang
  }
}

/// Lowercased extension without the dot, or an empty string.
pub fn lang_of(path: &Path) -> String {
  path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).unwrap_or_default()
}
