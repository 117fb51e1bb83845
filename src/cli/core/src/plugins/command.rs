/* src/cli/core/src/plugins/command.rs */

// External plugins: one shell command per file, JSON on stdin and stdout.

use std::path::{Path, PathBuf};

use plait_core::{BoxError, Plugin, SourceFile, Stage};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::shell::run_piped;

#[derive(Debug, Serialize)]
struct Request<'a> {
  id: &'a Path,
  code: &'a str,
  lang: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Response {
  Decline,
  Transform { code: String, lang: Option<String> },
  Finish { code: String, lang: Option<String> },
}

#[derive(Debug)]
pub struct CommandPlugin {
  name: String,
  command: String,
  extensions: Vec<String>,
  root: PathBuf,
}

impl CommandPlugin {
  pub fn new(name: &str, command: &str, extensions: &[String], root: &Path) -> Self {
    Self {
      name: name.to_string(),
      command: command.to_string(),
      extensions: extensions.iter().map(|e| e.trim_start_matches('.').to_ascii_lowercase()).collect(),
      root: root.to_path_buf(),
    }
  }

  pub fn handles(&self, lang: &str) -> bool {
    self.extensions.iter().any(|e| e == lang)
  }
}

impl Plugin for CommandPlugin {
  fn name(&self) -> &str {
    &self.name
  }

  fn transform(&self, file: &SourceFile) -> Result<Stage, BoxError> {
    if !self.handles(&file.lang) {
      return Ok(Stage::Decline);
    }
    let request = serde_json::to_vec(&Request { id: &file.id, code: &file.code, lang: &file.lang })?;
    let stdout = run_piped(&self.root, &self.command, &self.name, &request)?;
    let response: Response = serde_json::from_str(stdout.trim())
      .map_err(|e| format!("invalid response from `{}`: {e}", self.command))?;
    trace!(plugin = %self.name, id = %file.id.display(), ?response, "command replied");

    let apply = |code: String, lang: Option<String>| {
      let next = file.with_code(code);
      match lang {
        Some(lang) => next.with_lang(lang),
        None => next,
      }
    };
    Ok(match response {
      Response::Decline => Stage::Decline,
      Response::Transform { code, lang } => Stage::Transform(apply(code, lang)),
      Response::Finish { code, lang } => Stage::Finish(apply(code, lang)),
    })
  }
}
