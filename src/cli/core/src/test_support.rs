/* src/cli/core/src/test_support.rs */

// Throwaway projects on disk for command-level tests.

use std::path::PathBuf;

use crate::config::CONFIG_FILE;
use crate::session::Session;

pub(crate) struct Fixture {
  _tmp: tempfile::TempDir,
  pub root: PathBuf,
}

impl Fixture {
  pub fn new(config: &str) -> Self {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    std::fs::write(root.join(CONFIG_FILE), config).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    Self { _tmp: tmp, root }
  }

  pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
    let path = self.root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
  }

  pub fn read(&self, rel: &str) -> String {
    std::fs::read_to_string(self.root.join(rel)).unwrap()
  }

  pub fn exists(&self, rel: &str) -> bool {
    self.root.join(rel).exists()
  }

  pub fn config_path(&self) -> PathBuf {
    self.root.join(CONFIG_FILE)
  }

  pub fn session(&self) -> Session {
    Session::open(&self.config_path(), false).unwrap()
  }

  pub fn path(&self, rel: &str) -> PathBuf {
    self.root.join(rel)
  }
}

/// Shell command that ignores stdin and replies with `response`.
pub(crate) fn reply(response: &str) -> String {
  format!("cat >/dev/null; printf '%s' '{response}'")
}

/// A `[[plugins]]` block for a command plugin, using a TOML literal string.
pub(crate) fn command_plugin(name: &str, ext: &str, command: &str) -> String {
  format!("\n[[plugins]]\nname = \"{name}\"\ncommand = '''{command}'''\nextensions = [\"{ext}\"]\n")
}

pub(crate) fn project(extra: &str) -> String {
  format!("[project]\nname = \"fixture\"\n{extra}")
}

