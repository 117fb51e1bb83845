/* src/cli/core/src/dev/watcher.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use notify::event::{EventKind, ModifyKind};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use plait_core::ChangeKind;
use tokio::sync::mpsc;
use tracing::trace;

pub(super) fn setup_watcher() -> Result<(RecommendedWatcher, mpsc::Receiver<notify::Event>)> {
  let (tx, rx) = mpsc::channel(256);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| match res {
      Ok(event) => {
        let _ = tx.blocking_send(event);
      }
      Err(e) => trace!(error = %e, "watch error"),
    },
    notify::Config::default(),
  )?;
  // Paths are registered by the caller after creation
  Ok((watcher, rx))
}

pub(super) fn watch(watcher: &mut RecommendedWatcher, path: &Path, recursive: bool) -> Result<()> {
  let mode = if recursive { RecursiveMode::Recursive } else { RecursiveMode::NonRecursive };
  watcher.watch(path, mode)?;
  Ok(())
}

/// Map a notify event kind onto the three kinds plugins see.
/// Renames and unknown kinds are decided by whether the path still exists.
pub(super) fn classify(kind: &EventKind, path: &Path) -> Option<ChangeKind> {
  match kind {
    EventKind::Access(_) => None,
    EventKind::Create(_) => Some(ChangeKind::Created),
    EventKind::Remove(_) => Some(ChangeKind::Removed),
    EventKind::Modify(ModifyKind::Name(_)) | EventKind::Any | EventKind::Other => {
      Some(if path.exists() { ChangeKind::Created } else { ChangeKind::Removed })
    }
    EventKind::Modify(_) => Some(ChangeKind::Modified),
  }
}

/// Fold a burst of events into one change per path; the latest kind wins,
/// except that a create followed by edits stays a create.
#[derive(Debug, Default)]
pub(super) struct ChangeSet {
  changes: BTreeMap<PathBuf, ChangeKind>,
}

impl ChangeSet {
  pub fn add(&mut self, event: notify::Event) {
    for path in event.paths {
      let Some(kind) = classify(&event.kind, &path) else {
        continue;
      };
      let merged = match (self.changes.get(&path), kind) {
        (Some(ChangeKind::Created), ChangeKind::Modified) => ChangeKind::Created,
        _ => kind,
      };
      self.changes.insert(path, merged);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.changes.is_empty()
  }

  pub fn into_changes(self) -> Vec<(PathBuf, ChangeKind)> {
    self.changes.into_iter().collect()
  }
}
