/* src/core/src/supersede.rs */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Latest generation per file. A newer rebuild of the same file makes
/// every older ticket stale. Generations are never reused.
#[derive(Debug, Default)]
pub struct Supersede {
  inner: Mutex<Generations>,
}

#[derive(Debug, Default)]
struct Generations {
  next: u64,
  latest: HashMap<PathBuf, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
  pub path: PathBuf,
  pub generation: u64,
}

impl Supersede {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn begin(&self, path: &Path) -> Ticket {
    let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
    inner.next += 1;
    let generation = inner.next;
    inner.latest.insert(path.to_path_buf(), generation);
    Ticket { path: path.to_path_buf(), generation }
  }

  pub fn is_current(&self, ticket: &Ticket) -> bool {
    let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
    inner.latest.get(&ticket.path) == Some(&ticket.generation)
  }

  /// Drop bookkeeping for a removed file; outstanding tickets become stale.
  pub fn forget(&self, path: &Path) {
    let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
    inner.latest.remove(path);
  }
}
