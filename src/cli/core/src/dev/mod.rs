/* src/cli/core/src/dev/mod.rs */

// `plait dev`: initial build, then rebuild changed files until Ctrl+C.

mod watcher;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use plait_core::{ChangeKind, FileChange, PlaitError, SourceFile, Supersede, Ticket};
use tokio::signal;
use tokio::task::JoinSet;
use tracing::debug;

use crate::build::output::{output_path, write_if_changed, write_route_manifest};
use crate::build::{build_sources, is_skipped, transform_path};
use crate::config::{CONFIG_FILE, load_plait_config};
use crate::plugins::parse_options;
use crate::session::Session;
use crate::ui::{self, CYAN, DIM, GREEN, RED, RESET};

use watcher::{ChangeSet, setup_watcher, watch};


type Rebuild = (Ticket, Instant, Result<SourceFile, PlaitError>);

pub async fn run_dev(config_path: &Path) -> Result<()> {
  let mut session = Session::open(config_path, true)?;
  ui::banner("dev");

  // Configuration problems are fatal here, before anything is watched.
  session.start()?;
  initial_build(&session)?;

  let (mut watcher, mut rx) = setup_watcher()?;
  let mut watched = Vec::new();
  for (dir, recursive) in watch_targets(&session) {
    if dir.exists() {
      watch(&mut watcher, &dir, recursive)?;
      watched.push(session.display(&dir).to_string());
    }
  }
  ui::arrow(&format!("watching {}", watched.join(", ")));
  println!("  {DIM}press Ctrl+C to stop{RESET}");
  ui::blank();

  let supersede = Arc::new(Supersede::new());
  let mut tasks: JoinSet<Rebuild> = JoinSet::new();
  let debounce = Duration::from_millis(session.config.dev.debounce_ms);

  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        ui::blank();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      Some(event) = rx.recv() => {
        // Debounce: wait, then drain pending events
        let mut changes = ChangeSet::default();
        changes.add(event);
        tokio::time::sleep(debounce).await;
        while let Ok(event) = rx.try_recv() {
          changes.add(event);
        }
        if !changes.is_empty() {
          handle_changes(&mut session, changes, &supersede, &mut tasks);
        }
      }
      Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
        match joined {
          Ok((ticket, started, result)) => finish_rebuild(&session, &supersede, ticket, started, result),
          Err(e) => ui::tag(RED, &format!("rebuild panicked: {e}")),
        }
      }
    }
  }

  tasks.abort_all();
  Ok(())
}

fn initial_build(session: &Session) -> Result<()> {
  let started = Instant::now();
  let summary = build_sources(session)?;
  for failure in &summary.failures {
    ui::fail(&ui::diagnostic(failure));
  }
  if let Some(pages) = &session.pages {
    write_route_manifest(&session.out_dir(), &pages.table())?;
  }
  ui::ok(&format!(
    "built {} files in {:.1}s ({} failed)",
    summary.files,
    started.elapsed().as_secs_f64(),
    summary.failures.len()
  ));
  Ok(())
}

/// Source tree, config file, and the pages directory when it lives elsewhere.
fn watch_targets(session: &Session) -> Vec<(PathBuf, bool)> {
  let src = session.src_dir();
  let mut targets = vec![(src.clone(), true), (session.config_path.clone(), false)];
  if let Some(pages) = &session.pages {
    if !pages.dir().starts_with(&src) {
      targets.push((pages.dir().to_path_buf(), true));
    }
  }
  targets
}

fn handle_changes(
  session: &mut Session,
  changes: ChangeSet,
  supersede: &Arc<Supersede>,
  tasks: &mut JoinSet<Rebuild>,
) {
  let src_dir = session.src_dir();
  let out_dir = session.out_dir();
  for (path, kind) in changes.into_changes() {
    if path == session.config_path {
      reload_config(session);
      continue;
    }
    if path.starts_with(&out_dir) || is_ignored(&path, &session.root) {
      continue;
    }
    debug!(path = %path.display(), ?kind, "change");

    let change = FileChange::new(&path, kind);
    match session.pipeline.watch_change(&session.ctx, &change) {
      Ok(reacted) if reacted.iter().any(|n| n == "pages") => routes_updated(session),
      Ok(_) => {}
      Err(e) => ui::tag(RED, &ui::diagnostic(&e)),
    }

    if !path.starts_with(&src_dir) {
      continue;
    }
    if kind == ChangeKind::Removed {
      supersede.forget(&path);
      remove_output(session, &path);
      continue;
    }
    if !path.is_file() {
      continue;
    }
    let ticket = supersede.begin(&path);
    let pipeline = Arc::clone(&session.pipeline);
    tasks.spawn_blocking(move || {
      let started = Instant::now();
      let result = transform_path(&pipeline, &ticket.path);
      (ticket, started, result)
    });
  }
}

fn finish_rebuild(
  session: &Session,
  supersede: &Supersede,
  ticket: Ticket,
  started: Instant,
  result: Result<SourceFile, PlaitError>,
) {
  if !supersede.is_current(&ticket) {
    debug!(path = %ticket.path.display(), generation = ticket.generation, "stale rebuild discarded");
    return;
  }
  let shown = session.display(&ticket.path);
  match result {
    Ok(file) => {
      let target = output_path(&session.src_dir(), &session.out_dir(), &file);
      match write_if_changed(&target, &file.code) {
        Ok(_) => ui::tag(
          GREEN,
          &format!("rebuilt {shown} {DIM}({}ms){RESET}", started.elapsed().as_millis()),
        ),
        Err(e) => ui::tag(RED, &format!("failed to write {}: {e}", target.display())),
      }
    }
    Err(e) => ui::tag(RED, &ui::diagnostic(&e)),
  }
}

fn routes_updated(session: &Session) {
  let Some(pages) = &session.pages else {
    return;
  };
  let table = pages.table();
  match write_route_manifest(&session.out_dir(), &table) {
    Ok(_) => ui::tag(CYAN, &format!("routes updated ({} routes)", table.len())),
    Err(e) => ui::tag(RED, &format!("{e:#}")),
  }
}

fn remove_output(session: &Session, path: &Path) {
  let target = output_path(&session.src_dir(), &session.out_dir(), &SourceFile::new(path, ""));
  if target.is_file() {
    if let Err(e) = std::fs::remove_file(&target) {
      ui::tag(RED, &format!("failed to remove {}: {e}", target.display()));
      return;
    }
  }
  ui::tag(DIM, &format!("removed {}", session.display(path)));
}

/// Only auto-import options can change without a restart.
fn reload_config(session: &mut Session) {
  let config = match load_plait_config(&session.config_path) {
    Ok(config) => config,
    Err(e) => {
      ui::tag(RED, &format!("{e:#}; keeping previous config"));
      return;
    }
  };
  if config == session.config {
    return;
  }
  let reconfigurable = session.config.differs_only_in(&config, "auto-import");
  match (&session.auto_import, config.plugin("auto-import")) {
    (Some(auto_import), Some(entry)) if reconfigurable => {
      let result = parse_options(entry).map_err(PlaitError::from).and_then(|o| auto_import.reconfigure(o));
      match result {
        Ok(true) => ui::tag(CYAN, "auto-import declarations regenerated"),
        Ok(false) => ui::tag(DIM, "auto-import declarations unchanged"),
        Err(e) => {
          ui::tag(RED, &format!("{e}; keeping previous declarations"));
          return;
        }
      }
      session.config = config;
    }
    _ => ui::warn(&format!("{CONFIG_FILE} changed; restart plait dev to apply")),
  }
}

fn is_ignored(path: &Path, root: &Path) -> bool {
  path.strip_prefix(root).unwrap_or(path).components().any(|c| is_skipped(c.as_os_str()))
}
