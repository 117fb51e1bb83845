/* src/cli/core/src/inspect.rs */

// `plait resolve` and `plait routes`: look at what the build would see.

use std::path::Path;

use anyhow::{Context, Result, bail};
use plait_core::ResolvedId;

use crate::session::Session;
use crate::ui::{self, BOLD, DIM, RESET};

/// Resolve one specifier the way the build does: aliases, plugins, default.
pub fn run_resolve(session: &Session, specifier: &str, from: Option<&Path>) -> Result<ResolvedId> {
  let importer = match from {
    Some(p) if p.is_absolute() => Some(p.to_path_buf()),
    Some(p) => Some(std::env::current_dir().context("failed to get cwd")?.join(p)),
    None => None,
  };
  let resolved = session.resolver.resolve_with(&session.pipeline, specifier, importer.as_deref())?;
  match &resolved {
    ResolvedId::File(path) => ui::ok(&format!("{specifier} {DIM}->{RESET} {}", path.display())),
    ResolvedId::Virtual(id) => ui::ok(&format!("{specifier} {DIM}->{RESET} {id} {DIM}(virtual){RESET}")),
  }
  Ok(resolved)
}

/// List the route table in match order, or show which route a path hits.
pub fn run_routes(session: &Session, match_path: Option<&str>) -> Result<()> {
  let Some(pages) = &session.pages else {
    bail!("no pages plugin configured in {}", session.config_path.display());
  };
  let table = pages.rescan()?;

  if let Some(path) = match_path {
    let Some(hit) = table.match_path(path) else {
      bail!("no route matches {path}");
    };
    ui::ok(&format!("{path} {DIM}->{RESET} {BOLD}{}{RESET} ({})", hit.route.path, hit.route.file));
    for (name, value) in &hit.params {
      ui::detail(&format!("{name} = {value:?}"));
    }
    return Ok(());
  }

  if table.is_empty() {
    ui::warn(&format!("no pages under {}", session.display(pages.dir())));
    return Ok(());
  }
  let width = table.routes().iter().map(|r| r.path.len()).max().unwrap_or(0);
  for route in table.routes() {
    println!("  {:<width$}  {DIM}{}{RESET}  {}", route.path, route.name, route.file);
  }
  ui::blank();
  ui::ok(&format!("{} routes", table.len()));
  Ok(())
}
