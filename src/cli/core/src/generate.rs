/* src/cli/core/src/generate.rs */

// `plait generate`: write the declaration file and route manifest without
// transforming any source.

use anyhow::Result;

use crate::build::output::write_route_manifest;
use crate::session::Session;
use crate::ui;

pub fn run_generate(session: &Session) -> Result<()> {
  if session.auto_import.is_none() && session.pages.is_none() {
    ui::warn("no code-generating plugins configured (auto-import, pages)");
    return Ok(());
  }
  session.start()?;

  if let Some(auto_import) = &session.auto_import {
    let path = auto_import.dts_path();
    let symbols = auto_import.table().len();
    ui::ok(&format!("{} ({symbols} symbols)", session.display(&path)));
  }
  if let Some(pages) = &session.pages {
    let table = pages.table();
    let path = write_route_manifest(&session.out_dir(), &table)?;
    ui::ok(&format!("{} ({} routes)", session.display(&path), table.len()));
  }
  Ok(())
}
