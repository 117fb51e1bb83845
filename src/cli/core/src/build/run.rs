/* src/cli/core/src/build/run.rs */

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use plait_core::{Pipeline, PlaitError, SourceFile};
use tracing::debug;
use walkdir::WalkDir;

use super::output::{output_path, write_if_changed, write_route_manifest};
use crate::session::Session;
use crate::ui;

#[derive(Debug, Default)]
pub struct BuildSummary {
  pub files: usize,
  pub written: usize,
  pub bytes: u64,
  pub failures: Vec<PlaitError>,
}

pub fn run_build(session: &Session) -> Result<()> {
  let started = Instant::now();
  ui::banner("build");

  ui::step(1, 3, "starting plugins");
  session.start()?;
  report_generated(session);

  ui::step(2, 3, "transforming sources");
  let summary = build_sources(session)?;
  for failure in &summary.failures {
    ui::fail(&ui::diagnostic(failure));
  }
  ui::detail_ok(&format!(
    "{} files, {} written ({})",
    summary.files,
    summary.written,
    ui::format_size(summary.bytes)
  ));

  ui::step(3, 3, "writing route manifest");
  match &session.pages {
    Some(pages) => {
      let path = write_route_manifest(&session.out_dir(), &pages.table())?;
      ui::detail_ok(&format!("{}", session.display(&path)));
    }
    None => ui::detail("no pages plugin, skipped"),
  }
  ui::blank();

  if !summary.failures.is_empty() {
    bail!("{} of {} files failed to build", summary.failures.len(), summary.files);
  }
  ui::ok(&format!("build complete in {:.1}s", started.elapsed().as_secs_f64()));
  Ok(())
}

fn report_generated(session: &Session) {
  if let Some(auto_import) = &session.auto_import {
    let dts = auto_import.dts_path();
    ui::detail_ok(&format!("{} ({} symbols)", session.display(&dts), auto_import.table().len()));
  }
  if let Some(pages) = &session.pages {
    ui::detail_ok(&format!("{} routes from {}", pages.table().len(), session.display(pages.dir())));
  }
}

/// Transform every source file and write the results. Per-file failures are
/// collected; only output I/O errors abort.
pub fn build_sources(session: &Session) -> Result<BuildSummary> {
  let src_dir = session.src_dir();
  let out_dir = session.out_dir();
  let mut summary = BuildSummary::default();
  for path in collect_sources(&src_dir, &out_dir)? {
    summary.files += 1;
    match transform_path(&session.pipeline, &path) {
      Ok(file) => {
        let target = output_path(&src_dir, &out_dir, &file);
        if write_if_changed(&target, &file.code)
          .with_context(|| format!("failed to write {}", target.display()))?
        {
          summary.written += 1;
        }
        summary.bytes += file.code.len() as u64;
      }
      Err(e) => summary.failures.push(e),
    }
  }
  debug!(files = summary.files, failed = summary.failures.len(), "sources built");
  Ok(summary)
}

/// Read one file and run it through the pipeline.
pub fn transform_path(pipeline: &Pipeline, path: &Path) -> Result<SourceFile, PlaitError> {
  let code = std::fs::read_to_string(path).map_err(|e| PlaitError::io(path, e))?;
  Ok(pipeline.transform(SourceFile::new(path, code))?)
}

/// Files under `src_dir` in a stable order, skipping hidden entries,
/// `node_modules` and anything inside `out_dir`.
pub fn collect_sources(src_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
  let walker = WalkDir::new(src_dir).sort_by_file_name().into_iter().filter_entry(|e| {
    e.depth() == 0 || (!is_skipped(e.file_name()) && !e.path().starts_with(out_dir))
  });
  let mut files = Vec::new();
  for entry in walker {
    let entry = entry.with_context(|| format!("failed to walk {}", src_dir.display()))?;
    if entry.file_type().is_file() {
      files.push(entry.into_path());
    }
  }
  Ok(files)
}

pub(crate) fn is_skipped(name: &std::ffi::OsStr) -> bool {
  name == "node_modules" || name.to_str().is_some_and(|n| n.starts_with('.'))
}
