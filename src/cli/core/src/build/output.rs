/* src/cli/core/src/build/output.rs */

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use plait_core::{RouteTable, SourceFile};
use tempfile::NamedTempFile;

pub const ROUTE_MANIFEST: &str = "route-manifest.json";

/// Write through a temp file in the same directory and rename over the
/// target, so readers see the old or the new content and nothing in between.
/// Skips the write when the content is already there; returns whether it wrote.
pub(crate) fn write_if_changed(path: &Path, contents: &str) -> std::io::Result<bool> {
  if std::fs::read(path).is_ok_and(|existing| existing == contents.as_bytes()) {
    return Ok(false);
  }
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  std::fs::create_dir_all(dir)?;
  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents.as_bytes())?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(true)
}

/// Where a transformed source lands: mirrored under `out_dir`, with the new
/// language appended when a plugin changed it (`App.vue` -> `App.vue.js`).
pub(crate) fn output_path(src_dir: &Path, out_dir: &Path, file: &SourceFile) -> PathBuf {
  let rel = file.id.strip_prefix(src_dir).unwrap_or(&file.id);
  let mut target = out_dir.join(rel);
  if file.lang_changed() && !file.lang.is_empty() {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(&file.lang);
    target.set_file_name(name);
  }
  target
}

pub(crate) fn write_route_manifest(out_dir: &Path, table: &RouteTable) -> anyhow::Result<PathBuf> {
  let path = out_dir.join(ROUTE_MANIFEST);
  let json = serde_json::to_string_pretty(table).context("failed to serialize route table")?;
  write_if_changed(&path, &json).with_context(|| format!("failed to write {}", path.display()))?;
  Ok(path)
}
