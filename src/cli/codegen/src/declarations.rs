/* src/cli/codegen/src/declarations.rs */

use plait_core::ImportTable;


pub const DECLARATION_HEADER: &str = "\
/* eslint-disable */
/* prettier-ignore */
// @ts-nocheck
// noinspection JSUnusedGlobalSymbols
// Generated by plait. Do not edit.
";

/// Ambient declarations for every auto-imported binding, sorted by local name.
/// Identical tables always produce identical bytes.
pub fn generate_declarations(table: &ImportTable) -> String {
  let mut out = String::from(DECLARATION_HEADER);
  out.push_str("export {}\n");
  out.push_str("declare global {\n");
  for binding in table.bindings() {
    out.push_str(&format!(
      "  const {}: typeof import('{}')['{}']\n",
      binding.local,
      quote_single(&binding.module),
      binding.export,
    ));
  }
  out.push_str("}\n");
  out
}

/// Escape for a single-quoted JS string body.
fn quote_single(s: &str) -> String {
  s.replace('\\', "\\\\").replace('\'', "\\'")
}
