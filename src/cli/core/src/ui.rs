/* src/cli/core/src/ui.rs */

// Terminal output for plait commands. One-shot commands print a banner,
// numbered steps and indented details; `plait dev` prints one `[plait]`
// line per event. Failures lead with their kind in both modes.

use std::fmt::Display;

use plait_core::PlaitError;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn step(n: u32, total: u32, msg: &str) {
  println!("  {BOLD}[{n}/{total}]{RESET} {msg}...");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn detail_ok(msg: &str) {
  println!("        {GREEN}\u{2713}{RESET} {msg}");
}

/// Prefixed watch-mode line, e.g. `[plait] rebuilt src/App.vue`.
pub fn tag(color: &str, msg: &str) {
  println!("  {color}[plait]{RESET} {msg}");
}

/// `transform error: [vue] src/App.vue: ...`
pub fn diagnostic(err: &PlaitError) -> String {
  labeled(err.kind(), err)
}

fn labeled(kind: &str, msg: impl Display) -> String {
  format!("{kind} error: {msg}")
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}plait{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn format_size(bytes: u64) -> String {
  if bytes >= 1_000_000 {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
  } else if bytes >= 1_000 {
    format!("{:.1} kB", bytes as f64 / 1_000.0)
  } else {
    format!("{bytes} B")
  }
}

pub fn blank() {
  println!();
}
