/* src/cli/core/src/shell.rs */

// Shell command helpers for external plugins.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Run `command` through `sh -c`, feed `input` on stdin, and return stdout.
/// Bails with stderr and stdout on a non-zero exit.
pub(crate) fn run_piped(base_dir: &Path, command: &str, label: &str, input: &[u8]) -> Result<String> {
  debug!(label, command, "spawning");
  let mut child = Command::new("sh")
    .args(["-c", command])
    .current_dir(base_dir)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .with_context(|| format!("failed to run {label}"))?;

  // Input is written on its own thread while stdout and stderr drain.
  let writer = child.stdin.take().map(|mut stdin| {
    let input = input.to_vec();
    std::thread::spawn(move || stdin.write_all(&input))
  });

  let output = child.wait_with_output().with_context(|| format!("failed to wait for {label}"))?;
  // A command that exits without reading stdin closes the pipe early;
  // its exit status is what gets reported.
  match writer.map(std::thread::JoinHandle::join) {
    Some(Ok(Err(e))) => debug!(label, error = %e, "stdin closed early"),
    Some(Err(_)) => bail!("stdin writer for {label} panicked"),
    _ => {}
  }
  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("{label} exited with status {}", output.status);
    if !stderr.is_empty() {
      msg.push('\n');
      msg.push_str(stderr.trim_end());
    }
    if !stdout.is_empty() {
      msg.push('\n');
      msg.push_str(stdout.trim_end());
    }
    bail!("{msg}");
  }
  String::from_utf8(output.stdout).with_context(|| format!("{label} wrote non-UTF-8 output"))
}
