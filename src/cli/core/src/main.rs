/* src/cli/core/src/main.rs */

mod build;
mod clean;
mod config;
mod dev;
mod generate;
mod inspect;
mod plugins;
mod session;
mod shell;
mod ui;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{find_plait_config, load_plait_config};
use session::Session;

#[derive(Parser)]
#[command(name = "plait", about = "Front-end build composer", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run every source file through the plugin pipeline
  Build {
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Build, then rebuild on every change until Ctrl+C
  Dev {
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Write the auto-import declarations and route manifest
  Generate {
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Show where a module specifier resolves to
  Resolve {
    /// Specifier as written in an import statement
    specifier: String,
    /// Importing file, for relative specifiers and node_modules lookup
    #[arg(long)]
    from: Option<PathBuf>,
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// List generated routes, or match a request path against them
  Routes {
    /// Request path to match, e.g. /users/42
    #[arg(short, long = "match")]
    match_path: Option<String>,
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Remove build output and generated declarations
  Clean {
    /// Path to plait.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config path (explicit or auto-detected)
fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
  match explicit {
    Some(p) => Ok(p),
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_plait_config(&cwd)
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("PLAIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Command::Build { config } => {
      let path = resolve_config_path(config)?;
      build::run_build(&Session::open(&path, false)?)?;
    }
    Command::Dev { config } => {
      let path = resolve_config_path(config)?;
      dev::run_dev(&path).await?;
    }
    Command::Generate { config } => {
      let path = resolve_config_path(config)?;
      generate::run_generate(&Session::open(&path, false)?)?;
    }
    Command::Resolve { specifier, from, config } => {
      let path = resolve_config_path(config)?;
      inspect::run_resolve(&Session::open(&path, false)?, &specifier, from.as_deref())?;
    }
    Command::Routes { match_path, config } => {
      let path = resolve_config_path(config)?;
      inspect::run_routes(&Session::open(&path, false)?, match_path.as_deref())?;
    }
    Command::Clean { config } => {
      let path = resolve_config_path(config)?;
      let config = load_plait_config(&path)?;
      clean::run_clean(&config, &session::project_root(&path)?)?;
    }
  }

  Ok(())
}
