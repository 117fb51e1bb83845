/* src/cli/core/src/build/mod.rs */

pub mod output;
mod run;


pub use run::{BuildSummary, build_sources, collect_sources, run_build, transform_path};
pub(crate) use run::is_skipped;
