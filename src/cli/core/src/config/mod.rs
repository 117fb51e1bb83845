/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE, find_plait_config, load_plait_config, parse_plait_config};
pub use types::{PlaitConfig, PluginEntry};
