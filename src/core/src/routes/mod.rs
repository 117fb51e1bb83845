/* src/core/src/routes/mod.rs */

// File-system routing: derive URL patterns from a pages directory,
// order them by specificity and match request paths against them.

mod pattern;
mod scan;
mod table;

#[cfg(test)]
mod tests;

pub use pattern::Segment;
pub use scan::{RouteScanOptions, RouteScanner};
pub use table::{RouteEntry, RouteMatch, RouteTable};
