/* src/core/src/lib.rs */

pub mod alias;
pub mod auto_import;
pub mod errors;
pub mod pipeline;
pub mod resolve;
pub mod routes;
pub mod source;
pub mod supersede;

pub use alias::{AliasMap, AliasRule};
pub use auto_import::{ImportBinding, ImportSource, ImportTable, PresetRegistry};
pub use errors::{BoxError, ConfigError, PlaitError, ResolveError, TransformError};
pub use pipeline::{ChangeKind, FileChange, Pipeline, Plugin, PluginContext, Stage};
pub use resolve::{DEFAULT_EXTENSIONS, ResolvedId, Resolver};
pub use routes::{RouteEntry, RouteMatch, RouteScanOptions, RouteScanner, RouteTable, Segment};
pub use source::SourceFile;
pub use supersede::{Supersede, Ticket};
