/* src/cli/codegen/src/lib.rs */

mod declarations;
mod routes;

pub use declarations::{DECLARATION_HEADER, generate_declarations};
pub use routes::generate_routes_module;
