/* src/cli/codegen/src/routes.rs */

use plait_core::RouteTable;

#[cfg(test)]
mod tests;

/// Source of the `virtual:generated-pages` module: one lazy route record
/// per page, in match order.
pub fn generate_routes_module(table: &RouteTable) -> String {
  let mut out = String::from("export default [\n");
  for route in table.routes() {
    out.push_str("  {\n");
    out.push_str(&format!("    name: {},\n", js_string(&route.name)));
    out.push_str(&format!("    path: {},\n", js_string(&route.path)));
    out.push_str(&format!(
      "    component: () => import({}),\n",
      js_string(&format!("/{}", route.file))
    ));
    if route.has_params() {
      out.push_str("    props: true,\n");
    }
    out.push_str("  },\n");
  }
  out.push_str("]\n");
  out
}

/// JSON string literals are valid JS string literals.
fn js_string(s: &str) -> String {
  serde_json::Value::String(s.to_string()).to_string()
}
