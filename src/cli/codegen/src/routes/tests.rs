/* src/cli/codegen/src/routes/tests.rs */

use std::path::Path;

use plait_core::{RouteEntry, RouteTable};

use super::*;

fn table(rels: &[&str]) -> RouteTable {
  RouteTable::from_entries(
    rels.iter().map(|r| RouteEntry::from_file(Path::new(r), format!("src/pages/{r}"))),
  )
  .unwrap()
}

#[test]
fn full_module() {
  let code = generate_routes_module(&table(&["users/[id].vue", "index.vue"]));
  let expected = r#"export default [
  {
    name: "index",
    path: "/",
    component: () => import("/src/pages/index.vue"),
  },
  {
    name: "users-id",
    path: "/users/:id",
    component: () => import("/src/pages/users/[id].vue"),
    props: true,
  },
]
"#;
  assert_eq!(code, expected);
}

#[test]
fn empty_table() {
  assert_eq!(generate_routes_module(&RouteTable::default()), "export default [\n]\n");
}

#[test]
fn catch_all_has_props() {
  let code = generate_routes_module(&table(&["[...all].vue"]));
  assert!(code.contains(r#"path: "/:all(.*)*","#));
  assert!(code.contains("props: true,"));
}

#[test]
fn strings_escaped() {
  assert_eq!(js_string(r#"a"b"#), r#""a\"b""#);
}
