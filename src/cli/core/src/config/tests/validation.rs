/* src/cli/core/src/config/tests/validation.rs */

use super::*;

fn err(toml: &str) -> String {
  format!("{:#}", parse_plait_config(toml).unwrap_err())
}

#[test]
fn missing_project_is_parse_error() {
  assert!(err("[build]\nsrc_dir = \"src\"\n").contains("failed to parse"));
}

#[test]
fn empty_project_name() {
  assert!(err("[project]\nname = \"\"\n").contains("project.name must not be empty"));
}

#[test]
fn duplicate_plugin_names() {
  let msg = err(
    r#"
[project]
name = "x"

[[plugins]]
name = "pages"

[[plugins]]
name = "pages"
"#,
  );
  assert!(msg.contains("plugins[1]: duplicate plugin name \"pages\""), "{msg}");
}

#[test]
fn command_without_extensions() {
  let msg = err(
    r#"
[project]
name = "x"

[[plugins]]
name = "vue"
command = "node vue.mjs"
"#,
  );
  assert!(msg.contains("has a command but no extensions"), "{msg}");
}

#[test]
fn builtin_with_command() {
  let msg = err(
    r#"
[project]
name = "x"

[[plugins]]
name = "pages"
command = "node pages.mjs"
extensions = ["vue"]
"#,
  );
  assert!(msg.contains("is built in"), "{msg}");
}

#[test]
fn unknown_plugin_names_entry() {
  let msg = err(
    r#"
[project]
name = "x"

[[plugins]]
name = "pages"

[[plugins]]
name = "vue"
"#,
  );
  assert!(msg.contains("plugins[1]: unknown plugin \"vue\""), "{msg}");
}

fn with_build(build: &str) -> String {
  err(&format!("[project]\nname = \"x\"\n\n[build]\n{build}\n"))
}

#[test]
fn out_dir_must_not_be_project_root() {
  for out in [".", "./", "dist/.."] {
    let msg = with_build(&format!("out_dir = \"{out}\""));
    assert!(msg.contains("is the project root"), "{out}: {msg}");
  }
}

#[test]
fn out_dir_must_stay_inside_root() {
  assert!(with_build("out_dir = \"../dist\"").contains("points outside the project root"));
  assert!(with_build("out_dir = \"/tmp/dist\"").contains("must be relative to the project root"));
}

#[test]
fn out_dir_must_not_hold_sources() {
  assert!(with_build("out_dir = \"src\"").contains("must not be build.src_dir or contain it"));
  let msg = with_build("src_dir = \"app/src\"\nout_dir = \"app\"");
  assert!(msg.contains("must not be build.src_dir or contain it"), "{msg}");
}

#[test]
fn out_dir_beside_sources_is_accepted() {
  let config =
    parse_plait_config("[project]\nname = \"x\"\n\n[build]\nsrc_dir = \"app/src\"\nout_dir = \"app/dist\"\n").unwrap();
  assert_eq!(config.build.out_dir, "app/dist");
}

#[test]
fn dts_must_stay_inside_root() {
  let msg = err(
    r#"
[project]
name = "x"

[[plugins]]
name = "auto-import"
dts = "../auto-imports.d.ts"
"#,
  );
  assert!(msg.contains("plugins[0].dts \"../auto-imports.d.ts\" points outside the project root"), "{msg}");
}
