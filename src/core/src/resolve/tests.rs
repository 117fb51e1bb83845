/* src/core/src/resolve/tests.rs */

use std::sync::Arc;

use super::*;
use crate::pipeline::Plugin;

struct Project {
  _tmp: tempfile::TempDir,
  root: PathBuf,
}

impl Project {
  fn new() -> Self {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    Self { _tmp: tmp, root }
  }

  fn file(&self, rel: &str, content: &str) -> PathBuf {
    let path = self.root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
  }

  fn resolver(&self) -> Resolver {
    let aliases = AliasMap::new(&self.root, [("@", "./src")]).unwrap();
    Resolver::new(&self.root, aliases, None)
  }
}

#[test]
fn alias_equals_literal_target_path() {
  let p = Project::new();
  p.file("src/components/Button.vue", "");
  p.file("src/utils/format.ts", "");
  p.file("src/stores/index.ts", "");
  let r = p.resolver();

  for rest in ["components/Button.vue", "utils/format", "stores"] {
    let via_alias = r.resolve(&format!("@/{rest}"), None).unwrap();
    let literal = p.root.join("src").join(rest);
    let via_path = r.resolve(literal.to_str().unwrap(), None).unwrap();
    assert_eq!(via_alias, via_path, "mismatch for {rest}");
  }
}

#[test]
fn extension_probing_follows_configured_order() {
  let p = Project::new();
  p.file("src/utils.js", "");
  p.file("src/utils.ts", "");
  let r = p.resolver();
  assert_eq!(r.resolve("@/utils", None).unwrap(), p.root.join("src/utils.js"));

  let aliases = AliasMap::new(&p.root, [("@", "src")]).unwrap();
  let ts_first = Resolver::new(&p.root, aliases, Some(vec!["ts".into(), ".js".into()]));
  assert_eq!(ts_first.resolve("@/utils", None).unwrap(), p.root.join("src/utils.ts"));
}

#[test]
fn directory_index() {
  let p = Project::new();
  p.file("src/router/index.ts", "");
  assert_eq!(p.resolver().resolve("@/router", None).unwrap(), p.root.join("src/router/index.ts"));
}

#[test]
fn relative_to_importer() {
  let p = Project::new();
  let main = p.file("src/main.ts", "");
  p.file("src/App.vue", "");
  p.file("shared/theme.css", "");
  let r = p.resolver();
  assert_eq!(r.resolve("./App.vue", Some(&main)).unwrap(), p.root.join("src/App.vue"));
  assert_eq!(r.resolve("../shared/theme.css", Some(&main)).unwrap(), p.root.join("shared/theme.css"));
}

#[test]
fn missing_module_is_not_found() {
  let p = Project::new();
  let main = p.file("src/main.ts", "");
  let err = p.resolver().resolve("@/missing", Some(&main)).unwrap_err();
  assert!(matches!(err, ResolveError::NotFound { ref specifier, .. } if specifier == "@/missing"));
  assert!(err.to_string().contains("imported from"));
}

#[test]
fn escaping_the_root_fails() {
  let p = Project::new();
  p.file("src/main.ts", "");
  let err = p.resolver().resolve("@/../../etc/passwd", None).unwrap_err();
  assert!(matches!(err, ResolveError::OutsideRoot { .. }));
}

#[test]
fn bare_package_uses_module_then_main() {
  let p = Project::new();
  let main = p.file("src/main.ts", "");
  p.file("node_modules/vue/package.json", r#"{"main": "index.js", "module": "dist/vue.esm.js"}"#);
  p.file("node_modules/vue/dist/vue.esm.js", "");
  p.file("node_modules/vue/index.js", "");
  p.file("node_modules/@vueuse/core/package.json", r#"{"main": "./index.cjs"}"#);
  p.file("node_modules/@vueuse/core/index.cjs", "");
  let r = p.resolver();

  assert_eq!(r.resolve("vue", Some(&main)).unwrap(), p.root.join("node_modules/vue/dist/vue.esm.js"));
  assert_eq!(
    r.resolve("@vueuse/core", Some(&main)).unwrap(),
    p.root.join("node_modules/@vueuse/core/index.cjs")
  );
}

#[test]
fn bare_package_deep_import_and_index_fallback() {
  let p = Project::new();
  p.file("node_modules/lodash-es/debounce.js", "");
  p.file("node_modules/tiny/index.js", "");
  let r = p.resolver();
  assert_eq!(r.resolve("lodash-es/debounce", None).unwrap(), p.root.join("node_modules/lodash-es/debounce.js"));
  assert_eq!(r.resolve("tiny", None).unwrap(), p.root.join("node_modules/tiny/index.js"));
  assert!(matches!(r.resolve("absent", None), Err(ResolveError::NotFound { .. })));
}

#[test]
fn nearest_node_modules_wins() {
  let p = Project::new();
  let nested = p.file("packages/app/src/main.ts", "");
  p.file("node_modules/dep/index.js", "");
  p.file("packages/app/node_modules/dep/index.js", "");
  let r = p.resolver();
  assert_eq!(r.resolve("dep", Some(&nested)).unwrap(), p.root.join("packages/app/node_modules/dep/index.js"));
}

#[test]
fn unresolvable_nested_package_falls_through_to_parent() {
  let p = Project::new();
  let nested = p.file("packages/app/src/main.ts", "");
  p.file("node_modules/dep/index.js", "");
  p.file("packages/app/node_modules/dep/README.md", "");
  let r = p.resolver();
  assert_eq!(r.resolve("dep", Some(&nested)).unwrap(), p.root.join("node_modules/dep/index.js"));
}

#[test]
fn split_package_names() {
  assert_eq!(split_package("vue"), Some(("vue", None)));
  assert_eq!(split_package("vue/dist/x"), Some(("vue", Some("dist/x"))));
  assert_eq!(split_package("@vueuse/core"), Some(("@vueuse/core", None)));
  assert_eq!(split_package("@vueuse/core/index"), Some(("@vueuse/core", Some("index"))));
  assert_eq!(split_package("@scope"), None);
}

#[test]
fn normalize_is_lexical() {
  assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
  assert_eq!(normalize(Path::new("/a/b/../../x")), PathBuf::from("/x"));
}

struct PagesLike;

impl Plugin for PagesLike {
  fn name(&self) -> &str {
    "pages"
  }

  fn resolve_id(&self, specifier: &str, _importer: Option<&Path>) -> Option<String> {
    (specifier == "~pages").then(|| "virtual:generated-pages".to_string())
  }
}

#[test]
fn plugins_resolve_after_aliases() {
  let p = Project::new();
  p.file("src/main.ts", "");
  let r = p.resolver();
  let pipeline = Pipeline::new(vec![Arc::new(PagesLike)]).unwrap();

  assert_eq!(
    r.resolve_with(&pipeline, "~pages", None).unwrap(),
    ResolvedId::Virtual("virtual:generated-pages".into())
  );
  assert_eq!(
    r.resolve_with(&pipeline, "@/main", None).unwrap(),
    ResolvedId::File(p.root.join("src/main.ts"))
  );
}
