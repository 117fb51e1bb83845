/* src/core/src/routes/tests.rs */

use std::path::{Path, PathBuf};

use super::*;
use crate::errors::{ConfigError, PlaitError};
use crate::pipeline::{ChangeKind, FileChange};

fn entry(rel: &str) -> RouteEntry {
  RouteEntry::from_file(Path::new(rel), format!("src/pages/{rel}"))
}

fn table(rels: &[&str]) -> RouteTable {
  RouteTable::from_entries(rels.iter().map(|r| entry(r))).unwrap()
}

// -- Pattern derivation --

#[test]
fn index_is_root() {
  let e = entry("index.vue");
  assert_eq!(e.path, "/");
  assert_eq!(e.name, "index");
  assert!(!e.has_params());
}

#[test]
fn dynamic_segment() {
  let e = entry("users/[id].vue");
  assert_eq!(e.path, "/users/:id");
  assert_eq!(e.name, "users-id");
  assert!(e.has_params());
}

#[test]
fn nested_index() {
  let e = entry("users/index.vue");
  assert_eq!(e.path, "/users");
  assert_eq!(e.name, "users");
}

#[test]
fn catch_all_segment() {
  let e = entry("[...all].vue");
  assert_eq!(e.path, "/:all(.*)*");
  assert_eq!(e.name, "all");
}

#[test]
fn deep_nesting() {
  let e = entry("org/[org]/repos/[repo]/settings.vue");
  assert_eq!(e.path, "/org/:org/repos/:repo/settings");
  assert_eq!(e.name, "org-org-repos-repo-settings");
}

#[test]
fn segment_parse() {
  assert_eq!(Segment::parse("about"), Segment::Static("about".into()));
  assert_eq!(Segment::parse("[slug]"), Segment::Param("slug".into()));
  assert_eq!(Segment::parse("[...rest]"), Segment::CatchAll("rest".into()));
  assert_eq!(Segment::parse("[unclosed"), Segment::Static("[unclosed".into()));
}

// -- Matching --

#[test]
fn dynamic_route_matches() {
  let t = table(&["index.vue", "users/[id].vue"]);
  let m = t.match_path("/users/42").unwrap();
  assert_eq!(m.route.path, "/users/:id");
  assert_eq!(m.params.get("id").map(String::as_str), Some("42"));
  assert_eq!(t.match_path("/").unwrap().route.path, "/");
}

#[test]
fn static_beats_dynamic() {
  // Declaration order must not matter
  for rels in [["users/settings.vue", "users/[id].vue"], ["users/[id].vue", "users/settings.vue"]] {
    let t = table(&rels);
    let m = t.match_path("/users/settings").unwrap();
    assert_eq!(m.route.file, "src/pages/users/settings.vue");
    assert!(m.params.is_empty());
    assert_eq!(t.match_path("/users/7").unwrap().route.file, "src/pages/users/[id].vue");
  }
}

#[test]
fn dynamic_beats_catch_all() {
  let t = table(&["[...all].vue", "[slug].vue", "about.vue"]);
  assert_eq!(t.match_path("/about").unwrap().route.path, "/about");
  assert_eq!(t.match_path("/hello").unwrap().route.path, "/:slug");
  let m = t.match_path("/a/b/c").unwrap();
  assert_eq!(m.route.path, "/:all(.*)*");
  assert_eq!(m.params["all"], "a/b/c");
}

#[test]
fn catch_all_matches_empty_rest() {
  let t = table(&["docs/[...path].vue"]);
  let m = t.match_path("/docs").unwrap();
  assert_eq!(m.params["path"], "");
  assert_eq!(t.match_path("/docs/guide/intro").unwrap().params["path"], "guide/intro");
}

#[test]
fn no_match() {
  let t = table(&["index.vue", "users/[id].vue"]);
  assert!(t.match_path("/users").is_none());
  assert!(t.match_path("/users/1/posts").is_none());
}

#[test]
fn query_and_trailing_slash_ignored() {
  let t = table(&["users/[id].vue"]);
  assert_eq!(t.match_path("/users/9/?tab=repos#top").unwrap().params["id"], "9");
}

#[test]
fn table_order_is_specificity() {
  let t = table(&["[...all].vue", "users/[id].vue", "index.vue", "users/settings.vue", "about.vue"]);
  let paths: Vec<_> = t.routes().iter().map(|r| r.path.as_str()).collect();
  assert_eq!(paths, vec!["/", "/about", "/users/settings", "/users/:id", "/:all(.*)*"]);
}

// -- Ambiguity --

#[test]
fn identical_pattern_is_reported() {
  let err = RouteTable::from_entries([entry("users.vue"), entry("users/index.vue")]).unwrap_err();
  match err {
    ConfigError::RouteCollision { pattern, first, second } => {
      assert_eq!(pattern, "/users");
      assert_eq!(first, "src/pages/users.vue");
      assert_eq!(second, "src/pages/users/index.vue");
    }
    other => panic!("expected collision, got {other:?}"),
  }
}

#[test]
fn same_shape_different_param_names_is_reported() {
  let err = RouteTable::from_entries([entry("users/[id].vue"), entry("users/[slug].vue")]);
  assert!(matches!(err, Err(ConfigError::RouteCollision { .. })));
}

#[test]
fn catch_all_must_be_last() {
  let err = RouteTable::from_entries([entry("index.vue"), entry("docs/[...slug]/edit.vue")]);
  match err {
    Err(ConfigError::InvalidRoute { file, reason }) => {
      assert_eq!(file, "src/pages/docs/[...slug]/edit.vue");
      assert!(reason.contains("[...slug]"), "{reason}");
    }
    other => panic!("expected invalid route, got {other:?}"),
  }
}

#[test]
fn catch_all_directory_with_index_is_last() {
  let t = table(&["docs/[...slug]/index.vue"]);
  let m = t.match_path("/docs/a/b").unwrap();
  assert_eq!(m.params.get("slug").map(String::as_str), Some("a/b"));
}

#[test]
fn empty_parameter_names_are_rejected() {
  for rel in ["[].vue", "[...].vue", "users/[]/index.vue"] {
    let err = RouteTable::from_entries([entry(rel)]);
    assert!(matches!(err, Err(ConfigError::InvalidRoute { .. })), "{rel}: {err:?}");
  }
}

#[test]
fn manifest_serialization() {
  let t = table(&["index.vue", "users/[id].vue"]);
  let json = serde_json::to_value(&t).unwrap();
  assert_eq!(
    json,
    serde_json::json!({
      "routes": [
        { "name": "index", "path": "/", "file": "src/pages/index.vue" },
        { "name": "users-id", "path": "/users/:id", "file": "src/pages/users/[id].vue" }
      ]
    })
  );
}

// -- Scanner --

struct Pages {
  _tmp: tempfile::TempDir,
  root: PathBuf,
}

impl Pages {
  fn new(files: &[&str]) -> Self {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    std::fs::create_dir_all(root.join("src/pages")).unwrap();
    let pages = Self { _tmp: tmp, root };
    for f in files {
      pages.touch(f);
    }
    pages
  }

  fn dir(&self) -> PathBuf {
    self.root.join("src/pages")
  }

  fn touch(&self, rel: &str) -> PathBuf {
    let path = self.dir().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "<template/>").unwrap();
    path
  }

  fn scanner(&self) -> RouteScanner {
    RouteScanner::new(
      &self.root,
      RouteScanOptions {
        dir: self.dir(),
        extensions: vec!["vue".into(), "ts".into()],
        exclude: vec!["components".into()],
      },
    )
  }
}

#[test]
fn scan_derives_table() {
  let pages = Pages::new(&[
    "index.vue",
    "about.vue",
    "users/[id].vue",
    "users/components/Card.vue",
    "notes.md",
    ".draft.vue",
  ]);
  let t = pages.scanner().scan().unwrap();
  let files: Vec<_> = t.routes().iter().map(|r| r.file.as_str()).collect();
  assert_eq!(files, vec!["src/pages/index.vue", "src/pages/about.vue", "src/pages/users/[id].vue"]);
}

#[test]
fn scan_is_deterministic() {
  let pages = Pages::new(&["b.vue", "a.vue", "[x].vue", "c/index.ts"]);
  let first = pages.scanner().scan().unwrap();
  let second = pages.scanner().scan().unwrap();
  assert_eq!(first, second);
}

#[test]
fn scan_missing_dir_is_config_error() {
  let pages = Pages::new(&[]);
  std::fs::remove_dir_all(pages.dir()).unwrap();
  let err = pages.scanner().scan().unwrap_err();
  assert!(matches!(err, PlaitError::Config(ConfigError::RoutesDirMissing { .. })));
}

#[test]
fn incremental_add_and_remove() {
  let pages = Pages::new(&["index.vue"]);
  let mut scanner = pages.scanner();
  scanner.scan().unwrap();

  let added = pages.touch("users/[id].vue");
  let t = scanner.apply(&FileChange::new(&added, ChangeKind::Created)).unwrap().unwrap();
  assert_eq!(t.len(), 2);
  assert!(t.match_path("/users/3").is_some());

  std::fs::remove_file(&added).unwrap();
  let t = scanner.apply(&FileChange::new(&added, ChangeKind::Removed)).unwrap().unwrap();
  assert_eq!(t.len(), 1);
}

#[test]
fn incremental_ignores_unrelated_changes() {
  let pages = Pages::new(&["index.vue"]);
  let mut scanner = pages.scanner();
  scanner.scan().unwrap();

  let outside = pages.root.join("src/main.ts");
  std::fs::write(&outside, "").unwrap();
  assert!(scanner.apply(&FileChange::new(&outside, ChangeKind::Created)).unwrap().is_none());

  let index = pages.dir().join("index.vue");
  assert!(scanner.apply(&FileChange::new(&index, ChangeKind::Modified)).unwrap().is_none());

  let readme = pages.touch("README.md");
  assert!(scanner.apply(&FileChange::new(&readme, ChangeKind::Created)).unwrap().is_none());
}

#[test]
fn incremental_directory_removal() {
  let pages = Pages::new(&["index.vue", "users/[id].vue", "users/settings.vue"]);
  let mut scanner = pages.scanner();
  assert_eq!(scanner.scan().unwrap().len(), 3);

  let users = pages.dir().join("users");
  std::fs::remove_dir_all(&users).unwrap();
  let t = scanner.apply(&FileChange::new(&users, ChangeKind::Removed)).unwrap().unwrap();
  assert_eq!(t.len(), 1);
}

#[test]
fn incremental_collision_then_recovery() {
  let pages = Pages::new(&["users.vue"]);
  let mut scanner = pages.scanner();
  scanner.scan().unwrap();

  let clash = pages.touch("users/index.vue");
  let err = scanner.apply(&FileChange::new(&clash, ChangeKind::Created)).unwrap_err();
  assert!(matches!(err, PlaitError::Config(ConfigError::RouteCollision { .. })));

  std::fs::remove_file(&clash).unwrap();
  let t = scanner.apply(&FileChange::new(&clash, ChangeKind::Removed)).unwrap().unwrap();
  assert_eq!(t.len(), 1);
}

#[test]
fn scan_reports_unusable_page_file() {
  let pages = Pages::new(&["index.vue", "[].vue"]);
  let err = pages.scanner().scan().unwrap_err();
  match err {
    PlaitError::Config(ConfigError::InvalidRoute { file, .. }) => assert_eq!(file, "src/pages/[].vue"),
    other => panic!("expected invalid route, got {other:?}"),
  }
}
