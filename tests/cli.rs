use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn filemap() -> Command {
    let mut cmd = Command::cargo_bin("filemap").expect("Failed to find filemap binary");
    cmd.current_dir(fixtures_dir()).env_remove("RUST_LOG");
    cmd
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn keys(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| v.get("key").and_then(|k| k.as_str()).unwrap().to_string())
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn directory_and_file_roots_render_rust() {
    let assert = filemap()
        .arg("testdata/hello")
        .arg("testdata/foo/se7en")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.starts_with("// Code generated by filemap. DO NOT EDIT."));
    assert!(stdout.contains("pub static FILES: &[(&str, &[u8])] = &["));
    assert!(stdout.contains(r#"    ("testdata/foo/se7en", b"foo 42\nvim\n"),"#));
    assert!(stdout.contains(r##"    ("testdata/hello/.gitignore", b"# this is a comment.\n"),"##));
    assert!(stdout.contains(r#"    ("testdata/hello/hello.txt", b"hello, world\n\n"),"#));
    assert!(!stdout.contains("bar.txt"));
    assert!(!stdout.contains("index.html"));
}

#[test]
fn rust_entries_are_sorted_by_key() {
    let assert = filemap().arg("testdata").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    let order = [
        "testdata/bar/bar.txt",
        "testdata/foo/se7en",
        "testdata/hello/.gitignore",
        "testdata/hello/hello.txt",
        "testdata/index.html",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|key| stdout.find(&format!("(\"{}\"", key)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn var_and_module_flags() {
    filemap()
        .args(["--var", "ASSETS", "--module", "assets", "testdata/bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub mod assets {"))
        .stdout(predicate::str::contains(
            "    pub static ASSETS: &[(&str, &[u8])] = &[",
        ));
}

#[test]
fn jsonl_with_relative_keys() {
    let assert = filemap()
        .args(["--format", "jsonl", "--keys", "relative", "testdata"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(
        keys(&items),
        vec![
            "bar/bar.txt",
            "foo/se7en",
            "hello/.gitignore",
            "hello/hello.txt",
            "index.html"
        ]
    );

    let se7en = &items[1];
    assert_eq!(se7en["size"], 11);
    assert_eq!(se7en["content"], "foo 42\nvim\n");
    assert!(!se7en["hash"].as_str().unwrap().is_empty());
}

#[test]
fn json_is_a_single_array() {
    let assert = filemap()
        .args(["--format", "json", "--keys", "relative", "testdata/foo/se7en"])
        .assert()
        .success();

    let value: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["key"], "se7en");
}

#[test]
fn sha1_hash_flag() {
    let assert = filemap()
        .args(["--format", "jsonl", "--hash", "sha1", "testdata/bar"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items[0]["hash"].as_str().unwrap().len(), 40);
}

#[test]
fn format_from_environment() {
    let assert = filemap()
        .env("FILEMAP_FORMAT", "jsonl")
        .arg("testdata/hello")
        .assert()
        .success();
    assert_eq!(parse_jsonl(&assert.get_output().stdout).len(), 2);
}

#[test]
fn absolute_keys() {
    let assert = filemap()
        .args(["--abs", "--format", "jsonl", "testdata/bar"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    let key = items[0]["key"].as_str().unwrap();
    assert!(Path::new(key).is_absolute());
    assert!(key.ends_with("testdata/bar/bar.txt"));
}

#[test]
fn keys_are_lexically_cleaned() {
    let assert = filemap()
        .args(["--format", "jsonl", "./testdata/bar"])
        .assert()
        .success();
    assert_eq!(keys(&parse_jsonl(&assert.get_output().stdout)), vec!["testdata/bar/bar.txt"]);

    let assert = filemap()
        .args(["--abs", "--format", "jsonl", "testdata/foo/../bar"])
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);
    let key = items[0]["key"].as_str().unwrap();
    assert!(!key.contains(".."));
    assert!(key.ends_with("/testdata/bar/bar.txt"));
}

#[test]
fn dotdot_and_direct_roots_collide_under_absolute_keys() {
    let assert = filemap()
        .args(["--abs", "--format", "jsonl", "testdata/bar", "testdata/foo/../bar"])
        .assert()
        .success();
    assert_eq!(parse_jsonl(&assert.get_output().stdout).len(), 1);

    filemap()
        .args(["--abs", "--strict", "testdata/bar", "testdata/foo/../bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bar.txt"));
}

#[test]
fn missing_root_fails_without_output() {
    filemap()
        .arg("testdata/hello")
        .arg("testdata/missing")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("testdata/missing"));
}

#[test]
fn no_paths_is_usage_error() {
    filemap().assert().code(2);
}

#[test]
fn relative_keys_need_exactly_one_root() {
    filemap()
        .args(["--keys", "relative", "testdata/hello", "testdata/bar"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_var_is_usage_error() {
    filemap()
        .args(["--var", "not-an-ident", "testdata/bar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid Rust identifier"));
}

#[test]
fn zero_jobs_is_usage_error() {
    filemap().args(["-j", "0", "testdata/bar"]).assert().code(2);
}

#[test]
fn output_file_is_written() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("files.rs");

    filemap()
        .arg("-o")
        .arg(&out)
        .arg("testdata/foo")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains(r#"("testdata/foo/se7en", b"foo 42\nvim\n"),"#));
}

#[test]
fn aliased_roots_yield_one_entry() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a/same.txt"), "from a");
    write_file(&temp.path().join("b.txt"), "unrelated");

    // The file root and the directory entry resolve to the same absolute key.
    let assert = Command::cargo_bin("filemap")
        .unwrap()
        .current_dir(temp.path())
        .args(["--abs", "--format", "jsonl", "a", "a/same.txt"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "from a");
}

#[test]
fn strict_rejects_collision() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a/same.txt"), "from a");

    Command::cargo_bin("filemap")
        .unwrap()
        .current_dir(temp.path())
        .args(["--abs", "--strict", "a", "a/same.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("same.txt"));
}

#[test]
fn max_file_size_fails_the_run() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("small.txt"), "ok");
    write_file(&temp.path().join("big.txt"), &"x".repeat(2048));

    Command::cargo_bin("filemap")
        .unwrap()
        .args(["--max-file-size", "1024"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("big.txt"));
}

#[test]
fn empty_directory_renders_empty_static() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("x/y")).unwrap();

    Command::cargo_bin("filemap")
        .unwrap()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("= &[\n];"));
}
