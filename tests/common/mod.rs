#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};

pub const REPO_DIR: &str = ".minigit";

/// Build a `minigit` invocation rooted in the given directory.
pub fn minigit(dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minigit").expect("failed to find minigit binary");
    cmd.current_dir(dir.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Fresh temp directory with an initialized repository.
pub fn init_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp directory");
    minigit(&dir, &["init"]).assert().success();
    dir
}

pub fn write_file(dir: &TempDir, name: &str, content: &str) {
    dir.child(name)
        .write_str(content)
        .expect("failed to write file");
}

pub fn read_file(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.child(name).to_path_buf()).expect("failed to read file")
}

pub fn stage(dir: &TempDir, name: &str) {
    minigit(dir, &["add", name]).assert().success();
}

/// Commit the staged set and return the reported commit hash.
pub fn commit(dir: &TempDir, message: &str) -> String {
    let output = minigit(dir, &["commit", "-m", message])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("commit output is not UTF-8");
    stdout
        .trim()
        .rsplit(' ')
        .next()
        .expect("commit output has no hash")
        .to_string()
}

/// Shorthand for write + add + commit of a single file.
pub fn commit_file(dir: &TempDir, name: &str, content: &str, message: &str) -> String {
    write_file(dir, name, content);
    stage(dir, name);
    commit(dir, message)
}

/// The tip recorded in HEAD (empty string until the first commit).
pub fn head_tip(dir: &TempDir) -> String {
    let head = read_file(dir, &format!("{REPO_DIR}/HEAD"));
    head.trim()
        .split_once(':')
        .expect("malformed HEAD")
        .1
        .to_string()
}

/// Raw content of a stored object.
pub fn read_object(dir: &TempDir, fingerprint: &str) -> String {
    read_file(dir, &format!("{REPO_DIR}/objects/{fingerprint}"))
}

pub fn object_exists(dir: &TempDir, fingerprint: &str) -> bool {
    dir.child(format!("{REPO_DIR}/objects/{fingerprint}"))
        .to_path_buf()
        .exists()
}

/// Number of objects currently in the store, temp files excluded.
pub fn object_count(dir: &TempDir) -> usize {
    let objects = dir.child(format!("{REPO_DIR}/objects")).to_path_buf();
    std::fs::read_dir(objects)
        .map(|entries| entries.filter_map(|entry| entry.ok()).count())
        .unwrap_or(0)
}
