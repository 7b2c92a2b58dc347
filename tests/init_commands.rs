use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use predicates::prelude::predicate;

mod common;

#[test]
fn init_creates_repository_scaffolding() {
    let dir = TempDir::new().unwrap();

    common::minigit(&dir, &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized empty minigit repository",
        ));

    assert!(dir.child(".minigit").to_path_buf().is_dir());
    assert!(dir.child(".minigit/objects").to_path_buf().is_dir());
    assert!(dir.child(".minigit/refs").to_path_buf().is_dir());

    assert_eq!(common::read_file(&dir, ".minigit/HEAD"), "master:");
    assert_eq!(common::read_file(&dir, ".minigit/refs/branches"), "master:\n");
    assert_eq!(common::read_file(&dir, ".minigit/index"), "");
}

#[test]
fn init_twice_is_refused() {
    let dir = common::init_repo();

    common::minigit(&dir, &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn operations_outside_a_repository_are_refused() {
    let dir = TempDir::new().unwrap();

    common::minigit(&dir, &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a minigit repository"));
}

#[test]
fn fresh_repository_reports_master_with_nothing_staged() {
    let dir = common::init_repo();

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch master"))
        .stdout(predicate::str::contains("No files staged for commit."));
}
