use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::*;

mod common;

#[test]
fn staged_files_are_listed() {
    let dir = common::init_repo();
    let content: String = Words(5..10).fake::<Vec<String>>().join(" ");
    common::write_file(&dir, "a.txt", &content);
    common::stage(&dir, "a.txt");

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch master"))
        .stdout(predicate::str::contains("Files staged for commit:"))
        .stdout(predicate::str::contains("  a.txt"));
}

#[test]
fn a_staged_file_edited_afterwards_is_reported_modified() {
    let dir = common::init_repo();
    common::write_file(&dir, "a.txt", "original\n");
    common::stage(&dir, "a.txt");

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files modified since staging:").not());

    common::write_file(&dir, "a.txt", "edited after staging\n");

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files modified since staging:"))
        .stdout(predicate::str::contains("  a.txt"));
}

#[test]
fn files_unknown_to_head_and_index_are_untracked() {
    let dir = common::init_repo();
    common::commit_file(&dir, "tracked.txt", "committed\n", "first");
    common::write_file(&dir, "stray.txt", "not added\n");

    let output = common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files:"))
        .stdout(predicate::str::contains("  stray.txt"))
        .get_output()
        .stdout
        .clone();

    // the committed file is tracked, not untracked
    let stdout = String::from_utf8(output).unwrap();
    assert!(!stdout.contains("  tracked.txt"));
}

#[test]
fn status_reports_a_merge_in_progress() {
    let dir = common::init_repo();
    common::commit_file(&dir, "a.txt", "base\n", "first");

    common::minigit(&dir, &["branch", "feature"]).assert().success();
    common::minigit(&dir, &["checkout", "feature"]).assert().success();
    common::commit_file(&dir, "a.txt", "feature side\n", "f1");

    common::minigit(&dir, &["checkout", "master"]).assert().success();
    common::commit_file(&dir, "a.txt", "master side\n", "m1");
    common::minigit(&dir, &["merge", "feature"]).assert().success();

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You are still merging branch 'feature'.",
        ))
        .stdout(predicate::str::contains("  a.txt"));

    // committing the resolution clears the merge flag
    common::write_file(&dir, "a.txt", "resolved\n");
    common::stage(&dir, "a.txt");
    common::commit(&dir, "resolved");

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("still merging").not());
}

#[test]
fn the_repository_directory_is_never_listed() {
    let dir = common::init_repo();

    common::minigit(&dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".minigit").not());
}
