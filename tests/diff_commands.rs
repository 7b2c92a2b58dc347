use predicates::prelude::predicate;

mod common;

#[test]
fn working_tree_diff_shows_the_edit_script() {
    let dir = common::init_repo();
    common::write_file(&dir, "a.txt", "a\nb\nc\n");
    common::stage(&dir, "a.txt");

    common::write_file(&dir, "a.txt", "a\nB\nc\n");

    common::minigit(&dir, &["diff"])
        .assert()
        .success()
        .stdout("diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\na\n-b\n+B\nc\n");
}

#[test]
fn diff_with_no_changes_is_empty() {
    let dir = common::init_repo();
    common::write_file(&dir, "a.txt", "a\nb\nc\n");
    common::stage(&dir, "a.txt");

    common::minigit(&dir, &["diff"]).assert().success().stdout("");
}

#[test]
fn staged_diff_compares_the_index_against_the_last_commit() {
    let dir = common::init_repo();
    common::commit_file(&dir, "a.txt", "a\nb\nc\n", "first");

    common::write_file(&dir, "a.txt", "a\nB\nc\n");
    common::stage(&dir, "a.txt");

    for option in ["--staged", "--cached"] {
        common::minigit(&dir, &["diff", option])
            .assert()
            .success()
            .stdout(predicate::str::contains("-b"))
            .stdout(predicate::str::contains("+B"));
    }

    // the working tree is not consulted in this mode
    common::write_file(&dir, "a.txt", "something else entirely\n");
    common::minigit(&dir, &["diff", "--staged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+B"));
}

#[test]
fn single_fingerprint_diffs_a_commit_against_the_working_tree() {
    let dir = common::init_repo();
    let tip = common::commit_file(&dir, "a.txt", "old line\n", "first");

    common::write_file(&dir, "a.txt", "new line\n");

    common::minigit(&dir, &["diff", &tip])
        .assert()
        .success()
        .stdout(predicate::str::contains("-old line"))
        .stdout(predicate::str::contains("+new line"));
}

#[test]
fn two_fingerprints_diff_commit_to_commit() {
    let dir = common::init_repo();
    let first = common::commit_file(&dir, "a.txt", "a\nb\nc\n", "first");
    let second = common::commit_file(&dir, "a.txt", "a\nB\nc\n", "second");

    common::minigit(&dir, &["diff", &first, &second])
        .assert()
        .success()
        .stdout("diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\na\n-b\n+B\nc\n");

    // reversed order swaps deletions and additions
    common::minigit(&dir, &["diff", &second, &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("-B"))
        .stdout(predicate::str::contains("+b"));
}

#[test]
fn diff_against_a_missing_object_is_refused() {
    let dir = common::init_repo();
    common::commit_file(&dir, "a.txt", "content\n", "first");

    common::minigit(&dir, &["diff", "0000000000000000000000000000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing or unreadable"));
}

#[test]
fn file_added_since_the_commit_appears_as_additions() {
    let dir = common::init_repo();
    let tip = common::commit_file(&dir, "a.txt", "kept\n", "first");

    common::write_file(&dir, "new.txt", "brand new\n");
    common::stage(&dir, "new.txt");

    common::minigit(&dir, &["diff", &tip])
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/new.txt b/new.txt"))
        .stdout(predicate::str::contains("+brand new"));
}
