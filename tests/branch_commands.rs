use fake::Fake;
use fake::faker::lorem::en::Word;
use predicates::prelude::predicate;

mod common;

#[test]
fn branch_is_created_at_the_current_head() {
    let dir = common::init_repo();
    let tip = common::commit_file(&dir, "a.txt", "hello\n", "first");

    common::minigit(&dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created branch 'feature'."));

    assert_eq!(
        common::read_file(&dir, ".minigit/refs/branches"),
        format!("feature:{tip}\nmaster:{tip}\n")
    );
}

#[test]
fn branch_from_an_empty_head_has_an_empty_tip() {
    let dir = common::init_repo();

    common::minigit(&dir, &["branch", "feature"]).assert().success();

    assert_eq!(
        common::read_file(&dir, ".minigit/refs/branches"),
        "feature:\nmaster:\n"
    );
}

#[test]
fn duplicate_branch_is_refused() {
    let dir = common::init_repo();
    let name: String = Word().fake();

    common::minigit(&dir, &["branch", &name]).assert().success();
    common::minigit(&dir, &["branch", &name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn branch_name_with_reserved_characters_is_refused() {
    let dir = common::init_repo();

    common::minigit(&dir, &["branch", "bad:name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

#[test]
fn listing_marks_the_current_branch() {
    let dir = common::init_repo();
    common::commit_file(&dir, "a.txt", "hello\n", "first");
    common::minigit(&dir, &["branch", "feature"]).assert().success();

    common::minigit(&dir, &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* master"))
        .stdout(predicate::str::contains("  feature"));

    common::minigit(&dir, &["checkout", "feature"]).assert().success();

    common::minigit(&dir, &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* feature"))
        .stdout(predicate::str::contains("  master"));
}
