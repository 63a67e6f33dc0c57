use crate::common::command::{
    COMMIT_DATE, commit_files, commit_id, head_commit_id, init_repository_dir,
    run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_an_ancestor_changes_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "old"])
        .assert()
        .success();
    commit_files(dir, &[("g.txt", "ahead")], "ahead");
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(read_file(&dir.join("g.txt")), "ahead");

    Ok(())
}

#[rstest]
fn merging_a_descendant_fast_forwards(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "ahead"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "ahead"])
        .assert()
        .success();
    commit_files(dir, &[("g.txt", "ahead")], "ahead");
    let ahead_tip = head_commit_id(dir);
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_gitlet_command(dir, &["merge", "ahead"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_commit_id(dir), ahead_tip);
    assert_eq!(read_file(&dir.join("g.txt")), "ahead");
    assert!(stdout_of(dir, &["status"]).starts_with("=== Branches ===\nahead\n*master\n\n"));

    Ok(())
}

#[rstest]
fn disjoint_changes_produce_a_merge_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    commit_files(dir, &[("m.txt", "master")], "master work");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("o.txt"), "other".to_string()));
    run_gitlet_command(dir, &["add", "o.txt"]).assert().success();
    run_gitlet_command(dir, &["rm", "f.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "other work"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    let merged = commit_id("Merged other with master.", Some(&master_tip), COMMIT_DATE);
    assert_eq!(head_commit_id(dir), merged);
    assert!(stdout_of(dir, &["log"]).contains("\nMerged other with master.\n"));
    assert_eq!(read_file(&dir.join("o.txt")), "other");
    assert_eq!(read_file(&dir.join("m.txt")), "master");
    init_repository_dir
        .child("f.txt")
        .assert(predicate::path::missing());
    assert!(stdout_of(dir, &["status"]).contains(
        "=== Staged Files ===\n\n=== Removed Files ===\n\n"
    ));

    Ok(())
}

#[rstest]
fn same_change_on_both_sides_is_not_a_conflict(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "agreed"), ("m.txt", "m")], "master agrees");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "agreed"), ("o.txt", "o")], "other agrees");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "agreed");
    assert_eq!(read_file(&dir.join("o.txt")), "o");

    Ok(())
}
