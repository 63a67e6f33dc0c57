use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_rewrites_the_working_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "master f"), ("m.txt", "only master")], "on master");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "first");
    init_repository_dir
        .child("m.txt")
        .assert(predicate::path::missing());

    commit_files(dir, &[("o.txt", "only other")], "on other");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir), master_tip);
    assert_eq!(read_file(&dir.join("f.txt")), "master f");
    assert_eq!(read_file(&dir.join("m.txt")), "only master");
    init_repository_dir
        .child("o.txt")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn switching_branches_clears_the_staging_area(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("n.txt"), "pending".to_string()));
    run_gitlet_command(dir, &["add", "n.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nn.txt\n\n"));

    Ok(())
}

#[rstest]
fn untracked_file_in_the_way_blocks_the_switch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("u.txt", "tracked on other")], "add u");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("u.txt"), "mine".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("u.txt")), "mine");
    assert!(stdout_of(dir, &["status"]).starts_with("=== Branches ===\n*master\nother\n\n"));

    Ok(())
}

#[rstest]
#[case::current("master", "No need to checkout the current branch.\n")]
#[case::missing("ghost", "No such branch exists.\n")]
fn branch_checkout_errors(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] expected: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["checkout", name])
        .assert()
        .success()
        .stdout(expected.to_string());

    Ok(())
}

#[rstest]
fn untracked_files_below_an_incoming_file_block_the_switch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("d", "tracked file d")], "add d");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("d/untracked.txt"), "mine".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("d/untracked.txt")), "mine");

    Ok(())
}

#[rstest]
fn untracked_file_where_an_incoming_directory_goes_blocks_the_switch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("d/x", "nested")], "add d/x");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("d"), "mine".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("d")), "mine");

    Ok(())
}

#[rstest]
fn tracked_file_and_directory_can_swap_places(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    commit_files(dir, &[("d", "file d"), ("f.txt", "master f")], "d as a file");
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("d/x", "nested")], "d as a directory");

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.join("d")), "file d");
    assert_eq!(read_file(&dir.join("f.txt")), "master f");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.join("d/x")), "nested");
    assert_eq!(read_file(&dir.join("f.txt")), "first");
    assert!(stdout_of(dir, &["status"]).starts_with("=== Branches ===\nmaster\n*other\n\n"));

    Ok(())
}

#[rstest]
fn directories_emptied_by_a_switch_are_removed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    commit_files(dir, &[("nested/deep/x.txt", "x")], "nested files");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();

    init_repository_dir
        .child("nested")
        .assert(predicate::path::missing());

    Ok(())
}
