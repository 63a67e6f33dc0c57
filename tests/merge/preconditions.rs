use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// master and `other` each have one commit past `first`; `other` tracks `u.txt`.
#[fixture]
fn two_branch_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir, &[("u.txt", "theirs")], "other side");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_files(dir, &[("m.txt", "ours")], "master side");

    init_repository_dir
}

#[rstest]
fn uncommitted_changes_block_the_merge(
    two_branch_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = two_branch_dir.path();
    write_file(FileSpec::new(dir.join("m.txt"), "pending".to_string()));
    run_gitlet_command(dir, &["add", "m.txt"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");

    Ok(())
}

#[rstest]
#[case::missing("ghost", "A branch with that name does not exist.\n")]
#[case::itself("master", "Cannot merge a branch with itself.\n")]
fn bad_branch_is_refused(
    two_branch_dir: TempDir,
    #[case] branch: &str,
    #[case] expected: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = two_branch_dir.path();
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["merge", branch])
        .assert()
        .success()
        .stdout(expected.to_string());

    assert_eq!(head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn untracked_file_blocks_the_merge(
    two_branch_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = two_branch_dir.path();
    let head = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("u.txt"), "mine".to_string()));

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("u.txt")), "mine");
    assert_eq!(head_commit_id(dir), head);

    Ok(())
}
