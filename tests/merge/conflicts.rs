use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// `f.txt` is "b" on b1 and "c" on master, both changed from "first".
/// b1 also adds `g.txt`.
#[fixture]
fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "b1"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "b1"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "b"), ("g.txt", "from b1")], "C2");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "c")], "C3");

    init_repository_dir
}

#[rstest]
fn conflicting_edits_are_written_with_markers(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["merge", "b1"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nc=======\nb>>>>>>>\n"
    );
    assert_eq!(head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn clean_files_stay_staged_after_a_conflict(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    run_gitlet_command(dir, &["merge", "b1"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("g.txt")), "from b1");
    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Staged Files ===\ng.txt\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\nf.txt (modified)\n\n"));

    Ok(())
}

#[rstest]
fn conflict_is_resolved_by_a_regular_commit(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    run_gitlet_command(dir, &["merge", "b1"])
        .assert()
        .success();

    commit_files(dir, &[("f.txt", "resolved")], "resolve b1");

    assert!(stdout_of(dir, &["log"]).contains("\nresolve b1\n"));
    run_gitlet_command(dir, &["checkout", "--", "g.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("f.txt")), "resolved");

    Ok(())
}

#[rstest]
fn deleted_on_target_and_changed_on_active_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["rm", "f.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "drop f"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_files(dir, &[("f.txt", "kept")], "keep f");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nkept=======\n>>>>>>>\n"
    );

    Ok(())
}
