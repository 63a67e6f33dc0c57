use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command, stdout_of};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn staged_files(dir: &std::path::Path) -> Vec<String> {
    stdout_of(dir, &["status"])
        .split("=== Staged Files ===\n")
        .nth(1)
        .and_then(|rest| rest.split("\n=== ").next())
        .map(|section| {
            section
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
fn adding_a_missing_file_is_refused(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    assert!(staged_files(init_repository_dir.path()).is_empty());

    Ok(())
}

#[rstest]
fn adding_an_unchanged_file_stages_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    assert!(staged_files(dir).is_empty());

    run_gitlet_command(dir, &["commit", "nothing"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    Ok(())
}

#[rstest]
fn reverting_a_staged_file_withdraws_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("f.txt"), "changed".to_string()));
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    assert_eq!(staged_files(dir), vec!["f.txt"]);

    write_file(FileSpec::new(dir.join("f.txt"), "first".to_string()));
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    assert!(staged_files(dir).is_empty());

    Ok(())
}

#[rstest]
fn generated_files_are_staged_in_name_order(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();

    let files = write_generated_files(dir, 5);
    for file in &files {
        let name = file.path.file_name().and_then(|n| n.to_str()).unwrap();
        run_gitlet_command(dir, &["add", name]).assert().success();
    }

    let mut expected = files
        .iter()
        .map(|file| file.path.file_name().unwrap().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    expected.sort();

    assert_eq!(staged_files(dir), expected);

    Ok(())
}

#[rstest]
fn files_in_subdirectories_can_be_added(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/b/deep.txt"), "deep".to_string()));

    run_gitlet_command(dir, &["add", "./a/b/deep.txt"])
        .assert()
        .success();

    assert_eq!(staged_files(dir), vec!["a/b/deep.txt"]);

    Ok(())
}

#[rstest]
fn files_outside_the_work_tree_cannot_be_staged(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let work_tree = repository_dir.path().join("work");
    std::fs::create_dir_all(&work_tree)?;
    run_gitlet_command(&work_tree, &["init"]).assert().success();
    let outside = repository_dir.path().join("outside.txt");
    write_file(FileSpec::new(outside.clone(), "outside".to_string()));
    let absolute = outside.to_string_lossy().to_string();

    for file in [absolute.as_str(), "../outside.txt"] {
        run_gitlet_command(&work_tree, &["add", file])
            .assert()
            .success()
            .stdout("File does not exist.\n");
        run_gitlet_command(&work_tree, &["rm", file])
            .assert()
            .success()
            .stdout("No reason to remove the file.\n");
        run_gitlet_command(&work_tree, &["checkout", "--", file])
            .assert()
            .success()
            .stdout("File does not exist in that commit.\n");
    }

    assert!(staged_files(&work_tree).is_empty());
    assert_eq!(std::fs::read_to_string(&outside)?, "outside");

    Ok(())
}

#[rstest]
fn repository_data_cannot_be_staged(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["add", ".gitlet/state"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    Ok(())
}

#[rstest]
fn names_with_line_breaks_are_refused(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a\nb"), "broken".to_string()));

    run_gitlet_command(dir, &["add", "a\nb"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
    run_gitlet_command(dir, &["commit", "line break"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    // history stays readable
    run_gitlet_command(dir, &["log"]).assert().success();

    Ok(())
}
