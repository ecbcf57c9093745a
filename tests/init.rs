use crate::common::command::{repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_metadata_and_root_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let metadata = dir.path().join(".gitlet");
    assert!(metadata.join("objects").is_dir());
    assert!(metadata.join("refs").join("heads").join("master").is_file());
    assert_eq!(std::fs::read_to_string(metadata.join("HEAD"))?, "master");

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("Date: Thu Jan 1 00:00:00 1970 +0000"));

    Ok(())
}

#[rstest]
fn root_commit_identity_is_shared_across_repositories(
    #[from(repository_dir)] first: TempDir,
    #[from(repository_dir)] second: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(first.path(), &["init"]).assert().success();
    run_gitlet_command(second.path(), &["init"]).assert().success();

    let read_master = |dir: &TempDir| {
        std::fs::read_to_string(dir.path().join(".gitlet/refs/heads/master"))
    };

    assert_eq!(read_master(&first)?, read_master(&second)?);

    Ok(())
}

#[rstest]
fn init_at_an_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("project");

    run_gitlet_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();

    assert!(target.join(".gitlet").is_dir());

    Ok(())
}

#[rstest]
fn second_init_fails(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "A Gitlet version-control system already exists in the current directory.",
        ));
}

#[rstest]
#[case(&["add", "a.txt"])]
#[case(&["commit", "message"])]
#[case(&["log"])]
#[case(&["status"])]
#[case(&["branch", "feature"])]
#[case(&["merge", "feature"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    std::fs::write(repository_dir.path().join("a.txt"), "1").unwrap();

    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Not in an initialized Gitlet directory.",
        ));
}
