use crate::common::command::{
    branch_tip, commit_files, head_commit_id, repository_dir, run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

mod common;

/// Two repositories sharing the root commit; `local` has one extra commit
#[fixture]
fn repositories(
    #[from(repository_dir)] local: TempDir,
    #[from(repository_dir)] remote: TempDir,
) -> (TempDir, TempDir) {
    for dir in [&local, &remote] {
        run_gitlet_command(dir.path(), &["init"]).assert().success();
    }
    commit_files(local.path(), &[("a.txt", "1")], "first");

    let remote_metadata = remote.path().join(".gitlet");
    run_gitlet_command(
        local.path(),
        &["add-remote", "origin", &remote_metadata.to_string_lossy()],
    )
    .assert()
    .success();

    (local, remote)
}

fn remote_branch_tip(dir: &Path, remote: &str, branch: &str) -> String {
    std::fs::read_to_string(
        dir.join(".gitlet")
            .join("refs")
            .join("remotes")
            .join(remote)
            .join(branch),
    )
    .expect("Failed to read remote-tracking branch")
    .trim()
    .to_string()
}

#[rstest]
fn registering_a_remote_twice_fails(repositories: (TempDir, TempDir)) {
    let (local, _remote) = repositories;

    run_gitlet_command(local.path(), &["add-remote", "origin", "../other/.gitlet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name already exists.",
        ));
}

#[rstest]
fn removing_an_unknown_remote_fails(repositories: (TempDir, TempDir)) {
    let (local, _remote) = repositories;

    run_gitlet_command(local.path(), &["rm-remote", "origin"])
        .assert()
        .success();
    run_gitlet_command(local.path(), &["rm-remote", "origin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));
}

#[rstest]
fn push_sends_history_and_moves_the_remote_branch(repositories: (TempDir, TempDir)) {
    let (local, remote) = repositories;
    let local_tip = head_commit_id(local.path());

    run_gitlet_command(local.path(), &["push", "origin", "master"])
        .assert()
        .success();

    assert_eq!(branch_tip(remote.path(), "master"), local_tip);
    run_gitlet_command(remote.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"));

    // the remote can check the pushed snapshot out
    run_gitlet_command(remote.path(), &["reset", &local_tip])
        .assert()
        .success();
    assert_eq!(read_file(&remote.path().join("a.txt")), "1");
}

#[rstest]
fn push_to_a_new_remote_branch(repositories: (TempDir, TempDir)) {
    let (local, remote) = repositories;

    run_gitlet_command(local.path(), &["push", "origin", "feature"])
        .assert()
        .success();

    assert_eq!(
        branch_tip(remote.path(), "feature"),
        head_commit_id(local.path())
    );
}

#[rstest]
fn push_refuses_diverged_history(repositories: (TempDir, TempDir)) {
    let (local, remote) = repositories;
    commit_files(remote.path(), &[("r.txt", "remote only")], "remote work");
    let remote_tip = branch_tip(remote.path(), "master");

    run_gitlet_command(local.path(), &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please pull down remote changes before pushing.",
        ));

    assert_eq!(branch_tip(remote.path(), "master"), remote_tip);
}

#[rstest]
fn fetch_creates_a_remote_tracking_branch(repositories: (TempDir, TempDir)) {
    let (local, remote) = repositories;
    commit_files(remote.path(), &[("r.txt", "remote only")], "remote work");
    let remote_tip = branch_tip(remote.path(), "master");
    let local_tip = head_commit_id(local.path());

    run_gitlet_command(local.path(), &["fetch", "origin", "master"])
        .assert()
        .success();

    assert_eq!(remote_branch_tip(local.path(), "origin", "master"), remote_tip);
    assert_eq!(head_commit_id(local.path()), local_tip);
    run_gitlet_command(local.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote work"));
}

#[rstest]
fn fetching_a_missing_branch_fails(repositories: (TempDir, TempDir)) {
    let (local, _remote) = repositories;

    run_gitlet_command(local.path(), &["fetch", "origin", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "That remote does not have that branch.",
        ));
}

#[rstest]
fn pull_merges_the_fetched_branch(repositories: (TempDir, TempDir)) {
    let (local, remote) = repositories;
    commit_files(remote.path(), &[("r.txt", "remote only")], "remote work");

    run_gitlet_command(local.path(), &["pull", "origin", "master"])
        .assert()
        .success();

    assert_eq!(read_file(&local.path().join("r.txt")), "remote only");
    assert_eq!(read_file(&local.path().join("a.txt")), "1");
    run_gitlet_command(local.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged origin/master into master."));
}

#[rstest]
fn unreachable_remote_directory_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();
    run_gitlet_command(dir, &["add-remote", "gone", "../missing/.gitlet"])
        .assert()
        .success();

    run_gitlet_command(dir, &["fetch", "gone", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote directory not found."));
}
