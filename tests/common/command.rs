use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Timestamp of every commit made through the helpers below
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository with `a.txt` = "1" committed as "first"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "1".to_string(),
    ));
    run_gitlet_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GITLET_COMMIT_DATE", COMMIT_DATE)]);
    cmd.env_remove("GITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Write, stage and commit the given files
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
        run_gitlet_command(dir, &["add", name]).assert().success();
    }

    gitlet_commit(dir, message).assert().success();
}

/// Full id of the commit the given branch points at
pub fn branch_tip(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("refs").join("heads").join(branch))
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

/// Full id of the current head commit
pub fn head_commit_id(dir: &Path) -> String {
    let branch = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))
        .expect("Failed to read HEAD");
    branch_tip(dir, branch.trim())
}

/// Output of `gitlet cat-file <oid>`
pub fn cat_file(dir: &Path, oid: &str) -> String {
    let output = run_gitlet_command(dir, &["cat-file", oid])
        .output()
        .expect("Failed to run cat-file");
    String::from_utf8(output.stdout).expect("cat-file output is not UTF-8")
}

/// Parent ids recorded in a commit
pub fn commit_parents(dir: &Path, oid: &str) -> Vec<String> {
    cat_file(dir, oid)
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
        .collect()
}

/// `(snapshot id, file name)` pairs mapped by a commit
pub fn commit_files_of(dir: &Path, oid: &str) -> Vec<(String, String)> {
    cat_file(dir, oid)
        .lines()
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.strip_prefix("file "))
        .filter_map(|entry| entry.split_once(' '))
        .map(|(oid, name)| (oid.to_string(), name.to_string()))
        .collect()
}
