use crate::common::command::{commit_files, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn clean_repository_reports_empty_sections(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "=== Branches ===\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             \n\
             === Removed Files ===\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             \n\
             === Untracked Files ===\n",
        ));
}

#[rstest]
fn every_section_is_reported_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(
        dir,
        &[("b.txt", "b"), ("c.txt", "c"), ("d.txt", "d")],
        "more files",
    );
    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .success();

    // staged, then edited again
    write_file(FileSpec::new(dir.join("e.txt"), "e".to_string()));
    run_gitlet_command(dir, &["add", "e.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("e.txt"), "e2".to_string()));
    // staged removal
    run_gitlet_command(dir, &["rm", "b.txt"]).assert().success();
    // tracked and modified
    write_file(FileSpec::new(dir.join("c.txt"), "changed".to_string()));
    // tracked and deleted
    std::fs::remove_file(dir.join("d.txt")).unwrap();
    // untracked
    write_file(FileSpec::new(dir.join("z.txt"), "z".to_string()));
    write_file(FileSpec::new(dir.join("f.txt"), "f".to_string()));

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "=== Branches ===\n\
             *master\n\
             other\n\
             \n\
             === Staged Files ===\n\
             e.txt\n\
             \n\
             === Removed Files ===\n\
             b.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             c.txt (modified)\n\
             d.txt (deleted)\n\
             e.txt (modified)\n\
             \n\
             === Untracked Files ===\n\
             f.txt\n\
             z.txt\n",
        ));
}

#[rstest]
fn status_follows_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*feature\nmaster\n\n",
        ));
}
