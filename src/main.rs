use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
const LOG_ENV: &str = "GITLET_LOG";
/// Set to any value to print history without the pager
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version control system",
    long_about = "gitlet tracks the top-level files of a directory through immutable snapshots \
    and commits, with branches, three-way merges and remotes on the local file system.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .gitlet directory, the initial commit and the master branch \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage the current content of a file")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage the removal of a tracked file"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the current branch from the staged additions and removals."
    )]
    Commit {
        #[arg(index = 1, default_value = "", help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of the commits whose message contains the given text"
    )]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and working directory state")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch; checkout -- <file> restores a file \
        from the head commit; checkout <commit> -- <file> restores it from any commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository as a remote")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Path to the remote's .gitlet directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Send the current history to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(
        name = "fetch",
        about = "Copy a remote branch into a remote-tracking branch"
    )]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(
        name = "pull",
        about = "Fetch a remote branch and merge it into the current branch"
    )]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute the snapshot id of a file and optionally store it"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the snapshot to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "cat-file", about = "Print a stored object")]
    CatFile {
        #[arg(index = 1, help = "Full or abbreviated object id")]
        oid: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            Repository::new(path, Box::new(std::io::stdout()))?
                .init()
                .await
        }
        Commands::Add { file } => open_repository(None)?.add(&file).await,
        Commands::Rm { file } => open_repository(None)?.rm(&file).await,
        Commands::Commit { message } => open_repository(None)?.commit(&message).await,
        Commands::Log => with_pager(|repository| repository.log()),
        Commands::GlobalLog => with_pager(|repository| repository.global_log()),
        Commands::Find { message } => open_repository(None)?.find(&message),
        Commands::Status => open_repository(None)?.status().await,
        Commands::Checkout { target, file } => {
            let mut repository = open_repository(None)?;
            match (target, file) {
                (Some(branch), None) => repository.checkout_branch(&branch).await,
                (commit, Some(file)) => repository.checkout_file(commit.as_deref(), &file),
                (None, None) => anyhow::bail!("Incorrect operands."),
            }
        }
        Commands::Branch { name } => open_repository(None)?.branch(&name),
        Commands::RmBranch { name } => open_repository(None)?.rm_branch(&name),
        Commands::Reset { commit } => open_repository(None)?.reset(&commit).await,
        Commands::Merge { branch } => open_repository(None)?.merge(&branch).await,
        Commands::AddRemote { name, path } => open_repository(None)?.add_remote(&name, &path),
        Commands::RmRemote { name } => open_repository(None)?.rm_remote(&name),
        Commands::Push { remote, branch } => open_repository(None)?.push(&remote, &branch),
        Commands::Fetch { remote, branch } => open_repository(None)?.fetch(&remote, &branch),
        Commands::Pull { remote, branch } => open_repository(None)?.pull(&remote, &branch).await,
        Commands::HashObject { write, file } => open_repository(None)?.hash_object(&file, write),
        Commands::CatFile { oid } => open_repository(None)?.cat_file(&oid),
    }
}

fn open_repository(pager: Option<&Pager>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    let writer: Box<dyn Write> = match pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    Repository::new(pwd, writer)
}

/// Run a history command through the pager when stdout is a terminal
fn with_pager(command: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    if !std::io::stdout().is_terminal() || std::env::var_os(NO_PAGER_ENV).is_some() {
        return command(&open_repository(None)?);
    }

    let pager = Pager::new();
    let repository = open_repository(Some(&pager))?;
    command(&repository)?;
    drop(repository);

    minus::page_all(pager)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn command_line_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["gitlet", "checkout", "dev"], Some("dev"), None)]
    #[case(&["gitlet", "checkout", "--", "a.txt"], None, Some("a.txt"))]
    #[case(&["gitlet", "checkout", "3f2a", "--", "a.txt"], Some("3f2a"), Some("a.txt"))]
    fn checkout_operands(
        #[case] args: &[&str],
        #[case] expected_target: Option<&str>,
        #[case] expected_file: Option<&str>,
    ) {
        let Commands::Checkout { target, file } = Cli::try_parse_from(args).unwrap().command else {
            panic!("expected a checkout command");
        };

        pretty_assertions::assert_eq!(target.as_deref(), expected_target);
        pretty_assertions::assert_eq!(file.as_deref(), expected_file);
    }
}
