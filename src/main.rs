use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::config::{COMMIT_DATE_ENV, RepositoryConfig};
use gitlet::errors::RepositoryError;
use std::io::Write;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny version-control system",
    long_about = "This is a miniature version-control system, written in Rust. \
    It snapshots a working directory into content-addressed commits, \
    with branches, a staging area and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "rm", about = "Unstage a file or stage it for removal")]
    Rm {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "global-log", about = "Show the history of every branch")]
    GlobalLog {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout <branch> switches to a branch; \
        checkout -- <file> restores a file from the current commit; \
        checkout <commit id> -- <file> restores it from another commit."
    )]
    Checkout {
        target: Vec<String>,
        #[arg(last = true)]
        file: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    #[command(external_subcommand)]
    Unknown(#[allow(dead_code)] Vec<String>),
}

/// The operands, provided there are exactly `N` of them.
fn operands<const N: usize>(operands: Vec<String>) -> Result<[String; N]> {
    <[String; N]>::try_from(operands).map_err(|_| RepositoryError::IncorrectOperands.into())
}

fn run(command: Option<Commands>, config: RepositoryConfig) -> Result<()> {
    match command.ok_or(RepositoryError::NoCommand)? {
        Commands::Init { operands: args } => {
            let [] = operands::<0>(args)?;
            Repository::init(config, Box::new(std::io::stdout()))?;
        }
        Commands::Unknown(_) => return Err(RepositoryError::UnknownCommand.into()),
        command => {
            let mut repository = Repository::open(config, Box::new(std::io::stdout()))?;
            execute(&mut repository, command)?;

            repository.save()?;
            repository.writer().flush()?;
        }
    }

    Ok(())
}

fn execute(repository: &mut Repository, command: Commands) -> Result<()> {
    match command {
        Commands::Init { .. } => return Err(RepositoryError::AlreadyInitialized.into()),
        Commands::Unknown(_) => return Err(RepositoryError::UnknownCommand.into()),
        Commands::Add { operands: args } => {
            let [file] = operands::<1>(args)?;
            repository.add(&file)?;
        }
        Commands::Commit { operands: args } => {
            let [message] = operands::<1>(args)?;
            repository.commit(&message)?;
        }
        Commands::Rm { operands: args } => {
            let [file] = operands::<1>(args)?;
            repository.rm(&file)?;
        }
        Commands::Log { operands: args } => {
            let [] = operands::<0>(args)?;
            repository.log()?;
        }
        Commands::GlobalLog { operands: args } => {
            let [] = operands::<0>(args)?;
            repository.global_log()?;
        }
        Commands::Find { operands: args } => {
            let [message] = operands::<1>(args)?;
            repository.find(&message)?;
        }
        Commands::Status { operands: args } => {
            let [] = operands::<0>(args)?;
            repository.status()?;
        }
        Commands::Checkout { target, file } => match (target.as_slice(), file.as_slice()) {
            ([branch], []) => repository.checkout_branch(branch)?,
            ([], [file]) => repository.checkout_file(file)?,
            ([commit_id], [file]) => repository.checkout_file_from_commit(commit_id, file)?,
            _ => return Err(RepositoryError::IncorrectOperands.into()),
        },
        Commands::Branch { operands: args } => {
            let [name] = operands::<1>(args)?;
            repository.branch(&name)?;
        }
        Commands::RmBranch { operands: args } => {
            let [name] = operands::<1>(args)?;
            repository.rm_branch(&name)?;
        }
        Commands::Reset { operands: args } => {
            let [commit_id] = operands::<1>(args)?;
            repository.reset(&commit_id)?;
        }
        Commands::Merge { operands: args } => {
            let [branch] = operands::<1>(args)?;
            let outcome = repository.merge(&branch)?;
            if let Some(message) = outcome.message() {
                writeln!(repository.writer(), "{message}")?;
            }
        }
    }

    Ok(())
}

/// Parse the command line. Flags no command understands count as wrong
/// operands; help and version requests exit the way clap prints them.
fn parse_cli() -> Result<Cli> {
    Cli::try_parse().or_else(|error| {
        if error.use_stderr() {
            Err(RepositoryError::IncorrectOperands.into())
        } else {
            error.exit()
        }
    })
}

fn main() -> Result<()> {
    let outcome = parse_cli().and_then(|cli| {
        let config = RepositoryConfig::from_raw_parts(
            std::env::current_dir()?,
            std::env::var(COMMIT_DATE_ENV).ok(),
        )?;

        run(cli.command, config)
    });

    match outcome {
        Ok(()) => Ok(()),
        Err(error) => match error.downcast_ref::<RepositoryError>() {
            Some(user_error) => {
                println!("{user_error}");
                std::io::stdout().flush()?;
                std::process::exit(user_error.exit_code());
            }
            None => Err(error),
        },
    }
}
