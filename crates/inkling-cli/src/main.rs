mod render;
mod session;
mod tui;
mod workspace;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schemars::schema_for;
use thiserror::Error;

use inkling_core::{Error as CoreError, ProfileCollection};
use session::{Session, SessionCommand};
use workspace::{DEFAULT_WORKSPACE_DIR, WorkspaceError, WorkspacePaths, init_logging};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Parser, Debug)]
#[command(name = "inkling", version, about = "Daily journaling challenges")]
struct Cli {
    /// Workspace directory holding settings, rules and logs.
    #[arg(long, global = true, default_value = DEFAULT_WORKSPACE_DIR)]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full-screen interface (default).
    Tui,
    /// Check the workspace and lint the rules.
    Doctor,
    /// Print the JSON Schema of the rules file.
    Schema,
    #[command(flatten)]
    Session(SessionCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command.unwrap_or(Command::Tui) {
        Command::Schema => print_schema()?,
        Command::Tui => tui::run(open_session(cli.workspace)?)?,
        Command::Doctor => {
            let (lines, failed) = open_session(cli.workspace)?.doctor()?;
            print_lines(&lines);
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Session(command) => {
            let lines = open_session(cli.workspace)?.execute(command)?;
            print_lines(&lines);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn open_session(workspace: PathBuf) -> Result<Session, CliError> {
    let paths = WorkspacePaths::new(workspace);
    paths.ensure_dirs()?;
    init_logging(&paths)?;

    let session = Session::open(paths.root)?;
    if let Some((reason, backup)) = session.recovery_note() {
        eprintln!(
            "warning: rules file unreadable ({reason}); copy kept at {}; using built-in rules",
            backup.display()
        );
    }
    Ok(session)
}

fn print_schema() -> Result<(), CliError> {
    let schema = schema_for!(ProfileCollection);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_runs_without_a_workspace() {
        let root = std::env::temp_dir().join(format!("inkling_main_schema_{}", uuid::Uuid::new_v4()));
        let cli = Cli::try_parse_from(["inkling", "--workspace", &root.to_string_lossy(), "schema"])
            .expect("parse arguments");

        let code = run(cli).expect("schema command");

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!root.exists());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["inkling"]).expect("parse arguments");
        assert!(cli.command.is_none());
        assert_eq!(cli.workspace, PathBuf::from(DEFAULT_WORKSPACE_DIR));
    }
}
