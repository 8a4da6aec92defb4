//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{todo, tui};
use crate::storage::{Config, STORAGE_FILE};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "A local-first todo list for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to `default_format` from config)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the todo storage file
    #[arg(long, global = true, env = "TODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo
    ///
    /// Examples:
    ///   todo add "Buy milk"
    Add {
        /// Todo text (1-100 characters after trimming)
        text: String,
    },

    /// List all todos in the order they were added
    #[command(alias = "ls")]
    List,

    /// Mark a todo as completed, or as open again
    Toggle {
        /// Todo ID
        id: String,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Todo ID
        id: String,
    },

    /// Open the interactive todo list
    Ui,

    /// Show where todos are stored
    Path,
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("todo starting");

    let mut session = Session::open(&config, cli.data_dir.as_deref(), &output)?;

    let code = match cli.command {
        Commands::Add { text } => todo::add(&mut session, &output, &text)?,
        Commands::List => todo::list(&session, &output)?,
        Commands::Toggle { id } => todo::toggle(&mut session, &output, &id)?,
        Commands::Delete { id } => todo::delete(&mut session, &output, &id)?,
        Commands::Ui => {
            output.verbose_ctx("ui", "Launching interactive list");
            tui::run(session.store, &output)?;
            ExitCode::SUCCESS
        }
        Commands::Path => {
            let path = session.data_dir().join(STORAGE_FILE);
            if output.is_json() {
                output.data(&serde_json::json!({
                    "data_dir": session.data_dir().display().to_string(),
                    "file": path.display().to_string(),
                }));
            } else {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
    };

    output.verbose("Command completed");
    Ok(code)
}
