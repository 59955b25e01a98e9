// src/cli.rs
use crate::error::AppResult;
use crate::models::{CredentialDraft, DraftField};
use crate::validator;
use clap::{Parser, Subcommand};
use log;

/// A single-session, in-memory credential manager.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(arg_required_else_help = false)] // Allow no subcommand to default to TUI
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a password against the entry strength rules
    Check {
        /// The password to check
        password: String,
    },
    /// Launch the Terminal User Interface (TUI)
    Tui,
}

/// Handles the parsed CLI command.
/// Returns `Ok(true)` if the TUI should run, `Ok(false)` if a CLI command was handled and TUI should not run.
pub fn handle_cli_command(cli: Cli) -> AppResult<bool> {
    log::debug!("Handling CLI command: {:?}", cli.command);
    match cli.command {
        Some(Commands::Check { password }) => {
            log::info!("Executing 'check' command.");
            let mut draft = CredentialDraft::new();
            draft.set_field(DraftField::Password, password);
            let checks = validator::validate(&draft).password;

            for (rule, ok) in checks.lines() {
                println!("  [{}] {}", if ok { "ok" } else { "!!" }, rule);
            }
            if checks.all() {
                println!("Password satisfies all strength rules.");
            } else {
                println!("Password does not satisfy all strength rules.");
            }
            Ok(false)
        }
        Some(Commands::Tui) => {
            log::info!("'tui' command given, preparing to launch TUI.");
            Ok(true)
        }
        None => {
            log::info!("No CLI command given, preparing to launch TUI by default.");
            Ok(true)
        }
    }
}
