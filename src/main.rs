// src/main.rs
mod cli;
mod config;
mod error;
mod models;
mod store;
mod tui;
mod validator;

use clap::Parser;

fn main() -> Result<(), error::AppError> {
    env_logger::init();
    log::info!("Starting Credman-RS application");

    let cli_args = cli::Cli::parse();

    match cli::handle_cli_command(cli_args) {
        Ok(should_run_tui) => {
            if should_run_tui {
                let config = config::load_config();
                if let Err(e) = tui::run_tui(&config) {
                    log::error!("Application TUI error: {:#?}", e);
                    eprintln!("Error: {}", e);
                    return Err(e);
                }
            } else {
                log::info!("CLI command processed.");
            }
        }
        Err(e) => {
            log::error!("Application failed: {:#?}", e);
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    log::info!("Credman-RS application finished successfully.");
    Ok(())
}
