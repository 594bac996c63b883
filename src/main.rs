//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables, resolves the
//! connection profile, connects to the database, and starts the interactive
//! chat session.

mod chat;
mod cli;
mod config;
mod constants;
mod core;
mod db;
mod errors;
mod llm;
mod utils;

use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::warn;

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables
/// 4. Resolve the connection profile and connect to the database
/// 5. Run the chat loop
#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let profile = match config::ChatProfile::resolve(&cli) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "Connecting to {}:{}...",
        profile.connection.host, profile.connection.port
    );
    let database = match db::Database::connect(&profile.connection).await {
        Ok(database) => Arc::new(database),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let mut session =
        match crate::core::ChatSession::new(database, &profile.llm.provider, &profile.llm.model) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        };

    if let Err(e) = chat::run(&mut session).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
