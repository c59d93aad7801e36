//! # folio CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_cli::commands::{
    run_contact, run_review, run_reviews, run_watch, ContactArgs, ReviewArgs, ReviewsArgs,
    WatchArgs,
};
use folio_cli::ApiClient;

/// Command-line client for the portfolio API.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the API.
    #[arg(
        long,
        global = true,
        env = "FOLIO_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the approved review board.
    Reviews(ReviewsArgs),

    /// Send a contact message.
    Contact(ContactArgs),

    /// Submit a review for moderation.
    Review(ReviewArgs),

    /// Reprint the review board whenever it changes, until Ctrl-C.
    Watch(WatchArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = match ApiClient::new(&cli.api_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(api = %client.base_url(), "folio CLI starting");

    let result = match &cli.command {
        Commands::Reviews(args) => run_reviews(args, &client).await,
        Commands::Contact(args) => run_contact(args, &client).await,
        Commands::Review(args) => run_review(args, &client).await,
        Commands::Watch(args) => run_watch(args, &client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
