//! # Subcommands
//!
//! Each subcommand has a clap `Args` struct and an async `run_*` function
//! returning the process exit code.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use folio_core::ReviewView;

use crate::client::{ApiClient, ContactForm, ReviewForm};
use crate::format_reviews;
use crate::watch::ReviewWatcher;

/// Arguments for `folio reviews`.
#[derive(Args, Debug)]
pub struct ReviewsArgs {
    /// Print the raw JSON listing instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio contact`.
#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Your name (2 to 50 characters).
    #[arg(long)]
    pub name: String,
    /// Your email address, used for replies.
    #[arg(long)]
    pub email: String,
    /// Message body (10 to 1000 characters).
    #[arg(long)]
    pub message: String,
    /// Address the message is delivered to.
    #[arg(long)]
    pub to: String,
}

/// Arguments for `folio review`.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Your name (2 to 50 characters).
    #[arg(long)]
    pub name: String,
    /// Your email address. Never shown publicly.
    #[arg(long)]
    pub email: String,
    /// Review text (10 to 1000 characters).
    #[arg(long)]
    pub message: String,
    /// Hide your name on the board.
    #[arg(long)]
    pub anonymous: bool,
}

/// Arguments for `folio watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between refreshes.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

/// `folio reviews`
pub async fn run_reviews(args: &ReviewsArgs, client: &ApiClient) -> Result<u8> {
    let reviews = client.list_reviews().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reviews)?);
    } else {
        print!("{}", format_reviews(&reviews));
    }
    Ok(0)
}

/// `folio contact`
pub async fn run_contact(args: &ContactArgs, client: &ApiClient) -> Result<u8> {
    let form = ContactForm {
        author_name: args.name.clone(),
        email: args.email.clone(),
        message: args.message.clone(),
        recipient_email: args.to.clone(),
    };
    let ack = client.submit_contact(&form).await?;
    println!("{ack}");
    Ok(0)
}

/// `folio review`
pub async fn run_review(args: &ReviewArgs, client: &ApiClient) -> Result<u8> {
    let form = ReviewForm {
        author_name: args.name.clone(),
        email: args.email.clone(),
        message: args.message.clone(),
        is_anonymous: args.anonymous,
    };
    let (ack, review) = client.submit_review(&form).await?;
    println!("{ack}");
    tracing::info!(id = %review.id, status = %review.status, "review stored");
    Ok(0)
}

/// `folio watch`: runs until Ctrl-C.
pub async fn run_watch(args: &WatchArgs, client: &ApiClient) -> Result<u8> {
    let mut last: Option<Vec<ReviewView>> = None;
    let handle = ReviewWatcher::spawn(
        client.clone(),
        Duration::from_secs(args.interval),
        move |reviews| {
            if last.as_ref() != Some(&reviews) {
                print!("{}", format_reviews(&reviews));
                println!("-- {} review(s)", reviews.len());
                last = Some(reviews);
            }
        },
    );

    tokio::signal::ctrl_c().await?;
    handle.stop().await;
    Ok(0)
}
