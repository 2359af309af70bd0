//! # Queue Subcommands
//!
//! `drain` retries everything queued; `queue` lists what is waiting.

use clap::Args;
use folio_client::{ClientConfig, ContactForm};

#[derive(Args, Debug)]
pub struct DrainArgs {}

#[derive(Args, Debug)]
pub struct QueueArgs {
    /// Print the raw queue block as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Exit code 0 when the queue ends empty, 1 when entries remain.
pub async fn run_drain(_args: &DrainArgs, config: &ClientConfig) -> anyhow::Result<u8> {
    let form = ContactForm::from_config(config)?;
    let report = form.mount().await?;
    println!(
        "attempted {}, delivered {}, dropped {}, remaining {}",
        report.attempted, report.delivered, report.dropped, report.remaining
    );
    Ok(if report.remaining == 0 { 0 } else { 1 })
}

pub fn run_queue(args: &QueueArgs, config: &ClientConfig) -> anyhow::Result<u8> {
    let form = ContactForm::from_config(config)?;
    let pending = form.pending()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
    } else if pending.is_empty() {
        println!("Queue is empty.");
    } else {
        for (i, entry) in pending.iter().enumerate() {
            println!("{:>3}. {} <{}>: {}", i + 1, entry.name, entry.email, entry.message);
        }
    }
    Ok(0)
}
