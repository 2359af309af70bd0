//! # Contact Subcommand
//!
//! Behaves like opening the contact page and pressing "send": the queue is
//! drained first, then the new message goes out under the configured
//! strategy. Exactly one outcome line is printed. Background deliveries are
//! awaited before returning so they are not dropped when the runtime exits.

use clap::Args;
use folio_client::{ClientConfig, ContactForm, SubmitOutcome};
use folio_core::ContactPayload;

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,
}

/// Exit code 0 when the message was sent or queued, 1 otherwise.
pub async fn run_contact(args: &ContactArgs, config: &ClientConfig) -> anyhow::Result<u8> {
    let form = ContactForm::from_config(config)?;

    match form.mount().await {
        Ok(report) if report.attempted > 0 => {
            tracing::info!(delivered = report.delivered, remaining = report.remaining, "drained queue");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "could not drain retry queue"),
    }

    let payload = ContactPayload::new(&args.name, &args.email, &args.message);
    let outcome = form.submit(payload).await;
    println!("{}", outcome_line(&outcome));
    form.settle().await;
    Ok(if outcome.is_success() { 0 } else { 1 })
}

pub fn outcome_line(outcome: &SubmitOutcome) -> String {
    let tag = match outcome {
        SubmitOutcome::Sent => "sent",
        SubmitOutcome::QueuedLocally => "queued",
        SubmitOutcome::Rejected { .. } => "rejected",
        SubmitOutcome::Failed { .. } => "failed",
    };
    format!("[{tag}] {}", outcome.message())
}
