//! # Projects Subcommand
//!
//! Fetches `GET /api/projects` and prints each listing.

use std::fmt::Write;
use std::time::Duration;

use clap::Args;
use folio_client::{BackendClient, ClientConfig};
use folio_core::ProjectListing;

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Print the raw JSON array instead of text.
    #[arg(long)]
    pub json: bool,
}

pub async fn run_projects(args: &ProjectsArgs, config: &ClientConfig) -> anyhow::Result<u8> {
    let client = BackendClient::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
    let projects = client.list_projects().await?;
    tracing::debug!(count = projects.len(), "fetched projects");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        print!("{}", render_projects(&projects));
    }
    Ok(0)
}

/// Plain-text rendering, one block per project.
pub fn render_projects(projects: &[ProjectListing]) -> String {
    if projects.is_empty() {
        return "No projects.\n".to_string();
    }

    let mut out = String::new();
    for (i, project) in projects.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", project.title);
        let _ = writeln!(out, "  {}", project.description);
        if !project.technologies.is_empty() {
            let _ = writeln!(out, "  Tech: {}", project.technologies.join(", "));
        }
        if let Some(github) = &project.github {
            let _ = writeln!(out, "  Code: {github}");
        }
        if let Some(live) = &project.live {
            let _ = writeln!(out, "  Live: {live}");
        }
    }
    out
}
