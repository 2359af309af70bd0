//! Flags shared by every subcommand. Each one overrides the matching
//! `FOLIO_*` environment variable read by [`ClientConfig::from_env`].

use std::path::PathBuf;

use clap::Args;
use folio_client::{ClientConfig, DeliveryStrategy, RejectionPolicy};
use url::Url;

/// Queue directory used when neither `--queue-dir` nor `FOLIO_QUEUE_DIR` is set.
pub const DEFAULT_QUEUE_DIR: &str = ".folio-queue";

#[derive(Args, Debug, Default, Clone)]
pub struct ClientArgs {
    /// Base URL of the folio service.
    #[arg(long, global = true)]
    pub api_url: Option<Url>,

    /// Form relay endpoint used by `--strategy relay-primary`.
    #[arg(long, global = true)]
    pub relay_url: Option<Url>,

    /// Directory holding the retry queue.
    #[arg(long, global = true)]
    pub queue_dir: Option<PathBuf>,

    /// relay-primary, backend-primary or backend-with-local-fallback.
    #[arg(long, global = true)]
    pub strategy: Option<DeliveryStrategy>,

    /// What a drain does with entries the service refuses: drop or requeue.
    #[arg(long, global = true)]
    pub on_reject: Option<RejectionPolicy>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ClientArgs {
    /// Layer the flags over an environment-derived configuration.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(url) = &self.relay_url {
            config.relay_url = url.clone();
        }
        if let Some(dir) = &self.queue_dir {
            config.queue_dir = Some(dir.clone());
        }
        if config.queue_dir.is_none() {
            config.queue_dir = Some(PathBuf::from(DEFAULT_QUEUE_DIR));
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(policy) = self.on_reject {
            config.rejection_policy = policy;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        config
    }

    /// Environment first, then flags.
    pub fn resolve(&self) -> anyhow::Result<ClientConfig> {
        Ok(self.apply(ClientConfig::from_env()?))
    }
}
