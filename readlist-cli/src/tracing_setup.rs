//! Tracing setup for the readlist CLI
//!
//! One-shot commands log to stderr. The list screen owns the terminal, so it
//! logs to a file instead.
//!
//! Usage:
//!   readlist --debug list             # Debug logging
//!   RUST_LOG=readlist_core=debug readlist  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                          # Log filter (default: config `log.level`, then info)

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used unless RUST_LOG is explicitly set)
    pub debug: bool,
    /// Filter directive from the config file
    pub level: Option<String>,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or("info")
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(config.filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(config.debug)
                .compact()
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(config.filter())
            .with_writer(std::io::stderr)
            .with_target(config.debug) // Show targets in debug mode
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
