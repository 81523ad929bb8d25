pub mod config;
pub mod preview;
pub mod render;
pub mod sets;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadview_core::config::{SourceConfig, ViewerConfig};

/// Where the viewer config comes from. Shared by every subcommand.
#[derive(Args)]
pub struct SourceArgs {
    /// TOML config file (defaults plus environment overrides when absent)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use an image server at this base URL instead of local directories
    #[arg(long, global = true)]
    pub server: Option<String>,
}

impl SourceArgs {
    pub fn resolve(&self) -> Result<ViewerConfig> {
        let mut config = match self.config {
            Some(ref path) => ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ViewerConfig::from_env(),
        };
        if let Some(ref base_url) = self.server {
            config.source = SourceConfig::Http {
                base_url: base_url.clone(),
            };
        }
        Ok(config)
    }
}
