use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadview_core::config::ViewerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print built-in defaults, ignoring the config file, environment and flags
    #[arg(long)]
    pub defaults: bool,
}

/// Print or save the effective config (file, environment and flags applied) as TOML.
pub fn run(args: &ConfigArgs, config: &ViewerConfig) -> Result<()> {
    let toml_str = if args.defaults {
        ViewerConfig::default().to_toml()?
    } else {
        config.to_toml()?
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
