mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadview", about = "Synchronized 2x2 image set viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    source: commands::SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the complete image sets of the configured source
    Sets(commands::sets::SetsArgs),
    /// Fetch one pane's low-resolution preview
    Preview(commands::preview::PreviewArgs),
    /// Render all four panes of a set for a given view
    Render(commands::render::RenderArgs),
    /// Print or save the effective viewer config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.source.resolve()?;

    match &cli.command {
        Commands::Sets(args) => commands::sets::run(args, &config),
        Commands::Preview(args) => commands::preview::run(args, &config),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
