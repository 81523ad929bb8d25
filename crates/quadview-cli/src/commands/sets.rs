use anyhow::Result;
use clap::Args;
use quadview_core::config::ViewerConfig;
use quadview_core::source::open_source;

#[derive(Args)]
pub struct SetsArgs {
    /// Print only the identifiers, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: &SetsArgs, config: &ViewerConfig) -> Result<()> {
    let source = open_source(&config.source)?;
    let sets = source.list_sets()?;

    if args.quiet {
        for set in &sets {
            println!("{set}");
        }
        return Ok(());
    }

    crate::summary::print_source_summary(&config.source, &sets);
    Ok(())
}
