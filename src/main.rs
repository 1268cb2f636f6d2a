mod cli;
mod feedback;
mod model;
mod notify;
mod orchestrator;
mod service;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_one_shot = args.check.is_some() || args.generate || args.generate_quantum;

    cli::run(args).await?;

    // Explicitly exit with code 0 on success for scripting modes
    if is_one_shot {
        std::process::exit(0);
    }
    Ok(())
}
