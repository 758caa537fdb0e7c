mod archive;
mod cli;
mod commands;
mod error;
mod extractor;
mod mcp;
mod page_range;
mod pdf;
mod selection;
mod splitter;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use selection::SplitParams;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    // stdout belongs to the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Split {
            path,
            mode,
            ranges,
            fixed_range,
            remove_pages,
            output_dir,
        } => {
            let params = SplitParams {
                ranges_expr: ranges,
                remove_expr: remove_pages,
                window_size: fixed_range,
            };
            commands::split::run(&path, &mode, &params, &output_dir)?;
        }
    }

    Ok(())
}
