mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(cli::verbosity_level(cli.verbose).into())
                .from_env_lossy(),
        )
        .init();

    match cli.command {
        Commands::Run(args) => commands::run::run(&args),
        Commands::List => commands::list::run(),
        Commands::Version => commands::version::run(),
    }
}
