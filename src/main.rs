use clap::Parser;
use tracing_subscriber::EnvFilter;

mod batch;
mod cli;
mod core;
mod output;
mod parsing;
mod scanning;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("telo_scan=debug,info")
    } else {
        EnvFilter::new("telo_scan=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Scan(args) => {
            cli::scan::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Windows(args) => {
            cli::windows::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
