use clap::Parser;
use tracing_subscriber::EnvFilter;

use exact_mapper::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("exact_mapper=debug,info")
    } else {
        EnvFilter::new("exact_mapper=warn")
    };

    // Matches go to stdout, so diagnostics stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Map(args) => {
            cli::map::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Summary(args) => {
            cli::summary::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
