mod commands;
mod input;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::ConvertArgs, schema::SchemaArgs, topics::TopicsArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cdcconvert", about = "Convert CDC stream records into lake-ready records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSONL dump of change events
    Convert(ConvertArgs),
    /// Print the record schema of a converter
    Schema(SchemaArgs),
    /// List topic to table routes
    Topics(TopicsArgs),
}

fn main() -> Result<()> {
    // Records go to stdout, diagnostics to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Schema(args) => args.run(),
        Commands::Topics(args) => args.run(),
    }
}
