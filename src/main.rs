//! ImportScope CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "importscope")]
#[command(about = "Python import extraction and dependency graph explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project and print imports per file
    Scan {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the import graph as JSON
    Graph,
    /// Search graph nodes by name
    Search {
        query: String,
    },
    /// Write a requirements manifest of third-party imports
    Manifest {
        /// Pin each package to its latest registry version
        #[arg(long)]
        resolve: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the graph over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7891")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
    /// Show version
    Version,
}

/// One directive covers every `importscope*` crate target.
fn log_directive(verbose: bool) -> String {
    let log_level = if verbose { "debug" } else { "info" };
    format!("importscope={}", log_level)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_directive(cli.verbose)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Project root: {}", cli.root.display());

    match cli.command {
        Commands::Scan { json } => commands::scan(&cli.root, json),
        Commands::Graph => commands::graph(&cli.root),
        Commands::Search { query } => commands::search(&cli.root, &query),
        Commands::Manifest { resolve, output } => {
            commands::manifest(&cli.root, resolve, output).await
        }
        Commands::Serve { port, host, open } => {
            commands::serve(cli.root, host, port, open).await
        }
        Commands::Version => {
            println!("ImportScope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
