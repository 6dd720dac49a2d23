use anyhow::Result;
use clap::Parser;
use exus_search::config::{get_config, load_config};
use exus_search::server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exus Search - aggregate academic and web research sources behind one endpoint
#[derive(Parser, Debug)]
#[command(name = "exus-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Meta-search HTTP service over eleven research and web providers", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Address to bind the listener to (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("exus_search={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(config_path)?
    } else {
        get_config()
    };

    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    server::serve(config).await
}
