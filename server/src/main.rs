//! Server entrypoint for AI Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod api;

use anyhow::{Context, Result, bail};
use api::AppState;
use clap::Parser;
use council_application::RunCouncilUseCase;
use council_infrastructure::{ConfigLoader, build_http_client, default_gateways};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ai-council",
    about = "Fan one decision problem out to four AI providers and merge the answers",
    version
)]
struct Cli {
    /// Address to listen on (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore configuration files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    show_config: bool,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(config) => config,
            Err(e) => bail!("Failed to load configuration: {}", e),
        }
    };

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("Effective configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    info!("Starting AI Council server");

    // === Dependency Injection ===
    // One HTTP client shared by every provider gateway
    let timeout = Duration::from_secs(config.upstream.timeout_secs.max(1));
    let client = build_http_client(timeout).context("Failed to build HTTP client")?;
    let gateways = default_gateways(&client, &config.upstream);

    let state = Arc::new(AppState {
        run_council: RunCouncilUseCase::new(gateways),
    });

    let bind = cli.bind.unwrap_or(config.server.bind);
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("AI Council listening on http://{}", addr);

    axum::serve(listener, api::app(state))
        .await
        .context("Server exited unexpectedly")?;

    Ok(())
}
