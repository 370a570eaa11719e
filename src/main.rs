use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use boogchat::application::DEFAULT_SEARCH_LIMIT;
use boogchat::connector::api::{Container, ContainerConfig, Router, DEFAULT_TIMEOUT_SECS};
use boogchat::connector::serve;
use boogchat::Commands;

#[derive(Parser)]
#[command(name = "boogchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer with offline mock providers instead of the real LLM and search APIs
    #[arg(long, global = true)]
    mock_providers: bool,

    /// Timeout in seconds for each call to an upstream provider
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Number of search results folded into web-mode prompts
    #[arg(long, global = true, default_value_t = DEFAULT_SEARCH_LIMIT)]
    search_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock_providers: cli.mock_providers,
        timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        search_limit: cli.search_limit,
    });

    match cli.command {
        Commands::Serve { port, public } => {
            let host = if public {
                Ipv4Addr::UNSPECIFIED
            } else {
                Ipv4Addr::LOCALHOST
            };
            info!(
                "Starting chat server (model={}, timeout={}s)",
                container.model_name(),
                container.timeout().as_secs()
            );
            serve(&container, SocketAddr::from((host, port))).await
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}
