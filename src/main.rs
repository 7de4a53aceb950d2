//! Catalog proxy server.
//!
//! Proxies and reshapes an upstream product catalog and serves a local,
//! in-memory product store over JSON/HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use catalog_proxy::config::validation::validate_config;
use catalog_proxy::config::{load_config, AppConfig, ConfigError};
use catalog_proxy::http::HttpServer;
use catalog_proxy::lifecycle::{wait_for_signal, Shutdown};
use catalog_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "catalog-proxy")]
#[command(about = "Product catalog proxy with a local in-memory store", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `upstream.base_url`.
    #[arg(long)]
    upstream: Option<String>,
}

fn resolve_config(args: &Args) -> Result<AppConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(upstream) = &args.upstream {
        config.upstream.base_url = upstream.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("catalog-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
