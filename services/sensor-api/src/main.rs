//! Sensor API Server
//!
//! Resolves sensor observation queries and serves filtered catalog
//! collections.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sensor_api::state::AppState;

/// Sensor API Server
#[derive(Parser, Debug)]
#[command(name = "sensor-api")]
#[command(about = "Sensor observation query server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8084", env = "SENSOR_API_LISTEN_ADDR")]
    listen: String,

    /// Directory holding defaults.yaml and catalog.yaml
    #[arg(long, default_value = "config", env = "SENSOR_API_CONFIG_DIR")]
    config_dir: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "SENSOR_API_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting sensor API server");

    let prometheus_handle = sensor_api::metrics::install_recorder()?;

    // Initialize application state
    let state = match AppState::new(&args.config_dir) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = sensor_api::router(state, prometheus_handle);

    let addr: SocketAddr = args.listen.parse()?;
    info!("Sensor API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
