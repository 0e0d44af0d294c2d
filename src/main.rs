//! echo-api: a JSON echo and health check service.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from an optional TOML file plus the `PORT` override, builds the Axum router
//! and starts the HTTP server.

use clap::Parser;
use const_format::formatcp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echo_api::config::{
    AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_HTTP_ADDR, DEFAULT_LOG_FILTER, PORT_ENV_VAR,
};
use echo_api::create_router;
use echo_api::http::start_server;

const CONFIG_HELP: &str = formatcp!(
    "Path to configuration file (default: {} when present, otherwise listen on {}; {} overrides the port)",
    DEFAULT_CONFIG_PATH,
    DEFAULT_HTTP_ADDR,
    PORT_ENV_VAR
);

/// echo-api: echoes JSON bodies and answers health checks
#[derive(Parser, Debug)]
#[command(name = "echo-api", version, about)]
struct Args {
    #[arg(short, long, value_name = "PATH", help = CONFIG_HELP)]
    config: Option<String>,

    /// Log level filter (e.g., "echo_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_env_overrides()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.logging.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    tracing::debug!(
        config_path = ?args.config,
        host = %config.http.host,
        port = config.http.port,
        body_limit_bytes = config.http.body_limit_bytes,
        "Loaded configuration"
    );

    let app = create_router(&config.http);

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
