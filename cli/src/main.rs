//! ESDC Admin — CLI Server
//!
//! Headless admin backend suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/esdc-admin/config.toml)
//! esdc-admin
//!
//! # Custom config path
//! esdc-admin --config /etc/esdc-admin/config.toml
//!
//! # Override the API port
//! esdc-admin --api-port 9090
//!
//! # Validate config without starting
//! esdc-admin --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use esdc_admin::config::{AppConfig, ConfigError, CONFIG_ENV_VAR};
use esdc_admin::server::{init_tracing, ServerHandle, ServerOptions};

/// ESDC Admin — user and project administration backend.
#[derive(Parser, Debug)]
#[command(
    name = "esdc-admin",
    version,
    about = "Admin backend for users, projects and dashboard stats",
    long_about = "ESDC Admin — REST API server exposing the admin-only user \
                  and project operations.\n\n\
                  Default config: ~/.config/esdc-admin/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(esdc_admin::default_config_path);
    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.api_address());
                println!("   Log level   : {}", config.logging.level);
                println!("   Log format  : {}", config.logging.format);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Configuration is invalid: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e @ ConfigError::Io { .. }) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
        Some(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
    }
    if let Some(level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
