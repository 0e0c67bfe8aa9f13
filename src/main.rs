//! Car fuel tracker server
//!
//! ```sh
//! # Run with default config (~/.config/carfuel/config.toml)
//! carfuel-server
//!
//! # Custom config path and port
//! carfuel-server --config /etc/carfuel/config.toml --port 9090
//!
//! # Validate config without starting
//! carfuel-server --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use carfuel::config::{default_config_path, AppConfig};
use carfuel::server::{init_tracing, ServerHandle, ServerOptions};

/// REST service for tracking refills and fuel consumption per car.
#[derive(Parser, Debug)]
#[command(
    name = "carfuel-server",
    version,
    about = "Car fuel consumption tracker",
    long_about = "REST API for registering cars, logging refills and computing \
                  fuel consumption statistics.\n\n\
                  Default config: ~/.config/carfuel/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CARFUEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref host) = self.host {
            info!("CLI override: host = {}", host);
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            info!("CLI override: port = {}", port);
            config.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            info!("CLI override: log_level = {}", level);
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply_overrides(&mut config);

    // Overrides go in first so --log-level reaches the subscriber.
    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if cli.check {
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        println!("   Metrics     : {}", config.metrics.enabled);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions { config }).await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
