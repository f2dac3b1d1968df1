//! Webhook receiver binary.
//!
//! ```text
//! CLI args → config file (optional) → overrides → validation
//!     → logging → WebhookServer::run until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use webhook_receiver::config::{load_config, validate_config, ConfigError, ReceiverConfig};
use webhook_receiver::lifecycle::{signals, Shutdown};
use webhook_receiver::observability::init_logging;
use webhook_receiver::pipeline::Unconfigured;
use webhook_receiver::WebhookServer;

#[derive(Parser)]
#[command(name = "webhook-receiver")]
#[command(about = "Receive source-control webhooks and record their payloads", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (host:port), overrides the config file
    #[arg(short, long)]
    listen: Option<String>,

    /// TLS certificate chain (PEM)
    #[arg(long)]
    tls_cert: Option<PathBuf>,

    /// TLS private key (PEM)
    #[arg(long)]
    tls_key: Option<PathBuf>,

    /// Log filter directive, e.g. "webhook_receiver=debug"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ReceiverConfig) {
        if let Some(listen) = self.listen {
            config.server.listen_address = listen;
        }
        if let Some(cert) = self.tls_cert {
            config.server.tls_cert = Some(cert);
        }
        if let Some(key) = self.tls_key {
            config.server.tls_key = Some(key);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReceiverConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_address = %config.server.listen_address,
        tls = config.server.tls_paths().is_some(),
        "webhook-receiver starting"
    );

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        signals::trigger_on_signal(&shutdown).await;
    });

    let server = WebhookServer::new(
        config.server,
        Arc::new(Unconfigured),
        Arc::new(Unconfigured),
    );
    if let Err(e) = server.run(signal).await {
        eprintln!("webhook-receiver: {e}");
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
