//! Letterbox daemon entry point
//!
//! Wires the WebSocket listener to the delivery queue and flushes queued
//! letters into an in-memory mailbox on a periodic checkpoint tick and on
//! shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info, warn};

use letterbox_cli::{AppConfig, MemoryMailbox, Result};
use letterbox_core::{decode, DeliveryQueue, Letter};
use letterbox_ws::WsListener;

/// Letterbox: deliver WebSocket letters to a mailbox
#[derive(Parser, Debug)]
#[command(name = "letterbox", version)]
struct Cli {
    /// Path to a letterbox.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// WebSocket endpoint URL, overriding the config file
    #[arg(long)]
    url: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut config = load_configuration(&cli)?;
    if let Some(url) = &cli.url {
        config.websocket.host = Some(url.clone());
    }

    // Fatal before any connection attempt if the host is missing
    let listener_config = config.listener_config()?;

    let mut listener = WsListener::new(listener_config)?;
    let mut frames = listener.connect_and_listen();
    info!("Connecting and listening...");

    let queue = Arc::new(DeliveryQueue::new());

    // Decode task: raw frames in, queued letters out
    let decode_queue = Arc::clone(&queue);
    tokio::spawn(async move {
        while let Some(raw) = frames.recv().await {
            debug!("Websocket message received: {}", raw);
            if let Some(envelope) = decode(&raw) {
                decode_queue.enqueue(Letter::from_envelope(&envelope));
            }
        }
    });

    let mut mailbox = MemoryMailbox::new();
    // interval panics on a zero period
    let flush_interval = Duration::from_secs(config.flush_interval_secs.max(1));
    let mut checkpoint = tokio::time::interval(flush_interval);

    // The mailbox is ready for the lifetime of the daemon; the host that
    // embeds these crates supplies its own readiness signal instead.
    loop {
        tokio::select! {
            _ = checkpoint.tick() => {
                if let Err(e) = queue.flush_if_ready(true, &mut mailbox) {
                    warn!("Flush failed, letters stay queued for retry: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                listener.dispose();
                if let Err(e) = queue.flush_if_ready(true, &mut mailbox) {
                    warn!("Final flush failed, {} letter(s) lost: {}", queue.len(), e);
                }
                break;
            }
        }
    }

    info!("Delivered {} letter(s) this run", mailbox.letters().len());
    Ok(())
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();
}

/// Load configuration from file or use defaults
fn load_configuration(cli: &Cli) -> Result<AppConfig> {
    if let Some(config_path) = &cli.config {
        info!("Loading configuration from: {}", config_path.display());
        AppConfig::load_from_file(config_path)
    } else {
        info!("Using default configuration");
        Ok(AppConfig::default())
    }
}
