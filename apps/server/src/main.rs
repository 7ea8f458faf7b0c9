//! Whale Radar - Headless Server
//!
//! Watches Bitcoin exchange inflows and dormant coin movement via Bitquery,
//! and raises Telegram alerts when the readings cross the alert thresholds.

mod config;
mod http;
mod scanner;
mod state;

use clap::Parser;
use config::RadarConfig;
use radar_alerts::{Notifier, TelegramBot};
use radar_bitquery::BitqueryClient;
use radar_core::Thresholds;
use scanner::{Scanner, SCAN_INTERVAL_MINUTES};
use state::create_state;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Whale Radar CLI
#[derive(Parser, Debug)]
#[command(name = "whale-radar")]
#[command(about = "Bitcoin whale movement radar with Telegram alerts", long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    info!("📡 Whale Radar starting...");

    let config = match RadarConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return;
        }
    };

    info!("  Scan interval: {} minutes", SCAN_INTERVAL_MINUTES);
    info!("  HTTP port: {}", config.port);
    info!("  Alert chat: {}", config.chat_id);

    let client = match BitqueryClient::new(config.bitquery.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to build Bitquery client: {}", e);
            return;
        }
    };

    let bot = Arc::new(TelegramBot::new(&config.telegram_token));
    let notifier = Arc::new(Notifier::new(
        bot,
        config.chat_id.clone(),
        Thresholds::default(),
    ));

    // Create shared state
    let state = create_state();
    state.start();

    // Start HTTP server for the status page and manual test alerts
    if let Err(e) = http::start_http_server(state.clone(), notifier.clone(), config.port).await {
        tracing::error!("Failed to start HTTP server: {}", e);
        return;
    }

    // Spawn the scan loop
    let scanner_state = state.clone();
    let scan_handle = tokio::spawn(async move {
        Scanner::new(client, notifier, scanner_state).run().await;
    });

    // Handle shutdown
    info!("Press Ctrl+C to stop...");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    warn!("Shutdown signal received");
    state.stop();

    // Wait for the scan loop with timeout, then give up on it
    let _ = tokio::time::timeout(Duration::from_secs(2), scan_handle).await;

    // Final stats
    let summary = state.stats_summary();
    info!("📈 Final Stats:");
    info!("  Total uptime: {} seconds", summary.uptime_secs);
    info!("  Scans completed: {}", summary.scans_completed);
    info!("  Scans failed: {}", summary.scans_failed);
    info!("  Alerts sent: {}", summary.alerts_sent);

    info!("👋 Whale Radar stopped");
}
