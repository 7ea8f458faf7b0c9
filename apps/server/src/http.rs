//! HTTP server for the status page and manual test alerts.

use crate::scanner::SCAN_INTERVAL_MINUTES;
use crate::state::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use radar_alerts::Notifier;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// State handed to the HTTP handlers.
pub struct HttpState {
    pub app: SharedState,
    pub notifier: Arc<Notifier>,
}

/// Create the HTTP router.
pub fn create_router(state: Arc<HttpState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status_handler))
        .route("/test", get(test_alert_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> &'static str {
    "OK"
}

/// Human-readable status page with a link to fire a test alert.
async fn status_handler(State(state): State<Arc<HttpState>>) -> Html<String> {
    let summary = state.app.stats_summary();
    let last_scan = match state.app.last_scan().await {
        Some(scan) => format!(
            "Last scan at {}: inflow avg {:.2} BTC, old coin volume {:.2} BTC",
            scan.at.format("%Y-%m-%d %H:%M:%S UTC"),
            scan.reading.average_inflow,
            scan.reading.old_coin_volume
        ),
        None => "No scan completed yet".to_string(),
    };

    Html(format!(
        "<html><head><title>Whale Radar</title></head><body>\
         <h1>Radar is Active and Scanning... 📡</h1>\
         <p>Scanning every {interval} minutes.</p>\
         <p>Uptime: {uptime}s | Scans: {scans} completed, {failed} failed | Alerts sent: {alerts}</p>\
         <p>{last_scan}</p>\
         <p><a href=\"/test\">Send a test alert</a></p>\
         </body></html>",
        interval = SCAN_INTERVAL_MINUTES,
        uptime = summary.uptime_secs,
        scans = summary.scans_completed,
        failed = summary.scans_failed,
        alerts = summary.alerts_sent,
        last_scan = last_scan,
    ))
}

/// Fire a test alert to the configured chat and report the outcome.
async fn test_alert_handler(State(state): State<Arc<HttpState>>) -> (StatusCode, Html<String>) {
    info!("Manual test alert requested");

    match state.notifier.send_test().await {
        Ok(()) => (
            StatusCode::OK,
            Html(
                "<html><body><h1>Test alert sent ✅</h1>\
                 <p><a href=\"/\">Back to status</a></p></body></html>"
                    .to_string(),
            ),
        ),
        Err(e) => {
            error!("Test alert failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Html(format!(
                    "<html><body><h1>Test alert failed ❌</h1>\
                     <p>{}</p><p><a href=\"/\">Back to status</a></p></body></html>",
                    e
                )),
            )
        }
    }
}

/// Start the HTTP server in the background.
pub async fn start_http_server(
    app: SharedState,
    notifier: Arc<Notifier>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(HttpState { app, notifier });
    let router = create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    Ok(())
}
