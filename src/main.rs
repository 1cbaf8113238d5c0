//! Countdown Recur - serve a recurring weekly countdown timer
//!
//! This is the main entry point for the countdown-recur application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_recur::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::CountdownTicker,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_recur={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-recur server v{}", env!("CARGO_PKG_VERSION"));

    // Reject malformed recurrence input before anything starts ticking
    let settings = config.settings()?;
    info!(
        "Recurrence: every {} at {} from {} for {} weeks ({})",
        settings.recurrence.target_weekday,
        settings.recurrence.target_time,
        settings.recurrence.anchor_date,
        settings.recurrence.horizon_weeks,
        settings.timezone
    );

    let state = Arc::new(AppState::new(settings, config.port, config.host.clone()));

    // A frozen clock never changes the countdown, so only tick in live mode
    let ticker = if state.is_frozen() {
        info!("Debug mode enabled, countdown will not refresh");
        None
    } else {
        Some(CountdownTicker::start(Arc::clone(&state)))
    };

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /countdown  - Countdown HTML fragment");
    info!("  GET  /status     - Countdown state as JSON");
    info!("  GET  /health     - Health check");

    let server = axum::serve(listener, app);
    let shutdown = async {
        match shutdown_signal().await {
            Ok(_) => info!("Shutdown signal received"),
            Err(e) => {
                // Without signal handling the server runs until the process is killed
                tracing::error!("Failed to listen for shutdown signals: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown => {}
    }

    if let Some(ticker) = ticker {
        ticker.stop().await;
    }

    info!("Server shutdown complete");
    Ok(())
}
