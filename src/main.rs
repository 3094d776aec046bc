//! Neko Stopwatch - a chroma-keyable stopwatch overlay
//!
//! This is the main entry point for the neko-stopwatch server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use neko_stopwatch::{
    api::create_router,
    config::Config,
    settings::SettingsStore,
    state::AppState,
    tasks::display_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("neko_stopwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting neko-stopwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, settings={}, tick={}ms",
          config.host, config.port, config.settings.display(), config.tick_ms);

    // Load appearance settings, creating the file on first run
    let settings = SettingsStore::open(&config.settings);
    info!("Appearance: {:?}", settings.record());

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        settings,
        config.tick_interval(),
    ));

    // Start the display refresh background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start               - Start or resume the timer");
    info!("  POST /pause               - Pause the timer");
    info!("  POST /reset               - Stop and zero the timer");
    info!("  POST /manual-time         - Set a manual starting time");
    info!("  POST /validate            - Validate one manual time field");
    info!("  GET  /elapsed             - Poll the elapsed time");
    info!("  GET  /display             - Latest rendered display value");
    info!("  GET  /status              - Timer, validation and settings status");
    info!("  GET  /settings            - Appearance settings");
    info!("  PUT  /settings/{{font,font-size,text-color,bg-color}}");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
