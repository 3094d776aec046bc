//! Display refresh background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

use crate::state::{AppState, DisplaySnapshot, TimerPhase};

/// Background task that polls the engine while it runs and publishes the
/// formatted time for the overlay.
///
/// Idle and paused phases are rendered once on the phase change and not
/// polled again until the next change.
pub async fn display_ticker_task(state: Arc<AppState>) {
    info!(
        "Starting display ticker task ({}ms cadence)",
        state.tick_interval.as_millis()
    );

    let mut phase_rx = state.phase_change_tx.subscribe();
    render(&state);

    loop {
        // Wait for a phase change notification
        match phase_rx.recv().await {
            Ok(TimerPhase::Running) => {
                debug!("Timer running, starting display refresh");
                let mut interval = tokio::time::interval(state.tick_interval);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            render(&state);
                        }

                        changed = phase_rx.recv() => {
                            match changed {
                                Ok(TimerPhase::Running) => {
                                    // Manual time or a redundant start while running
                                    render(&state);
                                }
                                Ok(phase) => {
                                    debug!("Timer left running ({:?}), stopping display refresh", phase);
                                    render(&state);
                                    break;
                                }
                                Err(RecvError::Lagged(skipped)) => {
                                    debug!("Display ticker lagged by {} notifications", skipped);
                                }
                                Err(RecvError::Closed) => {
                                    info!("Phase channel closed, stopping display ticker");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
            Ok(phase) => {
                debug!("Rendering {:?} phase", phase);
                render(&state);
            }
            Err(RecvError::Lagged(skipped)) => {
                debug!("Display ticker lagged by {} notifications", skipped);
                render(&state);
            }
            Err(RecvError::Closed) => {
                info!("Phase channel closed, stopping display ticker");
                return;
            }
        }
    }
}

/// Poll the engine once and publish the result
fn render(state: &AppState) {
    match state.timer_snapshot() {
        Ok(snapshot) => state.publish_display(DisplaySnapshot {
            text: snapshot.elapsed,
            phase: snapshot.phase,
        }),
        Err(e) => {
            error!("Failed to read timer for display: {}", e);
        }
    }
}
