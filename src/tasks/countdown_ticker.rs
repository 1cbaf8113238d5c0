//! Once-per-second countdown refresh task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the running refresh task.
///
/// The owner decides when ticking stops. Dropping the handle aborts the task.
pub struct CountdownTicker {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Spawn the refresh task on the current tokio runtime
    pub fn start(state: Arc<AppState>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(countdown_tick_task(state, shutdown_rx));

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Check if the task is still ticking
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop ticking and wait for the task to finish its current tick
    pub async fn stop(mut self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("Countdown ticker already finished");
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Countdown ticker ended abnormally: {}", e);
            }
        }
        info!("Countdown ticker stopped");
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Background task that recomputes the countdown every second until stopped
/// or until the recurrence horizon is exhausted
async fn countdown_tick_task(state: Arc<AppState>, mut shutdown_rx: watch::Receiver<bool>) {
    info!("Starting countdown ticker");

    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match state.refresh() {
                    Ok(snapshot) if snapshot.is_exhausted() => {
                        info!("No occurrences left in the recurrence horizon, countdown has ended");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Failed to refresh countdown: {}", e);
                    }
                }
            }

            _ = shutdown_rx.changed() => {
                debug!("Countdown ticker received stop request");
                break;
            }
        }
    }
}
