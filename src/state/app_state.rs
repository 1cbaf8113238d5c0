//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::CountdownSettings,
    countdown::{Clock, CountdownSnapshot, DeadlineCalculator, FrozenClock, SystemClock},
};

/// Main application state: immutable settings plus the latest countdown snapshot
pub struct AppState {
    /// Validated configuration, written once at startup
    pub settings: Arc<CountdownSettings>,
    pub calculator: DeadlineCalculator,
    clock: Arc<dyn Clock>,
    /// Latest recomputed countdown
    snapshot: Arc<Mutex<CountdownSnapshot>>,
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<CountdownSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<CountdownSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create the state with the clock the settings ask for.
    ///
    /// In debug mode "now" is captured here once and never advances.
    pub fn new(settings: CountdownSettings, port: u16, host: String) -> Self {
        let system = SystemClock::new(settings.timezone);
        let clock: Arc<dyn Clock> = if settings.debug {
            let frozen = FrozenClock::capture(&system);
            info!("Debug mode: freezing current time at {}", frozen.now());
            Arc::new(frozen)
        } else {
            Arc::new(system)
        };

        Self::with_clock(settings, clock, port, host)
    }

    /// Create the state with an explicit clock
    pub fn with_clock(
        settings: CountdownSettings,
        clock: Arc<dyn Clock>,
        port: u16,
        host: String,
    ) -> Self {
        let calculator = DeadlineCalculator::new(settings.recurrence.clone())
            .rolling_past_same_day(clock.is_frozen());
        let initial = calculator.recompute(clock.now());
        info!(
            "Initial countdown: state={}, deadline={:?}, remaining={}",
            initial.state.as_str(),
            initial.deadline,
            initial.time_remaining
        );

        let (snapshot_tx, snapshot_rx) = watch::channel(initial.clone());

        Self {
            settings: Arc::new(settings),
            calculator,
            clock,
            snapshot: Arc::new(Mutex::new(initial)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Whether "now" is frozen
    pub fn is_frozen(&self) -> bool {
        self.clock.is_frozen()
    }

    /// Recompute the countdown at the clock's current time and publish it
    pub fn refresh(&self) -> Result<CountdownSnapshot, String> {
        let next = self.calculator.recompute(self.clock.now());

        let mut snapshot = self.snapshot.lock()
            .map_err(|e| format!("Failed to lock countdown snapshot: {}", e))?;

        if snapshot.state != next.state {
            info!("Countdown state changed: {} -> {}", snapshot.state.as_str(), next.state.as_str());
        }
        if snapshot.deadline != next.deadline {
            info!("Next deadline is now {:?}", next.deadline);
        }

        *snapshot = next.clone();
        drop(snapshot); // Release the lock early

        debug!("Countdown refreshed: {}", next.time_remaining);

        // Notify snapshot watchers
        if let Err(e) = self.snapshot_tx.send(next.clone()) {
            warn!("Failed to send countdown update: {}", e);
        }

        Ok(next)
    }

    /// Get the latest countdown snapshot
    pub fn get_snapshot(&self) -> Result<CountdownSnapshot, String> {
        self.snapshot.lock()
            .map(|snapshot| snapshot.clone())
            .map_err(|e| format!("Failed to lock countdown snapshot: {}", e))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
