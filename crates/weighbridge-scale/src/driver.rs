//! Tokio timers for the simulated scale
//!
//! The clock task and the change task each own one timer and lock the
//! shared scale only briefly; neither holds the lock across an await.

use std::sync::{Arc, Mutex};

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::simulated::SimulatedScale;

/// Running timer tasks; stop them with [`ScaleDriver::shutdown`]
pub struct ScaleDriver {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl ScaleDriver {
    /// Signal both timers to stop and wait for them
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!("scale timer task ended abnormally: {}", e);
            }
        }
    }
}

fn lock(scale: &Mutex<SimulatedScale>) -> std::sync::MutexGuard<'_, SimulatedScale> {
    scale.lock().unwrap_or_else(|e| e.into_inner())
}

/// Start the clock and change timers; must be called inside a tokio runtime
pub fn spawn_driver(scale: Arc<Mutex<SimulatedScale>>) -> ScaleDriver {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let settings = lock(&scale).settings().clone();

    let clock_task = {
        let scale = Arc::clone(&scale);
        let mut shutdown = shutdown_rx.clone();
        let period = settings.clock_interval();
        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => lock(&scale).tick_clock(Local::now()),
                    _ = shutdown.changed() => break,
                }
            }
        })
    };

    let change_task = {
        let scale = Arc::clone(&scale);
        let mut shutdown = shutdown_rx;
        let period = settings.change_interval();
        let settle_delay = settings.settle_delay();
        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; loads start one period in
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = shutdown.changed() => break,
                }
                if lock(&scale).begin_change().is_none() {
                    continue;
                }
                tokio::select! {
                    _ = time::sleep(settle_delay) => {
                        lock(&scale).settle();
                    }
                    _ = shutdown.changed() => break,
                }
            }
            debug!("scale change timer stopped");
        })
    };

    ScaleDriver {
        shutdown_tx,
        handles: vec![clock_task, change_task],
    }
}
