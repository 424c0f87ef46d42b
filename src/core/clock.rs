use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const MIN_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Periodic instant source with a Stopped -> Running -> Stopped
/// lifecycle. Captures one instant immediately on start so the first
/// observation is never empty, then ticks at the requested interval.
/// The interval handle is owned here; `start`, `refresh` and `stop` are
/// the only mutators.
pub struct LiveClock {
    tx: watch::Sender<DateTime<Utc>>,
    rx: watch::Receiver<DateTime<Utc>>,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl LiveClock {
    /// Start ticking. Intervals tighter than [`MIN_INTERVAL`] are refused
    /// and replaced with [`DEFAULT_INTERVAL`], with a warning.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime; the tick loop runs as
    /// a spawned task.
    pub fn start(interval: Duration) -> Self {
        let interval = if interval < MIN_INTERVAL {
            tracing::warn!(
                "clock interval {:?} is below the {:?} minimum, using {:?}",
                interval,
                MIN_INTERVAL,
                DEFAULT_INTERVAL
            );
            DEFAULT_INTERVAL
        } else {
            interval
        };

        let (tx, rx) = watch::channel(Utc::now());
        let tick_tx = tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; the initial
            // instant was already captured at channel creation.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tick_tx.send(Utc::now()).is_err() {
                    break;
                }
            }
        });

        Self {
            tx,
            rx,
            interval,
            task: Some(task),
        }
    }

    /// The effective tick interval after validation.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Latest captured instant.
    pub fn current(&self) -> DateTime<Utc> {
        *self.rx.borrow()
    }

    /// Receiver that observes every tick and refresh.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.rx.clone()
    }

    /// Capture a fresh instant outside the schedule, for explicit re-sync.
    pub fn refresh(&self) {
        let _ = self.tx.send(Utc::now());
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Cancel the scheduled recapture. No tick is observed after this
    /// returns.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LiveClock {
    fn drop(&mut self) {
        self.stop();
    }
}
