//! Cancellable periodic callbacks for cosmetic UI timers.
//!
//! A [`Ticker`] belongs to the view that created it. Dropping it, or calling
//! [`Ticker::stop`], ends the task; no callback runs after `stop` returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct Ticker {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Run `on_tick` every `period`, starting one period from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => on_tick(),
                }
            }
        });
        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Stop without waiting; used from synchronous teardown paths.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Seconds as `HH:MM:SS`; hours keep growing past 99.
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Mission duration counter advanced by a ticker.
#[derive(Debug, Clone)]
pub struct MissionClock {
    elapsed: Arc<AtomicU64>,
}

impl MissionClock {
    pub fn new(start_secs: u64) -> Self {
        Self {
            elapsed: Arc::new(AtomicU64::new(start_secs)),
        }
    }

    pub fn advance(&self) {
        self.elapsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    pub fn formatted(&self) -> String {
        format_hms(self.seconds())
    }

    /// Start a ticker that advances this clock once per `period`.
    pub fn start(&self, period: Duration) -> Ticker {
        let clock = self.clone();
        Ticker::spawn(period, move || clock.advance())
    }
}

/// Wall-clock time for the header, refreshed by a ticker.
#[derive(Debug, Clone)]
pub struct HeaderClock {
    now: Arc<RwLock<DateTime<Local>>>,
}

impl Default for HeaderClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(RwLock::new(Local::now())),
        }
    }

    pub fn refresh(&self) {
        if let Ok(mut now) = self.now.write() {
            *now = Local::now();
        }
    }

    /// 24-hour `HH:MM:SS`.
    pub fn formatted(&self) -> String {
        match self.now.read() {
            Ok(now) => now.format("%H:%M:%S").to_string(),
            Err(_) => "--:--:--".to_string(),
        }
    }

    pub fn start(&self, period: Duration) -> Ticker {
        let clock = self.clone();
        Ticker::spawn(period, move || clock.refresh())
    }
}
