//! Periodic refresh tasks
//!
//! Each poller is a tokio task that sends [`Message::PollTick`] into the
//! message channel at a fixed interval. At most one task runs per
//! [`PollerKind`]: starting a poller always aborts the previous one first.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::message::Message;

/// Which panel a poller refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollerKind {
    Files,
    Logs,
}

impl fmt::Display for PollerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollerKind::Files => write!(f, "files"),
            PollerKind::Logs => write!(f, "logs"),
        }
    }
}

/// Owner of the running poller tasks
pub struct Pollers {
    tx: mpsc::Sender<Message>,
    tasks: HashMap<PollerKind, JoinHandle<()>>,
}

impl Pollers {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
        }
    }

    /// Start (or restart) a poller. The first tick fires one `period` from now.
    pub fn start(&mut self, kind: PollerKind, period: Duration) {
        self.stop(kind);

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Message::PollTick(kind)).await.is_err() {
                    // Receiver dropped, app is shutting down
                    break;
                }
            }
        });

        debug!("Started {} poller every {:?}", kind, period);
        self.tasks.insert(kind, handle);
    }

    pub fn stop(&mut self, kind: PollerKind) {
        if let Some(handle) = self.tasks.remove(&kind) {
            handle.abort();
            debug!("Stopped {} poller", kind);
        }
    }

    pub fn is_running(&self, kind: PollerKind) -> bool {
        self.tasks
            .get(&kind)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    pub fn stop_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for Pollers {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn drain_ticks(rx: &mut mpsc::Receiver<Message>, kind: PollerKind) -> usize {
        let mut count = 0;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, Message::PollTick(k) if k == kind) {
                count += 1;
            }
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_after_each_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut pollers = Pollers::new(tx);

        pollers.start(PollerKind::Logs, Duration::from_secs(2));
        settle().await;
        assert_eq!(drain_ticks(&mut rx, PollerKind::Logs), 0);

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(drain_ticks(&mut rx, PollerKind::Logs), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(drain_ticks(&mut rx, PollerKind::Logs), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_a_single_task() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut pollers = Pollers::new(tx);

        pollers.start(PollerKind::Files, Duration::from_secs(5));
        pollers.start(PollerKind::Files, Duration::from_secs(5));
        pollers.start(PollerKind::Files, Duration::from_secs(5));
        assert_eq!(pollers.active_count(), 1);

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(drain_ticks(&mut rx, PollerKind::Files), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_silences_poller() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut pollers = Pollers::new(tx);

        pollers.start(PollerKind::Files, Duration::from_secs(5));
        pollers.start(PollerKind::Logs, Duration::from_secs(2));
        pollers.stop(PollerKind::Files);
        settle().await;

        assert!(!pollers.is_running(PollerKind::Files));
        assert!(pollers.is_running(PollerKind::Logs));

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(drain_ticks(&mut rx, PollerKind::Files), 0);

        pollers.stop_all();
        assert_eq!(pollers.active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_exits_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(16);
        let mut pollers = Pollers::new(tx);
        pollers.start(PollerKind::Logs, Duration::from_millis(500));
        drop(rx);

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;

        assert!(!pollers.is_running(PollerKind::Logs));
    }
}
