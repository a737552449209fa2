use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// The one suspension point of the show: completes no earlier than `ms`
/// milliseconds from now.
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Completes no earlier than `ms` milliseconds after `origin`.
///
/// Cues use this so their offsets stay relative to the trigger, not to
/// whenever the spawning chain got around to them.
pub async fn sleep_from(origin: Instant, ms: u64) {
    let offset = Duration::from_millis(ms);
    match origin.checked_add(offset) {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        // tokio saturates an unreachable deadline to its far future
        None => tokio::time::sleep(offset).await,
    }
}

/// A set of independently running chains that can be torn down together.
///
/// Chains never wait on each other; cancelling aborts each at its next
/// suspension point. Spawning on a cancelled group is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TaskGroup {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
    cancelled: Arc<AtomicBool>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, chain: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            return;
        }

        let handle = tokio::spawn(chain);
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Abort every chain still running
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        for handle in handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Number of chains that have not finished yet
    pub fn active(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_never_resolves_early() {
        for ms in [0u64, 1, 55, 800, 11_200] {
            let start = Instant::now();
            sleep_ms(ms).await;
            assert!(start.elapsed() >= Duration::from_millis(ms));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_from_is_relative_to_origin() {
        let origin = Instant::now();
        sleep_ms(300).await;
        sleep_from(origin, 1000).await;
        assert!(origin.elapsed() >= Duration::from_millis(1000));
        assert!(origin.elapsed() < Duration::from_millis(1005));

        // An origin already far enough in the past resolves at once
        let before = Instant::now();
        sleep_from(origin, 10).await;
        assert!(before.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_from_unreachable_offset_never_fires() {
        let waited = tokio::time::timeout(
            Duration::from_secs(3600),
            sleep_from(Instant::now(), u64::MAX),
        )
        .await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_chains_at_next_suspension() {
        let group = TaskGroup::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        group.spawn(async move {
            loop {
                counter.fetch_add(1, Ordering::SeqCst);
                sleep_ms(100).await;
            }
        });

        sleep_ms(250).await;
        group.cancel();
        let seen = ticks.load(Ordering::SeqCst);
        sleep_ms(1000).await;

        assert_eq!(ticks.load(Ordering::SeqCst), seen);
        assert!(group.is_cancelled());
        assert_eq!(group.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_after_cancel_is_ignored() {
        let group = TaskGroup::new();
        group.cancel();

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        group.spawn(async move { flag.store(true, Ordering::SeqCst) });
        sleep_ms(10).await;

        assert!(!ran.load(Ordering::SeqCst));
    }
}
