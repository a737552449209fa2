use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::delay::sleep_ms;
use super::neon::{neon_blink, BlinkTiming};
use crate::log_debug;
use crate::stage::{tag, Element};

/// Shown when the loop is given nothing to display
pub const DEFAULT_FLASH_TEXT: &str = "ALTITUDE";

/// Inclusive-exclusive millisecond range a random duration is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeMs {
    pub min: u64,
    pub max: u64,
}

impl RangeMs {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }
}

/// Random timing ranges for one flash cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashTiming {
    pub in_ms: RangeMs,
    pub hold_ms: RangeMs,
    pub out_ms: RangeMs,
    pub pause_ms: RangeMs,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            in_ms: RangeMs::new(700, 1200),
            hold_ms: RangeMs::new(150, 550),
            out_ms: RangeMs::new(500, 1000),
            pause_ms: RangeMs::new(300, 800),
        }
    }
}

impl FlashTiming {
    /// Draw one cycle: the blink and the pause after it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (BlinkTiming, u64) {
        let blink = BlinkTiming::new(
            self.in_ms.sample(rng),
            self.hold_ms.sample(rng),
            self.out_ms.sample(rng),
            true,
        );
        (blink, self.pause_ms.sample(rng))
    }

    /// Upper bound on one cycle's length
    pub fn max_cycle_ms(&self) -> u64 {
        self.in_ms.max + self.hold_ms.max + self.out_ms.max + self.pause_ms.max
    }
}

/// Handle to a running flash loop.
///
/// Stopping is cooperative: the loop finishes its current blink and pause,
/// then exits before starting another cycle.
#[derive(Debug)]
pub struct FlashLoop {
    running: Arc<AtomicBool>,
    cycles: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl FlashLoop {
    /// Start cycling `texts` round-robin on `el` with randomized neon blinks.
    ///
    /// Must be called from within a tokio runtime. A missing element yields
    /// a loop that is already finished.
    pub fn start<R>(el: Option<Element>, texts: Vec<String>, timing: FlashTiming, mut rng: R) -> Self
    where
        R: Rng + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let cycles = Arc::new(AtomicU64::new(0));

        let texts = if texts.is_empty() {
            vec![DEFAULT_FLASH_TEXT.to_string()]
        } else {
            texts
        };

        let flag = running.clone();
        let counter = cycles.clone();
        let task = tokio::spawn(async move {
            let Some(el) = el else {
                flag.store(false, Ordering::SeqCst);
                return;
            };

            el.add_tag(tag::NEON_BASE);
            let mut index = 0usize;

            while flag.load(Ordering::SeqCst) {
                el.set_text(texts[index % texts.len()].clone());
                index += 1;
                counter.fetch_add(1, Ordering::SeqCst);

                let (blink, pause) = timing.sample(&mut rng);
                neon_blink(Some(&el), blink).await;
                sleep_ms(pause).await;
            }

            log_debug!("flash loop on {} exited after {} cycles", el.id(), index);
        });

        Self { running, cycles, task }
    }

    /// Ask the loop to exit after its current cycle
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// True until a stop was requested or the loop exited
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !self.task.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cycles started so far
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Tear the loop down at once instead of waiting for the cycle to end
    pub fn abort(&self) {
        self.stop();
        self.task.abort();
    }

    /// Wait for the loop to exit
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::time::{Duration, Instant};

    #[test]
    fn test_range_sample_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RangeMs::new(300, 800);
        for _ in 0..1000 {
            let v = range.sample(&mut rng);
            assert!((300..800).contains(&v));
        }
        assert_eq!(RangeMs::new(5, 5).sample(&mut rng), 5);
        assert_eq!(RangeMs::new(9, 2).sample(&mut rng), 9);
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let timing = FlashTiming::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<_> = (0..20).map(|_| timing.sample(&mut a)).collect();
        let second: Vec<_> = (0..20).map(|_| timing.sample(&mut b)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|(blink, _)| blink.out));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_cycles_texts_round_robin() {
        let el = Element::new("altitude-flash");
        let texts = vec!["ALTITUDE".to_string(), "SAT · DEC 5".to_string()];
        let timing = FlashTiming::default();
        let flash = FlashLoop::start(Some(el.clone()), texts, timing, StdRng::seed_from_u64(1));

        let mut seen = Vec::new();
        for _ in 0..4 {
            let before = flash.cycles();
            while flash.cycles() == before {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            seen.push(el.text());
        }

        assert_eq!(seen, vec!["ALTITUDE", "SAT · DEC 5", "ALTITUDE", "SAT · DEC 5"]);
        assert!(el.has_tag(tag::NEON_BASE));
        assert!(flash.is_running());
        flash.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_texts_fall_back_to_default() {
        let el = Element::new("altitude-flash");
        let flash = FlashLoop::start(Some(el.clone()), Vec::new(), FlashTiming::default(), StdRng::seed_from_u64(3));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(el.text(), DEFAULT_FLASH_TEXT);
        flash.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_within_one_cycle() {
        let el = Element::new("altitude-flash");
        let timing = FlashTiming::default();
        let flash = FlashLoop::start(Some(el.clone()), vec!["A".into()], timing, StdRng::seed_from_u64(9));

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        let started = flash.cycles();
        let requested = Instant::now();
        flash.stop();
        assert!(!flash.is_running());

        let cycles = flash.cycles.clone();
        flash.join().await;
        assert!(requested.elapsed() <= Duration::from_millis(timing.max_cycle_ms()));
        assert_eq!(cycles.load(Ordering::SeqCst), started);
        // The in-flight blink still finished cleanly
        assert!(el.is_hidden());
        assert_eq!(el.opacity(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_element_finishes_at_once() {
        let flash = FlashLoop::start(None, vec!["A".into()], FlashTiming::default(), StdRng::seed_from_u64(0));
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(flash.is_finished());
        assert!(!flash.is_running());
    }
}
