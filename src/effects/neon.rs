//! Neon blink: the one visual idiom for "this glitches into/out of existence".
//!
//! The transition itself is a pure state machine ([`BlinkSession`]); the
//! async [`neon_blink`] walks it, applying each phase to an element and
//! sleeping for the phase's duration.

use serde::{Deserialize, Serialize};

use super::delay::sleep_ms;
use crate::stage::{tag, Element};

/// Phase durations of one blink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkTiming {
    pub in_ms: u64,
    pub hold_ms: u64,
    pub out_ms: u64,
    /// Run the flicker-out phase and end hidden; otherwise end steady-on
    pub out: bool,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            in_ms: 1100,
            hold_ms: 600,
            out_ms: 900,
            out: true,
        }
    }
}

impl BlinkTiming {
    pub fn new(in_ms: u64, hold_ms: u64, out_ms: u64, out: bool) -> Self {
        Self { in_ms, hold_ms, out_ms, out }
    }

    /// Flicker in and stay on
    pub fn reveal(in_ms: u64) -> Self {
        Self { in_ms, hold_ms: 0, out_ms: 0, out: false }
    }

    /// Wall time from start to the terminal state
    pub fn total_ms(&self) -> u64 {
        self.in_ms + self.hold_ms + if self.out { self.out_ms } else { 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Idle,
    FlickerIn,
    Hold,
    FlickerOut,
    SettledOn,
    SettledOff,
}

impl BlinkPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BlinkPhase::SettledOn | BlinkPhase::SettledOff)
    }
}

/// One invocation's walk through the blink phases.
#[derive(Debug, Clone)]
pub struct BlinkSession {
    timing: BlinkTiming,
    phase: BlinkPhase,
}

impl BlinkSession {
    pub fn new(timing: BlinkTiming) -> Self {
        Self { timing, phase: BlinkPhase::Idle }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Advance one phase. Returns the new phase and how long it lasts
    /// before the next call, or `None` once settled.
    pub fn advance(&mut self) -> Option<(BlinkPhase, u64)> {
        use BlinkPhase::*;

        let next = match self.phase {
            Idle => (FlickerIn, self.timing.in_ms),
            FlickerIn if self.timing.hold_ms > 0 => (Hold, self.timing.hold_ms),
            FlickerIn | Hold => {
                if self.timing.out {
                    (FlickerOut, self.timing.out_ms)
                } else {
                    (SettledOn, 0)
                }
            }
            FlickerOut => (SettledOff, 0),
            SettledOn | SettledOff => return None,
        };

        self.phase = next.0;
        Some(next)
    }
}

fn apply_phase(el: &Element, phase: BlinkPhase) {
    match phase {
        BlinkPhase::Idle | BlinkPhase::Hold => {}
        BlinkPhase::FlickerIn => {
            el.add_tag(tag::NEON_BASE);
            el.set_hidden(false);
            el.remove_tags(&[tag::NEON_IN, tag::NEON_OUT, tag::VISIBLE]);
            el.add_tag(tag::NEON_IN);
        }
        BlinkPhase::FlickerOut => {
            el.remove_tag(tag::NEON_IN);
            el.add_tag(tag::NEON_OUT);
        }
        BlinkPhase::SettledOff => {
            el.remove_tag(tag::NEON_OUT);
            el.set_opacity(0.0);
            el.set_hidden(true);
        }
        BlinkPhase::SettledOn => {
            el.remove_tag(tag::NEON_IN);
            el.set_opacity(1.0);
        }
    }
}

/// Flicker `el` in, optionally hold, then flicker out (or stay on).
///
/// Every call resets the transient tags first, so blinking an element
/// that is mid-blink or already settled restarts it cleanly. A missing
/// element completes immediately.
pub async fn neon_blink(el: Option<&Element>, timing: BlinkTiming) {
    let Some(el) = el else { return };

    let mut session = BlinkSession::new(timing);
    while let Some((phase, ms)) = session.advance() {
        apply_phase(el, phase);
        if ms > 0 {
            sleep_ms(ms).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, Instant};

    fn phases(timing: BlinkTiming) -> Vec<BlinkPhase> {
        let mut session = BlinkSession::new(timing);
        std::iter::from_fn(|| session.advance().map(|(p, _)| p)).collect()
    }

    #[test]
    fn test_full_blink_walks_every_phase() {
        use BlinkPhase::*;
        assert_eq!(
            phases(BlinkTiming::new(900, 400, 700, true)),
            vec![FlickerIn, Hold, FlickerOut, SettledOff]
        );
    }

    #[test]
    fn test_zero_hold_skips_hold() {
        use BlinkPhase::*;
        assert_eq!(phases(BlinkTiming::reveal(900)), vec![FlickerIn, SettledOn]);
        assert_eq!(
            phases(BlinkTiming::new(100, 0, 100, true)),
            vec![FlickerIn, FlickerOut, SettledOff]
        );
    }

    #[test]
    fn test_session_stops_after_terminal_phase() {
        let mut session = BlinkSession::new(BlinkTiming::reveal(10));
        while session.advance().is_some() {}
        assert!(session.phase().is_terminal());
        assert!(session.advance().is_none());
    }

    #[test]
    fn test_total_ms_ignores_out_when_not_fading() {
        assert_eq!(BlinkTiming::new(900, 400, 700, true).total_ms(), 2000);
        assert_eq!(BlinkTiming::new(900, 400, 700, false).total_ms(), 1300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_out_ends_hidden() {
        let el = Element::new("presents");
        neon_blink(Some(&el), BlinkTiming::new(1100, 500, 900, true)).await;

        assert_eq!(el.opacity(), 0.0);
        assert!(el.is_hidden());
        assert!(el.has_tag(tag::NEON_BASE));
        assert!(!el.has_tag(tag::NEON_IN));
        assert!(!el.has_tag(tag::NEON_OUT));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_in_only_ends_visible() {
        let el = Element::new("bg");
        neon_blink(Some(&el), BlinkTiming::reveal(900)).await;

        assert_eq!(el.opacity(), 1.0);
        assert!(!el.is_hidden());
        assert!(!el.has_tag(tag::NEON_IN));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_is_restartable() {
        for timing in [BlinkTiming::new(100, 50, 100, true), BlinkTiming::reveal(100)] {
            let el = Element::new("title");
            el.add_tag(tag::VISIBLE);
            neon_blink(Some(&el), timing).await;
            let first = el.snapshot();
            neon_blink(Some(&el), timing).await;
            assert_eq!(el.snapshot(), first);
            assert!(!el.has_tag(tag::VISIBLE));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_phases_are_observable_mid_flight() {
        let el = Element::new("date");
        let watcher = el.clone();
        let blink = tokio::spawn(async move {
            neon_blink(Some(&el), BlinkTiming::new(1000, 500, 1000, true)).await;
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(watcher.has_tag(tag::NEON_IN));
        assert!(!watcher.is_hidden());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(watcher.has_tag(tag::NEON_OUT));
        assert!(!watcher.has_tag(tag::NEON_IN));

        blink.await.unwrap();
        assert!(watcher.is_hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_takes_its_total_time() {
        let el = Element::new("guest");
        let timing = BlinkTiming::new(900, 400, 700, true);
        let start = Instant::now();
        neon_blink(Some(&el), timing).await;
        assert!(start.elapsed() >= Duration::from_millis(timing.total_ms()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_element_is_a_no_op() {
        let start = Instant::now();
        neon_blink(None, BlinkTiming::default()).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
