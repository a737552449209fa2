//! Linear ramps: media volume and element opacity
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::stage::Element;
use crate::util::audio::MediaChannel;

pub const FADE_IN_STEPS: u32 = 100;
pub const FADE_OUT_STEPS: u32 = 24;
pub const OPACITY_STEPS: u32 = 10;
const EPSILON: f32 = 0.001;

/// Volume or opacity pinned into [0, 1]; anything non-finite reads as 0
fn unit(level: f32) -> f32 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn tick_period(ms: u64, steps: u32) -> Duration {
    Duration::from_micros(ms * 1000 / steps as u64).max(Duration::from_micros(1))
}

/// Ramp volume linearly up to `target` over roughly `ms`.
///
/// Starts from the current volume clamped into [0, target]; a channel
/// already at the target resolves at once.
pub async fn fade_in(channel: &dyn MediaChannel, target: f32, ms: u64) {
    let target = unit(target);
    let start = unit(channel.volume()).min(target);
    channel.set_volume(start);

    if start >= target - EPSILON || ms == 0 {
        channel.set_volume(target);
        return;
    }

    let step = target / FADE_IN_STEPS as f32;
    let period = tick_period(ms, FADE_IN_STEPS);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut volume = start;
    loop {
        ticker.tick().await;
        volume = (volume + step).min(target);
        if volume >= target - EPSILON {
            channel.set_volume(target);
            return;
        }
        channel.set_volume(volume);
    }
}

/// Ramp volume linearly from its current value down to zero over roughly `ms`.
pub async fn fade_out(channel: &dyn MediaChannel, ms: u64) {
    let start = channel.volume().max(0.0);

    if start <= EPSILON || ms == 0 {
        channel.set_volume(0.0);
        return;
    }

    let step = start / FADE_OUT_STEPS as f32;
    let period = tick_period(ms, FADE_OUT_STEPS);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut volume = start;
    loop {
        ticker.tick().await;
        volume = (volume - step).max(0.0);
        if volume <= EPSILON {
            channel.set_volume(0.0);
            return;
        }
        channel.set_volume(volume);
    }
}

/// Ramp an element's opacity to `target` over roughly `ms`
pub async fn fade_opacity(el: &Element, target: f32, ms: u64) {
    let target = unit(target);
    let start = el.opacity();

    if ms == 0 || (start - target).abs() <= EPSILON {
        el.set_opacity(target);
        return;
    }

    let period = tick_period(ms, OPACITY_STEPS);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for i in 1..OPACITY_STEPS {
        ticker.tick().await;
        el.set_opacity(start + (target - start) * i as f32 / OPACITY_STEPS as f32);
    }
    ticker.tick().await;
    el.set_opacity(target);
}
