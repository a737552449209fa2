use serde::{Deserialize, Serialize};

use crate::stage::{Element, TextMeasure};

/// Used when the element has no resolvable font size
pub const FALLBACK_FONT_PX: f32 = 96.0;
pub const SEARCH_ITERATIONS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofitOptions {
    pub min_px: f32,
    /// Share of the container width the text may occupy
    pub fraction: f32,
}

impl Default for AutofitOptions {
    fn default() -> Self {
        Self {
            min_px: 24.0,
            fraction: 0.98,
        }
    }
}

/// Shrink `el`'s font size until its text fits on one line in its container.
///
/// Starts from the size currently in effect and never grows it. Leaves
/// the size alone if the text already fits; otherwise binary-searches
/// between `min_px` and that size and keeps the largest fitting size
/// (floored, never below `min_px`). Returns the size now in effect, or
/// `None` when there is no element or no container to fit into.
pub fn autofit(el: Option<&Element>, measure: &dyn TextMeasure, options: AutofitOptions) -> Option<f32> {
    let el = el?;
    let container = el.container_width()?;

    el.set_no_wrap(true);

    let text = el.text();
    let limit = container * options.fraction;
    let fits = |px: f32| measure.text_width(&text, px) <= limit;

    let current = el
        .font_px()
        .filter(|px| px.is_finite() && *px > 0.0)
        .unwrap_or(FALLBACK_FONT_PX);

    el.set_font_px(current);
    if fits(current) {
        return Some(current);
    }

    let (mut lo, mut hi) = (options.min_px, current);
    for _ in 0..SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let resolved = lo.floor().max(options.min_px);
    el.set_font_px(resolved);
    Some(resolved)
}
