use serde::{Deserialize, Serialize};

use super::delay::sleep_ms;
use super::fader::fade_opacity;
use crate::stage::{tag, Element};

/// Characters appended per scheduling tick in multi-line runs
pub const CHARS_PER_TICK: usize = 2;
/// Pause between consecutive lines of a multi-line run
pub const LINE_PAUSE_MS: u64 = 250;

/// Timing of the single invitation line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineTiming {
    pub char_delay_ms: u64,
    /// Suspense hold once the whole line is shown
    pub hold_ms: u64,
    pub fade_ms: u64,
}

impl Default for LineTiming {
    fn default() -> Self {
        Self {
            char_delay_ms: 55,
            hold_ms: 2200,
            fade_ms: 800,
        }
    }
}

/// One line of a multi-line run, with an optional style tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedLine {
    pub text: String,
    #[serde(default)]
    pub tag: Option<String>,
}

impl TypedLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), tag: None }
    }

    pub fn tagged(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { text: text.into(), tag: Some(tag.into()) }
    }
}

/// Type a line into `el`, hold it, then fade it away.
///
/// The element's own text is typed when it has any, `fallback` otherwise.
/// Completes once the line is faded and marked aria-hidden.
pub async fn type_line(el: Option<&Element>, fallback: &str, timing: LineTiming) {
    let Some(el) = el else { return };

    let own = el.text();
    let full = match own.trim() {
        "" => fallback.to_string(),
        text => text.to_string(),
    };

    el.set_text("");
    el.remove_tags(&[tag::NEON_BASE, tag::NEON_IN, tag::NEON_OUT, tag::VISIBLE]);
    el.set_opacity(1.0);
    el.set_hidden(false);

    let mut buf = [0u8; 4];
    for ch in full.chars() {
        el.push_text(ch.encode_utf8(&mut buf));
        sleep_ms(timing.char_delay_ms).await;
    }

    sleep_ms(timing.hold_ms).await;

    fade_opacity(el, 0.0, timing.fade_ms).await;
    el.set_hidden(true);
}

/// Type `lines` one after another into fresh children of `parent`.
///
/// Each line gets its own child element, filled [`CHARS_PER_TICK`]
/// characters at a time so that `cps` characters land per second. A line
/// is complete before the next child exists. Empty lines still get a child.
pub async fn type_lines(parent: Option<&Element>, lines: &[TypedLine], cps: f32) {
    let Some(parent) = parent else { return };

    let cps = if cps.is_finite() && cps > 0.0 { cps } else { 1.0 };
    let tick_ms = (CHARS_PER_TICK as f32 * 1000.0 / cps).round() as u64;
    let parent_id = parent.id();

    parent.set_opacity(1.0);
    parent.set_hidden(false);

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            sleep_ms(LINE_PAUSE_MS).await;
        }

        let child = parent.append_child(format!("{}-line-{}", parent_id, i), line.tag.as_deref());
        let chars: Vec<char> = line.text.chars().collect();
        for chunk in chars.chunks(CHARS_PER_TICK) {
            child.push_text(&chunk.iter().collect::<String>());
            sleep_ms(tick_ms).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_type_line_types_then_fades() {
        let el = Element::new("intro-line");
        el.set_text("  Hi there ");
        el.add_tag(tag::NEON_IN);

        let watcher = el.clone();
        let run = tokio::spawn(async move {
            type_line(Some(&el), "fallback", LineTiming::default()).await;
        });

        // 3 chars in
        tokio::time::sleep(Duration::from_millis(55 * 3 - 1)).await;
        assert_eq!(watcher.text(), "Hi ");
        assert!(!watcher.has_tag(tag::NEON_IN));
        assert_eq!(watcher.opacity(), 1.0);
        assert!(!watcher.is_hidden());

        run.await.unwrap();
        assert_eq!(watcher.text(), "Hi there");
        assert_eq!(watcher.opacity(), 0.0);
        assert!(watcher.is_hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_line_uses_fallback_for_blank_element() {
        let el = Element::new("intro-line");
        let start = Instant::now();
        type_line(Some(&el), "Come ski", LineTiming { char_delay_ms: 10, hold_ms: 100, fade_ms: 50 }).await;
        assert_eq!(el.text(), "Come ski");
        assert!(start.elapsed() >= Duration::from_millis(8 * 10 + 100 + 50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_line_handles_multibyte_text() {
        let el = Element::new("intro-line");
        el.set_text("SAT · DEC 5");
        type_line(Some(&el), "", LineTiming { char_delay_ms: 1, hold_ms: 0, fade_ms: 0 }).await;
        assert_eq!(el.text(), "SAT · DEC 5");
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_line_completes_before_second_exists() {
        let info = Element::new("info");
        let watcher = info.clone();
        let lines = vec![TypedLine::new("AB"), TypedLine::tagged("C", "dim")];

        let run = tokio::spawn(async move {
            type_lines(Some(&info), &lines, 10.0).await;
        });

        let mut first_done_before_second = false;
        loop {
            let children = watcher.children();
            if children.len() == 1 && children[0].text() == "AB" {
                first_done_before_second = true;
            }
            if children.len() == 2 {
                assert_eq!(children[0].text(), "AB");
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(first_done_before_second);

        run.await.unwrap();
        let children = watcher.children();
        assert_eq!(children[1].text(), "C");
        assert!(children[1].has_tag("dim"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lines_are_batched_two_chars_per_tick() {
        let info = Element::new("info");
        let watcher = info.clone();
        let lines = vec![TypedLine::new("ABCDE")];

        // 10 cps -> one tick of two chars every 200ms
        let run = tokio::spawn(async move {
            type_lines(Some(&info), &lines, 10.0).await;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(watcher.children()[0].text(), "AB");
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(watcher.children()[0].text(), "ABCD");
        run.await.unwrap();
        assert_eq!(watcher.children()[0].text(), "ABCDE");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_line_still_gets_an_element() {
        let info = Element::new("info");
        type_lines(Some(&info), &[TypedLine::new(""), TypedLine::new("x")], 20.0).await;
        let children = info.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].text(), "");
        assert_eq!(children[0].id(), "info-line-0");
    }
}
