use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Clear, Widget},
};

use super::style::{element_style, FLAKE, ROCK, SKY, SNOWCAP};
use crate::stage::{tag, Element};

const SKIER: [&str; 3] = ["  _o", " /\\/", "_/\\__"];
const PEAKS: [(f32, f32); 4] = [(0.12, 0.55), (0.38, 0.85), (0.66, 0.6), (0.9, 0.75)];

/// Cheap deterministic scatter so flakes keep their lanes between frames
fn scatter(i: u64) -> u64 {
    i.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
        >> 33
}

pub fn render_sky(bg: &Element, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    let Some(style) = element_style(bg, Style::default().bg(SKY), rng) else { return };
    buf.set_style(area, style);

    // Mountains fill the lower half; each column takes the tallest ridge over it
    let band = area.height / 2;
    if band == 0 || area.width == 0 {
        return;
    }
    for x in 0..area.width {
        let u = x as f32 / area.width as f32;
        let height = PEAKS
            .iter()
            .map(|(at, peak)| peak - (u - at).abs() * 2.2)
            .fold(0.0f32, f32::max);
        let cells = (height * band as f32).round() as u16;
        for dy in 0..cells.min(band) {
            let y = area.bottom() - 1 - dy;
            let (symbol, fg) = if dy + 1 == cells { ("▲", SNOWCAP) } else { ("█", ROCK) };
            buf[(area.x + x, y)].set_symbol(symbol).set_style(style.fg(fg));
        }
    }
}

/// Flakes drift down only while the snow layer carries `run`
pub fn render_snow(snow: &Element, frame: u64, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    let Some(style) = element_style(snow, Style::default().fg(FLAKE), rng) else { return };
    if area.width == 0 || area.height == 0 {
        return;
    }

    let running = snow.has_tag(tag::RUN);
    let flakes = (area.width as u64 * area.height as u64) / 24;
    for i in 0..flakes {
        let lane = scatter(i) % area.width as u64;
        let speed = 2 + scatter(i ^ 0xA5) % 4;
        let fall = if running { frame / speed } else { 0 };
        let row = (scatter(i + 7) + fall) % area.height as u64;
        let drift = if running { (frame / 9 + i) % 3 } else { 1 };
        let x = area.x + ((lane + drift) % area.width as u64) as u16;
        let y = area.y + row as u16;
        let symbol = if i % 5 == 0 { "*" } else { "·" };
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}

/// The skier crosses the slope; `progress` only advances while not paused
pub fn render_skier(skier: &Element, progress: u64, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    let Some(style) = element_style(skier, Style::default().fg(SNOWCAP), rng) else { return };
    let sprite_width = SKIER.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    if area.height < SKIER.len() as u16 || area.width <= sprite_width {
        return;
    }

    let lane = (area.width + sprite_width) as u64;
    let x = (progress / 2 % lane) as i32 - sprite_width as i32;
    let top = area.bottom() - SKIER.len() as u16 - area.height / 8;

    for (row, line) in SKIER.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let cx = x + col as i32;
            if ch == ' ' || cx < 0 || cx >= area.width as i32 {
                continue;
            }
            let cell = &mut buf[(area.x + cx as u16, top + row as u16)];
            cell.set_char(ch).set_style(style);
        }
    }
}

/// The blackout hides everything drawn before it
pub fn render_blackout(blackout: &Element, area: Rect, buf: &mut Buffer) {
    if blackout.has_tag(tag::VISIBLE) {
        Clear.render(area, buf);
        buf.set_style(area, Style::default().bg(ratatui::style::Color::Black));
    }
}
