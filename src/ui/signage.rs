use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use super::measure::letter_spaced;
use super::style::{element_style, ICE, NEON};
use crate::stage::{tag, Element};

fn centered_line(text: String, style: Style, y: u16, area: Rect, buf: &mut Buffer) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    let row = Rect { x: area.x, y, width: area.width, height: 1 };
    Paragraph::new(Line::from(text).style(style))
        .alignment(Alignment::Center)
        .render(row, buf);
}

/// A neon sign: letter-spaced at its resolved size, flickering mid-transition
pub fn render_neon(el: &Element, color: ratatui::style::Color, y: u16, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    let Some(style) = element_style(el, Style::default().fg(color), rng) else { return };
    let text = match el.font_px() {
        Some(px) => letter_spaced(&el.text(), px),
        None => el.text(),
    };
    centered_line(text, style, y, area, buf);
}

pub fn render_intro(el: &Element, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    let base = Style::default().fg(ICE).add_modifier(Modifier::ITALIC);
    let Some(style) = element_style(el, base, rng) else { return };
    centered_line(el.text(), style, area.y + area.height / 2, area, buf);
}

/// Title, date and guest stacked around the middle of the screen
pub fn render_wordmarks(container: &Element, marks: [Option<&Element>; 3], area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    if !container.has_tag(tag::VISIBLE) || container.is_hidden() {
        return;
    }
    let middle = area.y + area.height / 2;
    let rows = [middle.saturating_sub(3), middle, middle + 3];
    let colors = [NEON, ICE, ICE];

    for ((mark, y), color) in marks.into_iter().zip(rows).zip(colors) {
        if let Some(mark) = mark {
            render_neon(mark, color, y, area, buf, rng);
        }
    }
}

/// Lines typed into the info block, bottom of the screen
pub fn render_info(info: &Element, area: Rect, buf: &mut Buffer, rng: &mut impl Rng) {
    if !info.is_perceivable() {
        return;
    }
    let children = info.children();
    let top = area.bottom().saturating_sub(children.len() as u16 + 1);
    for (i, line) in children.iter().enumerate() {
        let base = if line.has_tag("dim") {
            Style::default().fg(ICE).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(ICE)
        };
        if let Some(style) = element_style(line, base, rng) {
            centered_line(line.text(), style, top + i as u16, area, buf);
        }
    }
}

/// "Sound on" badge in the top-right corner
pub fn render_speaker(overlay: &Element, speaker: Option<&Element>, area: Rect, buf: &mut Buffer) {
    if !overlay.has_tag(tag::SHOW) {
        return;
    }
    let icon = speaker.map(|s| s.text()).unwrap_or_default();
    let label = format!("{:<5} sound on", icon);
    let width = (label.chars().count() as u16 + 4).min(area.width);
    if area.height < 3 || width == 0 {
        return;
    }

    let badge = Rect { x: area.right() - width, y: area.y, width, height: 3 };
    Clear.render(badge, buf);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(NEON));
    let inner = block.inner(badge);
    block.render(badge, buf);
    Paragraph::new(label).render(inner, buf);
}
