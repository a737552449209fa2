use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use super::centered_rect;
use super::style::{dim_unless_focused, element_style, CORRECT, ICE, WRONG};
use crate::stage::{tag, Choice, Element};

#[allow(clippy::too_many_arguments)]
pub fn render_quiz(
    quiz: &Element,
    question: &str,
    choices: &[Choice],
    selected: usize,
    frame: u64,
    area: Rect,
    buf: &mut Buffer,
    rng: &mut impl Rng,
) {
    if quiz.has_tag(tag::HIDDEN) {
        return;
    }
    let Some(card_style) = element_style(quiz, Style::default().fg(ICE), rng) else { return };

    let card = centered_rect(60, 60, area);
    Clear.render(card, buf);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(" pop quiz ")
        .style(card_style);
    let inner = block.inner(card);
    block.render(card, buf);

    let mut lines = vec![Line::from(question.to_string()).bold(), Line::default()];
    for (i, choice) in choices.iter().enumerate() {
        let el = &choice.element;
        let base = if el.has_tag(tag::CORRECT) {
            Style::default().fg(CORRECT)
        } else if el.has_tag(tag::WRONG) {
            Style::default().fg(WRONG)
        } else {
            Style::default()
        };
        let Some(style) = element_style(el, base, rng) else {
            lines.push(Line::default());
            continue;
        };
        let focused = i == selected && !el.is_disabled();

        // Shake jitters the label sideways every other frame
        let pad = if el.has_tag(tag::SHAKE) && frame % 2 == 0 { "  " } else { " " };
        let label = format!("{}{}. {}", pad, i + 1, choice.label);
        lines.push(Line::from(label).style(dim_unless_focused(focused, style)));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}
