use rand::Rng;
use ratatui::style::{Color, Modifier, Style, Stylize};

use crate::stage::{tag, Element};

pub const NEON: Color = Color::Rgb(255, 70, 170);
pub const ICE: Color = Color::Rgb(170, 225, 255);
pub const SKY: Color = Color::Rgb(8, 16, 40);
pub const ROCK: Color = Color::Rgb(70, 90, 130);
pub const SNOWCAP: Color = Color::Rgb(225, 235, 250);
pub const FLAKE: Color = Color::White;
pub const CORRECT: Color = Color::Green;
pub const WRONG: Color = Color::Red;

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold().reversed() } else { style.dim() }
}

/// How `el` should be drawn this frame, or `None` when it is not on screen.
///
/// Elements mid neon transition flicker: each frame is randomly lit or dark,
/// lit more often while coming in than while going out.
pub fn element_style<R: Rng + ?Sized>(el: &Element, base: Style, rng: &mut R) -> Option<Style> {
    if !el.is_perceivable() {
        return None;
    }

    if el.has_tag(tag::NEON_IN) {
        return rng.gen_bool(0.65).then(|| base.add_modifier(Modifier::BOLD));
    }
    if el.has_tag(tag::NEON_OUT) {
        return rng.gen_bool(0.35).then_some(base);
    }

    let style = if el.opacity() < 0.5 {
        base.add_modifier(Modifier::DIM)
    } else if el.has_tag(tag::NEON_BASE) {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };
    Some(style)
}
