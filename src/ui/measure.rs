use crate::stage::TextMeasure;

/// Horizontal pixels one terminal cell stands for
pub const PX_PER_CELL: f32 = 8.0;
/// Font size that buys a glyph one more cell of letter spacing
pub const PX_PER_GLYPH_STEP: f32 = 24.0;

pub fn cells_to_px(cells: u16) -> f32 {
    cells as f32 * PX_PER_CELL
}

/// Cells one glyph occupies at `font_px`: its own cell plus the spacing after it
pub fn glyph_cells(font_px: f32) -> usize {
    if !font_px.is_finite() {
        return 1;
    }
    ((font_px / PX_PER_GLYPH_STEP).floor() as usize).max(1)
}

/// Spread `text` out the way a wordmark at `font_px` is drawn
pub fn letter_spaced(text: &str, font_px: f32) -> String {
    let gap = " ".repeat(glyph_cells(font_px) - 1);
    let glyphs: Vec<String> = text.chars().map(String::from).collect();
    glyphs.join(&gap)
}

/// Measures text exactly as [`letter_spaced`] lays it out, so autofit
/// and the renderer agree on what fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return 0.0;
        }
        // No spacing trails the last glyph
        ((glyphs - 1) * glyph_cells(font_px) + 1) as f32 * PX_PER_CELL
    }
}
