/// Measures how wide a single line of text renders at a given size
pub trait TextMeasure: Send + Sync + std::fmt::Debug {
    fn text_width(&self, text: &str, font_px: f32) -> f32;
}

/// Every glyph advances by `advance_ratio × font_px`
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub advance_ratio: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * font_px * self.advance_ratio
    }
}
