use serde::{Deserialize, Serialize};

/// Rendered size of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures text the way the drawing backend will render it.
///
/// Returns `None` while measurement is impossible, e.g. before the backend
/// has a font loaded; layout then treats the label as zero-sized.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> Option<TextExtent>;
}

/// Average-advance estimate for bold sans-serif text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateTextMeasure {
    /// Average glyph advance as a fraction of the font size
    pub advance: f64,
    /// Line box height as a fraction of the font size
    pub line_height: f64,
}

impl Default for ApproximateTextMeasure {
    fn default() -> Self {
        Self {
            advance: 0.62,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for ApproximateTextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> Option<TextExtent> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return None;
        }
        let glyphs = text.chars().filter(|c| !c.is_control()).count() as f64;
        Some(TextExtent::new(
            glyphs * self.advance * font_size,
            self.line_height * font_size,
        ))
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> Option<TextExtent>,
{
    fn measure(&self, text: &str, font_size: f64) -> Option<TextExtent> {
        self(text, font_size)
    }
}
