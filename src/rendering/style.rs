use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight-alpha sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb` or `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| channel(&format!("{c}{c}")));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Hue in degrees, saturation and lightness in percent
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Channel-wise blend, `t = 0` gives `self`
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl fmt::Display for Color {
    /// CSS notation: `#rrggbb` when opaque, `rgba(...)` otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.alpha() * 1000.0).round() / 1000.0;
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Fill and stroke of one drawn primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl ShapeStyle {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            opacity: 1.0,
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Nothing would be painted
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0
            || (self.fill.map_or(true, |c| c.a == 0)
                && self.stroke.map_or(true, |c| c.a == 0 || self.stroke_width <= 0.0))
    }
}

/// Colours and stroke widths of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    /// Land fill and the hovered label fill
    pub background: Color,
    /// Label text
    pub primary: Color,
    /// Node and label fill
    pub white: Color,
    /// Region outlines, node and label strokes, connectors
    pub border: Color,
    /// Ocean backdrop
    pub brand_blue: Color,
    /// Hover and click highlight
    pub brand_green: Color,
    pub ocean_opacity: f64,
    /// Peak opacity of a clicked cell's flash
    pub cell_flash_opacity: f64,
    /// Stroke width of markers, label boxes and connectors
    pub outline_width: f64,
    pub region_stroke_width: f64,
    pub font_family: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: Color::from_hsl(180.0, 19.0, 94.0),
            primary: Color::from_hsl(197.0, 76.0, 15.0),
            white: Color::rgb(255, 255, 255).with_alpha(0.95),
            border: Color::rgb(0xb1, 0xc3, 0xd0),
            brand_blue: Color::rgb(0x15, 0x9d, 0xd7),
            brand_green: Color::rgb(0x04, 0xbf, 0x93),
            ocean_opacity: 0.2,
            cell_flash_opacity: 0.1,
            outline_width: 1.0 / 1.05,
            region_stroke_width: 1.0 / 3.0,
            font_family: "'Noto Sans', sans-serif".to_string(),
        }
    }
}
