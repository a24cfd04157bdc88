//! WCAG contrast math for the contrast preview widget
//!
//! Luminance and ratio follow WCAG 2.x. Vision simulation is a plain 3×3
//! matrix on sRGB values, good enough for a preview.

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive)
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgb(r,g,b)`
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn linear_channel(c: u8) -> f64 {
    let s = c as f64 / 255.0;
    if s <= 0.03928 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in [0, 1]
pub fn relative_luminance(c: Rgb) -> f64 {
    0.2126 * linear_channel(c.r) + 0.7152 * linear_channel(c.g) + 0.0722 * linear_channel(c.b)
}

/// `(lighter + 0.05) / (darker + 0.05)`, in [1, 21]
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Readability tier for a contrast ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    /// ≥ 7
    Aaa,
    /// ≥ 4.5
    Aa,
    /// ≥ 3
    AaLarge,
    Fail,
}

impl ReadabilityLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            ReadabilityLevel::Aaa
        } else if ratio >= 4.5 {
            ReadabilityLevel::Aa
        } else if ratio >= 3.0 {
            ReadabilityLevel::AaLarge
        } else {
            ReadabilityLevel::Fail
        }
    }

    /// CSS class applied to the ratio, badge and indicator
    pub fn css_class(self) -> &'static str {
        match self {
            ReadabilityLevel::Aaa => "level-aaa",
            ReadabilityLevel::Aa => "level-aa",
            ReadabilityLevel::AaLarge => "level-aa-large",
            ReadabilityLevel::Fail => "level-fail",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            ReadabilityLevel::Aaa => "crispy",
            ReadabilityLevel::Aa => "solid",
            ReadabilityLevel::AaLarge => "ok-ish",
            ReadabilityLevel::Fail => "rough",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ReadabilityLevel::Aaa => "✓ super readable — chef's kiss",
            ReadabilityLevel::Aa => "✓ pretty easy to read",
            ReadabilityLevel::AaLarge => "~ fine if the text is big enough",
            ReadabilityLevel::Fail => "✗ hard to read — squint zone",
        }
    }
}

/// Simulated color vision for the preview area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisionMode {
    #[default]
    Normal,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
}

impl VisionMode {
    /// Radio value from the vision group; unknown values map to `Normal`
    pub fn parse(value: &str) -> Self {
        match value {
            "protanopia" => VisionMode::Protanopia,
            "deuteranopia" => VisionMode::Deuteranopia,
            "tritanopia" => VisionMode::Tritanopia,
            "achromatopsia" => VisionMode::Achromatopsia,
            _ => VisionMode::Normal,
        }
    }

    fn matrix(self) -> Option<[[f64; 3]; 3]> {
        match self {
            VisionMode::Normal => None,
            VisionMode::Protanopia => Some([
                [0.567, 0.433, 0.0],
                [0.558, 0.442, 0.0],
                [0.0, 0.242, 0.758],
            ]),
            VisionMode::Deuteranopia => Some([
                [0.625, 0.375, 0.0],
                [0.7, 0.3, 0.0],
                [0.0, 0.3, 0.7],
            ]),
            VisionMode::Tritanopia => Some([
                [0.95, 0.05, 0.0],
                [0.0, 0.433, 0.567],
                [0.0, 0.475, 0.525],
            ]),
            VisionMode::Achromatopsia => Some([[0.299, 0.587, 0.114]; 3]),
        }
    }

    /// Transform a color as seen under this mode
    pub fn simulate(self, c: Rgb) -> Rgb {
        let Some(m) = self.matrix() else {
            return c;
        };
        let (r, g, b) = (c.r as f64, c.g as f64, c.b as f64);
        let row = |i: usize| (m[i][0] * r + m[i][1] * g + m[i][2] * b).round().min(255.0) as u8;
        Rgb::new(row(0), row(1), row(2))
    }
}

/// Widget state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastInputs {
    pub background: Rgb,
    pub text: Rgb,
    /// Preview font size in px
    pub text_size: u32,
    pub vision: VisionMode,
}

impl Default for ContrastInputs {
    fn default() -> Self {
        Self {
            background: Rgb::new(10, 10, 15),
            text: Rgb::new(255, 0, 255),
            text_size: 18,
            vision: VisionMode::Normal,
        }
    }
}

/// Everything the widget displays for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub background_luminance: f64,
    pub text_luminance: f64,
    /// Computed from the unsimulated colors
    pub ratio: f64,
    pub level: ReadabilityLevel,
    pub preview_background: Rgb,
    pub preview_text: Rgb,
}

impl ContrastReport {
    pub fn new(inputs: &ContrastInputs) -> Self {
        let background_luminance = relative_luminance(inputs.background);
        let text_luminance = relative_luminance(inputs.text);
        let ratio = contrast_ratio(background_luminance, text_luminance);
        Self {
            background_luminance,
            text_luminance,
            ratio,
            level: ReadabilityLevel::from_ratio(ratio),
            preview_background: inputs.vision.simulate(inputs.background),
            preview_text: inputs.vision.simulate(inputs.text),
        }
    }

    /// `x.xx:1`
    pub fn ratio_label(&self) -> String {
        format!("{:.2}:1", self.ratio)
    }

    /// `0.xxx (yy.y%)`
    pub fn luminance_label(luminance: f64) -> String {
        format!("{:.3} ({:.1}%)", luminance, luminance * 100.0)
    }
}
