use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// One colour stop in a linear gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// Soft drop shadow painted beneath a text line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    pub color: Rgba8,
    /// Canvas-style blur radius; the Gaussian sigma is half of it.
    pub blur: f32,
    pub offset_y: f32,
}

/// A single centered line of card text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub size_px: f32,
    pub weight: u16,
    pub color: Rgba8,
    pub shadow: Option<TextShadow>,
}

/// Colours, copy and decoration of the card.
///
/// `CardStyle::default()` reproduces the original Valentine card. Every field can be overridden
/// from JSON; omitted fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Diagonal background, top-left to bottom-right.
    pub background: Vec<GradientStop>,
    /// Vertical accent strip under the photo grid.
    pub overlay: Vec<GradientStop>,
    pub photo_border: Rgba8,
    pub heading: TextLine,
    pub subheading: TextLine,
    pub heart_color: Rgba8,
    pub heart_opacity: f32,
}

pub(crate) const ACCENT: Rgba8 = Rgba8::rgb(232, 83, 109);

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: vec![
                GradientStop::new(0.0, Rgba8::rgb(0xFF, 0xF0, 0xF5)),
                GradientStop::new(0.5, Rgba8::rgb(0xFF, 0xE4, 0xEC)),
                GradientStop::new(1.0, Rgba8::rgb(0xFF, 0xD1, 0xDC)),
            ],
            overlay: vec![
                GradientStop::new(0.0, Rgba8::with_alpha_f(232, 83, 109, 0.0)),
                GradientStop::new(0.4, Rgba8::with_alpha_f(232, 83, 109, 0.12)),
                GradientStop::new(1.0, Rgba8::with_alpha_f(232, 83, 109, 0.28)),
            ],
            photo_border: Rgba8::with_alpha_f(255, 255, 255, 0.85),
            heading: TextLine {
                text: "With You and Forever".to_owned(),
                size_px: 72.0,
                weight: 700,
                color: ACCENT,
                shadow: Some(TextShadow {
                    color: Rgba8::with_alpha_f(0, 0, 0, 0.08),
                    blur: 6.0,
                    offset_y: 3.0,
                }),
            },
            subheading: TextLine {
                text: "Thank You".to_owned(),
                size_px: 48.0,
                weight: 500,
                color: Rgba8::rgb(0x8B, 0x5A, 0x6A),
                shadow: Some(TextShadow {
                    color: Rgba8::with_alpha_f(0, 0, 0, 0.08),
                    blur: 4.0,
                    offset_y: 2.0,
                }),
            },
            heart_color: ACCENT,
            heart_opacity: 0.4,
        }
    }
}

impl CardStyle {
    /// Parse a (possibly partial) style from JSON text.
    pub fn from_json_str(s: &str) -> CardResult<Self> {
        let style: Self = serde_json::from_str(s)
            .map_err(|e| CardError::validation(format!("invalid style json: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CardError::validation(format!("failed to read style '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON for this style.
    pub fn to_json_pretty(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CardError::Other(anyhow::Error::new(e).context("serialize style")))
    }

    pub fn validate(&self) -> CardResult<()> {
        validate_stops("background", &self.background)?;
        validate_stops("overlay", &self.overlay)?;
        for (name, line) in [("heading", &self.heading), ("subheading", &self.subheading)] {
            if !line.size_px.is_finite() || line.size_px <= 0.0 {
                return Err(CardError::validation(format!(
                    "{name}.size_px must be finite and > 0"
                )));
            }
            if !(1..=1000).contains(&line.weight) {
                return Err(CardError::validation(format!(
                    "{name}.weight must be within 1..=1000"
                )));
            }
            if let Some(s) = line.shadow
                && (!s.blur.is_finite() || s.blur < 0.0 || !s.offset_y.is_finite())
            {
                return Err(CardError::validation(format!(
                    "{name}.shadow must have a finite, non-negative blur"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.heart_opacity) {
            return Err(CardError::validation("heart_opacity must be within [0, 1]"));
        }
        Ok(())
    }
}

fn validate_stops(name: &str, stops: &[GradientStop]) -> CardResult<()> {
    if stops.is_empty() {
        return Err(CardError::validation(format!(
            "{name} gradient needs at least one stop"
        )));
    }
    let mut prev = 0.0f32;
    for s in stops {
        if !(0.0..=1.0).contains(&s.offset) || s.offset < prev {
            return Err(CardError::validation(format!(
                "{name} gradient stops must be ascending within [0, 1]"
            )));
        }
        prev = s.offset;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/card/style.rs"]
mod tests;
