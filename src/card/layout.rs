use serde::{Deserialize, Serialize};

use crate::foundation::core::Rect;
use crate::foundation::error::{CardError, CardResult};

/// Number of photos on a card.
pub const PHOTO_COUNT: usize = 4;

/// Fixed card geometry, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    /// Outer padding around the photo grid.
    pub padding: u32,
    /// Gap between photo cells.
    pub gap: u32,
    pub photo_radius: f64,
    pub card_radius: f64,
    pub border_width: f64,
    /// How far above the grid's bottom edge the accent overlay begins.
    pub overlay_lead: f64,
    /// Top of the heading, measured from the grid's bottom edge.
    pub heading_offset: f64,
    /// Top of the subheading, measured from the grid's bottom edge.
    pub subheading_offset: f64,
    pub heart_size: f64,
    /// Horizontal inset of the corner hearts.
    pub heart_inset: f64,
    /// Top edge of the corner hearts.
    pub heart_top: f64,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            width: 960,
            height: 1100,
            padding: 48,
            gap: 24,
            photo_radius: 32.0,
            card_radius: 48.0,
            border_width: 5.0,
            overlay_lead: 20.0,
            heading_offset: 40.0,
            subheading_offset: 120.0,
            heart_size: 28.0,
            heart_inset: 20.0,
            heart_top: 40.0,
        }
    }
}

impl CardLayout {
    /// Side of one square photo cell: `(W - 2*padding - gap) / 2`.
    pub fn cell_size(&self) -> u32 {
        let margins = 2 * u64::from(self.padding) + u64::from(self.gap);
        // At most width / 2, so it fits back into u32.
        (u64::from(self.width).saturating_sub(margins) / 2) as u32
    }

    /// Top-left corner of cell `index` (row-major 2x2).
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let col = (index % 2) as u32;
        let row = (index / 2) as u32;
        let step = self.cell_size().saturating_add(self.gap);
        (
            self.padding.saturating_add(col * step),
            self.padding.saturating_add(row * step),
        )
    }

    /// Cell `index` as a rectangle.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let (x, y) = self.cell_origin(index);
        let cell = f64::from(self.cell_size());
        Rect::new(f64::from(x), f64::from(y), f64::from(x) + cell, f64::from(y) + cell)
    }

    /// Y coordinate of the photo grid's bottom edge.
    pub fn photo_bottom(&self) -> f64 {
        (u64::from(self.padding) + 2 * u64::from(self.cell_size()) + u64::from(self.gap)) as f64
    }

    /// Reject layouts the rasterizer cannot allocate or that leave no room for photos.
    pub fn validate(&self) -> CardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CardError::surface(format!(
                "canvas {}x{} has zero area",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(CardError::surface(format!(
                "canvas {}x{} exceeds the {}px raster limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.cell_size() == 0 {
            return Err(CardError::validation(
                "padding and gap leave no room for photo cells",
            ));
        }
        if self.photo_bottom() > f64::from(self.height) {
            return Err(CardError::validation("photo grid overflows the canvas"));
        }
        for (name, v) in [
            ("photo_radius", self.photo_radius),
            ("card_radius", self.card_radius),
            ("border_width", self.border_width),
            ("heart_size", self.heart_size),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CardError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn size_u16(&self) -> CardResult<(u16, u16)> {
        let w = u16::try_from(self.width)
            .map_err(|_| CardError::surface("canvas width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| CardError::surface("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/layout.rs"]
mod tests;
