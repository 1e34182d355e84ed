use image::RgbaImage;
use rayon::prelude::*;

use crate::assets::decode::{decode_image, fit_cover};
use crate::assets::font::{CardFonts, FontSource, TextLayoutEngine};
use crate::assets::source::ImageSource;
use crate::card::layout::{CardLayout, PHOTO_COUNT};
use crate::card::style::CardStyle;
use crate::encode::png::{CardArtifact, CardFrame};
use crate::foundation::core::{Affine, Point, Rect, premultiply_rgba8_in_place};
use crate::foundation::error::{CardError, CardResult};
use crate::render::gradient::LinearGradient;
use crate::render::shapes::{rounded_rect_path, twin_hearts_path};
use crate::render::surface::{Surface, affine_to_cpu, bezpath_to_cpu, image_paint};
use crate::render::text::draw_centered_line;

/// Configuration for a [`Compositor`].
#[derive(Clone, Debug, Default)]
pub struct CompositorOpts {
    /// Card geometry.
    pub layout: CardLayout,
    /// Colours, copy and decoration.
    pub style: CardStyle,
    /// Face used for the two text lines.
    pub font: FontSource,
}

impl CompositorOpts {
    /// Return options with a different font source.
    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }

    /// Return options with a different style.
    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }
}

/// Turns four photos into a keepsake card.
///
/// A compositor holds only immutable configuration and resolved font bytes. Every call to
/// [`Compositor::composite`] allocates its own surface and decode buffers, so one compositor can
/// serve concurrent calls from several threads.
#[derive(Clone, Debug)]
pub struct Compositor {
    layout: CardLayout,
    style: CardStyle,
    fonts: CardFonts,
}

impl Compositor {
    /// Validate configuration and resolve fonts.
    pub fn new(opts: CompositorOpts) -> CardResult<Self> {
        opts.layout.validate()?;
        opts.style.validate()?;
        let fonts = opts
            .font
            .resolve(opts.style.heading.weight, opts.style.subheading.weight)?;
        Ok(Self {
            layout: opts.layout,
            style: opts.style,
            fonts,
        })
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    /// `true` when card text will be drawn.
    pub fn has_text(&self) -> bool {
        !self.fonts.is_empty()
    }

    /// Compose the card and encode it as PNG.
    pub fn composite(&self, sources: &[ImageSource; PHOTO_COUNT]) -> CardResult<CardArtifact> {
        let frame = self.render(sources)?;
        let artifact = frame.encode_png()?;
        tracing::info!(bytes = artifact.bytes().len(), "encoded card");
        Ok(artifact)
    }

    /// Compose the card into raw premultiplied pixels.
    #[tracing::instrument(skip_all, fields(width = self.layout.width, height = self.layout.height))]
    pub fn render(&self, sources: &[ImageSource; PHOTO_COUNT]) -> CardResult<CardFrame> {
        let layout = &self.layout;
        let mut surface = Surface::new(layout)?;
        let (w, h) = (f64::from(layout.width), f64::from(layout.height));
        let card_outline = rounded_rect_path(Rect::new(0.0, 0.0, w, h), layout.card_radius);

        let background =
            LinearGradient::new(Point::ZERO, Point::new(w, h), &self.style.background)?;
        let bg_paint = image_paint(
            &background.rasterize(Point::ZERO, layout.width, layout.height),
            layout.width,
            layout.height,
        )?;
        {
            let ctx = surface.ctx();
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(bg_paint);
            ctx.fill_path(&bezpath_to_cpu(&card_outline));
        }

        let cells = prepare_cells(sources, layout.cell_size())?;
        for (i, cell) in cells.into_iter().enumerate() {
            self.draw_cell(&mut surface, i, cell)?;
        }

        self.draw_overlay(&mut surface)?;
        self.draw_text(&mut surface)?;
        self.draw_hearts(&mut surface);

        let pixmap = surface.finish();
        Ok(CardFrame {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    fn draw_cell(&self, surface: &mut Surface, index: usize, cell: RgbaImage) -> CardResult<()> {
        let layout = &self.layout;
        let rect = layout.cell_rect(index);
        let (cw, ch) = cell.dimensions();
        let mut bytes = cell.into_raw();
        premultiply_rgba8_in_place(&mut bytes);
        let paint = image_paint(&bytes, cw, ch)?;
        let outline = rounded_rect_path(rect, layout.photo_radius);

        {
            let mut clip = surface.clip(&outline);
            clip.set_transform(affine_to_cpu(Affine::translate((rect.x0, rect.y0))));
            clip.set_paint(paint);
            clip.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(cw),
                f64::from(ch),
            ));
        }

        if layout.border_width > 0.0 {
            let ctx = surface.ctx();
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(layout.border_width));
            ctx.set_paint(self.style.photo_border.to_cpu_color());
            ctx.stroke_path(&bezpath_to_cpu(&outline));
        }
        Ok(())
    }

    /// Full-width strip from just above the grid's bottom edge to the canvas bottom, corners
    /// included.
    fn draw_overlay(&self, surface: &mut Surface) -> CardResult<()> {
        let layout = &self.layout;
        let h = f64::from(layout.height);
        let top = (layout.photo_bottom() - layout.overlay_lead).clamp(0.0, h);
        let strip_h = (h - top).ceil() as u32;
        if strip_h == 0 {
            return Ok(());
        }
        let gradient =
            LinearGradient::new(Point::new(0.0, top), Point::new(0.0, h), &self.style.overlay)?;
        let paint = image_paint(
            &gradient.rasterize(Point::new(0.0, top), layout.width, strip_h),
            layout.width,
            strip_h,
        )?;

        let ctx = surface.ctx();
        ctx.set_transform(affine_to_cpu(Affine::translate((0.0, top))));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(layout.width),
            h - top,
        ));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_text(&self, surface: &mut Surface) -> CardResult<()> {
        if self.fonts.is_empty() {
            tracing::debug!("no text face; skipping card text");
            return Ok(());
        }
        let layout = &self.layout;
        let center_x = f64::from(layout.width) / 2.0;
        let bottom = layout.photo_bottom();
        let mut engine = TextLayoutEngine::new();
        let lines = [
            (
                self.fonts.heading.as_ref(),
                &self.style.heading,
                bottom + layout.heading_offset,
            ),
            (
                self.fonts.subheading.as_ref(),
                &self.style.subheading,
                bottom + layout.subheading_offset,
            ),
        ];
        for (font, line, top) in lines {
            let Some(font) = font else { continue };
            draw_centered_line(surface, &mut engine, font, line, center_x, top)?;
        }
        Ok(())
    }

    fn draw_hearts(&self, surface: &mut Surface) {
        let layout = &self.layout;
        if self.style.heart_opacity <= 0.0 || layout.heart_size <= 0.0 {
            return;
        }
        let size = layout.heart_size;
        let left = twin_hearts_path(Point::new(layout.heart_inset, layout.heart_top), size);
        let right = twin_hearts_path(
            Point::new(
                f64::from(layout.width) - layout.heart_inset - size,
                layout.heart_top,
            ),
            size,
        );

        let mut group = surface.opacity(self.style.heart_opacity);
        group.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        group.set_paint(self.style.heart_color.to_cpu_color());
        group.fill_path(&bezpath_to_cpu(&left));
        group.fill_path(&bezpath_to_cpu(&right));
    }
}

/// Load, decode and cover-fit all four photos concurrently.
///
/// Every slot must succeed; the lowest failing slot is reported and nothing is drawn from the
/// others.
fn prepare_cells(sources: &[ImageSource; PHOTO_COUNT], cell: u32) -> CardResult<Vec<RgbaImage>> {
    let results: Vec<CardResult<RgbaImage>> = sources
        .par_iter()
        .enumerate()
        .map(|(slot, source)| prepare_cell(slot, source, cell))
        .collect();

    results.into_iter().collect()
}

fn prepare_cell(slot: usize, source: &ImageSource, cell: u32) -> CardResult<RgbaImage> {
    let bytes = source
        .load()
        .map_err(|e| CardError::decode(slot, e.to_string()))?;
    let decoded = decode_image(&bytes).map_err(|e| CardError::decode(slot, format!("{e:#}")))?;
    tracing::debug!(
        slot,
        source = %source.describe(),
        width = decoded.width,
        height = decoded.height,
        "decoded photo"
    );
    Ok(fit_cover(&decoded, cell))
}

/// Compose a card from four photos with the default layout, style and system fonts.
pub fn composite(sources: [ImageSource; PHOTO_COUNT]) -> CardResult<CardArtifact> {
    Compositor::new(CompositorOpts::default())?.composite(&sources)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
