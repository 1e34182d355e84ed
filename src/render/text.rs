use crate::assets::font::{ResolvedFont, TextLayoutEngine};
use crate::card::style::{TextLine, TextShadow};
use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::CardResult;
use crate::render::blur::{ShadowMask, blur_margin};
use crate::render::surface::{Surface, affine_to_cpu, image_paint};

/// Draw `line` horizontally centered on `center_x` with its top edge at `top`.
pub(crate) fn draw_centered_line(
    surface: &mut Surface,
    engine: &mut TextLayoutEngine,
    font: &ResolvedFont,
    line: &TextLine,
    center_x: f64,
    top: f64,
) -> CardResult<()> {
    if line.text.trim().is_empty() {
        return Ok(());
    }
    let layout = engine.layout_line(&line.text, font, line.size_px, line.weight, line.color)?;
    let x = center_x - f64::from(layout.width()) / 2.0;

    if let Some(shadow) = line.shadow {
        draw_shadow(surface, &layout, font, shadow, x, top)?;
    }

    let ctx = surface.ctx();
    ctx.set_transform(affine_to_cpu(Affine::translate((x, top))));
    fill_layout(ctx, &layout, font, None);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

/// Glyph coverage rendered off-screen, blurred, tinted and painted `offset_y` lower.
fn draw_shadow(
    surface: &mut Surface,
    layout: &parley::Layout<Rgba8>,
    font: &ResolvedFont,
    shadow: TextShadow,
    x: f64,
    top: f64,
) -> CardResult<()> {
    if shadow.color.a == 0 {
        return Ok(());
    }
    let margin = blur_margin(shadow.blur);
    let w = (layout.width().ceil() as u32).saturating_add(2 * margin);
    let h = (layout.height().ceil() as u32).saturating_add(2 * margin);
    let (Ok(w16), Ok(h16)) = (u16::try_from(w), u16::try_from(h)) else {
        tracing::warn!(w, h, "text shadow too large; skipped");
        return Ok(());
    };

    // Keep the fractional pen position so the shadow lines up with the glyphs above it.
    let (fx, fy) = (x - x.floor(), top - top.floor());
    let mut off = Surface::with_size(w16, h16);
    {
        let ctx = off.ctx();
        ctx.set_transform(affine_to_cpu(Affine::translate((
            f64::from(margin) + fx,
            f64::from(margin) + fy,
        ))));
        fill_layout(ctx, layout, font, Some(Rgba8::rgb(255, 255, 255)));
    }
    let pixmap = off.finish();
    let mask = ShadowMask::from_rgba8_premul(pixmap.data_as_u8_slice(), w, h)?.blur(shadow.blur);
    let paint = image_paint(&mask.tint(shadow.color), w, h)?;

    let ctx = surface.ctx();
    ctx.set_transform(affine_to_cpu(Affine::translate((
        x.floor() - f64::from(margin),
        top.floor() - f64::from(margin) + f64::from(shadow.offset_y).round(),
    ))));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<Rgba8>,
    font: &ResolvedFont,
    tint: Option<Rgba8>,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = tint.unwrap_or(run.style().brush);
            let font_size = run.run().font_size();
            // Faces without the requested weight or slant get a faux bold/oblique, as canvas does.
            let synthesis = run.run().synthesis();
            let skew = synthesis
                .skew()
                .map(|deg| f64::from(deg.to_radians().tan()))
                .unwrap_or(0.0);
            let glyph_transform = vello_cpu::kurbo::Affine::skew(skew, 0.0);

            ctx.set_paint(brush.to_cpu_color());
            // Positioned glyphs carry the pen advance and line baseline.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font.data)
                .font_size(font_size)
                .glyph_transform(glyph_transform)
                .fill_glyphs(glyphs.clone());
            if synthesis.embolden() {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(embolden_width(font_size)));
                ctx.glyph_run(&font.data)
                    .font_size(font_size)
                    .glyph_transform(glyph_transform)
                    .stroke_glyphs(glyphs);
            }
        }
    }
}

/// Outline stroke width for faux bold: 1/24 of the size at 9px, easing to 1/32 from 36px up.
fn embolden_width(font_size: f32) -> f64 {
    let t = ((font_size - 9.0) / 27.0).clamp(0.0, 1.0);
    let ratio = (1.0 / 24.0) + t * ((1.0 / 32.0) - (1.0 / 24.0));
    f64::from(font_size * ratio)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
