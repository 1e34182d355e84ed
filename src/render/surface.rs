use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::card::layout::CardLayout;
use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{CardError, CardResult};

/// Raster surface owned by exactly one compositing run.
pub(crate) struct Surface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Surface {
    pub(crate) fn new(layout: &CardLayout) -> CardResult<Self> {
        layout.validate()?;
        let (width, height) = layout.size_u16()?;
        Ok(Self::with_size(width, height))
    }

    pub(crate) fn with_size(width: u16, height: u16) -> Self {
        Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        }
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Restrict drawing to `path` until the returned scope is dropped.
    pub(crate) fn clip(&mut self, path: &BezPath) -> LayerScope<'_> {
        LayerScope::clip(&mut self.ctx, path)
    }

    /// Draw with group opacity until the returned scope is dropped.
    pub(crate) fn opacity(&mut self, opacity: f32) -> LayerScope<'_> {
        LayerScope::opacity(&mut self.ctx, opacity)
    }

    /// Rasterize everything recorded so far.
    pub(crate) fn finish(mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

/// A pushed `vello_cpu` layer that is popped when the scope ends, on every exit path.
///
/// The clip path is captured under an identity transform; drawing inside the scope may set any
/// transform, and the transform is reset to identity when the scope closes.
pub(crate) struct LayerScope<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl<'a> LayerScope<'a> {
    fn clip(ctx: &'a mut vello_cpu::RenderContext, path: &BezPath) -> Self {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&bezpath_to_cpu(path));
        Self { ctx }
    }

    fn opacity(ctx: &'a mut vello_cpu::RenderContext, opacity: f32) -> Self {
        ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
        Self { ctx }
    }
}

impl Deref for LayerScope<'_> {
    type Target = vello_cpu::RenderContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for LayerScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for LayerScope<'_> {
    fn drop(&mut self) {
        self.ctx.pop_layer();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::surface("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::surface("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CardError::surface("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

/// Wrap premultiplied RGBA8 as an image paint anchored at the user-space origin.
pub(crate) fn image_paint(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
