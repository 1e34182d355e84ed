use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::error::{CardError, CardResult};

/// Glyph coverage for a text shadow, one byte per pixel.
///
/// A shadow is a single colour, so only coverage is blurred; the colour is applied once by
/// [`ShadowMask::tint`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ShadowMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl ShadowMask {
    /// Keep the alpha channel of rendered glyphs.
    pub(crate) fn from_rgba8_premul(rgba: &[u8], width: u32, height: u32) -> CardResult<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| CardError::surface("shadow mask size overflow"))?;
        if rgba.len() != pixels.saturating_mul(4) {
            return Err(CardError::surface(format!(
                "shadow mask expects {width}x{height} rgba pixels, got {} bytes",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            coverage: rgba.chunks_exact(4).map(|px| px[3]).collect(),
        })
    }

    pub(crate) fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Gaussian blur matching canvas `shadowBlur`: sigma is half the blur value. Edges clamp.
    pub(crate) fn blur(self, shadow_blur: f32) -> Self {
        let sigma = shadow_blur / 2.0;
        let radius = kernel_radius(sigma);
        if radius == 0 || self.coverage.is_empty() {
            return self;
        }
        let kernel = gaussian_kernel(radius, sigma);
        let (w, h) = (self.width as usize, self.height as usize);

        let mut rows = vec![0u8; self.coverage.len()];
        convolve(&self.coverage, &mut rows, h, w, w, 1, &kernel);
        let mut coverage = vec![0u8; self.coverage.len()];
        convolve(&rows, &mut coverage, w, h, 1, w, &kernel);

        Self { coverage, ..self }
    }

    /// Premultiplied RGBA8 of `color`, scaled by coverage.
    pub(crate) fn tint(&self, color: Rgba8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.coverage.len() * 4);
        for &c in &self.coverage {
            let a = ((u16::from(c) * u16::from(color.a) + 127) / 255) as u8;
            out.extend_from_slice(
                &Rgba8Premul::from_straight_rgba(color.r, color.g, color.b, a).to_array(),
            );
        }
        out
    }
}

/// Transparent border a mask needs so a blur of `shadow_blur` is not cut off.
pub(crate) fn blur_margin(shadow_blur: f32) -> u32 {
    kernel_radius(shadow_blur / 2.0) + 1
}

fn kernel_radius(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

fn gaussian_kernel(radius: u32, sigma: f32) -> Vec<f32> {
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-r..=r)
        .map(|i| {
            let x = i as f32;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Convolve `lines` runs of `len` samples. Sample `i` of run `l` sits at
/// `l * line_step + i * sample_step`, so one routine serves rows and columns.
fn convolve(
    src: &[u8],
    dst: &mut [u8],
    lines: usize,
    len: usize,
    line_step: usize,
    sample_step: usize,
    kernel: &[f32],
) {
    let radius = (kernel.len() / 2) as isize;
    let last = len as isize - 1;
    for l in 0..lines {
        let base = l * line_step;
        for i in 0..len {
            let acc: f32 = kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let s = (i as isize + k as isize - radius).clamp(0, last) as usize;
                    w * f32::from(src[base + s * sample_step])
                })
                .sum();
            dst[base + i * sample_step] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
