use crate::card::style::GradientStop;
use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::{CardError, CardResult};

/// Linear gradient along `start -> end`, evaluated like a canvas 2D gradient: each pixel center
/// is projected onto the axis and colours are interpolated in premultiplied space.
#[derive(Clone, Debug)]
pub(crate) struct LinearGradient {
    start: Point,
    end: Point,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub(crate) fn new(start: Point, end: Point, stops: &[GradientStop]) -> CardResult<Self> {
        if stops.is_empty() {
            return Err(CardError::validation("gradient needs at least one stop"));
        }
        Ok(Self {
            start,
            end,
            stops: stops.to_vec(),
        })
    }

    /// Position along the axis for point `p`, clamped to `[0, 1]`.
    pub(crate) fn t_at(&self, p: Point) -> f32 {
        let d = self.end - self.start;
        let len2 = d.hypot2();
        if len2 <= f64::EPSILON {
            return 0.0;
        }
        (((p - self.start).dot(d)) / len2).clamp(0.0, 1.0) as f32
    }

    /// Colour at axis position `t`.
    pub(crate) fn color_at(&self, t: f32) -> Rgba8Premul {
        let first = self.stops[0];
        if t <= first.offset {
            return first.color.to_premul();
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span <= f32::EPSILON {
                    1.0
                } else {
                    (t - a.offset) / span
                };
                return lerp_premul(a.color.to_premul(), b.color.to_premul(), local);
            }
        }
        self.stops[self.stops.len() - 1].color.to_premul()
    }

    /// Rasterize the `width`x`height` region whose top-left sits at `origin` in gradient space.
    ///
    /// Returns tightly packed premultiplied RGBA8.
    pub(crate) fn rasterize(&self, origin: Point, width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
        let vertical = (self.end.x - self.start.x).abs() <= f64::EPSILON;
        let mut row = vec![0u8; (width as usize) * 4];
        for y in 0..height {
            let py = origin.y + f64::from(y) + 0.5;
            if vertical {
                // Constant along x: compute once per row.
                let c = self.color_at(self.t_at(Point::new(self.start.x, py)));
                for px in row.chunks_exact_mut(4) {
                    px.copy_from_slice(&c.to_array());
                }
            } else {
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let p = Point::new(origin.x + x as f64 + 0.5, py);
                    px.copy_from_slice(&self.color_at(self.t_at(p)).to_array());
                }
            }
            let start = (y as usize) * (width as usize) * 4;
            bytes[start..start + row.len()].copy_from_slice(&row);
        }
        bytes
    }
}

fn lerp_premul(a: Rgba8Premul, b: Rgba8Premul, t: f32) -> Rgba8Premul {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = f32::from(x);
        let yf = f32::from(y);
        (xf + (yf - xf) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgba8Premul {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: lerp(a.a, b.a),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
