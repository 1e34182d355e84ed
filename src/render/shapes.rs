use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point, Rect};

const TOLERANCE: f64 = 0.1;

pub(crate) fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    rect.to_rounded_rect(radius).to_path(TOLERANCE)
}

/// Heart whose bounding box is `size`x`size` with top-left at `origin`.
pub(crate) fn heart_path(origin: Point, size: f64) -> BezPath {
    let p = |x: f64, y: f64| Point::new(origin.x + x * size, origin.y + y * size);
    let mut path = BezPath::new();
    path.move_to(p(0.5, 0.95));
    path.curve_to(p(0.15, 0.7), p(0.0, 0.5), p(0.0, 0.3));
    path.curve_to(p(0.0, 0.12), p(0.12, 0.02), p(0.27, 0.02));
    path.curve_to(p(0.38, 0.02), p(0.46, 0.08), p(0.5, 0.18));
    path.curve_to(p(0.54, 0.08), p(0.62, 0.02), p(0.73, 0.02));
    path.curve_to(p(0.88, 0.02), p(1.0, 0.12), p(1.0, 0.3));
    path.curve_to(p(1.0, 0.5), p(0.85, 0.7), p(0.5, 0.95));
    path.close_path();
    path
}

/// Two overlapping hearts filling a `size`x`size` box, the large one lower-left.
pub(crate) fn twin_hearts_path(origin: Point, size: f64) -> BezPath {
    let mut path = heart_path(Point::new(origin.x, origin.y + 0.28 * size), 0.72 * size);
    path.extend(heart_path(Point::new(origin.x + 0.52 * size, origin.y), 0.48 * size).iter());
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
