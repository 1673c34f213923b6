//! Smudge brush: sampling, blending, carrying and compositing dabs.

mod blend;
mod carry;
mod dab;
mod sampler;
mod settings;
mod smudge;

pub use blend::{blend_pixels, resize_pixels};
pub use carry::SmudgeState;
pub use dab::smudge_dab;
pub use sampler::{apply_circular_mask, sample};
pub use settings::{BrushSettings, MAX_BRUSH_SIZE};
pub use smudge::{SmudgeStroke, SmudgeTool};

use kurbo::Point;

/// Largest distance from the raster origin a dab may be placed at.
/// Beyond 2^53 pixel coordinates are no longer exact.
const MAX_COORDINATE: f64 = 9_007_199_254_740_992.0;

/// Clamp a ratio-like parameter into `[0, 1]`. NaN counts as zero.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round a brush size to whole pixels. `None` means "nothing to paint".
pub(crate) fn brush_extent(size: f64) -> Option<u32> {
    if !size.is_finite() {
        return None;
    }
    let rounded = size.round().min(MAX_BRUSH_SIZE);
    if rounded <= 0.0 {
        None
    } else {
        Some(rounded as u32)
    }
}

/// Top-left corner of a square footprint of `extent` pixels centred on `center`.
///
/// `None` for non-finite centres and for centres beyond [`MAX_COORDINATE`].
pub(crate) fn brush_origin(center: Point, extent: u32) -> Option<(i64, i64)> {
    let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_COORDINATE;
    if !in_range(center.x) || !in_range(center.y) {
        return None;
    }
    let half = f64::from(extent) / 2.0;
    Some(((center.x - half).round() as i64, (center.y - half).round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(7.0), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_brush_extent() {
        assert_eq!(brush_extent(0.4), None);
        assert_eq!(brush_extent(-3.0), None);
        assert_eq!(brush_extent(f64::INFINITY), None);
        assert_eq!(brush_extent(0.6), Some(1));
        assert_eq!(brush_extent(9.5), Some(10));
        assert_eq!(brush_extent(1.0e9), Some(MAX_BRUSH_SIZE as u32));
    }

    #[test]
    fn test_brush_origin() {
        assert_eq!(brush_origin(Point::new(10.0, 20.0), 4), Some((8, 18)));
        assert_eq!(brush_origin(Point::new(f64::NAN, 0.0), 4), None);
        assert_eq!(brush_origin(Point::new(1.0e19, 5.0), 4), None);
        assert_eq!(brush_origin(Point::new(5.0, -1.0e19), 4), None);
    }
}
