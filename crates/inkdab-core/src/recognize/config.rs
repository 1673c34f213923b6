//! Tunable thresholds for quick-shape recognition.

use serde::{Deserialize, Serialize};

/// Thresholds used by [`detect_quick_shape_with`](super::detect_quick_shape_with).
///
/// Lengths are in raster pixels, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Strokes with fewer points are never recognized.
    pub min_points: usize,
    /// Shortest side, radius or line length a shape may have.
    pub min_size: f64,
    /// Maximum mean deviation from the chord, relative to the chord length.
    pub line_deviation_ratio: f64,
    /// Endpoint gap, relative to the path length, under which a path is closed.
    pub closure_ratio: f64,
    /// Maximum coefficient of variation of the centroid distances for a circle.
    pub circle_max_variation: f64,
    /// Maximum mean error against the implicit ellipse equation.
    pub ellipse_max_error: f64,
    /// Minimum major/minor radius ratio for an ellipse (below it, it is a circle).
    pub ellipse_min_aspect: f64,
    /// Turn angle above which a point counts as a corner.
    pub corner_angle_degrees: f64,
    /// Maximum longest/shortest side ratio for a triangle.
    pub triangle_max_side_ratio: f64,
    /// Maximum long/short side ratio for a rectangle.
    pub rect_max_aspect: f64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_points: 5,
            min_size: 10.0,
            line_deviation_ratio: 0.05,
            closure_ratio: 0.10,
            circle_max_variation: 0.10,
            ellipse_max_error: 0.15,
            ellipse_min_aspect: 1.3,
            corner_angle_degrees: 45.0,
            triangle_max_side_ratio: 10.0,
            rect_max_aspect: 10.0,
        }
    }
}

impl RecognitionConfig {
    pub(crate) fn corner_angle(&self) -> f64 {
        self.corner_angle_degrees.to_radians()
    }
}
