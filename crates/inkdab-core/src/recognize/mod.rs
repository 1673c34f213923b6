//! Quick-shape recognition.
//!
//! Turns the point sequence of a finished freehand stroke into one of five
//! primitives. Detection is an ordered chain of independent tests over an
//! immutable point slice; the first test that matches wins:
//!
//! 1. line (any path, short-circuits everything else)
//! 2. closure check: open paths stop here
//! 3. circle, ellipse, triangle, rectangle

mod config;
mod geometry;

pub use config::RecognitionConfig;

use geometry::{bounding_box, centroid, find_corners, path_length, segment_distance};
use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Corner counts accepted as a triangle.
///
/// Narrower than the nominal `2..=4` band: with four included, every
/// rectangle drawn from mid-edge would be claimed by the triangle test,
/// which runs first. Four-corner paths are left to the rectangle test.
const TRIANGLE_CORNERS: RangeInclusive<usize> = 2..=3;
/// Corner counts accepted as a rectangle.
const RECT_CORNERS: RangeInclusive<usize> = 3..=5;
/// Flattening tolerance for curved outlines.
const PATH_TOLERANCE: f64 = 0.1;

/// Kind of a recognized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Ellipse,
    Rect,
    Triangle,
    None,
}

/// Outcome of quick-shape recognition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDetection {
    /// Nothing matched; the caller keeps the freehand stroke.
    #[default]
    #[serde(rename = "none")]
    NotDetected,
    Line { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Triangle { points: [Point; 3] },
}

impl ShapeDetection {
    pub fn is_detected(&self) -> bool {
        !matches!(self, ShapeDetection::NotDetected)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeDetection::NotDetected => ShapeKind::None,
            ShapeDetection::Line { .. } => ShapeKind::Line,
            ShapeDetection::Circle { .. } => ShapeKind::Circle,
            ShapeDetection::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeDetection::Rect { .. } => ShapeKind::Rect,
            ShapeDetection::Triangle { .. } => ShapeKind::Triangle,
        }
    }

    /// Horizontal and vertical radii of a circle or ellipse.
    pub fn radii(&self) -> Option<(f64, f64)> {
        match *self {
            ShapeDetection::Circle { radius, .. } => Some((radius, radius)),
            ShapeDetection::Ellipse { radius_x, radius_y, .. } => Some((radius_x, radius_y)),
            _ => None,
        }
    }

    /// Axis-aligned bounds of the primitive.
    pub fn bounds(&self) -> Option<Rect> {
        match *self {
            ShapeDetection::NotDetected => None,
            ShapeDetection::Line { start, end } => Some(Rect::from_points(start, end)),
            ShapeDetection::Circle { center, radius } => {
                Some(Circle::new(center, radius).bounding_box())
            }
            ShapeDetection::Ellipse { center, radius_x, radius_y } => Some(Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                center.x + radius_x,
                center.y + radius_y,
            )),
            ShapeDetection::Rect { x, y, width, height } => {
                Some(Rect::new(x, y, x + width, y + height))
            }
            ShapeDetection::Triangle { points } => bounding_box(&points),
        }
    }

    /// Outline of the primitive. `None` when not detected or degenerate.
    pub fn to_path(&self) -> Option<BezPath> {
        if !self.is_well_formed() {
            return None;
        }
        let path = match *self {
            ShapeDetection::NotDetected => return None,
            ShapeDetection::Line { start, end } => {
                let mut path = BezPath::new();
                path.move_to(start);
                path.line_to(end);
                path
            }
            ShapeDetection::Circle { center, radius } => {
                Circle::new(center, radius).to_path(PATH_TOLERANCE)
            }
            ShapeDetection::Ellipse { center, radius_x, radius_y } => {
                Ellipse::new(center, (radius_x, radius_y), 0.0).to_path(PATH_TOLERANCE)
            }
            ShapeDetection::Rect { x, y, width, height } => {
                Rect::new(x, y, x + width, y + height).to_path(PATH_TOLERANCE)
            }
            ShapeDetection::Triangle { points } => {
                let mut path = BezPath::new();
                path.move_to(points[0]);
                path.line_to(points[1]);
                path.line_to(points[2]);
                path.close_path();
                path
            }
        };
        Some(path)
    }

    fn is_well_formed(&self) -> bool {
        let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match *self {
            ShapeDetection::NotDetected => false,
            ShapeDetection::Line { start, end } => finite(start) && finite(end) && start != end,
            ShapeDetection::Circle { center, radius } => finite(center) && positive(radius),
            ShapeDetection::Ellipse { center, radius_x, radius_y } => {
                finite(center) && positive(radius_x) && positive(radius_y)
            }
            ShapeDetection::Rect { x, y, width, height } => {
                finite(Point::new(x, y)) && positive(width) && positive(height)
            }
            ShapeDetection::Triangle { points } => points.iter().all(|p| finite(*p)),
        }
    }
}

/// Recognize a stroke with the default thresholds.
pub fn detect_quick_shape(points: &[Point]) -> ShapeDetection {
    detect_quick_shape_with(points, &RecognitionConfig::default())
}

/// Recognize a stroke with custom thresholds.
pub fn detect_quick_shape_with(points: &[Point], config: &RecognitionConfig) -> ShapeDetection {
    if points.len() < config.min_points.max(3) {
        return ShapeDetection::NotDetected;
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        log::debug!("quick shape: non-finite point in stroke, skipping");
        return ShapeDetection::NotDetected;
    }

    if let Some(line) = detect_line(points, config) {
        log::debug!("quick shape: line");
        return line;
    }
    if !is_closed(points, config) {
        log::debug!("quick shape: open path, nothing detected");
        return ShapeDetection::NotDetected;
    }

    let corners = find_corners(points, config.corner_angle());
    let detected = detect_circle(points, config)
        .or_else(|| detect_ellipse(points, config))
        .or_else(|| detect_triangle(points, corners.len(), config))
        .or_else(|| detect_rect(points, &corners, config))
        .unwrap_or_default();
    log::debug!("quick shape: {:?} ({} corners)", detected.kind(), corners.len());
    detected
}

fn detect_line(points: &[Point], config: &RecognitionConfig) -> Option<ShapeDetection> {
    let start = *points.first()?;
    let end = *points.last()?;
    let length = start.distance(end);
    if length < config.min_size {
        return None;
    }
    let mean_deviation =
        points.iter().map(|p| segment_distance(*p, start, end)).sum::<f64>() / points.len() as f64;
    (mean_deviation / length < config.line_deviation_ratio)
        .then_some(ShapeDetection::Line { start, end })
}

fn is_closed(points: &[Point], config: &RecognitionConfig) -> bool {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return false;
    };
    first.distance(*last) < config.closure_ratio * path_length(points)
}

fn detect_circle(points: &[Point], config: &RecognitionConfig) -> Option<ShapeDetection> {
    let center = centroid(points)?;
    let n = points.len() as f64;
    let distances: Vec<f64> = points.iter().map(|p| p.distance(center)).collect();
    let mean = distances.iter().sum::<f64>() / n;
    if mean <= config.min_size {
        return None;
    }
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let variation = variance.sqrt() / mean;
    (variation < config.circle_max_variation).then_some(ShapeDetection::Circle {
        center,
        radius: mean,
    })
}

fn detect_ellipse(points: &[Point], config: &RecognitionConfig) -> Option<ShapeDetection> {
    let center = centroid(points)?;
    let (radius_x, radius_y) = points.iter().fold((0.0f64, 0.0f64), |(rx, ry), p| {
        (rx.max((p.x - center.x).abs()), ry.max((p.y - center.y).abs()))
    });
    let minor = radius_x.min(radius_y);
    let major = radius_x.max(radius_y);
    if minor <= config.min_size || major / minor <= config.ellipse_min_aspect {
        return None;
    }

    let error = points
        .iter()
        .map(|p| {
            let nx = (p.x - center.x) / radius_x;
            let ny = (p.y - center.y) / radius_y;
            (nx * nx + ny * ny - 1.0).abs()
        })
        .sum::<f64>()
        / points.len() as f64;
    (error < config.ellipse_max_error).then_some(ShapeDetection::Ellipse {
        center,
        radius_x,
        radius_y,
    })
}

fn detect_triangle(
    points: &[Point],
    corner_count: usize,
    config: &RecognitionConfig,
) -> Option<ShapeDetection> {
    if !TRIANGLE_CORNERS.contains(&corner_count) {
        return None;
    }
    let n = points.len();
    let vertices = [points[0], points[n / 3], points[2 * n / 3]];
    let sides = [
        vertices[0].distance(vertices[1]),
        vertices[1].distance(vertices[2]),
        vertices[2].distance(vertices[0]),
    ];
    let shortest = sides.iter().copied().fold(f64::INFINITY, f64::min);
    let longest = sides.iter().copied().fold(0.0, f64::max);
    if shortest < config.min_size || longest / shortest > config.triangle_max_side_ratio {
        return None;
    }
    Some(ShapeDetection::Triangle { points: vertices })
}

fn detect_rect(
    points: &[Point],
    corners: &[Point],
    config: &RecognitionConfig,
) -> Option<ShapeDetection> {
    if !RECT_CORNERS.contains(&corners.len()) {
        return None;
    }
    let n = points.len();
    let vertices: Vec<Point> = if corners.len() == 4 {
        corners.to_vec()
    } else {
        (0..4).map(|i| points[i * n / 4]).collect()
    };
    let bounds = bounding_box(&vertices)?;
    let (width, height) = (bounds.width(), bounds.height());
    if width < config.min_size || height < config.min_size {
        return None;
    }
    if width.max(height) / width.min(height) > config.rect_max_aspect {
        return None;
    }
    Some(ShapeDetection::Rect {
        x: bounds.x0,
        y: bounds.y0,
        width,
        height,
    })
}
