//! Point-sequence measurements used by the shape detectors.

use kurbo::{Point, Rect, Vec2};
use std::f64::consts::PI;

/// Sum of consecutive segment lengths.
pub(crate) fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Arithmetic mean of the points. `None` for an empty slice.
pub(crate) fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

/// Distance from `point` to the segment `start..end`, clamping the projection.
pub(crate) fn segment_distance(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = end - start;
    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    point.distance(start + line_vec * t)
}

/// Interior points where the path turns by more than `min_turn` radians.
pub(crate) fn find_corners(points: &[Point], min_turn: f64) -> Vec<Point> {
    points
        .windows(3)
        .filter_map(|w| {
            let incoming = (w[1] - w[0]).atan2();
            let outgoing = (w[2] - w[1]).atan2();
            let mut turn = (outgoing - incoming).abs();
            if turn > PI {
                turn = 2.0 * PI - turn;
            }
            (turn > min_turn).then_some(w[1])
        })
        .collect()
}

/// Axis-aligned bounding box. `None` for an empty slice.
pub(crate) fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length() {
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
        assert!((path_length(&points) - 11.0).abs() < 1e-9);
        assert_eq!(path_length(&points[..1]), 0.0);
    }

    #[test]
    fn test_centroid() {
        let points = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 8.0)];
        let c = centroid(&points).unwrap();
        assert!((c.x - 8.0 / 3.0).abs() < 1e-9);
        assert!((c.y - 8.0 / 3.0).abs() < 1e-9);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_segment_distance_clamps_projection() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 0.0);
        assert!((segment_distance(Point::new(5.0, 3.0), start, end) - 3.0).abs() < 1e-9);
        assert!((segment_distance(Point::new(13.0, 4.0), start, end) - 5.0).abs() < 1e-9);
        assert!((segment_distance(Point::new(3.0, 4.0), start, start) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_corners() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 30.0),
        ];
        let corners = find_corners(&points, 45f64.to_radians());
        assert_eq!(corners, vec![Point::new(20.0, 0.0)]);
    }

    #[test]
    fn test_find_corners_wraps_angle() {
        // Heading just above -pi then just below pi is a tiny turn, not a reversal.
        let points = [Point::new(10.0, 0.1), Point::new(0.0, 0.0), Point::new(-10.0, 0.1)];
        assert!(find_corners(&points, 45f64.to_radians()).is_empty());
    }

    #[test]
    fn test_bounding_box() {
        let points = [Point::new(5.0, 1.0), Point::new(-2.0, 4.0), Point::new(3.0, -6.0)];
        let rect = bounding_box(&points).unwrap();
        assert_eq!(rect, Rect::new(-2.0, -6.0, 5.0, 4.0));
        assert!(bounding_box(&[]).is_none());
    }
}
