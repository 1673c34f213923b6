//! CPU stroke renderer for recognized shapes and freehand paths.

use inkdab_core::raster::PixelBuffer;
use inkdab_core::recognize::ShapeDetection;
use inkdab_core::shapes::{Freehand, StrokeStyle};
use inkdab_core::tools::StrokeOutcome;
use kurbo::{BezPath, PathEl, Rect, Shape as KurboShape};
use peniko::Color;
use thiserror::Error;
use tiny_skia::{
    ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke,
    Transform,
};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface unavailable: cannot allocate a {width}x{height} pixmap")]
    SurfaceUnavailable { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Strokes shapes onto a [`PixelBuffer`] with round caps and joins.
///
/// Only the region under the stroke is moved through a premultiplied
/// tiny-skia pixmap; pixels the stroke does not touch are left bit-exact.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRenderer {
    anti_alias: bool,
}

impl Default for ShapeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Enable or disable anti-aliasing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Draw a recognized primitive. Returns `Ok(false)` when there was
    /// nothing to draw.
    pub fn render_shape(
        &self,
        target: &mut PixelBuffer,
        shape: &ShapeDetection,
        style: &StrokeStyle,
    ) -> RenderResult<bool> {
        match shape.to_path() {
            Some(path) => self.stroke_path(target, &path, style),
            None => Ok(false),
        }
    }

    /// Draw a freehand stroke as a polyline.
    pub fn render_freehand(
        &self,
        target: &mut PixelBuffer,
        freehand: &Freehand,
    ) -> RenderResult<bool> {
        if freehand.len() < 2 {
            return Ok(false);
        }
        self.stroke_path(target, &freehand.to_path(), &freehand.style)
    }

    /// Draw whatever a finished stroke produced. Smudge strokes are
    /// already on the raster.
    pub fn render_outcome(
        &self,
        target: &mut PixelBuffer,
        outcome: &StrokeOutcome,
    ) -> RenderResult<bool> {
        match outcome {
            StrokeOutcome::Freehand(freehand) => self.render_freehand(target, freehand),
            StrokeOutcome::Shape { shape, style } => self.render_shape(target, shape, style),
            StrokeOutcome::Smudged { .. } => Ok(false),
        }
    }

    fn stroke_path(
        &self,
        target: &mut PixelBuffer,
        path: &BezPath,
        style: &StrokeStyle,
    ) -> RenderResult<bool> {
        if !style.is_visible() {
            return Ok(false);
        }
        let Some(region) = dirty_region(target, path.bounding_box(), style.width) else {
            return Ok(false);
        };
        let Some(sk_path) = to_skia_path(path) else {
            return Ok(false);
        };

        let mut pixmap = Pixmap::new(region.width, region.height).ok_or_else(|| {
            log::warn!("Failed to allocate {}x{} pixmap", region.width, region.height);
            RenderError::SurfaceUnavailable {
                width: region.width,
                height: region.height,
            }
        })?;
        let original = load_region(target, &region, &mut pixmap);

        let color: Color = style.stroke_with_opacity();
        let rgba = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = self.anti_alias;
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        let transform = Transform::from_translate(-(region.x as f32), -(region.y as f32));
        pixmap.stroke_path(&sk_path, &paint, &stroke, transform, None);

        store_region(target, &region, &pixmap, &original);
        Ok(true)
    }
}

/// Raster-space rectangle touched by a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn dirty_region(target: &PixelBuffer, bounds: Rect, stroke_width: f64) -> Option<Region> {
    let pad = stroke_width / 2.0 + 2.0;
    let bounds = bounds.inflate(pad, pad);
    let raster = Rect::new(0.0, 0.0, f64::from(target.width()), f64::from(target.height()));
    let clipped = bounds.intersect(raster);
    if !clipped.is_finite() || clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return None;
    }
    let x0 = clipped.x0.floor() as u32;
    let y0 = clipped.y0.floor() as u32;
    let x1 = (clipped.x1.ceil() as u32).min(target.width());
    let y1 = (clipped.y1.ceil() as u32).min(target.height());
    (x1 > x0 && y1 > y0).then_some(Region {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Copy the region into the pixmap, premultiplying. Returns the loaded pixels.
fn load_region(
    target: &PixelBuffer,
    region: &Region,
    pixmap: &mut Pixmap,
) -> Vec<PremultipliedColorU8> {
    let pixels = pixmap.pixels_mut();
    for row in 0..region.height {
        for col in 0..region.width {
            let [r, g, b, a] = target.get_pixel(region.x + col, region.y + row).unwrap_or([0; 4]);
            pixels[(row * region.width + col) as usize] =
                ColorU8::from_rgba(r, g, b, a).premultiply();
        }
    }
    pixels.to_vec()
}

/// Write back only the pixels the stroke changed, demultiplying.
fn store_region(
    target: &mut PixelBuffer,
    region: &Region,
    pixmap: &Pixmap,
    original: &[PremultipliedColorU8],
) {
    for (i, (after, before)) in pixmap.pixels().iter().zip(original).enumerate() {
        if after == before {
            continue;
        }
        let col = i as u32 % region.width;
        let row = i as u32 / region.width;
        let c = after.demultiply();
        target.put_pixel(region.x + col, region.y + row, [c.red(), c.green(), c.blue(), c.alpha()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdab_core::shapes::SerializableColor;
    use kurbo::Point;

    fn red_style(width: f64) -> StrokeStyle {
        StrokeStyle::new(SerializableColor::new(255, 0, 0, 255), width)
    }

    /// Aliasing off so covered pixels carry the exact stroke color.
    fn renderer() -> ShapeRenderer {
        ShapeRenderer::new().with_anti_alias(false)
    }

    fn blank() -> PixelBuffer {
        PixelBuffer::new(100, 100).unwrap()
    }

    #[test]
    fn test_render_line() {
        let mut target = blank();
        let line = ShapeDetection::Line {
            start: Point::new(10.0, 50.0),
            end: Point::new(90.0, 50.0),
        };
        assert!(renderer().render_shape(&mut target, &line, &red_style(4.0)).unwrap());
        assert_eq!(target.get_pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(50, 10), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_round_caps_extend_line() {
        let mut target = blank();
        let line = ShapeDetection::Line {
            start: Point::new(20.0, 50.0),
            end: Point::new(80.0, 50.0),
        };
        renderer().render_shape(&mut target, &line, &red_style(10.0)).unwrap();
        // Cap radius 5 reaches past the end point.
        assert_eq!(target.get_pixel(82, 50), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(90, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_render_circle_is_stroke_only() {
        let mut target = blank();
        let circle = ShapeDetection::Circle {
            center: Point::new(50.0, 50.0),
            radius: 30.0,
        };
        renderer().render_shape(&mut target, &circle, &red_style(4.0)).unwrap();
        assert_eq!(target.get_pixel(50, 50), Some([0, 0, 0, 0]));
        assert_eq!(target.get_pixel(79, 50), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(50, 20), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_rect_outline() {
        let mut target = blank();
        let rect = ShapeDetection::Rect {
            x: 20.0,
            y: 30.0,
            width: 60.0,
            height: 40.0,
        };
        renderer().render_shape(&mut target, &rect, &red_style(4.0)).unwrap();
        assert_eq!(target.get_pixel(50, 30), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(20, 50), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(50, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_render_triangle_closes() {
        let mut target = blank();
        let triangle = ShapeDetection::Triangle {
            points: [Point::new(10.0, 90.0), Point::new(90.0, 90.0), Point::new(50.0, 10.0)],
        };
        renderer().render_shape(&mut target, &triangle, &red_style(4.0)).unwrap();
        // Midpoint of the closing edge (50, 10) -> (10, 90).
        assert_eq!(target.get_pixel(30, 50), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(50, 70), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_anti_aliased_line() {
        let mut target = blank();
        let line = ShapeDetection::Line {
            start: Point::new(10.0, 50.0),
            end: Point::new(90.0, 50.0),
        };
        ShapeRenderer::new().render_shape(&mut target, &line, &red_style(6.0)).unwrap();
        let [r, g, b, a] = target.get_pixel(50, 50).unwrap();
        assert!(r >= 250 && g == 0 && b == 0 && a >= 250);
    }

    #[test]
    fn test_not_detected_is_noop() {
        let mut target = blank();
        let before = target.clone();
        let drawn = ShapeRenderer::new()
            .render_shape(&mut target, &ShapeDetection::NotDetected, &red_style(4.0))
            .unwrap();
        assert!(!drawn);
        assert_eq!(target, before);
    }

    #[test]
    fn test_invisible_style_is_noop() {
        let mut target = blank();
        let before = target.clone();
        let line = ShapeDetection::Line {
            start: Point::new(10.0, 50.0),
            end: Point::new(90.0, 50.0),
        };
        let renderer = ShapeRenderer::new();
        assert!(!renderer.render_shape(&mut target, &line, &red_style(0.0)).unwrap());
        let clear = StrokeStyle::new(SerializableColor::transparent(), 4.0);
        assert!(!renderer.render_shape(&mut target, &line, &clear).unwrap());
        assert_eq!(target, before);
    }

    #[test]
    fn test_offscreen_shape_is_noop() {
        let mut target = blank();
        let circle = ShapeDetection::Circle {
            center: Point::new(500.0, 500.0),
            radius: 20.0,
        };
        assert!(!ShapeRenderer::new().render_shape(&mut target, &circle, &red_style(4.0)).unwrap());
    }

    #[test]
    fn test_untouched_pixels_are_preserved() {
        let mut target = PixelBuffer::filled(100, 100, [10, 200, 30, 7]).unwrap();
        let line = ShapeDetection::Line {
            start: Point::new(10.0, 50.0),
            end: Point::new(90.0, 50.0),
        };
        ShapeRenderer::new().render_shape(&mut target, &line, &red_style(2.0)).unwrap();
        // Low-alpha pixels inside the dirty region survive without rounding drift.
        assert_eq!(target.get_pixel(50, 47), Some([10, 200, 30, 7]));
    }

    #[test]
    fn test_render_freehand_outcome() {
        let mut target = blank();
        let freehand = Freehand::from_points(vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(50.0, 60.0),
        ])
        .with_style(red_style(4.0));
        let renderer = ShapeRenderer::new().with_anti_alias(false);
        assert!(renderer.render_outcome(&mut target, &StrokeOutcome::Freehand(freehand)).unwrap());
        assert_eq!(target.get_pixel(30, 10), Some([255, 0, 0, 255]));
        assert_eq!(target.get_pixel(50, 40), Some([255, 0, 0, 255]));
        let smudged = StrokeOutcome::Smudged { dabs: 3 };
        assert!(!renderer.render_outcome(&mut target, &smudged).unwrap());
    }
}
