//! Circular pixel sampling from a source raster.

use super::{brush_extent, brush_origin};
use crate::raster::PixelBuffer;
use kurbo::Point;

/// Copy the `size`x`size` square centred on `center` out of `source`.
///
/// Parts of the square that fall outside the source stay transparent, and
/// everything outside the inscribed circle is masked to alpha 0. A square
/// that misses the source entirely (or a size that rounds to zero) yields
/// [`PixelBuffer::empty`].
pub fn sample(source: &PixelBuffer, center: Point, size: f64) -> PixelBuffer {
    let Some(extent) = brush_extent(size) else {
        return PixelBuffer::empty();
    };
    let Some((origin_x, origin_y)) = brush_origin(center, extent) else {
        return PixelBuffer::empty();
    };

    let source_width = i64::from(source.width());
    let source_height = i64::from(source.height());
    let extent_i = i64::from(extent);

    let x0 = origin_x.max(0);
    let y0 = origin_y.max(0);
    let x1 = origin_x.saturating_add(extent_i).min(source_width);
    let y1 = origin_y.saturating_add(extent_i).min(source_height);
    if x0 >= x1 || y0 >= y1 {
        return PixelBuffer::empty();
    }

    let mut out = PixelBuffer::transparent(extent, extent);
    let row_bytes = ((x1 - x0) * 4) as usize;
    let src = source.as_raw();
    let dst = out.as_raw_mut();
    for sy in y0..y1 {
        let src_start = ((sy * source_width + x0) * 4) as usize;
        let dst_start = (((sy - origin_y) * extent_i + (x0 - origin_x)) * 4) as usize;
        dst[dst_start..dst_start + row_bytes]
            .copy_from_slice(&src[src_start..src_start + row_bytes]);
    }

    apply_circular_mask(&mut out);
    out
}

/// Zero the alpha of every pixel whose centre lies outside the inscribed circle.
pub fn apply_circular_mask(buffer: &mut PixelBuffer) {
    let center_x = f64::from(buffer.width()) / 2.0;
    let center_y = f64::from(buffer.height()) / 2.0;
    let radius = center_x.min(center_y);
    let radius_sq = radius * radius;

    for (x, y, pixel) in buffer.as_image_mut().enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - center_x;
        let dy = f64::from(y) + 0.5 - center_y;
        if dx * dx + dy * dy > radius_sq {
            pixel.0[3] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outside_mask(buffer: &PixelBuffer, x: u32, y: u32) -> bool {
        let c = f64::from(buffer.width()) / 2.0;
        let dx = f64::from(x) + 0.5 - c;
        let dy = f64::from(y) + 0.5 - c;
        dx * dx + dy * dy > c * c
    }

    #[test]
    fn test_sample_has_requested_size() {
        let source = PixelBuffer::filled(64, 64, [10, 20, 30, 255]).unwrap();
        let sampled = sample(&source, Point::new(32.0, 32.0), 16.0);
        assert_eq!(sampled.width(), 16);
        assert_eq!(sampled.height(), 16);
        assert_eq!(sampled.as_raw().len(), 16 * 16 * 4);
        assert_eq!(sampled.get_pixel(8, 8), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_sample_masks_outside_circle() {
        let source = PixelBuffer::filled(64, 64, [200, 100, 50, 255]).unwrap();
        let sampled = sample(&source, Point::new(30.0, 30.0), 12.0);
        for y in 0..sampled.height() {
            for x in 0..sampled.width() {
                let alpha = sampled.get_pixel(x, y).unwrap()[3];
                if outside_mask(&sampled, x, y) {
                    assert_eq!(alpha, 0, "pixel ({x}, {y}) should be masked");
                } else {
                    assert_eq!(alpha, 255, "pixel ({x}, {y}) should be kept");
                }
            }
        }
        assert_eq!(sampled.get_pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn test_sample_pads_out_of_bounds() {
        let source = PixelBuffer::filled(20, 20, [255, 0, 0, 255]).unwrap();
        // Origin (-5, -5): left and top halves hang off the raster.
        let sampled = sample(&source, Point::new(0.0, 0.0), 10.0);
        assert_eq!(sampled.width(), 10);
        assert_eq!(sampled.get_pixel(2, 5), Some([0, 0, 0, 0]));
        assert_eq!(sampled.get_pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(sampled.get_pixel(6, 6), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_sample_fully_outside_is_empty() {
        let source = PixelBuffer::filled(20, 20, [255, 255, 255, 255]).unwrap();
        let sampled = sample(&source, Point::new(-100.0, 50.0), 8.0);
        assert_eq!((sampled.width(), sampled.height()), (1, 1));
        assert_eq!(sampled.get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_sample_far_off_raster_is_empty() {
        let source = PixelBuffer::filled(20, 20, [255, 255, 255, 255]).unwrap();
        let far = [
            Point::new(1.0e19, 5.0),
            Point::new(5.0, -1.0e19),
            Point::new(f64::MAX, f64::MAX),
        ];
        for center in far {
            let sampled = sample(&source, center, 8.0);
            assert_eq!(sampled, PixelBuffer::empty());
        }
        // Still within exact coordinates, just nowhere near the raster.
        let sampled = sample(&source, Point::new(4.0e15, 5.0), 8.0);
        assert_eq!(sampled, PixelBuffer::empty());
    }

    #[test]
    fn test_sample_zero_size_is_empty() {
        let source = PixelBuffer::filled(20, 20, [255, 255, 255, 255]).unwrap();
        let sampled = sample(&source, Point::new(10.0, 10.0), 0.3);
        assert_eq!((sampled.width(), sampled.height()), (1, 1));
    }

    #[test]
    fn test_sample_copies_offset_region() {
        let mut source = PixelBuffer::new(10, 10).unwrap();
        source.put_pixel(5, 5, [1, 2, 3, 255]);
        // extent 4 centred on (5, 5): origin (3, 3), so (5, 5) lands at (2, 2).
        let sampled = sample(&source, Point::new(5.0, 5.0), 4.0);
        assert_eq!(sampled.get_pixel(2, 2), Some([1, 2, 3, 255]));
    }
}
