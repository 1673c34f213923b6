//! Per-channel linear mixing and resizing of pixel buffers.

use super::clamp_unit;
use crate::raster::PixelBuffer;
use image::imageops::{self, FilterType};

/// Mix `src` into `dst`: `dst = dst * (1 - ratio) + src * ratio`, per channel.
///
/// Both buffers are expected to have the same dimensions; only the
/// overlapping byte range is touched otherwise.
pub fn blend_pixels(dst: &mut PixelBuffer, src: &PixelBuffer, ratio: f64) {
    debug_assert!(dst.same_size(src), "blend_pixels on mismatched buffers");
    let ratio = clamp_unit(ratio);
    if ratio == 0.0 {
        return;
    }
    let keep = 1.0 - ratio;
    for (d, s) in dst.as_raw_mut().iter_mut().zip(src.as_raw()) {
        *d = (f64::from(*d) * keep + f64::from(*s) * ratio).round() as u8;
    }
}

/// Scale a buffer to `width`x`height` through a bilinear intermediate raster.
pub fn resize_pixels(buffer: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    if width == 0 || height == 0 {
        return PixelBuffer::empty();
    }
    if buffer.width() == width && buffer.height() == height {
        return buffer.clone();
    }
    PixelBuffer::wrap(imageops::resize(buffer.as_image(), width, height, FilterType::Triangle))
}
