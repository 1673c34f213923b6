//! Compositing the carried pixels onto the target raster.

use super::blend::resize_pixels;
use super::carry::SmudgeState;
use super::sampler::apply_circular_mask;
use super::{brush_extent, brush_origin, clamp_unit};
use crate::raster::PixelBuffer;
use image::imageops;
use kurbo::Point;

/// Paint one smudge dab centred on `center`.
///
/// Does nothing until the stroke has a sample, or when `size` rounds to
/// zero. The carried pixels are scaled to the dab size, re-masked, faded by
/// `opacity` (alpha only) and composited source-over.
pub fn smudge_dab(
    target: &mut PixelBuffer,
    state: &SmudgeState,
    center: Point,
    size: f64,
    opacity: f64,
) {
    if !state.has_sample() {
        return;
    }
    let Some(carried) = state.carried_pixels() else {
        return;
    };
    let Some(extent) = brush_extent(size) else {
        return;
    };
    let Some((origin_x, origin_y)) = brush_origin(center, extent) else {
        return;
    };

    // Scaling softens the mask edge, so the mask always runs again.
    let mut dab = resize_pixels(carried, extent, extent);
    apply_circular_mask(&mut dab);
    apply_opacity(&mut dab, clamp_unit(opacity));

    log::trace!("smudge dab {}px at ({}, {})", extent, origin_x, origin_y);
    imageops::overlay(target.as_image_mut(), dab.as_image(), origin_x, origin_y);
}

fn apply_opacity(buffer: &mut PixelBuffer, opacity: f64) {
    if opacity >= 1.0 {
        return;
    }
    for pixel in buffer.as_image_mut().pixels_mut() {
        pixel.0[3] = (f64::from(pixel.0[3]) * opacity).round() as u8;
    }
}
