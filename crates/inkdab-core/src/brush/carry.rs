//! Per-stroke carried pixels.

use super::blend::{blend_pixels, resize_pixels};
use super::clamp_unit;
use crate::raster::PixelBuffer;

/// State of one in-flight smudge stroke.
///
/// Owned by exactly one stroke; [`SmudgeTool::end`](super::SmudgeTool::end)
/// must run before it is reused.
#[derive(Debug, Clone, Default)]
pub struct SmudgeState {
    /// Pixels picked up so far and dragged along the stroke.
    pub(crate) carried_pixels: Option<PixelBuffer>,
    /// How strongly the stroke holds on to older color (0.0 - 1.0).
    pub(crate) strength: f64,
    /// Whether the stroke has an initial sample to paint with.
    pub(crate) has_sample: bool,
}

impl SmudgeState {
    /// Create an idle state with the given (clamped) strength.
    pub fn new(strength: f64) -> Self {
        Self {
            carried_pixels: None,
            strength: clamp_unit(strength),
            has_sample: false,
        }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn has_sample(&self) -> bool {
        self.has_sample
    }

    pub fn carried_pixels(&self) -> Option<&PixelBuffer> {
        self.carried_pixels.as_ref()
    }

    /// Fold a fresh sample into the carried pixels.
    ///
    /// The first sample is adopted as-is. Later samples define the canonical
    /// size: the carried buffer is rescaled to match before mixing with
    /// `ratio` (clamped to `[0, 1]`).
    pub fn update_carried_pixels(&mut self, sample: PixelBuffer, ratio: f64) {
        let Some(carried) = self.carried_pixels.as_mut() else {
            self.carried_pixels = Some(sample);
            return;
        };
        if !carried.same_size(&sample) {
            *carried = resize_pixels(carried, sample.width(), sample.height());
        }
        blend_pixels(carried, &sample, ratio);
    }

    /// Drop the carried pixels and return to idle.
    pub fn clear(&mut self) {
        self.carried_pixels = None;
        self.has_sample = false;
    }
}
