//! Smudge stroke lifecycle: begin, continue, end.

use super::carry::SmudgeState;
use super::dab::smudge_dab;
use super::sampler::sample;
use super::settings::BrushSettings;
use super::{brush_extent, brush_origin, clamp_unit};
use crate::raster::PixelBuffer;
use kurbo::Point;

/// Drives a smudge stroke over a caller-owned raster.
///
/// A stroke goes `Idle -> Active -> Idle`: [`begin`](Self::begin) picks up
/// the initial sample, every [`continue_stroke`](Self::continue_stroke)
/// paints the carried pixels at the new position and then picks up what is
/// there now, and [`end`](Self::end) releases the carried buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmudgeTool;

impl SmudgeTool {
    /// Start a stroke by sampling `source` at `at`.
    pub fn begin(source: &PixelBuffer, at: Point, size: f64, strength: f64) -> SmudgeState {
        let mut state = SmudgeState::new(strength);
        state.update_carried_pixels(sample(source, at, size), 1.0);
        state.has_sample = true;
        log::debug!(
            "smudge stroke started at ({:.1}, {:.1}), strength {:.2}",
            at.x,
            at.y,
            state.strength
        );
        state
    }

    /// Smear the carried pixels to `at`, then pick up the result.
    ///
    /// Returns `false` without touching the raster or the state when there
    /// is nothing to paint: no sample, a size that rounds to zero, or a
    /// position that is not a usable pixel coordinate.
    pub fn continue_stroke(
        target: &mut PixelBuffer,
        state: &mut SmudgeState,
        at: Point,
        size: f64,
        opacity: f64,
    ) -> bool {
        if !state.has_sample() {
            return false;
        }
        if brush_extent(size).and_then(|extent| brush_origin(at, extent)).is_none() {
            return false;
        }

        smudge_dab(target, state, at, size, clamp_unit(opacity));
        let picked_up = sample(target, at, size);
        let ratio = 1.0 - state.strength;
        state.update_carried_pixels(picked_up, ratio);
        true
    }

    /// Finish the stroke. Safe to call on any state.
    pub fn end(state: &mut SmudgeState) {
        if state.has_sample() {
            log::debug!("smudge stroke ended");
        }
        state.clear();
    }
}

/// A smudge stroke that ends itself when dropped.
///
/// Wraps a [`SmudgeState`] so the carried buffer is released on every exit
/// path, including early returns and unwinding.
#[derive(Debug)]
pub struct SmudgeStroke {
    state: SmudgeState,
    settings: BrushSettings,
}

impl SmudgeStroke {
    /// Begin a stroke on `source` with the given brush.
    pub fn begin(source: &PixelBuffer, at: Point, settings: BrushSettings) -> Self {
        let settings = settings.sanitized();
        let state = SmudgeTool::begin(source, at, settings.size, settings.strength);
        Self { state, settings }
    }

    /// Continue the stroke to `at` with the stroke's brush. Returns whether
    /// a dab was painted.
    pub fn continue_to(&mut self, target: &mut PixelBuffer, at: Point) -> bool {
        let BrushSettings { size, opacity, .. } = self.settings;
        SmudgeTool::continue_stroke(target, &mut self.state, at, size, opacity)
    }

    pub fn state(&self) -> &SmudgeState {
        &self.state
    }

    pub fn settings(&self) -> BrushSettings {
        self.settings
    }

    /// End the stroke now.
    pub fn finish(self) {}
}

impl Drop for SmudgeStroke {
    fn drop(&mut self) {
        SmudgeTool::end(&mut self.state);
    }
}
