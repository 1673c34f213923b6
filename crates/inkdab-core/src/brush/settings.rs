//! Brush parameters.

use super::clamp_unit;
use serde::{Deserialize, Serialize};

/// Largest brush diameter in pixels. Bigger requests are clamped to this.
pub const MAX_BRUSH_SIZE: f64 = 1024.0;

/// Per-stroke smudge brush parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Brush diameter in pixels.
    pub size: f64,
    /// How long the brush holds on to picked-up color (0.0 - 1.0).
    pub strength: f64,
    /// Opacity of each dab (0.0 - 1.0).
    pub opacity: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 24.0,
            strength: 0.6,
            opacity: 1.0,
        }
    }
}

impl BrushSettings {
    pub fn new(size: f64, strength: f64, opacity: f64) -> Self {
        Self { size, strength, opacity }
    }

    /// Copy with every field forced into its valid range.
    pub fn sanitized(self) -> Self {
        let size = if self.size.is_finite() {
            self.size.clamp(0.0, MAX_BRUSH_SIZE)
        } else {
            0.0
        };
        Self {
            size,
            strength: clamp_unit(self.strength),
            opacity: clamp_unit(self.opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized() {
        let settings = BrushSettings::new(-5.0, 1.5, f64::NAN).sanitized();
        assert_eq!(settings, BrushSettings::new(0.0, 1.0, 0.0));

        let settings = BrushSettings::new(f64::INFINITY, 0.3, 0.7).sanitized();
        assert_eq!(settings.size, 0.0);
        assert_eq!(BrushSettings::new(5000.0, 0.3, 0.7).sanitized().size, MAX_BRUSH_SIZE);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: BrushSettings = serde_json::from_str(r#"{ "size": 40 }"#).unwrap();
        assert_eq!(settings.size, 40.0);
        assert_eq!(settings.strength, BrushSettings::default().strength);
        assert_eq!(settings.opacity, 1.0);
    }
}
