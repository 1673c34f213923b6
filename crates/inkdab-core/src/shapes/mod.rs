//! Stroke styling and the freehand stroke model.

mod freehand;

pub use freehand::Freehand;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Appearance of a pen stroke, shared by the freehand path and any shape it
/// is recognized as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width in pixels.
    pub width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 2.0,
            opacity: 1.0,
        }
    }
}

impl StrokeStyle {
    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }

    /// Get the stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        let opacity = if self.opacity.is_nan() { 0.0 } else { self.opacity.clamp(0.0, 1.0) };
        let rgba = self.stroke().to_rgba8();
        let alpha = (f64::from(rgba.a) * opacity).round() as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }

    /// Whether a stroke with this style would leave any mark.
    pub fn is_visible(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.stroke_with_opacity().to_rgba8().a > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_round_trip() {
        let color = SerializableColor::new(12, 34, 56, 78);
        let peniko_color: Color = color.into();
        assert_eq!(SerializableColor::from(peniko_color), color);
    }

    #[test]
    fn test_stroke_with_opacity() {
        let mut style = StrokeStyle::new(SerializableColor::new(255, 0, 0, 200), 3.0);
        style.opacity = 0.5;
        let rgba = style.stroke_with_opacity().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 100));
    }

    #[test]
    fn test_visibility() {
        assert!(StrokeStyle::default().is_visible());
        assert!(!StrokeStyle::new(SerializableColor::black(), 0.0).is_visible());
        assert!(!StrokeStyle::new(SerializableColor::transparent(), 4.0).is_visible());
    }
}
