//! Stroke files: a recorded pointer path plus the pen style.

use crate::error::{AppError, AppResult};
use inkdab_core::{Freehand, SerializableColor, StrokeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `{ "points": [{ "x": .., "y": .. }, ...], "style": { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeFile {
    pub points: Vec<Point>,
    #[serde(default)]
    pub style: StrokeStyle,
}

impl StrokeFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let stroke = Self::from_json(&json)?;
        log::debug!("Loaded {} points from {}", stroke.points.len(), path.display());
        Ok(stroke)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_freehand(&self) -> Freehand {
        Freehand::from_points(self.points.clone()).with_style(self.style.clone())
    }

    /// Bounding box of the points grown by half the stroke width.
    pub fn extent(&self) -> Rect {
        let half = if self.style.width.is_finite() { self.style.width.max(0.0) / 2.0 } else { 0.0 };
        self.to_freehand().bounds().inflate(half, half)
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_color(text: &str) -> AppResult<SerializableColor> {
    let hex = text.trim().trim_start_matches('#');
    let invalid = || AppError::InvalidColor(text.to_string());
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(SerializableColor::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}
