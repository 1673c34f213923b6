//! InkDab Core Library
//!
//! Raster smudge brush and quick-shape recognition for freehand strokes.
//! Everything here is synchronous and owns no global state: the caller owns
//! the raster, the per-stroke smudge state, and the accumulated points.

pub mod brush;
pub mod raster;
pub mod recognize;
pub mod shapes;
pub mod tools;

pub use brush::{BrushSettings, SmudgeState, SmudgeStroke, SmudgeTool, MAX_BRUSH_SIZE};
pub use raster::{PixelBuffer, RasterError, RasterResult};
pub use recognize::{
    detect_quick_shape, detect_quick_shape_with, RecognitionConfig, ShapeDetection, ShapeKind,
};
pub use shapes::{Freehand, SerializableColor, StrokeStyle};
pub use tools::{StrokeOutcome, ToolKind, ToolManager, ToolState};
