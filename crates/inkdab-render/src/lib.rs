//! InkDab Render Library
//!
//! Strokes recognized shapes and freehand paths onto an inkdab raster.
//! Rendering runs on the CPU through tiny-skia.

mod renderer;

pub use renderer::{RenderError, RenderResult, ShapeRenderer};
