//! The work behind each subcommand, kept free of argument parsing.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::stroke_file::StrokeFile;
use inkdab_core::{
    PixelBuffer, SerializableColor, ShapeDetection, StrokeOutcome, ToolKind, ToolManager,
};
use inkdab_render::ShapeRenderer;
use std::path::Path;

/// Output surface for [`render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Raster width; fits the stroke when `None`.
    pub width: Option<u32>,
    /// Raster height; fits the stroke when `None`.
    pub height: Option<u32>,
    pub background: SerializableColor,
    pub anti_alias: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            background: SerializableColor::transparent(),
            anti_alias: true,
        }
    }
}

/// Run quick-shape recognition on a recorded stroke.
pub fn detect(stroke: &StrokeFile, config: &AppConfig) -> ShapeDetection {
    let detection = stroke.to_freehand().recognize(&config.recognition);
    log::info!("Detected {:?}", detection.kind());
    detection
}

/// Replay the stroke with the quick-shape pen and draw the result onto a
/// fresh raster: the recognized primitive, or the freehand path otherwise.
pub fn render(
    stroke: &StrokeFile,
    config: &AppConfig,
    options: &RenderOptions,
) -> AppResult<(PixelBuffer, Option<StrokeOutcome>)> {
    let extent = stroke.extent();
    let width = options.width.unwrap_or_else(|| fit(extent.x1));
    let height = options.height.unwrap_or_else(|| fit(extent.y1));
    let mut target = PixelBuffer::filled(width, height, options.background.to_array())?;

    let mut tools = ToolManager::new();
    tools.set_tool(ToolKind::QuickShape);
    tools.current_style = stroke.style.clone();
    tools.recognition = config.recognition.clone();
    let outcome = replay(&mut tools, &mut target, stroke);

    if let Some(outcome) = &outcome {
        ShapeRenderer::new()
            .with_anti_alias(options.anti_alias)
            .render_outcome(&mut target, outcome)?;
    }
    Ok((target, outcome))
}

/// Drag the smudge brush along the stroke. Returns the number of dabs painted.
pub fn smudge(raster: &mut PixelBuffer, stroke: &StrokeFile, config: &AppConfig) -> usize {
    let mut tools = ToolManager::new();
    tools.set_tool(ToolKind::Smudge);
    tools.brush = config.brush.sanitized();
    match replay(&mut tools, raster, stroke) {
        Some(StrokeOutcome::Smudged { dabs }) => dabs,
        _ => 0,
    }
}

pub fn load_raster(path: &Path) -> AppResult<PixelBuffer> {
    let image = image::open(path)?.to_rgba8();
    log::debug!("Loaded {}x{} raster from {}", image.width(), image.height(), path.display());
    Ok(PixelBuffer::from_image(image)?)
}

pub fn save_raster(raster: &PixelBuffer, path: &Path) -> AppResult<()> {
    raster.as_image().save(path)?;
    log::info!("Wrote {}x{} raster to {}", raster.width(), raster.height(), path.display());
    Ok(())
}

fn replay(
    tools: &mut ToolManager,
    raster: &mut PixelBuffer,
    stroke: &StrokeFile,
) -> Option<StrokeOutcome> {
    let (first, rest) = stroke.points.split_first()?;
    tools.begin(raster, *first);
    for point in rest {
        tools.update(raster, *point);
    }
    tools.end()
}

fn fit(edge: f64) -> u32 {
    if edge.is_finite() && edge >= 1.0 { edge.ceil() as u32 } else { 1 }
}
