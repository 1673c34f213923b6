use inkdab_core::RasterError;
use inkdab_render::RenderError;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
