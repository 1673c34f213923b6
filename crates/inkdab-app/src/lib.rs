//! InkDab Application
//!
//! Command-line front end: loads stroke files and PNG rasters, runs quick-shape
//! recognition, the renderer and the smudge brush, and writes the results.

mod commands;
mod config;
mod error;
mod stroke_file;

pub use commands::{detect, load_raster, render, save_raster, smudge, RenderOptions};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use stroke_file::{parse_color, StrokeFile};
