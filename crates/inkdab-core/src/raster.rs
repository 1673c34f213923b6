//! Straight-alpha RGBA raster shared by the brush and the renderer.

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Largest edge length accepted for a caller-supplied raster.
pub const MAX_RASTER_DIMENSION: u32 = 16_384;

/// Raster errors.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Surface unavailable: cannot allocate a {width}x{height} raster")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Row-major RGBA8 pixels with non-premultiplied alpha.
///
/// The byte length is always `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Create a fully transparent raster.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a raster where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> RasterResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        })
    }

    /// Wrap existing RGBA bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> RasterResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        match RgbaImage::from_raw(width, height, data) {
            Some(image) if actual == expected => Ok(Self { image }),
            _ => Err(RasterError::InvalidLength { expected, actual }),
        }
    }

    /// Adopt a decoded image.
    pub fn from_image(image: RgbaImage) -> RasterResult<Self> {
        check_dimensions(image.width(), image.height())?;
        Ok(Self { image })
    }

    /// The 1x1 transparent buffer returned for samples that miss the source.
    pub fn empty() -> Self {
        Self::transparent(1, 1)
    }

    /// Brush-sized scratch buffer. Callers bound the size themselves.
    pub(crate) fn transparent(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub(crate) fn wrap(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Check whether two buffers have the same dimensions.
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read a pixel, `None` when out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Write a pixel. Returns `false` when out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        match self.image.get_pixel_mut_checked(x, y) {
            Some(pixel) => {
                *pixel = Rgba(rgba);
                true
            }
            None => false,
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> RasterResult<()> {
    let too_large = width > MAX_RASTER_DIMENSION || height > MAX_RASTER_DIMENSION;
    if width == 0 || height == 0 || too_large {
        log::warn!("Refusing to allocate {}x{} raster", width, height);
        return Err(RasterError::SurfaceUnavailable { width, height });
    }
    Ok(())
}
