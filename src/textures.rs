//! Texture data for the demo scenes.
//!
//! [`TextureConfig`] holds raw RGBA pixels plus sampling configuration,
//! loaded from an image file or generated procedurally. The demo binaries
//! fall back to a procedural checkerboard when an asset is missing, so they
//! run from any working directory.
//!
//! # Supported formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// Address mode for texture wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Clamp to edge color (default).
    #[default]
    ClampToEdge,
    /// Repeat/tile the texture.
    Repeat,
    /// Mirror the texture at boundaries.
    MirrorRepeat,
}

/// Configuration for a single texture.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
    /// Address mode for UV coordinates outside 0-1.
    pub address_mode: AddressMode,
}

impl TextureConfig {
    /// Create a texture configuration from raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
            address_mode: AddressMode::ClampToEdge,
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let image = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self::from_rgba(image.into_raw(), width, height))
    }

    /// A two-color checkerboard, `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cells = cells.max(1);
        let cell_size = (size / cells).max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let parity = (x / cell_size + y / cell_size) % 2;
                let color = if parity == 0 { a } else { b };
                data.extend_from_slice(&color);
            }
        }
        Self::from_rgba(data, size, size)
    }

    /// A 1x1 solid-color texture.
    pub fn solid(color: [u8; 4]) -> Self {
        Self::from_rgba(color.to_vec(), 1, 1)
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Set the address mode.
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_has_expected_dimensions_and_pattern() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];
        let tex = TextureConfig::checkerboard(8, 2, white, black);
        assert_eq!(tex.width, 8);
        assert_eq!(tex.height, 8);
        assert_eq!(tex.data.len(), 8 * 8 * 4);

        // Top-left cell is color a, the one to its right is color b.
        assert_eq!(&tex.data[0..4], &white);
        let right_cell = (4 * 4) as usize;
        assert_eq!(&tex.data[right_cell..right_cell + 4], &black);
    }

    #[test]
    fn solid_is_one_pixel() {
        let tex = TextureConfig::solid([10, 20, 30, 255]);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.data, vec![10, 20, 30, 255]);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = TextureConfig::load("/nonexistent/backdrop-texture.png");
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn from_rgba_validates_length() {
        TextureConfig::from_rgba(vec![0u8; 3], 1, 1);
    }
}
