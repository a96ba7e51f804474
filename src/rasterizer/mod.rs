// src/rasterizer/mod.rs

//! Turning a `GlyphBuffer` into pixels.
//!
//! A `Rasterizer` takes ownership of one tick's buffer and produces a
//! `PixelImage` sized for the display surface. Two strategies ship:
//!
//! - `DirectRasterizer` draws each cell from a `FontDriver`'s coverage masks.
//! - `BitmapRasterizer` blits cells cut from a two-tone bitmap font sheet,
//!   using the sheet's mask color as a chroma key for transparency.
//!
//! Both map the cell at buffer-relative `(line, position)` to the pixel
//! rectangle starting at `(position * cell_width, line * cell_height)`.

pub mod bitmap;
pub mod direct;
pub mod font_driver;
pub mod headless_font_driver;

pub use bitmap::{BitmapFont, BitmapRasterizer};
pub use direct::DirectRasterizer;
pub use font_driver::{Coverage, FontDriver, FontMetrics};
pub use headless_font_driver::HeadlessFontDriver;

use crate::buffer::GlyphBuffer;
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Region;

/// An RGBA8 image, row-major, straight alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelImage {
    /// A fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let data = color.to_bytes().repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps existing RGBA bytes. Returns `None` unless `data` holds exactly
    /// `width * height` pixels.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 4)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[idx..idx + 4]);
        Some(Rgba::from_bytes(bytes))
    }

    /// Writes one pixel. Coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Blends `color` over one pixel with the given coverage.
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba, coverage: u8) {
        if let Some(dst) = self.pixel(x, y) {
            self.set_pixel(x, y, color.blend_over(dst, coverage));
        }
    }

    /// Fills a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgba) {
        let bytes = color.to_bytes();
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            let start = (row * self.width + x) * 4;
            let end = (row * self.width + x_end) * 4;
            for pixel in self.data[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&bytes);
            }
        }
    }

    /// Copies `src` onto this image with its top-left at `(x, y)`, clipped to
    /// the image. Source pixels with alpha 0 are skipped, so chroma-keyed
    /// areas leave the destination untouched.
    pub fn blit(&mut self, src: &PixelImage, x: usize, y: usize) {
        for row in 0..src.height {
            let dest_y = y + row;
            if dest_y >= self.height {
                break;
            }
            let copy_width = src.width.min(self.width.saturating_sub(x));
            for col in 0..copy_width {
                let s = (row * src.width + col) * 4;
                if src.data[s + 3] == 0 {
                    continue;
                }
                let d = (dest_y * self.width + x + col) * 4;
                self.data[d..d + 4].copy_from_slice(&src.data[s..s + 4]);
            }
        }
    }

    /// A copy of the `width` x `height` rectangle at `(x, y)`, or `None` if
    /// it does not fit inside the image.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Option<PixelImage> {
        if x + width > self.width || y + height > self.height {
            return None;
        }
        let mut data = Vec::with_capacity(width * height * 4);
        for row in y..y + height {
            let start = (row * self.width + x) * 4;
            data.extend_from_slice(&self.data[start..start + width * 4]);
        }
        Some(PixelImage {
            width,
            height,
            data,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Converts a glyph grid into pixels.
pub trait Rasterizer: Send {
    /// Pixel width and height of one grid cell.
    fn cell_size(&self) -> (usize, usize);

    /// Renders `buffer` into an image of `width_px` x `height_px`. Cells
    /// falling outside the image are clipped.
    fn rasterize(
        &mut self,
        buffer: GlyphBuffer,
        width_px: usize,
        height_px: usize,
    ) -> Result<PixelImage>;

    /// Pixel size of an image covering `bounds` exactly.
    fn pixel_size_for(&self, bounds: Region) -> (usize, usize) {
        let (cell_width, cell_height) = self.cell_size();
        (bounds.width() * cell_width, bounds.height() * cell_height)
    }
}
