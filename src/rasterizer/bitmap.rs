// src/rasterizer/bitmap.rs

//! Bitmap fonts and the rasterizer that blits them.
//!
//! A bitmap font is a two-tone sheet: letter forms drawn in any color on a
//! background of the mask color. When a glyph is requested its cell is
//! recolored with a chroma key. Pixels matching the mask become fully
//! transparent. Every other pixel is ANDed channel-wise with the glyph's
//! foreground color and made opaque, so a white letter form takes on the
//! foreground color exactly.

use super::{PixelImage, Rasterizer};
use crate::buffer::GlyphBuffer;
use crate::color::Rgba;
use crate::error::{GridError, Result};
use crate::glyph::Glyph;
use log::{debug, trace};

#[derive(Debug, Clone)]
pub struct BitmapFont {
    cells: Vec<PixelImage>,
    min_code_point: u32,
    cell_width: usize,
    cell_height: usize,
    mask: Rgba,
}

impl BitmapFont {
    /// Cuts `count` cells out of a sheet laid out as a square grid, row-major,
    /// starting at `min_code_point`.
    ///
    /// Any space between cells is treated as a gutter: each grid slot is
    /// `sheet.width() / side` pixels wide, of which the first `cell_width`
    /// belong to the glyph (likewise vertically).
    ///
    /// # Errors
    /// `GridError::InvalidFontSheet` if `count` is not a perfect square or the
    /// sheet is too small for the requested cells.
    pub fn from_sheet(
        sheet: &PixelImage,
        cell_width: usize,
        cell_height: usize,
        min_code_point: u32,
        count: usize,
    ) -> Result<Self> {
        let side = (count as f64).sqrt() as usize;
        if count == 0 || side * side != count {
            return Err(GridError::InvalidFontSheet(format!(
                "glyph count {} does not form a square grid",
                count
            )));
        }
        let slot_width = sheet.width() / side;
        let slot_height = sheet.height() / side;
        if slot_width < cell_width || slot_height < cell_height {
            return Err(GridError::InvalidFontSheet(format!(
                "{}x{} sheet cannot hold {} cells of {}x{}",
                sheet.width(),
                sheet.height(),
                count,
                cell_width,
                cell_height
            )));
        }

        let mut cells = Vec::with_capacity(count);
        for row in 0..side {
            for col in 0..side {
                let cell = sheet
                    .crop(col * slot_width, row * slot_height, cell_width, cell_height)
                    .ok_or_else(|| {
                        GridError::InvalidFontSheet(format!("cell ({}, {}) is off the sheet", row, col))
                    })?;
                cells.push(cell);
            }
        }
        debug!(
            "BitmapFont: loaded {} cells of {}x{} (gutter {}x{}) from U+{:04X}",
            count,
            cell_width,
            cell_height,
            slot_width - cell_width,
            slot_height - cell_height,
            min_code_point
        );
        Self::from_cells(cells, min_code_point)
    }

    /// Builds a font from cells that are already split, the first one for
    /// `min_code_point`.
    ///
    /// # Errors
    /// `GridError::InvalidFontSheet` if there are no cells or they differ in size.
    pub fn from_cells(cells: Vec<PixelImage>, min_code_point: u32) -> Result<Self> {
        let first = cells
            .first()
            .ok_or_else(|| GridError::InvalidFontSheet("font has no cells".to_string()))?;
        let (cell_width, cell_height) = (first.width(), first.height());
        if let Some(index) = cells
            .iter()
            .position(|c| c.width() != cell_width || c.height() != cell_height)
        {
            return Err(GridError::InvalidFontSheet(format!(
                "cell {} is not {}x{}",
                index, cell_width, cell_height
            )));
        }
        Ok(Self {
            cells,
            min_code_point,
            cell_width,
            cell_height,
            mask: Rgba::BLACK,
        })
    }

    /// Uses `mask` instead of black as the transparent color.
    pub fn with_mask(mut self, mask: Rgba) -> Self {
        self.mask = mask;
        self
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    pub fn cell_height(&self) -> usize {
        self.cell_height
    }

    pub fn mask(&self) -> Rgba {
        self.mask
    }

    /// Highest code point the font has a cell for.
    pub fn max_code_point(&self) -> u32 {
        self.min_code_point + self.cells.len() as u32 - 1
    }

    fn cell_for(&self, c: char) -> Option<&PixelImage> {
        let index = (c as u32).checked_sub(self.min_code_point)?;
        self.cells.get(index as usize)
    }

    /// The recolored image for `glyph`.
    ///
    /// Returns `Ok(None)` for `'\0'`. A character without a cell falls back
    /// to its upper-case form before failing.
    ///
    /// # Errors
    /// `GridError::UnsupportedCharacter` if neither form has a cell.
    pub fn glyph_image(&self, glyph: &Glyph) -> Result<Option<PixelImage>> {
        if glyph.c == '\0' {
            return Ok(None);
        }
        let cell = self
            .cell_for(glyph.c)
            .or_else(|| {
                let mut upper = glyph.c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) if u != glyph.c => self.cell_for(u),
                    _ => None,
                }
            })
            .ok_or(GridError::UnsupportedCharacter {
                character: glyph.c,
                min: self.min_code_point,
                max: self.max_code_point(),
            })?;
        Ok(Some(self.recolor(cell, glyph.fg())))
    }

    /// Applies the chroma key to `cell`, tinting the visible pixels with `color`.
    pub fn recolor(&self, cell: &PixelImage, color: Rgba) -> PixelImage {
        let mut out = PixelImage::new(cell.width(), cell.height());
        for y in 0..cell.height() {
            for x in 0..cell.width() {
                let Some(pix) = cell.pixel(x, y) else { continue };
                let recolored = if pix.same_rgb(&self.mask) {
                    Rgba::new(pix.r & color.r, pix.g & color.g, pix.b & color.b, 0)
                } else {
                    Rgba::opaque(pix.r & color.r, pix.g & color.g, pix.b & color.b)
                };
                out.set_pixel(x, y, recolored);
            }
        }
        out
    }
}

/// Rasterizer drawing every cell from a `BitmapFont`.
pub struct BitmapRasterizer {
    font: BitmapFont,
}

impl BitmapRasterizer {
    pub fn new(font: BitmapFont) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &BitmapFont {
        &self.font
    }
}

impl Rasterizer for BitmapRasterizer {
    fn cell_size(&self) -> (usize, usize) {
        (self.font.cell_width, self.font.cell_height)
    }

    fn rasterize(
        &mut self,
        buffer: GlyphBuffer,
        width_px: usize,
        height_px: usize,
    ) -> Result<PixelImage> {
        let (cell_width, cell_height) = self.cell_size();
        let mut image = PixelImage::new(width_px, height_px);

        for (line, row) in buffer.lines().enumerate() {
            let y_px = line * cell_height;
            if y_px >= height_px {
                break;
            }
            for (position, glyph) in row.iter().enumerate() {
                let x_px = position * cell_width;
                if x_px >= width_px {
                    break;
                }
                let (fg, bg) = glyph.attr.effective_colors();
                if !bg.is_transparent() {
                    image.fill_rect(x_px, y_px, cell_width, cell_height, bg);
                }
                let colored = Glyph::with_colors(glyph.c, fg, bg);
                if let Some(cell) = self.font.glyph_image(&colored)? {
                    image.blit(&cell, x_px, y_px);
                }
            }
        }
        trace!(
            "BitmapRasterizer: rasterized {} into {}x{} px",
            buffer.bounds(),
            width_px,
            height_px
        );
        Ok(image)
    }
}
