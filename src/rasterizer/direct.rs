// src/rasterizer/direct.rs

//! Direct-draw rasterizer: paints every cell from a font driver's coverage
//! masks.

use super::font_driver::{Coverage, FontDriver, FontMetrics};
use super::{PixelImage, Rasterizer};
use crate::buffer::GlyphBuffer;
use crate::error::Result;
use crate::glyph::{AttrFlags, Glyph};
use log::{debug, trace, warn};
use std::collections::HashMap;

pub struct DirectRasterizer<D: FontDriver> {
    driver: D,
    metrics: FontMetrics,
    cell_width_px: usize,
    cell_height_px: usize,
    /// Coverage per character, including characters with none.
    glyph_cache: HashMap<char, Option<Coverage>>,
}

impl<D: FontDriver> DirectRasterizer<D> {
    /// Create a rasterizer drawing `cell_width_px` x `cell_height_px` cells.
    ///
    /// The font's line box is centered in the cell. A font larger than the
    /// cell is clipped at the cell edges.
    pub fn new(driver: D, cell_width_px: usize, cell_height_px: usize) -> Self {
        let metrics = driver.metrics();
        if metrics.advance > cell_width_px || metrics.line_height() > cell_height_px {
            warn!(
                "DirectRasterizer: font box {}x{} exceeds cell {}x{}, glyphs will be clipped",
                metrics.advance,
                metrics.line_height(),
                cell_width_px,
                cell_height_px
            );
        }
        Self {
            driver,
            metrics,
            cell_width_px,
            cell_height_px,
            glyph_cache: HashMap::new(),
        }
    }

    /// Create a rasterizer whose cells are exactly the font's advance by its
    /// line height.
    pub fn from_font_metrics(driver: D) -> Self {
        let metrics = driver.metrics();
        Self::new(driver, metrics.advance, metrics.line_height())
    }

    /// Clear the glyph cache and re-read the metrics (e.g., when the driver's font changes)
    pub fn clear_cache(&mut self) {
        self.glyph_cache.clear();
        self.metrics = self.driver.metrics();
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.len()
    }

    /// Offset of the font's line box inside a cell. The baseline sits
    /// `ascent` pixels below the box top.
    fn glyph_origin(&self) -> (usize, usize) {
        (
            self.cell_width_px.saturating_sub(self.metrics.advance) / 2,
            self.cell_height_px.saturating_sub(self.metrics.line_height()) / 2,
        )
    }

    fn draw_cell(&mut self, image: &mut PixelImage, glyph: Glyph, x_px: usize, y_px: usize) {
        let (fg, bg) = glyph.attr.effective_colors();
        let (width, height) = (self.cell_width_px, self.cell_height_px);

        if !bg.is_transparent() {
            image.fill_rect(x_px, y_px, width, height, bg);
        }

        if glyph.c != '\0' && !fg.is_transparent() {
            let (origin_x, origin_y) = self.glyph_origin();
            let driver = &self.driver;
            let coverage = self
                .glyph_cache
                .entry(glyph.c)
                .or_insert_with(|| driver.rasterize_glyph(glyph.c));
            if let Some(coverage) = coverage {
                let rows = coverage.height.min(height - origin_y);
                let columns = coverage.width.min(width - origin_x);
                for y in 0..rows {
                    for x in 0..columns {
                        let alpha = coverage.at(x, y);
                        if alpha > 0 {
                            image.blend_pixel(x_px + origin_x + x, y_px + origin_y + y, fg, alpha);
                        }
                    }
                }
            }
        }

        let flags = glyph.attr.flags;
        if flags.contains(AttrFlags::UNDERLINE) && height >= 2 {
            image.fill_rect(x_px, y_px + height - 2, width, 1, fg);
        }
        if flags.contains(AttrFlags::STRIKETHROUGH) {
            image.fill_rect(x_px, y_px + height / 2, width, 1, fg);
        }
    }
}

impl<D: FontDriver> Rasterizer for DirectRasterizer<D> {
    fn cell_size(&self) -> (usize, usize) {
        (self.cell_width_px, self.cell_height_px)
    }

    fn rasterize(
        &mut self,
        buffer: GlyphBuffer,
        width_px: usize,
        height_px: usize,
    ) -> Result<PixelImage> {
        let mut image = PixelImage::new(width_px, height_px);
        for (line, row) in buffer.lines().enumerate() {
            let y_px = line * self.cell_height_px;
            if y_px >= height_px {
                break;
            }
            for (position, glyph) in row.iter().enumerate() {
                let x_px = position * self.cell_width_px;
                if x_px >= width_px {
                    break;
                }
                self.draw_cell(&mut image, *glyph, x_px, y_px);
            }
        }
        trace!(
            "DirectRasterizer: rasterized {} into {}x{} px",
            buffer.bounds(),
            width_px,
            height_px
        );
        if self.glyph_cache.len() > 4096 {
            debug!("DirectRasterizer: glyph cache over 4096 entries, clearing");
            self.clear_cache();
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Canvas;
    use crate::color::Rgba;
    use crate::geometry::{Location, Region};
    use crate::rasterizer::HeadlessFontDriver;
    use test_log::test;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    fn rasterizer() -> DirectRasterizer<HeadlessFontDriver> {
        DirectRasterizer::new(HeadlessFontDriver::new(8, 16), 8, 16)
    }

    fn one_cell(glyph: Glyph) -> GlyphBuffer {
        let mut buffer = GlyphBuffer::new(Region::sized(1, 1));
        buffer.update_glyph(glyph, Location::ORIGIN);
        buffer
    }

    fn cell_pixels(image: &PixelImage) -> Vec<Rgba> {
        let mut pixels = Vec::new();
        for y in 0..16 {
            for x in 0..8 {
                pixels.push(image.pixel(x, y).unwrap());
            }
        }
        pixels
    }

    #[test]
    fn blank_buffer_stays_transparent() {
        let mut r = rasterizer();
        let image = r.rasterize(GlyphBuffer::new(Region::sized(2, 3)), 24, 32).unwrap();
        assert_eq!(image.width(), 24);
        assert!(image.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn background_fills_whole_cell() {
        let mut r = rasterizer();
        let image = r
            .rasterize(one_cell(Glyph::with_colors(' ', RED, BLUE)), 8, 16)
            .unwrap();
        assert!(cell_pixels(&image).iter().all(|p| *p == BLUE));
    }

    #[test]
    fn glyph_coverage_uses_foreground() {
        let mut r = rasterizer();
        let image = r.rasterize(one_cell(Glyph::new('A', RED)), 8, 16).unwrap();
        let pixels = cell_pixels(&image);
        assert!(pixels.contains(&RED));
        assert!(pixels.contains(&Rgba::TRANSPARENT));
        assert_eq!(r.cached_glyphs(), 1);
    }

    #[test]
    fn reverse_swaps_colors() {
        let mut r = rasterizer();
        let glyph = Glyph::with_colors(' ', RED, BLUE).with_flags(AttrFlags::REVERSE);
        let image = r.rasterize(one_cell(glyph), 8, 16).unwrap();
        assert!(cell_pixels(&image).iter().all(|p| *p == RED));
    }

    #[test]
    fn underline_and_strikethrough_draw_rows() {
        let mut r = rasterizer();
        let glyph = Glyph::new(' ', RED).with_flags(AttrFlags::UNDERLINE | AttrFlags::STRIKETHROUGH);
        let image = r.rasterize(one_cell(glyph), 8, 16).unwrap();
        assert!((0..8).all(|x| image.pixel(x, 14) == Some(RED)));
        assert!((0..8).all(|x| image.pixel(x, 8) == Some(RED)));
        assert_eq!(image.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    /// A font with a short line box and one lit pixel at the top-left of
    /// its box and one on the row just above the baseline.
    struct ShortFont;

    impl FontDriver for ShortFont {
        fn metrics(&self) -> FontMetrics {
            FontMetrics {
                advance: 6,
                ascent: 10,
                descent: 2,
            }
        }

        fn rasterize_glyph(&self, _ch: char) -> Option<Coverage> {
            let mut alpha = vec![0u8; 6 * 12];
            alpha[0] = 255;
            alpha[9 * 6] = 255;
            Some(Coverage {
                width: 6,
                height: 12,
                alpha,
            })
        }
    }

    fn lit_pixels(image: &PixelImage) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.pixel(x, y) != Some(Rgba::TRANSPARENT) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn glyphs_are_placed_by_font_metrics() {
        let mut r = DirectRasterizer::new(ShortFont, 8, 16);
        let image = r.rasterize(one_cell(Glyph::new('x', RED)), 8, 16).unwrap();
        // A 6x12 line box centered in an 8x16 cell starts at (1, 2), so the
        // baseline is at row 12 and the pixel above it at row 11.
        assert_eq!(lit_pixels(&image), vec![(1, 2), (1, 11)]);
    }

    #[test]
    fn cell_size_can_come_from_font_metrics() {
        let mut r = DirectRasterizer::from_font_metrics(ShortFont);
        assert_eq!(r.cell_size(), (6, 12));
        let image = r.rasterize(one_cell(Glyph::new('x', RED)), 6, 12).unwrap();
        assert_eq!(lit_pixels(&image), vec![(0, 0), (0, 9)]);
    }

    #[test]
    fn font_larger_than_cell_is_clipped() {
        let mut r = DirectRasterizer::new(ShortFont, 4, 8);
        let image = r.rasterize(one_cell(Glyph::new('x', RED)), 4, 8).unwrap();
        assert_eq!(lit_pixels(&image), vec![(0, 0)]);
    }

    #[test]
    fn cells_past_the_image_are_clipped() {
        let mut r = rasterizer();
        let mut buffer = GlyphBuffer::new(Region::sized(1, 4));
        buffer.update_string(
            &crate::glyph_string::GlyphString::plain("abcd", RED),
            Location::ORIGIN,
        );
        let image = r.rasterize(buffer, 12, 16).unwrap();
        assert_eq!(image.width(), 12);
        assert_eq!(r.pixel_size_for(Region::sized(1, 4)), (32, 16));
    }
}
