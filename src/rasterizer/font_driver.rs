//! Font driver seam used by the direct-draw rasterizer.
//!
//! A `FontDriver` answers two questions: how big a cell's glyph box is
//! (`metrics`), and what coverage mask a character has (`rasterize_glyph`).
//! Loading font files and shaping text live behind this trait.

/// Pixel metrics shared by every glyph of a monospace font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Horizontal distance between cell origins.
    pub advance: usize,
    /// Distance from the cell top to the baseline.
    pub ascent: usize,
    /// Distance from the baseline to the cell bottom.
    pub descent: usize,
}

impl FontMetrics {
    pub fn line_height(&self) -> usize {
        self.ascent + self.descent
    }
}

/// A glyph's coverage: one alpha value (0-255) per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>,
}

impl Coverage {
    pub fn at(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.alpha[y * self.width + x]
        } else {
            0
        }
    }
}

pub trait FontDriver: Send {
    fn metrics(&self) -> FontMetrics;

    /// Coverage mask for `ch` over the font's line box: `advance` wide, the
    /// top row `ascent` pixels above the baseline.
    ///
    /// Returns `None` for characters with nothing to draw.
    fn rasterize_glyph(&self, ch: char) -> Option<Coverage>;
}
