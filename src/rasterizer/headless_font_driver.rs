//! Deterministic font driver with no font files behind it.
//!
//! Each printable character gets a striped pattern derived from its code point,
//! so different characters produce different pixels and tests can assert on
//! them without a real font.

use crate::rasterizer::font_driver::{Coverage, FontDriver, FontMetrics};

#[derive(Debug, Clone)]
pub struct HeadlessFontDriver {
    metrics: FontMetrics,
}

impl HeadlessFontDriver {
    pub fn new(cell_width: usize, cell_height: usize) -> Self {
        let ascent = cell_height * 3 / 4;
        Self {
            metrics: FontMetrics {
                advance: cell_width,
                ascent,
                descent: cell_height - ascent,
            },
        }
    }
}

impl FontDriver for HeadlessFontDriver {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn rasterize_glyph(&self, ch: char) -> Option<Coverage> {
        if ch == '\0' || ch.is_whitespace() {
            return None;
        }
        let width = self.metrics.advance;
        let height = self.metrics.line_height();
        // Bit 0 always set so every printable character covers something.
        let pattern = (ch as u32 % 255) as u8 | 1;
        let mut alpha = vec![0u8; width * height];

        // Glyph box: one pixel of padding on the left, top and right, bottom at the baseline.
        for y in 1..self.metrics.ascent {
            for x in 1..width.saturating_sub(1) {
                if pattern >> ((x + y) % 8) & 1 == 1 {
                    alpha[y * width + x] = 255;
                }
            }
        }
        Some(Coverage {
            width,
            height,
            alpha,
        })
    }
}
