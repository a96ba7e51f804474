// src/buffer.rs

//! `GlyphBuffer`: one redraw's worth of glyphs, and the `Canvas` contract
//! components draw through.
//!
//! Writes and reads treat the buffer edge differently. Writing outside the
//! bounds is silently dropped, so components can draw without clipping
//! themselves. Reading outside the bounds is a caller bug and returns
//! `GridError::OutOfBoundsRead`.

use crate::error::{GridError, Result};
use crate::geometry::{Location, Region};
use crate::glyph::Glyph;
use crate::glyph_string::GlyphString;
use log::trace;

/// The write interface components use to place glyphs.
///
/// Out-of-bounds writes are no-ops, never errors.
pub trait Canvas {
    /// Overwrites the glyph at `location`.
    fn update_glyph(&mut self, glyph: Glyph, location: Location);

    /// Writes `string` left to right from `start`, dropping whatever passes the
    /// right edge.
    fn update_string(&mut self, string: &GlyphString, start: Location);

    /// Writes each line one below the previous, all starting at `start.position`.
    fn update_lines(&mut self, lines: &[GlyphString], start: Location) {
        for (offset, line) in lines.iter().enumerate() {
            self.update_string(line, start.advance_down(offset));
        }
    }

    /// Writes the same glyph to every location given.
    fn update_glyph_at(&mut self, glyph: Glyph, locations: &[Location]) {
        for &location in locations {
            self.update_glyph(glyph, location);
        }
    }
}

/// A rectangular grid of glyphs, one `GlyphString` per line.
///
/// Every row is exactly `bounds.width()` glyphs long. Locations are absolute:
/// the top-left cell is `bounds.start()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBuffer {
    bounds: Region,
    rows: Vec<GlyphString>,
}

impl GlyphBuffer {
    pub fn new(bounds: Region) -> Self {
        let rows = (0..bounds.height())
            .map(|_| GlyphString::blank(bounds.width()))
            .collect();
        Self { bounds, rows }
    }

    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// The glyph at `location`.
    ///
    /// # Errors
    /// `GridError::OutOfBoundsRead` if `location` is outside the bounds.
    pub fn glyph(&self, location: Location) -> Result<Glyph> {
        if !self.bounds.contains(location) {
            return Err(GridError::out_of_bounds(location, self.bounds));
        }
        let rel = self.bounds.relative(location);
        self.rows[rel.line]
            .get(rel.position)
            .ok_or_else(|| GridError::out_of_bounds(location, self.bounds))
    }

    /// The glyphs within `region`, one string per line.
    ///
    /// # Errors
    /// `GridError::OutOfBoundsRead` unless `region` lies inside the bounds.
    pub fn glyphs(&self, region: Region) -> Result<Vec<GlyphString>> {
        if !region.inside(&self.bounds) {
            return Err(GridError::out_of_bounds(region, self.bounds));
        }
        let start = self.bounds.relative(region.start());
        let columns = start.position..start.position + region.width();
        Ok(self.rows[start.line..start.line + region.height()]
            .iter()
            .map(|row| row.substring(columns.clone()))
            .collect())
    }

    /// The full row for an absolute line, if it is inside the bounds.
    pub fn line(&self, line: usize) -> Option<&GlyphString> {
        line.checked_sub(self.bounds.start().line)
            .and_then(|rel| self.rows.get(rel))
    }

    /// Iterates over rows top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &GlyphString> {
        self.rows.iter()
    }

    /// Copies the content of `region` into a new buffer whose top-left cell is
    /// the origin.
    ///
    /// # Errors
    /// `GridError::OutOfBoundsRead` unless `region` lies inside the bounds.
    pub fn create_clipped_buffer(&self, region: Region) -> Result<GlyphBuffer> {
        let lines = self.glyphs(region)?;
        let mut clipped = GlyphBuffer::new(Region::sized(region.height(), region.width()));
        clipped.update_lines(&lines, Location::ORIGIN);
        Ok(clipped)
    }

    /// Resets every row to blanks.
    pub fn clear(&mut self) {
        let width = self.bounds.width();
        for row in &mut self.rows {
            *row = GlyphString::blank(width);
        }
    }
}

impl Canvas for GlyphBuffer {
    fn update_glyph(&mut self, glyph: Glyph, location: Location) {
        if !self.bounds.contains(location) {
            trace!("GlyphBuffer: dropping write at {} outside {}", location, self.bounds);
            return;
        }
        let rel = self.bounds.relative(location);
        let row = &mut self.rows[rel.line];
        *row = row.set(rel.position, glyph);
    }

    fn update_string(&mut self, string: &GlyphString, start: Location) {
        if !self.bounds.contains(start) {
            trace!("GlyphBuffer: dropping string at {} outside {}", start, self.bounds);
            return;
        }
        let rel = self.bounds.relative(start);
        let row = &mut self.rows[rel.line];
        let (updated, written) = row.overwrite(rel.position, string.glyphs());
        if written < string.len() {
            trace!(
                "GlyphBuffer: clipped {} glyphs past the right edge",
                string.len() - written
            );
        }
        *row = updated;
    }
}
