// src/glyph_string.rs

//! `GlyphString`: an immutable, cheaply cloneable sequence of glyphs.
//!
//! A `GlyphString` stands in for a plain string where every character carries
//! its own colors. Text enters the grid through [`GlyphString::of`], which
//! understands exactly one markup form, the color escape:
//!
//! ```text
//! \e[RRR;GGG;BBBm
//! ```
//!
//! where `\e` is a literal backslash followed by `e` and each component is
//! exactly three decimal digits (000-255). The escape switches the foreground
//! color of every following glyph and emits nothing itself.

use crate::color::Rgba;
use crate::error::{GridError, Result};
use crate::glyph::{Glyph, DEFAULT_GLYPH};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Number of characters following `\e` in a well-formed escape: `[RRR;GGG;BBBm`.
const ESCAPE_BODY_LEN: usize = 13;

/// Immutable sequence of glyphs. Every transform returns a new string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GlyphString {
    glyphs: Arc<[Glyph]>,
}

/// Parser mode for [`GlyphString::of`].
enum ParseMode {
    /// Copying characters into glyphs.
    Literal,
    /// Saw a backslash; the next character decides whether an escape begins.
    Backslash { offset: usize },
}

impl GlyphString {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self {
            glyphs: glyphs.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// `len` spaces in the default colors.
    pub fn blank(len: usize) -> Self {
        Self::new(vec![DEFAULT_GLYPH; len])
    }

    /// Plain text in a single color, with no escape processing.
    pub fn plain(text: &str, fg: Rgba) -> Self {
        Self::new(text.chars().map(|c| Glyph::new(c, fg)).collect())
    }

    /// Parses text containing color escapes into glyphs.
    ///
    /// The resulting length may be shorter than the input, since escapes emit
    /// no glyphs. Glyphs start out white on a transparent background.
    ///
    /// # Errors
    /// `GridError::MalformedEscape` if an escape is truncated, contains a
    /// non-digit, a component above 255, or the wrong delimiters. The offset
    /// reported is the character index of the escape's backslash.
    pub fn of(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        let mut glyphs = Vec::with_capacity(chars.len());
        let mut current = Rgba::WHITE;
        let mut mode = ParseMode::Literal;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match mode {
                ParseMode::Literal => {
                    if c == '\\' {
                        mode = ParseMode::Backslash { offset: i };
                    } else {
                        glyphs.push(Glyph::new(c, current));
                    }
                    i += 1;
                }
                ParseMode::Backslash { offset } => {
                    if c == 'e' {
                        current = parse_escape_body(&chars, i + 1, offset)?;
                        i += 1 + ESCAPE_BODY_LEN;
                    } else {
                        // Not an escape: the backslash is an ordinary character.
                        glyphs.push(Glyph::new('\\', current));
                    }
                    mode = ParseMode::Literal;
                }
            }
        }

        if let ParseMode::Backslash { .. } = mode {
            glyphs.push(Glyph::new('\\', current));
        }

        Ok(Self::new(glyphs))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Glyph> {
        self.glyphs.get(index).copied()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.glyphs.iter()
    }

    /// The characters of this string without color information.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.c).collect()
    }

    /// A new string with `glyph` added to the end.
    pub fn append(&self, glyph: Glyph) -> Self {
        let mut glyphs = self.glyphs.to_vec();
        glyphs.push(glyph);
        Self::new(glyphs)
    }

    /// A new string with `glyph` inserted before `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, glyph: Glyph) -> Self {
        let mut glyphs = self.glyphs.to_vec();
        glyphs.insert(index, glyph);
        Self::new(glyphs)
    }

    /// A new string with the glyph at `index` replaced.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn set(&self, index: usize, glyph: Glyph) -> Self {
        let mut glyphs = self.glyphs.to_vec();
        glyphs[index] = glyph;
        Self::new(glyphs)
    }

    /// A new string with the glyphs of `other` following those of `self`.
    /// Each side keeps its own colors.
    pub fn concat(&self, other: &GlyphString) -> Self {
        let mut glyphs = Vec::with_capacity(self.len() + other.len());
        glyphs.extend_from_slice(&self.glyphs);
        glyphs.extend_from_slice(&other.glyphs);
        Self::new(glyphs)
    }

    /// # Panics
    /// Panics if the range is out of bounds or reversed.
    pub fn substring(&self, range: Range<usize>) -> Self {
        Self::new(self.glyphs[range].to_vec())
    }

    /// A new string where positions `start..start + replacement.len()` are
    /// overwritten, stopping at the end of `self`. Returns the new string and
    /// the number of glyphs written.
    pub(crate) fn overwrite(&self, start: usize, replacement: &[Glyph]) -> (Self, usize) {
        let mut glyphs = self.glyphs.to_vec();
        let room = glyphs.len().saturating_sub(start);
        let count = room.min(replacement.len());
        glyphs[start..start + count].copy_from_slice(&replacement[..count]);
        (Self::new(glyphs), count)
    }

    /// Greedily wraps this string onto lines of at most `max_len` glyphs.
    ///
    /// Lines break at the last space that fits; that space is dropped. A run
    /// with no space inside the window is hard-broken at `max_len` and nothing
    /// is dropped. A `max_len` of zero is treated as one.
    pub fn wrap(&self, max_len: usize) -> Vec<GlyphString> {
        let max_len = max_len.max(1);
        if self.len() <= max_len {
            return vec![self.clone()];
        }

        let mut lines = Vec::new();
        let mut index = 0;
        while self.len() - index > max_len {
            let window_end = index + max_len;
            let split = (index + 1..=window_end)
                .rev()
                .find(|&i| self.glyphs[i].c == ' ');
            match split {
                Some(space) => {
                    lines.push(self.substring(index..space));
                    index = space + 1;
                }
                None => {
                    lines.push(self.substring(index..window_end));
                    index = window_end;
                }
            }
        }
        lines.push(self.substring(index..self.len()));
        lines
    }
}

/// Parses `[RRR;GGG;BBBm` starting at `start`. `offset` locates the escape for errors.
fn parse_escape_body(chars: &[char], start: usize, offset: usize) -> Result<Rgba> {
    let body = chars
        .get(start..start + ESCAPE_BODY_LEN)
        .ok_or_else(|| GridError::malformed_escape(offset, "escape sequence is truncated"))?;

    if body[0] != '[' {
        return Err(GridError::malformed_escape(offset, "expected '[' after \\e"));
    }

    let mut components = [0u8; 3];
    for (n, component) in components.iter_mut().enumerate() {
        let field_start = 1 + n * 4;
        let digits = &body[field_start..field_start + 3];
        let mut value: u32 = 0;
        for &d in digits {
            let digit = d.to_digit(10).ok_or_else(|| {
                GridError::malformed_escape(offset, format!("expected a digit, found {:?}", d))
            })?;
            value = value * 10 + digit;
        }
        *component = u8::try_from(value).map_err(|_| {
            GridError::malformed_escape(offset, format!("component {} exceeds 255", value))
        })?;

        let delimiter = body[field_start + 3];
        let expected = if n < 2 { ';' } else { 'm' };
        if delimiter != expected {
            return Err(GridError::malformed_escape(
                offset,
                format!("expected {:?}, found {:?}", expected, delimiter),
            ));
        }
    }

    Ok(Rgba::opaque(components[0], components[1], components[2]))
}

/// The escape selecting `color` as the foreground, e.g. `\e[255;000;000m`.
/// Alpha is not representable and is ignored.
pub fn escape_sequence(color: Rgba) -> String {
    format!("\\e[{:03};{:03};{:03}m", color.r, color.g, color.b)
}

/// `text` drawn in `color`, followed by an escape back to white.
pub fn colorize(text: &str, color: Rgba) -> String {
    let mut colorized = escape_sequence(color);
    colorized.push_str(text);
    colorized.push_str(&escape_sequence(Rgba::WHITE));
    colorized
}

impl Default for GlyphString {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for GlyphString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlyphString({:?})", self.text())
    }
}

impl fmt::Display for GlyphString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<Vec<Glyph>> for GlyphString {
    fn from(glyphs: Vec<Glyph>) -> Self {
        Self::new(glyphs)
    }
}

impl FromIterator<Glyph> for GlyphString {
    fn from_iter<I: IntoIterator<Item = Glyph>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GlyphString {
    type Item = &'a Glyph;
    type IntoIter = std::slice::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
