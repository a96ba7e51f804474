// src/glyph.rs

//! Defines the `Glyph` type and its visual attributes (`AttrFlags`, `Attributes`).
//!
//! A `Glyph` is one character cell of the grid: the character itself plus the
//! colors it is drawn with.

use crate::color::Rgba;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single character cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    /// The character displayed in the cell. `'\0'` never renders.
    pub c: char,
    /// The visual attributes of the character (foreground/background color, flags).
    pub attr: Attributes,
}

/// Default glyph: a white space on a transparent background.
pub const DEFAULT_GLYPH: Glyph = Glyph {
    c: ' ',
    attr: Attributes {
        fg: Rgba::WHITE,
        bg: Rgba::TRANSPARENT,
        flags: AttrFlags::empty(),
    },
};

bitflags! {
    /// Text decoration flags honored by the direct-draw rasterizer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AttrFlags: u8 {
        const UNDERLINE     = 1 << 0;
        const STRIKETHROUGH = 1 << 1;
        const REVERSE       = 1 << 2; // Swaps foreground and background colors.
    }
}

/// Foreground color, background color and decoration flags of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    pub fg: Rgba,
    pub bg: Rgba,
    pub flags: AttrFlags,
}

impl Default for Attributes {
    fn default() -> Self {
        DEFAULT_GLYPH.attr
    }
}

impl Attributes {
    /// Colors after applying `REVERSE`.
    pub fn effective_colors(&self) -> (Rgba, Rgba) {
        if self.flags.contains(AttrFlags::REVERSE) {
            (self.bg, self.fg)
        } else {
            (self.fg, self.bg)
        }
    }
}

impl Glyph {
    /// A glyph in the given foreground color on a transparent background.
    pub const fn new(c: char, fg: Rgba) -> Self {
        Self::with_colors(c, fg, Rgba::TRANSPARENT)
    }

    pub const fn with_colors(c: char, fg: Rgba, bg: Rgba) -> Self {
        Glyph {
            c,
            attr: Attributes {
                fg,
                bg,
                flags: AttrFlags::empty(),
            },
        }
    }

    pub fn with_flags(mut self, flags: AttrFlags) -> Self {
        self.attr.flags = flags;
        self
    }

    pub fn fg(&self) -> Rgba {
        self.attr.fg
    }

    pub fn bg(&self) -> Rgba {
        self.attr.bg
    }
}

impl Default for Glyph {
    fn default() -> Self {
        DEFAULT_GLYPH
    }
}

// Prints only the character, not its attributes.
impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c)
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        Glyph::new(c, Rgba::WHITE)
    }
}
