// src/color.rs

//! Color values for glyphs and pixels.
//!
//! Everything in the grid is colored with a straight-alpha `Rgba`. The
//! `NamedColor` palette gives configuration files readable names for the
//! common ANSI colors.

use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// Fully transparent black. Backgrounds of this color are not painted.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Same color channels, ignoring alpha.
    pub fn same_rgb(&self, other: &Rgba) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Blend `self` over `dst` using `coverage` (0-255) scaled by this color's alpha.
    pub fn blend_over(&self, dst: Rgba, coverage: u8) -> Rgba {
        let alpha = (self.a as u32 * coverage as u32) / 255;
        if alpha == 0 {
            return dst;
        }
        let inv = 255 - alpha;
        let mix = |src: u8, dst: u8| ((src as u32 * alpha + dst as u32 * inv) / 255) as u8;
        let out_a = alpha + (dst.a as u32 * inv) / 255;
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            out_a.min(255) as u8,
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl From<NamedColor> for Rgba {
    fn from(named: NamedColor) -> Self {
        named.to_rgba()
    }
}

/// Standard ANSI named colors (indices 0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    /// Converts a u8 index (0-15) to a `NamedColor`, or `None` past the palette.
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    /// sRGB values used by most terminals for the 16 ANSI colors.
    pub fn to_rgba(&self) -> Rgba {
        match self {
            NamedColor::Black => Rgba::opaque(0, 0, 0),
            NamedColor::Red => Rgba::opaque(205, 0, 0),
            NamedColor::Green => Rgba::opaque(0, 205, 0),
            NamedColor::Yellow => Rgba::opaque(205, 205, 0),
            NamedColor::Blue => Rgba::opaque(0, 0, 238),
            NamedColor::Magenta => Rgba::opaque(205, 0, 205),
            NamedColor::Cyan => Rgba::opaque(0, 205, 205),
            NamedColor::White => Rgba::opaque(229, 229, 229),
            NamedColor::BrightBlack => Rgba::opaque(127, 127, 127),
            NamedColor::BrightRed => Rgba::opaque(255, 0, 0),
            NamedColor::BrightGreen => Rgba::opaque(0, 255, 0),
            NamedColor::BrightYellow => Rgba::opaque(255, 255, 0),
            NamedColor::BrightBlue => Rgba::opaque(92, 92, 255),
            NamedColor::BrightMagenta => Rgba::opaque(255, 0, 255),
            NamedColor::BrightCyan => Rgba::opaque(0, 255, 255),
            NamedColor::BrightWhite => Rgba::opaque(255, 255, 255),
        }
    }
}
