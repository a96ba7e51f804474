// src/error.rs

//! Typed errors for the glyph grid core.
//!
//! Structural violations (bad regions, reads outside a buffer, malformed
//! escapes, occupied grid cells) surface as a `GridError`. Capacity problems
//! that the grid treats as normal degraded behavior (writes past a buffer edge,
//! sequential layouts running out of room) never produce an error.

use crate::geometry::{Location, Region};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A region whose start lies past its end on either axis.
    #[error("invalid region: start {start} exceeds end {end}")]
    Construction { start: Location, end: Location },

    /// A read from a buffer outside of its bounds.
    #[error("read at {requested} is outside the buffer bounds {bounds}")]
    OutOfBoundsRead { requested: String, bounds: Region },

    /// A color escape that does not match `\e[RRR;GGG;BBBm`.
    #[error("malformed color escape at offset {offset}: {reason}")]
    MalformedEscape { offset: usize, reason: String },

    /// A grid layout cell that has already been granted.
    #[error("grid cell (row {row}, column {column}) is already occupied")]
    CellOccupied { row: usize, column: usize },

    /// A grid layout request naming a cell the grid does not have.
    #[error("grid has no cell at (row {row}, column {column})")]
    NoSuchCell { row: usize, column: usize },

    /// Layout parameters of the wrong kind for the layout they were given to.
    #[error("layout parameters rejected: {0}")]
    LayoutParams(String),

    /// A character a bitmap font has no cell for.
    #[error("character {character:?} is outside the font range {min:#x}..={max:#x}")]
    UnsupportedCharacter { character: char, min: u32, max: u32 },

    /// A font sheet whose dimensions cannot hold the requested cells.
    #[error("invalid font sheet: {0}")]
    InvalidFontSheet(String),

    /// The display surface refused a frame.
    #[error("display surface error: {0}")]
    Surface(String),
}

impl GridError {
    pub(crate) fn out_of_bounds(requested: impl ToString, bounds: Region) -> Self {
        GridError::OutOfBoundsRead {
            requested: requested.to_string(),
            bounds,
        }
    }

    pub(crate) fn malformed_escape(offset: usize, reason: impl Into<String>) -> Self {
        GridError::MalformedEscape {
            offset,
            reason: reason.into(),
        }
    }
}
