// src/layout/mod.rs

//! Layout policies that partition a parent `Region` among children.
//!
//! A container owns one `Layout`. When the container's bounds change it calls
//! `set_parent_bounds`, then asks for each child's region by handing over the
//! child's `LayoutParams`. The two policies deal with running out of room
//! differently:
//!
//! - `GridLayout` grants fixed cells and rejects a request for a cell that is
//!   already taken.
//! - `SequentialLayout` places children one after another along an axis and
//!   quietly shrinks requests to whatever room is left, down to zero-size
//!   regions.

pub mod grid;
pub mod sequential;

pub use grid::{GridLayout, GridParameters};
pub use sequential::{Axis, SequentialLayout};

use crate::error::Result;
use crate::geometry::Region;

/// What a child asks its parent's layout for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutParams {
    /// One cell or an inclusive span of cells of a `GridLayout`.
    Grid(GridParameters),
    /// A size for a `SequentialLayout`, in columns and lines.
    Sequential { width: usize, height: usize },
    /// The whole parent region.
    Fill,
}

/// A policy assigning regions of a parent to children.
pub trait Layout: Send {
    /// Recomputes internal state for a new parent region. Previously granted
    /// regions are forgotten.
    fn set_parent_bounds(&mut self, parent: Region);

    /// The region for a child with the given parameters.
    fn bounds_for(&mut self, params: &LayoutParams) -> Result<Region>;
}
