// src/layout/sequential.rs

//! Sequential layout: children placed one after another along a single axis.
//!
//! Each request is clipped to the room left between the cursor and the
//! parent's far edge, and the cursor then moves past the granted region plus
//! one cell of spacing. There is no wraparound onto a new row or column; once
//! the axis is used up every further request gets a zero-size region.

use super::{Layout, LayoutParams};
use crate::error::{GridError, Result};
use crate::geometry::{Location, Region};
use log::trace;

/// Direction in which children are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right along a line.
    X,
    /// Top to bottom down a column.
    Y,
}

#[derive(Debug, Clone)]
pub struct SequentialLayout {
    axis: Axis,
    parent: Region,
    next: Location,
}

impl SequentialLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            parent: Region::sized(0, 0),
            next: Location::ORIGIN,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Where the next child will start.
    pub fn cursor(&self) -> Location {
        self.next
    }

    /// Grants a region of at most `width` x `height` at the cursor.
    pub fn allocate(&mut self, width: usize, height: usize) -> Region {
        let end = self.parent.end();
        let room_x = end.position.saturating_sub(self.next.position);
        let room_y = end.line.saturating_sub(self.next.line);
        let width = width.min(room_x);
        let height = height.min(room_y);
        let start = self.next;

        self.next = match self.axis {
            Axis::X => Location::new(
                start.line,
                (start.position + width + 1).min(end.position),
            ),
            Axis::Y => Location::new((start.line + height + 1).min(end.line), start.position),
        };
        trace!(
            "SequentialLayout: granted {}x{} at {}, cursor now {}",
            width,
            height,
            start,
            self.next
        );
        Region::from_location(start, width, height)
    }
}

impl Layout for SequentialLayout {
    fn set_parent_bounds(&mut self, parent: Region) {
        self.parent = parent;
        self.next = parent.start();
    }

    fn bounds_for(&mut self, params: &LayoutParams) -> Result<Region> {
        match *params {
            LayoutParams::Sequential { width, height } => Ok(self.allocate(width, height)),
            other => Err(GridError::LayoutParams(format!(
                "sequential layout cannot place {:?}",
                other
            ))),
        }
    }
}
