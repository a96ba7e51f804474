// src/geometry.rs

//! Grid coordinates: `Location` (a single cell) and `Region` (an axis-aligned
//! box of cells). Both are immutable `Copy` values measured in lines and
//! positions, never in pixels.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// Line (row) index, counted from the top.
    pub line: usize,
    /// Position (column) within the line, counted from the left.
    pub position: usize,
}

impl Location {
    pub const ORIGIN: Location = Location::new(0, 0);

    pub const fn new(line: usize, position: usize) -> Self {
        Self { line, position }
    }

    /// Component-wise sum of two locations.
    pub fn add(self, other: Location) -> Location {
        Location::new(self.line + other.line, self.position + other.position)
    }

    /// Same line, `count` positions to the right.
    pub fn advance_forward(self, count: usize) -> Location {
        Location::new(self.line, self.position + count)
    }

    /// Same position, `count` lines down.
    pub fn advance_down(self, count: usize) -> Location {
        Location::new(self.line + count, self.position)
    }

    pub fn is_inside(&self, region: &Region) -> bool {
        region.contains(*self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {}, position {})", self.line, self.position)
    }
}

/// An axis-aligned box of cells, `start` inclusive and `end` exclusive.
///
/// A region always satisfies `start.line <= end.line` and
/// `start.position <= end.position`; the fallible constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    start: Location,
    end: Location,
}

impl Region {
    /// Creates a region from two corners.
    ///
    /// Fails with `GridError::Construction` if `start` lies past `end` on
    /// either axis.
    pub fn new(start: Location, end: Location) -> Result<Self> {
        if start.position > end.position || start.line > end.line {
            return Err(GridError::Construction { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a region from its four bounds.
    pub fn from_bounds(
        start_line: usize,
        start_position: usize,
        end_line: usize,
        end_position: usize,
    ) -> Result<Self> {
        Self::new(
            Location::new(start_line, start_position),
            Location::new(end_line, end_position),
        )
    }

    /// A region anchored at `start`, `width` positions wide and `height` lines tall.
    pub fn from_location(start: Location, width: usize, height: usize) -> Self {
        Self {
            start,
            end: Location::new(start.line + height, start.position + width),
        }
    }

    /// A region anchored at the origin.
    pub fn sized(lines: usize, columns: usize) -> Self {
        Self::from_location(Location::ORIGIN, columns, lines)
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    pub fn width(&self) -> usize {
        self.end.position - self.start.position
    }

    pub fn height(&self) -> usize {
        self.end.line - self.start.line
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True if all four bounds of `self` lie within `other` (non-strict).
    pub fn inside(&self, other: &Region) -> bool {
        self.start.line >= other.start.line
            && self.start.position >= other.start.position
            && self.end.line <= other.end.line
            && self.end.position <= other.end.position
    }

    /// True if the cell at `location` is covered by this region.
    pub fn contains(&self, location: Location) -> bool {
        location.line >= self.start.line
            && location.line < self.end.line
            && location.position >= self.start.position
            && location.position < self.end.position
    }

    /// Translates `location` into coordinates relative to this region's start.
    pub(crate) fn relative(&self, location: Location) -> Location {
        Location::new(
            location.line - self.start.line,
            location.position - self.start.position,
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.start.line, self.end.line, self.start.position, self.end.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn region_dimensions_follow_bounds() {
        let region = Region::from_bounds(0, 0, 5, 10).unwrap();
        assert_eq!(region.width(), 10);
        assert_eq!(region.height(), 5);
    }

    #[test]
    fn region_rejects_inverted_axes() {
        assert!(matches!(
            Region::from_bounds(0, 11, 5, 10),
            Err(GridError::Construction { .. })
        ));
        assert!(matches!(
            Region::from_bounds(6, 0, 5, 10),
            Err(GridError::Construction { .. })
        ));
    }

    #[test]
    fn degenerate_region_is_valid() {
        let region = Region::from_bounds(3, 4, 3, 4).unwrap();
        assert_eq!(region.width(), 0);
        assert_eq!(region.height(), 0);
        assert!(region.is_empty());
    }

    #[test]
    fn region_construction_matches_ordering_over_small_grid() {
        for sl in 0..4 {
            for sp in 0..4 {
                for el in 0..4 {
                    for ep in 0..4 {
                        let result = Region::from_bounds(sl, sp, el, ep);
                        if sl <= el && sp <= ep {
                            let region = result.unwrap();
                            assert_eq!(region.width(), ep - sp);
                            assert_eq!(region.height(), el - sl);
                        } else {
                            assert!(result.is_err());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn from_location_derives_end_additively() {
        let region = Region::from_location(Location::new(2, 3), 4, 5);
        assert_eq!(region.end(), Location::new(7, 7));
    }

    #[test]
    fn inside_is_non_strict() {
        let outer = Region::from_bounds(0, 0, 10, 10).unwrap();
        assert!(outer.inside(&outer));
        assert!(Region::from_bounds(1, 1, 10, 9).unwrap().inside(&outer));
        assert!(!Region::from_bounds(1, 1, 11, 9).unwrap().inside(&outer));
    }

    #[test]
    fn contains_is_half_open() {
        let region = Region::from_bounds(0, 0, 5, 10).unwrap();
        assert!(region.contains(Location::new(4, 9)));
        assert!(!region.contains(Location::new(5, 0)));
        assert!(!region.contains(Location::new(0, 10)));
        assert!(Location::new(2, 3).is_inside(&region));
    }

    #[test]
    fn locations_advance_without_mutation() {
        let start = Location::new(1, 1);
        assert_eq!(start.advance_forward(3), Location::new(1, 4));
        assert_eq!(start.advance_down(2), Location::new(3, 1));
        assert_eq!(start.add(Location::new(2, 2)), Location::new(3, 3));
        assert_eq!(start, Location::new(1, 1));
    }
}
