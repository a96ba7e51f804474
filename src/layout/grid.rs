// src/layout/grid.rs

//! Grid layout: rows of equally sized cells, each granted at most once.
//!
//! Rows may hold different numbers of cells. Row heights split the parent
//! height evenly; within a row, cells split the parent width evenly. Integer
//! division leaves any remainder unassigned on the right and bottom edges.

use super::{Layout, LayoutParams};
use crate::error::{GridError, Result};
use crate::geometry::{Location, Region};
use log::debug;

/// Selects an inclusive span of grid cells, from `(start_row, start_col)` to
/// `(end_row, end_col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParameters {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl GridParameters {
    /// A single cell.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::range(row, col, row, col)
    }

    /// Every cell from `(start_row, start_col)` through `(end_row, end_col)`.
    pub fn range(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }
}

impl From<GridParameters> for LayoutParams {
    fn from(params: GridParameters) -> Self {
        LayoutParams::Grid(params)
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    bounds: Region,
    occupied: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            bounds: Region::sized(0, 0),
            occupied: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Cell count of each row.
    dimensions: Vec<usize>,
    /// Index of each row's first cell in `cells`.
    row_offsets: Vec<usize>,
    /// All cells, row-major.
    cells: Vec<Cell>,
}

impl GridLayout {
    /// A grid where row `i` holds `dimensions[i]` cells.
    pub fn new(dimensions: &[usize]) -> Self {
        let mut row_offsets = Vec::with_capacity(dimensions.len());
        let mut total = 0;
        for &count in dimensions {
            row_offsets.push(total);
            total += count;
        }
        Self {
            dimensions: dimensions.to_vec(),
            row_offsets,
            cells: vec![Cell::default(); total],
        }
    }

    /// A grid of `rows` rows with `columns` cells each.
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self::new(&vec![columns; rows])
    }

    pub fn rows(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of cells in `row`, or `None` past the last row.
    pub fn columns_in_row(&self, row: usize) -> Option<usize> {
        self.dimensions.get(row).copied()
    }

    /// Flattens `(row, col)` to an index into the row-major cell list: the
    /// row's offset (the sum of the column counts of earlier rows) plus `col`.
    /// For a uniform grid this is `row * columns + col`.
    pub fn cell_index(&self, row: usize, col: usize) -> Result<usize> {
        match self.dimensions.get(row) {
            Some(&columns) if col < columns => Ok(self.row_offsets[row] + col),
            _ => Err(GridError::NoSuchCell { row, column: col }),
        }
    }

    /// The region currently assigned to a cell.
    pub fn cell_bounds(&self, row: usize, col: usize) -> Result<Region> {
        Ok(self.cells[self.cell_index(row, col)?].bounds)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.cells[self.cell_index(row, col)?].occupied)
    }

    /// Marks every cell of the span occupied, or none if any already is.
    fn occupy(&mut self, params: &GridParameters) -> Result<()> {
        let mut indices = Vec::new();
        for row in params.start_row..=params.end_row {
            for col in params.start_col..=params.end_col {
                let index = self.cell_index(row, col)?;
                if self.cells[index].occupied {
                    return Err(GridError::CellOccupied { row, column: col });
                }
                indices.push(index);
            }
        }
        for index in indices {
            self.cells[index].occupied = true;
        }
        Ok(())
    }
}

impl Layout for GridLayout {
    fn set_parent_bounds(&mut self, parent: Region) {
        let row_count = self.dimensions.len();
        if row_count == 0 {
            return;
        }
        let height = parent.height() / row_count;
        let mut current = parent.start();

        for (row, &columns) in self.dimensions.iter().enumerate() {
            let width = if columns == 0 { 0 } else { parent.width() / columns };
            for col in 0..columns {
                let cell = &mut self.cells[self.row_offsets[row] + col];
                cell.bounds = Region::from_location(current, width, height);
                cell.occupied = false;
                current = current.advance_forward(width);
            }
            current = Location::new(current.line + height, parent.start().position);
        }
        debug!(
            "GridLayout: {} rows laid out in {} (row height {})",
            row_count, parent, height
        );
    }

    fn bounds_for(&mut self, params: &LayoutParams) -> Result<Region> {
        let params = match params {
            LayoutParams::Grid(grid) => grid,
            other => {
                return Err(GridError::LayoutParams(format!(
                    "grid layout cannot place {:?}",
                    other
                )))
            }
        };
        if params.start_row > params.end_row || params.start_col > params.end_col {
            return Err(GridError::LayoutParams(format!(
                "grid span {:?} is reversed",
                params
            )));
        }

        let first = self.cell_bounds(params.start_row, params.start_col)?;
        let last = self.cell_bounds(params.end_row, params.end_col)?;
        let region = Region::new(first.start(), last.end())?;
        self.occupy(params)?;
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn laid_out(rows: usize, columns: usize) -> GridLayout {
        let mut grid = GridLayout::uniform(rows, columns);
        grid.set_parent_bounds(Region::sized(10, 20));
        grid
    }

    #[test]
    fn cells_split_parent_evenly() {
        let grid = laid_out(2, 4);
        assert_eq!(
            grid.cell_bounds(0, 0).unwrap(),
            Region::from_bounds(0, 0, 5, 5).unwrap()
        );
        assert_eq!(
            grid.cell_bounds(1, 3).unwrap(),
            Region::from_bounds(5, 15, 10, 20).unwrap()
        );
    }

    #[test]
    fn ragged_rows_have_their_own_widths() {
        let mut grid = GridLayout::new(&[1, 2]);
        grid.set_parent_bounds(Region::sized(4, 10));
        assert_eq!(grid.cell_bounds(0, 0).unwrap().width(), 10);
        assert_eq!(grid.cell_bounds(1, 1).unwrap(), Region::from_bounds(2, 5, 4, 10).unwrap());
    }

    #[test]
    fn cell_index_flattens_by_column_count() {
        let grid = GridLayout::uniform(3, 4);
        assert_eq!(grid.cell_index(0, 3).unwrap(), 3);
        assert_eq!(grid.cell_index(1, 0).unwrap(), 4);
        assert_eq!(grid.cell_index(2, 1).unwrap(), 9);
        assert!(grid.cell_index(1, 4).is_err());
        assert!(grid.cell_index(3, 0).is_err());
    }

    #[test]
    fn granting_a_cell_twice_is_an_error() {
        let mut grid = laid_out(2, 2);
        let params = GridParameters::cell(1, 0).into();
        let region = grid.bounds_for(&params).unwrap();
        assert_eq!(region, Region::from_bounds(5, 0, 10, 10).unwrap());
        assert!(grid.is_occupied(1, 0).unwrap());
        assert_eq!(
            grid.bounds_for(&params),
            Err(GridError::CellOccupied { row: 1, column: 0 })
        );
    }

    #[test]
    fn every_cell_granted_once() {
        let mut grid = laid_out(3, 3);
        let mut granted = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                granted.push(grid.bounds_for(&GridParameters::cell(row, col).into()).unwrap());
            }
        }
        for (i, a) in granted.iter().enumerate() {
            for b in &granted[i + 1..] {
                assert_ne!(a, b);
            }
        }
        for row in 0..3 {
            for col in 0..3 {
                assert!(grid.bounds_for(&GridParameters::cell(row, col).into()).is_err());
            }
        }
    }

    #[test]
    fn span_covers_first_to_last_cell() {
        let mut grid = laid_out(2, 4);
        let region = grid
            .bounds_for(&GridParameters::range(0, 1, 1, 2).into())
            .unwrap();
        assert_eq!(region, Region::from_bounds(0, 5, 10, 15).unwrap());
        assert!(grid.is_occupied(1, 1).unwrap());
        assert!(!grid.is_occupied(1, 3).unwrap());
    }

    #[test]
    fn overlapping_span_is_rejected_without_partial_grant() {
        let mut grid = laid_out(2, 4);
        grid.bounds_for(&GridParameters::cell(1, 2).into()).unwrap();
        assert!(grid
            .bounds_for(&GridParameters::range(0, 0, 1, 2).into())
            .is_err());
        assert!(!grid.is_occupied(0, 0).unwrap());
    }

    #[test]
    fn new_parent_bounds_release_cells() {
        let mut grid = laid_out(1, 1);
        grid.bounds_for(&GridParameters::cell(0, 0).into()).unwrap();
        grid.set_parent_bounds(Region::sized(2, 2));
        assert!(!grid.is_occupied(0, 0).unwrap());
        assert_eq!(
            grid.bounds_for(&GridParameters::cell(0, 0).into()).unwrap(),
            Region::sized(2, 2)
        );
    }

    #[test]
    fn unknown_cells_and_foreign_params_are_rejected() {
        let mut grid = laid_out(1, 2);
        assert_eq!(
            grid.bounds_for(&GridParameters::cell(0, 5).into()),
            Err(GridError::NoSuchCell { row: 0, column: 5 })
        );
        assert!(matches!(
            grid.bounds_for(&LayoutParams::Fill),
            Err(GridError::LayoutParams(_))
        ));
    }
}
