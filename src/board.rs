//! Board model: the occupancy grid, the remaining pieces, and placement checks.
//!
//! The board owns everything the search mutates. Direct `place`/`unplace`
//! calls are fully validated before any cell changes; the solver uses the
//! unchecked `occupy`/`vacate` pair after its own `can_place` test.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::error::{LonposError, PlacementIssue, Result};
use crate::geometry::{self, Orientation};
use crate::grid::{piece_number, Grid, BLOCKED, EMPTY};
use crate::pieces::{Catalog, Coord};

/// A puzzle board together with its piece catalog.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    catalog: Catalog,
    /// Orientations per catalog index, in search order.
    orientations: Vec<Vec<Orientation>>,
    /// The same orientations as a set, for validating caller placements.
    shapes: Vec<FxHashSet<Orientation>>,
    /// Catalog indices not yet on the grid, in search order.
    remaining: Vec<usize>,
}

impl Board {
    /// Creates a board from an initial grid, which may already hold blocked
    /// cells and placed pieces.
    ///
    /// Orientations are computed once here for the grid's rank. Pieces whose
    /// number already appears in the grid are not available for placement.
    pub fn new(grid: Grid, catalog: Catalog) -> Result<Self> {
        if let Some(&bad) = grid
            .values()
            .iter()
            .find(|&&v| v != BLOCKED && v as usize > catalog.len())
        {
            return Err(LonposError::InvalidGrid(format!(
                "cell value {bad} does not name a piece in a catalog of {}",
                catalog.len()
            )));
        }

        let orientations: Vec<Vec<Orientation>> = catalog
            .pieces()
            .iter()
            .map(|piece| geometry::orientations(&piece.definition, grid.is_3d()))
            .collect();
        let shapes: Vec<FxHashSet<Orientation>> = orientations
            .iter()
            .map(|set| set.iter().cloned().collect())
            .collect();
        let remaining: Vec<usize> = (0..catalog.len())
            .filter(|&index| !grid.contains(piece_number(index)))
            .collect();

        debug!(
            event = "board_new",
            rank = ?grid.rank(),
            width = grid.width(),
            height = grid.height(),
            depth = grid.depth(),
            pieces = catalog.len(),
            remaining = remaining.len(),
            orientations = orientations.iter().map(Vec::len).sum::<usize>(),
        );

        Ok(Self {
            grid,
            catalog,
            orientations,
            shapes,
            remaining,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog indices of the pieces not on the board, in search order.
    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    /// Names of the pieces not on the board, in search order.
    pub fn remaining_names(&self) -> Vec<&str> {
        self.remaining
            .iter()
            .filter_map(|&index| self.catalog.get(index))
            .map(|piece| piece.name.as_str())
            .collect()
    }

    /// The precomputed orientations of a piece.
    pub fn orientations(&self, name: &str) -> Option<&[Orientation]> {
        self.catalog
            .index_of(name)
            .map(|index| self.orientations[index].as_slice())
    }

    pub(crate) fn orientation_table(&self) -> &[Vec<Orientation>] {
        &self.orientations
    }

    /// Cells currently covered by a piece, or `None` if it is not on the board.
    pub fn placement_of(&self, name: &str) -> Option<Vec<Coord>> {
        let index = self.catalog.index_of(name)?;
        let cells = self.grid.cells_with(piece_number(index));
        (!cells.is_empty()).then_some(cells)
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.grid.in_bounds(coord)
    }

    /// True iff every cell is in bounds and empty.
    #[inline]
    pub fn can_place(&self, cells: &[Coord]) -> bool {
        cells.iter().all(|&coord| self.grid.is_empty_at(coord))
    }

    /// True iff no piece remains and no cell is empty. Blocked cells are ignored.
    pub fn completed(&self) -> bool {
        self.remaining.is_empty() && !self.grid.contains(EMPTY)
    }

    /// Places a piece on exactly the given absolute cells.
    ///
    /// # Errors
    ///
    /// - `UnknownPiece` if the name is not in the catalog.
    /// - `InvalidPlacement` if the piece is already placed, a cell is out of
    ///   bounds or not empty, or the cells are not an orientation of the piece.
    ///
    /// The board is unchanged on error.
    pub fn place(&mut self, name: &str, cells: &[Coord]) -> Result<()> {
        let index = self
            .catalog
            .index_of(name)
            .ok_or_else(|| LonposError::UnknownPiece(name.to_string()))?;
        let invalid = |reason| LonposError::InvalidPlacement {
            piece: name.to_string(),
            reason,
        };

        if !self.remaining.contains(&index) {
            return Err(invalid(PlacementIssue::Unavailable));
        }
        if !cells.iter().all(|&coord| self.grid.in_bounds(coord)) {
            return Err(invalid(PlacementIssue::OutOfBounds));
        }
        if !self.can_place(cells) {
            return Err(invalid(PlacementIssue::NotEmpty));
        }
        if !self.shapes[index].contains(&geometry::normalize(cells)) {
            return Err(invalid(PlacementIssue::UnrecognizedShape));
        }

        self.occupy(index, cells);
        Ok(())
    }

    /// Removes each named piece from the board and makes it available again.
    ///
    /// # Errors
    ///
    /// - `UnknownPiece` if a name is not in the catalog.
    /// - `PieceNotOnBoard` if a piece is not on the grid (naming a piece twice
    ///   counts as well).
    ///
    /// All names are checked before anything is removed.
    pub fn unplace(&mut self, names: &[&str]) -> Result<()> {
        let mut indices = Vec::with_capacity(names.len());
        for &name in names {
            let index = self
                .catalog
                .index_of(name)
                .ok_or_else(|| LonposError::UnknownPiece(name.to_string()))?;
            if indices.contains(&index) || !self.grid.contains(piece_number(index)) {
                return Err(LonposError::PieceNotOnBoard(name.to_string()));
            }
            indices.push(index);
        }

        for index in indices {
            let cells = self.grid.cells_with(piece_number(index));
            self.vacate(index, &cells);
        }
        Ok(())
    }

    /// Writes a piece into the grid and takes it out of the remaining list.
    ///
    /// No checks: callers have already run `can_place`.
    #[inline]
    pub(crate) fn occupy(&mut self, index: usize, cells: &[Coord]) {
        let number = piece_number(index);
        for &coord in cells {
            self.grid.set(coord, number);
        }
        if let Some(position) = self.remaining.iter().position(|&r| r == index) {
            self.remaining.remove(position);
        }
        trace!(event = "place", piece = index, cells = cells.len());
    }

    /// Clears a piece's cells and appends it to the end of the remaining list.
    #[inline]
    pub(crate) fn vacate(&mut self, index: usize, cells: &[Coord]) {
        for &coord in cells {
            self.grid.set(coord, EMPTY);
        }
        self.remaining.push(index);
        trace!(event = "unplace", piece = index, cells = cells.len());
    }

    /// Replaces the grid with a finished solution and marks every piece placed.
    pub(crate) fn adopt(&mut self, solution: Grid) {
        self.grid = solution;
        self.remaining.clear();
    }
}
