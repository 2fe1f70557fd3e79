//! Occupancy grid storage for 2D and 3D boards.
//!
//! The grid is a flat vector where each cell holds `EMPTY`, `BLOCKED`, or a
//! 1-based piece number. Index order is layer-major:
//! `idx = (z * height + y) * width + x`.

use crate::error::{LonposError, Result};
use crate::pieces::{Catalog, Coord, MAX_PIECES};

/// Cell value of an unfilled cell.
pub const EMPTY: u8 = 0;

/// Cell value of a cell that can never be filled.
pub const BLOCKED: u8 = u8::MAX;

/// The four axis neighbors of a cell on the square lattice.
pub const NEIGHBORS_2D: [Coord; 4] = [(1, 0, 0), (0, 1, 0), (-1, 0, 0), (0, -1, 0)];

/// The twelve neighbors of a cell on the stacked-square lattice.
///
/// Four in the layer, four in the layer above (the cell resting on the
/// pocket formed by this cell and its lower-coordinate neighbors) and four in
/// the layer below.
pub const NEIGHBORS_3D: [Coord; 12] = [
    (1, 0, 0),
    (0, 1, 0),
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, 1),
    (-1, 0, 1),
    (0, -1, 1),
    (-1, -1, 1),
    (0, 0, -1),
    (1, 0, -1),
    (0, 1, -1),
    (1, 1, -1),
];

/// Dimensionality of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
}

/// Typed view of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blocked,
    Empty,
    /// Covered by the piece with this catalog index.
    Occupied(usize),
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        match value {
            EMPTY => Cell::Empty,
            BLOCKED => Cell::Blocked,
            number => Cell::Occupied(number as usize - 1),
        }
    }
}

/// Grid value written for the piece at `piece_index`.
#[inline]
pub const fn piece_number(piece_index: usize) -> u8 {
    (piece_index + 1) as u8
}

/// A rectangular (2D) or cuboid (3D) grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grid {
    rank: Rank,
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// An all-empty 2D grid.
    pub fn new_2d(width: usize, height: usize) -> Self {
        Self {
            rank: Rank::Two,
            width,
            height,
            depth: 1,
            cells: vec![EMPTY; width * height],
        }
    }

    /// An all-empty 3D grid.
    pub fn new_3d(width: usize, height: usize, depth: usize) -> Self {
        Self {
            rank: Rank::Three,
            width,
            height,
            depth,
            cells: vec![EMPTY; width * height * depth],
        }
    }

    /// Builds a grid from raw cell values in layer-major order.
    pub fn from_cells(rank: Rank, extents: (usize, usize, usize), cells: Vec<u8>) -> Result<Self> {
        let (width, height, depth) = extents;
        if rank == Rank::Two && depth != 1 {
            return Err(LonposError::InvalidGrid(format!(
                "2D grid must have depth 1, got {depth}"
            )));
        }
        if width * height * depth != cells.len() {
            return Err(LonposError::InvalidGrid(format!(
                "{width}x{height}x{depth} grid needs {} cells, got {}",
                width * height * depth,
                cells.len()
            )));
        }
        if let Some(&bad) = cells
            .iter()
            .find(|&&v| v != BLOCKED && v as usize > MAX_PIECES)
        {
            return Err(LonposError::InvalidGrid(format!("cell value {bad} out of range")));
        }
        Ok(Self {
            rank,
            width,
            height,
            depth,
            cells,
        })
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn is_3d(&self) -> bool {
        self.rank == Rank::Three
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Raw cell values in layer-major order.
    pub fn values(&self) -> &[u8] {
        &self.cells
    }

    /// Neighbor offsets of the lattice this grid lives on.
    pub fn neighbor_offsets(&self) -> &'static [Coord] {
        match self.rank {
            Rank::Two => &NEIGHBORS_2D,
            Rank::Three => &NEIGHBORS_3D,
        }
    }

    #[inline]
    pub fn in_bounds(&self, (x, y, z): Coord) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.depth
    }

    /// Converts a coordinate to a linear cell index, or `None` if out of bounds.
    #[inline]
    pub fn coord_to_idx(&self, coord: Coord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        let (x, y, z) = coord;
        Some((z as usize * self.height + y as usize) * self.width + x as usize)
    }

    /// Converts a linear cell index to a coordinate.
    #[inline]
    pub fn idx_to_coord(&self, cell_index: usize) -> Coord {
        (
            (cell_index % self.width) as i32,
            ((cell_index / self.width) % self.height) as i32,
            (cell_index / (self.width * self.height)) as i32,
        )
    }

    /// Raw value at `coord`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<u8> {
        self.coord_to_idx(coord).map(|idx| self.cells[idx])
    }

    /// Typed value at `coord`, or `None` if out of bounds.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.get(coord).map(Cell::from)
    }

    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord) == Some(EMPTY)
    }

    /// Writes a raw value. Out-of-bounds writes are ignored; callers check first.
    #[inline]
    pub fn set(&mut self, coord: Coord, value: u8) {
        if let Some(idx) = self.coord_to_idx(coord) {
            self.cells[idx] = value;
        }
    }

    /// Marks a cell as permanently unusable.
    pub fn block(&mut self, coord: Coord) {
        self.set(coord, BLOCKED);
    }

    /// All coordinates holding `value`, in index order.
    pub fn cells_with(&self, value: u8) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == value)
            .map(|(idx, _)| self.idx_to_coord(idx))
            .collect()
    }

    pub fn contains(&self, value: u8) -> bool {
        self.cells.contains(&value)
    }

    pub fn count(&self, value: u8) -> usize {
        self.cells.iter().filter(|&&v| v == value).count()
    }

    /// Renders the grid as text.
    ///
    /// One character per cell: the first letter of the piece name, `.` for
    /// empty, a space for blocked. Rows run from `y = 0` downward; 3D layers
    /// start at `z = 0` and are separated by a blank line. Trailing spaces
    /// are trimmed.
    pub fn render(&self, catalog: &Catalog) -> String {
        let mut layers = Vec::with_capacity(self.depth);
        for z in 0..self.depth {
            let mut rows = Vec::with_capacity(self.height);
            for y in 0..self.height {
                let row: String = (0..self.width)
                    .map(|x| {
                        let value = self.cells[(z * self.height + y) * self.width + x];
                        match Cell::from(value) {
                            Cell::Blocked => ' ',
                            Cell::Empty => '.',
                            Cell::Occupied(index) => catalog
                                .get(index)
                                .and_then(|piece| piece.name.chars().next())
                                .unwrap_or('?'),
                        }
                    })
                    .collect();
                rows.push(row.trim_end().to_string());
            }
            layers.push(rows.join("\n"));
        }
        let mut output = layers.join("\n\n");
        output.push('\n');
        output
    }
}
