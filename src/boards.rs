//! Board shapes.
//!
//! Each provider returns an initial grid with the cut-out cells blocked. The
//! solver accepts any grid, so a new shape only needs a new provider here.

use std::fmt;

use crate::board::Board;
use crate::error::{LonposError, Result};
use crate::grid::Grid;
use crate::pieces::{Catalog, Coord};

/// Width of the calendar board.
pub const CALENDAR_WIDTH: usize = 9;

/// Height of the calendar board.
pub const CALENDAR_HEIGHT: usize = 5;

/// The two permanently blocked corners of the calendar board.
pub const CALENDAR_CORNERS: [Coord; 2] = [(8, 0, 0), (8, 4, 0)];

/// The open 5x11 rectangle.
pub fn rectangle() -> Grid {
    Grid::new_2d(11, 5)
}

/// A 10x10 square with the upper-left staircase cut off, leaving a
/// right triangle of 55 cells.
pub fn triangle() -> Grid {
    let mut grid = Grid::new_2d(10, 10);
    for x in 0..10 {
        for y in 0..(9 - x) {
            grid.block((x, y, 0));
        }
    }
    grid
}

/// A 9x9 arrowhead pointing at the lower right.
pub fn arrowhead() -> Grid {
    let mut grid = Grid::new_2d(9, 9);
    // the shape is symmetric about the main diagonal
    let cutouts: [(i32, &[i32]); 3] = [
        (0, &[0, 1, 2, 3, 6, 7, 8]),
        (1, &[1, 2, 3, 7, 8]),
        (2, &[2, 8]),
    ];
    for (row, columns) in cutouts {
        for &column in columns {
            grid.block((column, row, 0));
            grid.block((row, column, 0));
        }
    }
    grid.block((5, 6, 0));
    grid
}

/// A 9x9 butterfly, symmetric under a half turn.
pub fn butterfly() -> Grid {
    let mut grid = Grid::new_2d(9, 9);
    let cutouts: [(i32, &[i32]); 4] = [
        (0, &[0, 1, 2, 3, 8]),
        (1, &[0, 1, 2, 3]),
        (2, &[0, 1]),
        (3, &[0, 1]),
    ];
    for (row, columns) in cutouts {
        for &column in columns {
            grid.block((column, row, 0));
            grid.block((8 - column, 8 - row, 0));
        }
    }
    grid
}

/// A five-layer square pyramid on the stacked-square lattice.
///
/// Layer `z` keeps the cells with `x + z <= 4` and `y + z <= 4`, so layers
/// hold 25, 16, 9, 4 and 1 cells.
pub fn pyramid() -> Grid {
    let mut grid = Grid::new_3d(5, 5, 5);
    for z in 0..5 {
        for y in 0..5 {
            for x in 0..5 {
                if x + z > 4 || y + z > 4 {
                    grid.block((x, y, z));
                }
            }
        }
    }
    grid
}

/// The cells showing a month (1-12) and a day (1-31).
///
/// Reading the calendar board row by row and skipping the corners, the first
/// twelve cells are the months and the next thirty-one are the days.
///
/// # Errors
///
/// `InvalidGrid` if the month or day is out of range.
pub fn calendar_cell(month: u32, day: u32) -> Result<(Coord, Coord)> {
    if !(1..=12).contains(&month) {
        return Err(LonposError::InvalidGrid(format!("month {month} is not in 1..=12")));
    }
    if !(1..=31).contains(&day) {
        return Err(LonposError::InvalidGrid(format!("day {day} is not in 1..=31")));
    }

    let mut labelled = (0..CALENDAR_HEIGHT as i32)
        .flat_map(|y| (0..CALENDAR_WIDTH as i32).map(move |x| (x, y, 0)))
        .filter(|coord| !CALENDAR_CORNERS.contains(coord));
    let month_cell = labelled.nth(month as usize - 1);
    let day_cell = labelled.nth((12 - month + day - 1) as usize);

    match (month_cell, day_cell) {
        (Some(month_cell), Some(day_cell)) => Ok((month_cell, day_cell)),
        _ => Err(LonposError::InvalidGrid(format!(
            "no calendar cell for {month}/{day}"
        ))),
    }
}

/// The calendar board with the corners, the month, and the day blocked.
///
/// # Errors
///
/// `InvalidGrid` if the month or day is out of range.
pub fn calendar(month: u32, day: u32) -> Result<Grid> {
    let (month_cell, day_cell) = calendar_cell(month, day)?;
    let mut grid = Grid::new_2d(CALENDAR_WIDTH, CALENDAR_HEIGHT);
    for corner in CALENDAR_CORNERS {
        grid.block(corner);
    }
    grid.block(month_cell);
    grid.block(day_cell);
    Ok(grid)
}

/// A ready-to-solve calendar board for the given date.
///
/// # Errors
///
/// `InvalidGrid` if the month or day is out of range.
pub fn calendar_board(month: u32, day: u32) -> Result<Board> {
    Board::new(calendar(month, day)?, Catalog::calendar())
}

/// The fixed board shapes played with the standard pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Rectangle,
    Triangle,
    Arrowhead,
    Butterfly,
    Pyramid,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Rectangle,
        Variant::Triangle,
        Variant::Arrowhead,
        Variant::Butterfly,
        Variant::Pyramid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Rectangle => "rectangle",
            Variant::Triangle => "triangle",
            Variant::Arrowhead => "arrowhead",
            Variant::Butterfly => "butterfly",
            Variant::Pyramid => "pyramid",
        }
    }

    /// The initial grid for this shape.
    pub fn grid(self) -> Grid {
        match self {
            Variant::Rectangle => rectangle(),
            Variant::Triangle => triangle(),
            Variant::Arrowhead => arrowhead(),
            Variant::Butterfly => butterfly(),
            Variant::Pyramid => pyramid(),
        }
    }

    /// A board of this shape with the standard pieces, none placed.
    pub fn board(self) -> Board {
        Board::new(self.grid(), Catalog::standard())
            .unwrap_or_else(|e| unreachable!("built-in {self} board: {e}"))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::EMPTY;

    #[test]
    fn test_every_standard_shape_fits_the_standard_pieces() {
        let area = Catalog::standard().area();
        for variant in Variant::ALL {
            assert_eq!(variant.grid().count(EMPTY), area, "{variant}");
        }
    }

    #[test]
    fn test_pyramid_layer_sizes() {
        let grid = pyramid();
        let layer_sizes: Vec<usize> = (0..5)
            .map(|z| {
                (0..25)
                    .filter(|&i| grid.is_empty_at((i % 5, i / 5, z)))
                    .count()
            })
            .collect();
        assert_eq!(layer_sizes, vec![25, 16, 9, 4, 1]);
    }

    #[test]
    fn test_butterfly_is_point_symmetric() {
        let grid = butterfly();
        for x in 0..9 {
            for y in 0..9 {
                assert_eq!(grid.get((x, y, 0)), grid.get((8 - x, 8 - y, 0)));
            }
        }
    }

    #[test]
    fn test_calendar_cells() {
        assert_eq!(calendar_cell(1, 1).unwrap(), ((0, 0, 0), (4, 1, 0)));
        assert_eq!(calendar_cell(12, 31).unwrap(), ((3, 1, 0), (7, 4, 0)));
        assert_eq!(calendar_cell(9, 6).unwrap(), ((0, 1, 0), (0, 2, 0)));
    }

    #[test]
    fn test_calendar_cells_are_distinct_for_every_date() {
        for month in 1..=12 {
            for day in 1..=31 {
                let (month_cell, day_cell) = calendar_cell(month, day).unwrap();
                assert_ne!(month_cell, day_cell);
                assert!(!CALENDAR_CORNERS.contains(&month_cell));
                assert!(!CALENDAR_CORNERS.contains(&day_cell));
            }
        }
    }

    #[test]
    fn test_calendar_rejects_bad_dates() {
        assert!(calendar(0, 1).is_err());
        assert!(calendar(13, 1).is_err());
        assert!(calendar(1, 0).is_err());
        assert!(calendar(1, 32).is_err());
    }

    #[test]
    fn test_calendar_leaves_piece_area() {
        let grid = calendar(3, 14).unwrap();
        assert_eq!(grid.count(EMPTY), Catalog::calendar().area());
    }

    #[test]
    fn test_board_shapes_snapshot() {
        let catalog = Catalog::standard();
        let mut output = String::new();
        for variant in Variant::ALL {
            output.push_str(&format!("{variant}:\n"));
            output.push_str(&variant.grid().render(&catalog));
            output.push('\n');
        }
        insta::assert_snapshot!("board_shapes", output);
    }
}
