//! Lonpos Puzzle Solver Library
//!
//! Enumerates exact-cover tilings of 2D boards and the 3D pyramid with a
//! fixed set of flat pieces, each used once in any orientation.
//!
//! ```no_run
//! use lonpos::boards::Variant;
//!
//! let mut board = Variant::Rectangle.board();
//! for solution in board.solve_all().take(3) {
//!     println!("{}", solution.render(&lonpos::Catalog::standard()));
//! }
//! ```

pub mod board;
pub mod boards;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod solver;

pub use board::Board;
pub use boards::Variant;
pub use error::{LonposError, PlacementIssue, Result};
pub use grid::{Cell, Grid, Rank};
pub use pieces::{Catalog, Coord, Piece};
pub use solver::Solutions;
