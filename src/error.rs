//! Error types for board construction, placement, and solving.

use thiserror::Error;

/// Why a direct `place` call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementIssue {
    /// The piece is already on the board.
    #[error("piece is not available")]
    Unavailable,
    /// At least one cell lies outside the grid.
    #[error("cells are out of bounds")]
    OutOfBounds,
    /// At least one cell is blocked or already occupied.
    #[error("cells are not empty")]
    NotEmpty,
    /// The cells do not form any orientation of the piece.
    #[error("cells do not match any orientation of the piece")]
    UnrecognizedShape,
}

/// Main error type for lonpos operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LonposError {
    /// A caller tried to place a piece somewhere it cannot go.
    #[error("invalid placement of piece {piece}: {reason}")]
    InvalidPlacement {
        piece: String,
        reason: PlacementIssue,
    },

    /// A caller tried to remove a piece the grid does not contain.
    #[error("piece {0} is not on the board")]
    PieceNotOnBoard(String),

    /// The search space was exhausted without a complete tiling.
    #[error("no solution exists for this board")]
    NoSolution,

    /// The name does not belong to the board's catalog.
    #[error("unknown piece {0}")]
    UnknownPiece(String),

    /// The piece catalog is malformed.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The initial grid is malformed.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// Result type alias for lonpos operations.
pub type Result<T> = std::result::Result<T, LonposError>;
