//! Piece definitions, coordinate types, and the piece catalog.
//!
//! Each piece is defined by the 2D offsets of its balls in one reference
//! orientation. Every other orientation is derived by the geometry engine.

use rustc_hash::FxHashMap;

use crate::error::{LonposError, Result};

/// A lattice coordinate. 2D boards and orientations always use `z = 0`.
pub type Coord = (i32, i32, i32);

/// A 2D offset in a piece definition.
pub type Offset = (i32, i32);

/// Largest number of pieces a grid can label (`u8::MAX` is the blocked sentinel).
pub const MAX_PIECES: usize = 254;

/// A single puzzle piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: String,
    /// Display color; the solver never looks at it.
    pub color: String,
    pub definition: Vec<Offset>,
}

impl Piece {
    pub fn new(name: impl Into<String>, color: impl Into<String>, definition: &[Offset]) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            definition: definition.to_vec(),
        }
    }

    /// Number of balls in the piece.
    pub fn size(&self) -> usize {
        self.definition.len()
    }
}

/// The twelve standard pieces: name, color, definition.
pub const PIECES: &[(&str, &str, &[Offset])] = &[
    ("A", "orange", &[(0, 0), (1, 0), (1, 1), (1, 2)]),
    ("B", "red", &[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]),
    ("C", "blue", &[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3)]),
    ("D", "pink", &[(0, 0), (1, 0), (1, 1), (1, 2), (1, -1)]),
    ("E", "green", &[(0, 0), (0, 1), (1, 1), (1, 2), (1, 3)]),
    ("F", "whitesmoke", &[(0, 0), (1, 0), (1, 1)]),
    ("G", "cyan", &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]),
    ("H", "magenta", &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]),
    ("I", "yellow", &[(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)]),
    ("J", "darkviolet", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    ("K", "lime", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    ("L", "gray", &[(0, 0), (1, 0), (1, 1), (1, -1), (2, 0)]),
];

/// The seven calendar pieces. Together they cover 41 cells, which is the
/// calendar board minus the month and day left showing.
pub const CALENDAR_PIECES: &[(&str, &str, &[Offset])] = &[
    ("A", "orange", &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (3, 0)]),
    ("B", "red", &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0)]),
    ("C", "blue", &[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]),
    ("D", "pink", &[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1)]),
    ("E", "green", &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)]),
    ("F", "cyan", &[(0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 2)]),
    ("G", "yellow", &[(0, 0), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]),
];

/// An ordered, validated set of pieces.
///
/// Piece `k` in the catalog is written into the grid as the value `k + 1`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pieces: Vec<Piece>,
    by_name: FxHashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty catalogs, empty or self-overlapping
    /// definitions, and duplicate names.
    pub fn new(pieces: Vec<Piece>) -> Result<Self> {
        if pieces.is_empty() {
            return Err(LonposError::InvalidCatalog("catalog has no pieces".into()));
        }
        if pieces.len() > MAX_PIECES {
            return Err(LonposError::InvalidCatalog(format!(
                "{} pieces exceeds the limit of {MAX_PIECES}",
                pieces.len()
            )));
        }

        let mut by_name = FxHashMap::default();
        for (index, piece) in pieces.iter().enumerate() {
            if piece.definition.is_empty() {
                return Err(LonposError::InvalidCatalog(format!(
                    "piece {} has an empty definition",
                    piece.name
                )));
            }
            let mut offsets = piece.definition.clone();
            offsets.sort_unstable();
            offsets.dedup();
            if offsets.len() != piece.definition.len() {
                return Err(LonposError::InvalidCatalog(format!(
                    "piece {} repeats an offset",
                    piece.name
                )));
            }
            if by_name.insert(piece.name.clone(), index).is_some() {
                return Err(LonposError::InvalidCatalog(format!(
                    "duplicate piece name {}",
                    piece.name
                )));
            }
        }

        Ok(Self { pieces, by_name })
    }

    /// Builds a catalog from a static `(name, color, definition)` table.
    pub fn from_table(table: &[(&str, &str, &[Offset])]) -> Result<Self> {
        Self::new(
            table
                .iter()
                .map(|&(name, color, definition)| Piece::new(name, color, definition))
                .collect(),
        )
    }

    /// The twelve standard pieces.
    pub fn standard() -> Self {
        Self::from_table(PIECES).unwrap_or_else(|e| unreachable!("standard catalog: {e}"))
    }

    /// The seven calendar pieces.
    pub fn calendar() -> Self {
        Self::from_table(CALENDAR_PIECES).unwrap_or_else(|e| unreachable!("calendar catalog: {e}"))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    /// Catalog index of the piece with this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Total number of cells the catalog covers.
    pub fn area(&self) -> usize {
        self.pieces.iter().map(Piece::size).sum()
    }
}
