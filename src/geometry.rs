//! Orientation generation for flat pieces.
//!
//! A flat piece has 8 possible orientations in the plane (the dihedral group
//! of a square): 4 rotations, each optionally mirrored. On the stacked-square
//! lattice of a pyramid, a flat piece can additionally lie in one of three
//! square-lattice planes, so the 3D orientation set is the 2D set embedded
//! into each of those planes.

use rustc_hash::FxHashSet;

use crate::pieces::{Coord, Offset};

/// A set of cell offsets, sorted so equal shapes compare equal.
///
/// Always contains `(0, 0, 0)`: the anchor that is translated onto a board cell.
pub type Orientation = Vec<Coord>;

/// All 8 symmetries of the square lattice.
///
/// - Transforms 0-3: rotations by 0, 90, 180, 270 degrees
/// - Transforms 4-7: the same rotations applied after a mirror across the y axis
pub const DIHEDRAL: [fn(Offset) -> Offset; 8] = [
    |(x, y)| (x, y),
    |(x, y)| (-y, x),
    |(x, y)| (-x, -y),
    |(x, y)| (y, -x),
    |(x, y)| (-x, y),
    |(x, y)| (-y, -x),
    |(x, y)| (x, -y),
    |(x, y)| (y, x),
];

/// The three square-lattice planes of the stacked-square lattice.
///
/// Layer `z` of a pyramid sits on top of layer `z - 1` with each ball resting
/// in the pocket of four balls below, at offsets `(0,0,-1) (1,0,-1) (0,1,-1)
/// (1,1,-1)`. A flat piece lies either in a layer or in one of the two
/// vertical planes through the pyramid's diagonals. Those two show up as
/// slanted planes in grid coordinates and meet along the apex column.
pub const PLANES: [fn(Offset) -> Coord; 3] = [
    // flat, within one layer
    |(p, q)| (p, q, 0),
    // slanted, spanned by (1,0,-1) and (0,1,-1)
    |(p, q)| (p, q, -p - q),
    // slanted, spanned by (1,1,-1) and (0,0,1)
    |(p, q)| (p, p, q - p),
];

/// Generates every distinct 2D orientation of a piece, anchored at each of
/// its own cells.
///
/// Applies all 8 symmetries, then re-anchors each result so that every one
/// of its cells in turn lands on the origin. Anchoring at every cell means a
/// placement covering a target cell is always "orientation + target".
/// Duplicates produced by symmetric pieces are removed.
pub fn orientations_2d(definition: &[Offset]) -> Vec<Orientation> {
    let mut seen: FxHashSet<Orientation> = FxHashSet::default();

    for transform in DIHEDRAL {
        let transformed: Vec<Offset> = definition.iter().map(|&offset| transform(offset)).collect();
        for &anchor in &transformed {
            seen.insert(anchor_at(&transformed, anchor, |(x, y)| (x, y, 0)));
        }
    }

    into_sorted(seen)
}

/// Generates every distinct orientation of a flat piece on the pyramid lattice.
///
/// Each 2D orientation is embedded into each of the three [`PLANES`]. The
/// embeddings are linear, so the anchor stays on the origin.
pub fn orientations_3d(definition: &[Offset]) -> Vec<Orientation> {
    let mut seen: FxHashSet<Orientation> = FxHashSet::default();

    for orientation in orientations_2d(definition) {
        for embed in PLANES {
            let mut cells: Orientation = orientation
                .iter()
                .map(|&(p, q, _)| embed((p, q)))
                .collect();
            cells.sort_unstable();
            seen.insert(cells);
        }
    }

    into_sorted(seen)
}

/// Returns the orientation set for the given board rank.
pub fn orientations(definition: &[Offset], three_d: bool) -> Vec<Orientation> {
    if three_d {
        orientations_3d(definition)
    } else {
        orientations_2d(definition)
    }
}

/// Canonical form of an absolute cell set: sorted, relative to its first cell
/// as given by the caller.
pub fn normalize(cells: &[Coord]) -> Orientation {
    let Some(&(ox, oy, oz)) = cells.first() else {
        return Vec::new();
    };
    let mut relative: Orientation = cells
        .iter()
        .map(|&(x, y, z)| (x - ox, y - oy, z - oz))
        .collect();
    relative.sort_unstable();
    relative
}

/// Translates an orientation so its anchor sits on `target`.
#[inline]
pub fn translate(orientation: &[Coord], target: Coord) -> Vec<Coord> {
    orientation
        .iter()
        .map(|&(x, y, z)| (x + target.0, y + target.1, z + target.2))
        .collect()
}

/// Shifts `offsets` so `anchor` lands on the origin, lifting into 3D.
fn anchor_at(offsets: &[Offset], anchor: Offset, lift: fn(Offset) -> Coord) -> Orientation {
    let mut cells: Orientation = offsets
        .iter()
        .map(|&(x, y)| lift((x - anchor.0, y - anchor.1)))
        .collect();
    cells.sort_unstable();
    cells
}

// FxHashSet iteration order is not meaningful; sort so the search order is stable.
fn into_sorted(seen: FxHashSet<Orientation>) -> Vec<Orientation> {
    let mut orientations: Vec<Orientation> = seen.into_iter().collect();
    orientations.sort();
    orientations
}
