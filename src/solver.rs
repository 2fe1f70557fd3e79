//! Backtracking exact-cover search.
//!
//! The search fills one cell at a time. At each step it picks the empty cell
//! with the fewest empty neighbors (`next_pos`), then tries every remaining
//! piece in every orientation anchored on that cell. Because orientations are
//! anchored at each of their own cells, "orientation + cell" enumerates every
//! placement covering the cell.
//!
//! Solutions are produced lazily by [`Solutions`], an iterator that keeps the
//! recursion as an explicit stack of frames. Dropping the iterator part-way
//! undoes every placement it still holds.

use tracing::{debug, info};

use crate::board::Board;
use crate::error::{LonposError, Result};
use crate::geometry::translate;
use crate::grid::{Grid, Rank};
use crate::pieces::Coord;

impl Board {
    /// Chooses the next cell to fill.
    ///
    /// Scans empty cells and counts their empty in-bounds neighbors. A cell
    /// with 0 or 1 is returned at once. Otherwise:
    /// - 2D scans columns (`x` outer, `y` inner) and returns the first cell
    ///   seen with exactly 2.
    /// - 3D scans from the top layer down and returns the first cell with the
    ///   smallest count.
    ///
    /// Returns `None` when no cell is empty.
    pub fn next_pos(&self) -> Option<Coord> {
        let grid = self.grid();
        let offsets = grid.neighbor_offsets();
        let empty_neighbors = |(x, y, z): Coord| {
            offsets
                .iter()
                .filter(|&&(dx, dy, dz)| grid.is_empty_at((x + dx, y + dy, z + dz)))
                .count()
        };
        let (width, height, depth) = (
            grid.width() as i32,
            grid.height() as i32,
            grid.depth() as i32,
        );

        match grid.rank() {
            Rank::Two => {
                let mut candidate = None;
                for x in 0..width {
                    for y in 0..height {
                        let coord = (x, y, 0);
                        if !grid.is_empty_at(coord) {
                            continue;
                        }
                        let count = empty_neighbors(coord);
                        if count <= 1 {
                            return Some(coord);
                        }
                        if candidate.is_none() && count == 2 {
                            candidate = Some(coord);
                        }
                    }
                }
                candidate
            }
            Rank::Three => {
                let mut best: Option<(Coord, usize)> = None;
                for z in (0..depth).rev() {
                    for x in 0..width {
                        for y in 0..height {
                            let coord = (x, y, z);
                            if !grid.is_empty_at(coord) {
                                continue;
                            }
                            let count = empty_neighbors(coord);
                            if count <= 1 {
                                return Some(coord);
                            }
                            if best.map_or(true, |(_, fewest)| count < fewest) {
                                best = Some((coord, count));
                            }
                        }
                    }
                }
                best.map(|(coord, _)| coord)
            }
        }
    }

    /// Lazily enumerates every completion of the current board.
    ///
    /// The iterator borrows the board exclusively. Each item is a copy of the
    /// grid at a leaf where no pieces remain. If the board already has no
    /// remaining pieces, the current grid is the single item.
    pub fn solve_all(&mut self) -> Solutions<'_> {
        Solutions::new(self)
    }

    /// Finds one solution and leaves the board showing it.
    ///
    /// # Errors
    ///
    /// `NoSolution` if the search is exhausted; the board is then unchanged.
    pub fn solve_one(&mut self) -> Result<Grid> {
        let first = self.solve_all().next();
        let solution = first.ok_or(LonposError::NoSolution)?;
        self.adopt(solution.clone());
        Ok(solution)
    }
}

/// One level of the search: the cell being filled and the cursor over
/// (piece, orientation) candidates for it.
struct Frame {
    /// `None` when no cell is empty but pieces remain: a dead end.
    pos: Option<Coord>,
    /// Snapshot of the remaining pieces when this frame was entered.
    candidates: Vec<usize>,
    piece_cursor: usize,
    orientation_cursor: usize,
    /// The placement currently applied to the board by this frame.
    placed: Option<(usize, Vec<Coord>)>,
}

impl Frame {
    fn new(board: &Board) -> Self {
        Self {
            pos: board.next_pos(),
            candidates: board.remaining().to_vec(),
            piece_cursor: 0,
            orientation_cursor: 0,
            placed: None,
        }
    }

    /// Advances to the next placement that fits, in remaining-pieces order
    /// and then orientation order.
    fn next_placement(&mut self, board: &Board) -> Option<(usize, Vec<Coord>)> {
        let (px, py, pz) = self.pos?;
        let table = board.orientation_table();

        while let Some(&piece) = self.candidates.get(self.piece_cursor) {
            let orientations = &table[piece];
            while let Some(orientation) = orientations.get(self.orientation_cursor) {
                self.orientation_cursor += 1;

                // check before allocating the absolute cells
                let fits = orientation
                    .iter()
                    .all(|&(x, y, z)| board.grid().is_empty_at((x + px, y + py, z + pz)));
                if fits {
                    return Some((piece, translate(orientation, (px, py, pz))));
                }
            }
            self.piece_cursor += 1;
            self.orientation_cursor = 0;
        }

        None
    }
}

/// Lazy sequence of solutions; see [`Board::solve_all`].
pub struct Solutions<'a> {
    board: &'a mut Board,
    stack: Vec<Frame>,
    started: bool,
    exhausted: bool,
    /// Placements tried so far.
    nodes: u64,
    found: usize,
}

impl<'a> Solutions<'a> {
    fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            stack: Vec::new(),
            started: false,
            exhausted: false,
            nodes: 0,
            found: 0,
        }
    }

    /// Number of placements made so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Number of solutions yielded so far.
    pub fn found(&self) -> usize {
        self.found
    }

    fn leaf(&mut self) -> Grid {
        self.found += 1;
        debug!(event = "solution", index = self.found, nodes = self.nodes);
        self.board.grid().clone()
    }
}

impl Iterator for Solutions<'_> {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        if !self.started {
            self.started = true;
            info!(
                event = "solve_start",
                remaining = self.board.remaining().len(),
                empty = self.board.grid().count(crate::grid::EMPTY),
            );
            if self.board.remaining().is_empty() {
                self.exhausted = true;
                return Some(self.leaf());
            }
            self.stack.push(Frame::new(&*self.board));
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                if !self.exhausted {
                    self.exhausted = true;
                    info!(event = "solve_end", solutions = self.found, nodes = self.nodes);
                }
                return None;
            };

            // returning to this frame: undo whatever it placed last
            if let Some((piece, cells)) = frame.placed.take() {
                self.board.vacate(piece, &cells);
            }

            match frame.next_placement(&*self.board) {
                Some((piece, cells)) => {
                    self.board.occupy(piece, &cells);
                    frame.placed = Some((piece, cells));
                    self.nodes += 1;

                    if self.board.remaining().is_empty() {
                        return Some(self.leaf());
                    }
                    let child = Frame::new(&*self.board);
                    self.stack.push(child);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Drop for Solutions<'_> {
    fn drop(&mut self) {
        // innermost placement first
        while let Some(frame) = self.stack.pop() {
            if let Some((piece, cells)) = frame.placed {
                self.board.vacate(piece, &cells);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::{self, Variant};
    use crate::grid::{piece_number, EMPTY};
    use crate::pieces::{Catalog, Piece};

    fn sorted(mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort_unstable();
        indices
    }

    /// A solution grid is complete when a fresh board built from it is.
    fn is_complete(solution: &Grid, catalog: &Catalog) -> bool {
        Board::new(solution.clone(), catalog.clone())
            .map(|board| board.completed())
            .unwrap_or(false)
    }

    fn pyramid_with_base() -> Board {
        let mut board = Variant::Pyramid.board();
        board
            .place("C", &[(0, 3, 0), (0, 4, 0), (1, 4, 0), (2, 4, 0), (3, 4, 0)])
            .unwrap();
        board
            .place("E", &[(0, 2, 0), (1, 2, 0), (1, 3, 0), (2, 3, 0), (3, 3, 0)])
            .unwrap();
        board
            .place("I", &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)])
            .unwrap();
        board.place("F", &[(3, 2, 0), (4, 2, 0), (4, 3, 0)]).unwrap();
        board
            .place("K", &[(3, 0, 0), (3, 1, 0), (4, 0, 0), (4, 1, 0)])
            .unwrap();
        board
    }

    #[test]
    fn test_next_pos_prefers_forced_cell() {
        let mut grid = Grid::new_2d(4, 2);
        grid.block((3, 0, 0));
        let board = Board::new(grid, Catalog::standard()).unwrap();
        // (0, 0) is scanned first with 2 neighbors, but (3, 1) has only 1
        assert_eq!(board.next_pos(), Some((3, 1, 0)));
    }

    #[test]
    fn test_next_pos_2d_takes_first_two_neighbor_cell() {
        let board = Variant::Rectangle.board();
        assert_eq!(board.next_pos(), Some((0, 0, 0)));
    }

    #[test]
    fn test_next_pos_3d_scans_top_layer_first() {
        let board = Board::new(Grid::new_3d(1, 1, 3), Catalog::standard()).unwrap();
        // both ends of the column have one neighbor; the top one wins
        assert_eq!(board.next_pos(), Some((0, 0, 2)));
    }

    #[test]
    fn test_next_pos_3d_takes_true_minimum() {
        // every empty pyramid cell has at least 3 empty neighbors; the
        // base corner at the origin is the first with exactly 3
        let board = Variant::Pyramid.board();
        assert_eq!(board.next_pos(), Some((0, 0, 0)));
    }

    #[test]
    fn test_next_pos_none_when_full() {
        let catalog = Catalog::new(vec![Piece::new("X", "red", &[(0, 0)])]).unwrap();
        let mut board = Board::new(Grid::new_2d(1, 1), catalog).unwrap();
        board.place("X", &[(0, 0, 0)]).unwrap();
        assert_eq!(board.next_pos(), None);
    }

    #[test]
    fn test_solve_all_small_board_in_order() {
        let catalog = Catalog::new(vec![
            Piece::new("D", "red", &[(0, 0), (1, 0)]),
            Piece::new("M", "blue", &[(0, 0)]),
        ])
        .unwrap();
        let mut board = Board::new(Grid::new_2d(3, 1), catalog).unwrap();
        let solutions: Vec<Grid> = board.solve_all().collect();
        let values: Vec<&[u8]> = solutions.iter().map(Grid::values).collect();
        assert_eq!(values, vec![&[1, 1, 2][..], &[2, 1, 1][..]]);
    }

    #[test]
    fn test_solve_all_yields_current_grid_when_nothing_remains() {
        let catalog = Catalog::new(vec![Piece::new("X", "red", &[(0, 0)])]).unwrap();
        let mut board = Board::new(Grid::new_2d(2, 1), catalog).unwrap();
        board.place("X", &[(0, 0, 0)]).unwrap();
        let solutions: Vec<Grid> = board.solve_all().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].values(), &[1, EMPTY]);
    }

    #[test]
    fn test_dead_end_yields_nothing() {
        // two pieces, but only room for one
        let catalog = Catalog::new(vec![
            Piece::new("X", "red", &[(0, 0)]),
            Piece::new("Y", "blue", &[(0, 0)]),
        ])
        .unwrap();
        let mut board = Board::new(Grid::new_2d(1, 1), catalog).unwrap();
        assert_eq!(board.solve_all().count(), 0);
        assert_eq!(board.grid().values(), &[EMPTY]);
    }

    #[test]
    fn test_rectangle_first_three_solutions() {
        let mut board = Variant::Rectangle.board();
        let catalog = board.catalog().clone();
        let solutions: Vec<Grid> = board.solve_all().take(3).collect();

        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert!(is_complete(solution, &catalog));
        }
        assert_ne!(solutions[0], solutions[1]);
        assert_ne!(solutions[1], solutions[2]);
        assert_ne!(solutions[0], solutions[2]);
    }

    #[test]
    fn test_every_2d_shape_has_solutions() {
        for variant in [
            Variant::Rectangle,
            Variant::Triangle,
            Variant::Arrowhead,
            Variant::Butterfly,
        ] {
            let mut board = variant.board();
            let catalog = board.catalog().clone();
            let solutions: Vec<Grid> = board.solve_all().take(3).collect();
            assert_eq!(solutions.len(), 3, "{variant:?}");
            assert!(solutions.iter().all(|s| is_complete(s, &catalog)));
        }
    }

    #[test]
    fn test_rectangle_first_solution_snapshot() {
        let mut board = Variant::Rectangle.board();
        let solution = board.solve_all().next().unwrap();
        insta::assert_snapshot!(
            "rectangle_first_solution",
            solution.render(board.catalog())
        );
    }

    #[test]
    fn test_pyramid_with_base_has_two_solutions() {
        let mut board = pyramid_with_base();
        let catalog = board.catalog().clone();
        let mut solutions: Vec<Grid> = board.solve_all().collect();

        assert_eq!(solutions.len(), 2);
        assert!(solutions.iter().all(|s| is_complete(s, &catalog)));

        solutions.sort();
        let mut output = String::new();
        for (i, solution) in solutions.iter().enumerate() {
            output.push_str(&format!("Solution {}:\n", i + 1));
            output.push_str(&solution.render(&catalog));
            output.push('\n');
        }
        insta::assert_snapshot!("pyramid_solutions", output);
    }

    #[test]
    fn test_calendar_solutions_leave_date_uncovered() {
        let mut board = boards::calendar_board(3, 15).unwrap();
        let catalog = board.catalog().clone();
        let (month, day) = boards::calendar_cell(3, 15).unwrap();
        let solutions: Vec<Grid> = board.solve_all().take(3).collect();

        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            for index in 0..catalog.len() {
                let cells = solution.cells_with(piece_number(index));
                assert_eq!(cells.len(), catalog.pieces()[index].size());
            }
            let mut uncovered = solution.cells_with(crate::grid::BLOCKED);
            uncovered.sort_unstable();
            let mut expected = vec![month, day, (8, 0, 0), (8, 4, 0)];
            expected.sort_unstable();
            assert_eq!(uncovered, expected);
            assert!(!solution.contains(EMPTY));
        }
    }

    #[test]
    fn test_calendar_date_without_tiling() {
        let mut board = boards::calendar_board(7, 4).unwrap();
        let before = board.grid().clone();
        assert_eq!(board.solve_one(), Err(LonposError::NoSolution));
        assert_eq!(board.grid(), &before);
        assert_eq!(board.remaining().len(), 7);
    }

    #[test]
    fn test_abandoned_search_restores_board() {
        let mut board = Variant::Rectangle.board();
        let before = board.grid().clone();
        {
            let mut solutions = board.solve_all();
            assert!(solutions.next().is_some());
            assert!(solutions.nodes() >= 12);
        }
        assert_eq!(board.grid(), &before);
        assert_eq!(sorted(board.remaining().to_vec()), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_exhausted_search_restores_board() {
        let mut board = pyramid_with_base();
        let before = board.grid().clone();
        let remaining = sorted(board.remaining().to_vec());
        assert_eq!(board.solve_all().count(), 2);
        assert_eq!(board.grid(), &before);
        assert_eq!(sorted(board.remaining().to_vec()), remaining);
    }

    #[test]
    fn test_solve_one_leaves_solution_on_board() {
        let mut board = pyramid_with_base();
        let solution = board.solve_one().unwrap();
        assert!(board.completed());
        assert_eq!(board.grid(), &solution);
        assert!(board.remaining().is_empty());
    }

    #[test]
    fn test_solve_one_without_solution() {
        let catalog = Catalog::new(vec![Piece::new("K", "lime", &[(0, 0), (0, 1), (1, 0), (1, 1)])])
            .unwrap();
        let mut board = Board::new(Grid::new_2d(3, 1), catalog).unwrap();
        assert_eq!(board.solve_one(), Err(LonposError::NoSolution));
        assert_eq!(board.grid().values(), &[EMPTY; 3]);
        assert_eq!(board.remaining(), &[0]);
    }
}
