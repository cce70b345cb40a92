//! The board: a square matrix of pieces, its generation, and cell exchange.

use std::fmt;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::game::entities::PieceFactory;
use crate::game::types::{Piece, PieceKind, Position};

/// Square board of pieces, indexed `[row][col]` with row 0 at the top.
///
/// Every cell holds exactly one piece. Operations that change the board
/// return a new `Grid` and leave their input untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Piece>>,
}

impl Grid {
    /// Build a grid from rows of pieces. Each piece's coordinates are rewritten
    /// to the cell it occupies.
    pub fn from_rows(mut rows: Vec<Vec<Piece>>) -> Self {
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, piece) in cells.iter_mut().enumerate() {
                piece.move_to(Position { row, col });
            }
        }
        Grid { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size() && pos.col < self.size()
    }

    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.rows.get(pos.row).and_then(|row| row.get(pos.col))
    }

    pub fn kind_at(&self, row: usize, col: usize) -> PieceKind {
        self.rows[row][col].kind
    }

    pub fn rows(&self) -> &[Vec<Piece>] {
        &self.rows
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.rows.iter().flatten()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|p| p.kind.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Generate a `size`×`size` board with no run of three anywhere.
///
/// Cells are filled row by row, left to right, so only the left and upper
/// neighbours exist when a cell is filled; forbidding the kind of a matching
/// pair on either side is enough to rule out every run.
pub fn initialize<R: Rng>(size: usize, factory: &mut PieceFactory<R>) -> Grid {
    let mut rows: Vec<Vec<Piece>> = Vec::with_capacity(size);

    for row in 0..size {
        let mut cells: Vec<Piece> = Vec::with_capacity(size);
        for col in 0..size {
            let mut forbidden: Vec<PieceKind> = Vec::with_capacity(2);

            if col >= 2 && cells[col - 1].kind == cells[col - 2].kind {
                forbidden.push(cells[col - 1].kind);
            }
            if row >= 2 && rows[row - 1][col].kind == rows[row - 2][col].kind {
                forbidden.push(rows[row - 1][col].kind);
            }

            cells.push(factory.spawn(Position { row, col }, &forbidden));
        }
        rows.push(cells);
    }

    let grid = Grid { rows };
    debug!("[Grid] Generated {}x{} board:\n{}", size, size, grid);
    grid
}

/// True when `a` and `b` share an edge.
pub fn are_adjacent(a: Position, b: Position) -> bool {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
}

/// Exchange the pieces at `a` and `b`, returning the new board.
///
/// Adjacency is not checked. Swapping the same pair again restores the input.
pub fn swap(grid: &Grid, a: Position, b: Position) -> Grid {
    let mut rows = grid.rows.clone();

    let mut first = rows[a.row][a.col].clone();
    let mut second = rows[b.row][b.col].clone();
    first.move_to(b);
    second.move_to(a);

    rows[a.row][a.col] = second;
    rows[b.row][b.col] = first;

    Grid { rows }
}


#[cfg(test)]
mod tests {
    use super::test_support::grid_from;
    use super::*;
    use crate::config::game::{BASE_GRID_SIZE, MAX_GRID_SIZE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn has_run_of_three(grid: &Grid) -> bool {
        let n = grid.size();
        for r in 0..n {
            for c in 0..n {
                if c + 2 < n && grid.kind_at(r, c) == grid.kind_at(r, c + 1) && grid.kind_at(r, c) == grid.kind_at(r, c + 2) {
                    return true;
                }
                if r + 2 < n && grid.kind_at(r, c) == grid.kind_at(r + 1, c) && grid.kind_at(r, c) == grid.kind_at(r + 2, c) {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_initialize_size_and_coordinates() {
        let mut factory = PieceFactory::new(StdRng::seed_from_u64(5));
        let grid = initialize(8, &mut factory);
        assert_eq!(grid.size(), 8);
        assert!(grid.rows().iter().all(|row| row.len() == 8));
        for (r, row) in grid.rows().iter().enumerate() {
            for (c, piece) in row.iter().enumerate() {
                assert_eq!((piece.row, piece.col), (r, c));
            }
        }
    }

    #[test]
    fn test_initialize_has_no_runs() {
        for seed in 0..50 {
            for size in BASE_GRID_SIZE..=MAX_GRID_SIZE {
                let mut factory = PieceFactory::new(StdRng::seed_from_u64(seed));
                let grid = initialize(size, &mut factory);
                assert!(!has_run_of_three(&grid), "seed {seed} size {size}:\n{grid}");
            }
        }
    }

    #[test]
    fn test_initialize_unique_ids() {
        let mut factory = PieceFactory::new(StdRng::seed_from_u64(9));
        let grid = initialize(10, &mut factory);
        let ids: HashSet<_> = grid.pieces().map(|p| p.id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_adjacency() {
        let center = Position::new(3, 3);
        assert!(are_adjacent(center, Position::new(2, 3)));
        assert!(are_adjacent(center, Position::new(4, 3)));
        assert!(are_adjacent(center, Position::new(3, 2)));
        assert!(are_adjacent(center, Position::new(3, 4)));
        assert!(!are_adjacent(center, center));
        assert!(!are_adjacent(center, Position::new(4, 4)));
        assert!(!are_adjacent(center, Position::new(3, 5)));
        assert!(!are_adjacent(Position::new(0, 0), Position::new(0, 2)));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for a_row in 0..5 {
            for a_col in 0..5 {
                for b_row in 0..5 {
                    for b_col in 0..5 {
                        let a = Position::new(a_row, a_col);
                        let b = Position::new(b_row, b_col);
                        assert_eq!(are_adjacent(a, b), are_adjacent(b, a));
                    }
                }
            }
        }
    }

    #[test]
    fn test_swap_exchanges_and_updates_coordinates() {
        let grid = grid_from(&["RGB", "YOP", "BRG"]);
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let swapped = swap(&grid, a, b);

        let at_a = swapped.get(a).unwrap();
        let at_b = swapped.get(b).unwrap();
        assert_eq!(at_a.id, grid.get(b).unwrap().id);
        assert_eq!(at_b.id, grid.get(a).unwrap().id);
        assert_eq!(at_a.pos(), a);
        assert_eq!(at_b.pos(), b);

        // Input is untouched.
        assert_eq!(grid.kind_at(0, 0), PieceKind::Red);
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let mut factory = PieceFactory::new(StdRng::seed_from_u64(21));
        let grid = initialize(7, &mut factory);
        let a = Position::new(2, 3);
        let b = Position::new(3, 3);
        assert_eq!(swap(&swap(&grid, a, b), a, b), grid);
    }
}
