//! Cascade resolution: removal, gravity and refill.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::game::entities::PieceFactory;
use crate::game::grid::Grid;
use crate::game::types::{Piece, PieceId, PieceKind, Position};

type Cells = Vec<Vec<Option<Piece>>>;

/// Remove the `matched` pieces, let the rest fall, and refill from the top.
///
/// Survivors keep their vertical order within each column. Refilled pieces
/// never complete a run with their already-placed neighbours, unless every
/// kind is ruled out at that cell.
pub fn resolve<R: Rng>(grid: &Grid, matched: &HashSet<PieceId>, factory: &mut PieceFactory<R>) -> Grid {
    let n = grid.size();
    let mut cells: Cells = vec![vec![None; n]; n];

    for col in 0..n {
        let survivors: Vec<Piece> = grid
            .rows()
            .iter()
            .map(|row| &row[col])
            .filter(|piece| !matched.contains(&piece.id))
            .cloned()
            .collect();

        let vacated = n - survivors.len();
        for (i, mut piece) in survivors.into_iter().enumerate() {
            let row = vacated + i;
            piece.move_to(Position { row, col });
            cells[row][col] = Some(piece);
        }
    }

    let mut spawned = 0;
    for col in 0..n {
        for row in 0..n {
            if cells[row][col].is_some() {
                break;
            }
            let forbidden = forbidden_kinds(&cells, row, col);
            cells[row][col] = Some(factory.spawn(Position { row, col }, &forbidden));
            spawned += 1;
        }
    }

    let rows: Vec<Vec<Piece>> = cells
        .into_iter()
        .map(|row| row.into_iter().flatten().collect())
        .collect();
    let resolved = Grid::from_rows(rows);

    debug!("[Cascade] Removed {} pieces, spawned {}:\n{}", matched.len(), spawned, resolved);
    resolved
}

fn kind_at(cells: &Cells, row: isize, col: isize) -> Option<PieceKind> {
    if row < 0 || col < 0 {
        return None;
    }
    cells
        .get(row as usize)
        .and_then(|r| r.get(col as usize))
        .and_then(|cell| cell.as_ref())
        .map(|piece| piece.kind)
}

fn same_pair(a: Option<PieceKind>, b: Option<PieceKind>) -> Option<PieceKind> {
    match (a, b) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}

/// Kinds that would complete a run at an empty cell, given the cells filled so far.
fn forbidden_kinds(cells: &Cells, row: usize, col: usize) -> Vec<PieceKind> {
    let (r, c) = (row as isize, col as isize);
    let at = |dr: isize, dc: isize| kind_at(cells, r + dr, c + dc);

    let candidates = [
        same_pair(at(0, -1), at(0, -2)),
        same_pair(at(0, 1), at(0, 2)),
        same_pair(at(0, -1), at(0, 1)),
        same_pair(at(-1, 0), at(-2, 0)),
        same_pair(at(1, 0), at(2, 0)),
        same_pair(at(-1, 0), at(1, 0)),
    ];

    let mut forbidden: Vec<PieceKind> = Vec::with_capacity(candidates.len());
    for kind in candidates.into_iter().flatten() {
        if !forbidden.contains(&kind) {
            forbidden.push(kind);
        }
    }
    forbidden
}
