//! Match detection.
//!
//! Rows and columns are swept independently. A run is reported once, from
//! its first cell, however many windows of three fall inside it. A cell
//! shared by a horizontal and a vertical run shows up in both groups.

use std::collections::HashSet;

use crate::config::game::MIN_MATCH_LEN;
use crate::game::grid::{Grid, swap};
use crate::game::types::{MatchGroup, Orientation, PieceId, PieceKind, Position};

/// Cell `offset` along line `line` in the given orientation.
fn line_cell(orientation: Orientation, line: usize, offset: usize) -> Position {
    match orientation {
        Orientation::Horizontal => Position { row: line, col: offset },
        Orientation::Vertical => Position { row: offset, col: line },
    }
}

fn kind_on_line(grid: &Grid, orientation: Orientation, line: usize, offset: usize) -> PieceKind {
    let pos = line_cell(orientation, line, offset);
    grid.kind_at(pos.row, pos.col)
}

fn sweep(
    grid: &Grid,
    orientation: Orientation,
    seen_starts: &mut HashSet<(Orientation, Position)>,
    groups: &mut Vec<MatchGroup>,
) {
    let n = grid.size();
    if n < MIN_MATCH_LEN {
        return;
    }

    for line in 0..n {
        for offset in 0..=(n - MIN_MATCH_LEN) {
            let kind = kind_on_line(grid, orientation, line, offset);
            let window_matches = (1..MIN_MATCH_LEN)
                .all(|k| kind_on_line(grid, orientation, line, offset + k) == kind);
            if !window_matches {
                continue;
            }

            let mut start = offset;
            while start > 0 && kind_on_line(grid, orientation, line, start - 1) == kind {
                start -= 1;
            }
            if !seen_starts.insert((orientation, line_cell(orientation, line, start))) {
                continue;
            }

            let mut end = start;
            while end + 1 < n && kind_on_line(grid, orientation, line, end + 1) == kind {
                end += 1;
            }

            let positions = (start..=end)
                .map(|o| line_cell(orientation, line, o))
                .collect();
            groups.push(MatchGroup::new(orientation, kind, positions));
        }
    }
}

/// Every maximal run of `MIN_MATCH_LEN` or more, horizontal runs first.
pub fn find_match_groups(grid: &Grid) -> Vec<MatchGroup> {
    let mut seen_starts = HashSet::new();
    let mut groups = Vec::new();
    sweep(grid, Orientation::Horizontal, &mut seen_starts, &mut groups);
    sweep(grid, Orientation::Vertical, &mut seen_starts, &mut groups);
    groups
}

/// Identities of every piece in some run. Shared cells appear once.
pub fn find_matched_ids(grid: &Grid) -> HashSet<PieceId> {
    matched_ids_of(grid, &find_match_groups(grid))
}

/// Identities of the pieces covered by `groups`.
pub fn matched_ids_of(grid: &Grid, groups: &[MatchGroup]) -> HashSet<PieceId> {
    groups
        .iter()
        .flat_map(|group| group.positions.iter())
        .filter_map(|pos| grid.get(*pos).map(|piece| piece.id))
        .collect()
}

/// Length of the same-kind line through `pos` along one axis.
fn run_length_through(grid: &Grid, pos: Position, orientation: Orientation) -> usize {
    let kind = grid.kind_at(pos.row, pos.col);
    let (line, offset) = match orientation {
        Orientation::Horizontal => (pos.row, pos.col),
        Orientation::Vertical => (pos.col, pos.row),
    };

    let mut before = 0;
    while offset > before && kind_on_line(grid, orientation, line, offset - before - 1) == kind {
        before += 1;
    }
    let mut after = 0;
    while offset + after + 1 < grid.size() && kind_on_line(grid, orientation, line, offset + after + 1) == kind {
        after += 1;
    }
    before + 1 + after
}

/// True when `pos` sits inside a run.
pub fn is_part_of_match(grid: &Grid, pos: Position) -> bool {
    run_length_through(grid, pos, Orientation::Horizontal) >= MIN_MATCH_LEN
        || run_length_through(grid, pos, Orientation::Vertical) >= MIN_MATCH_LEN
}

/// First adjacent pair, in row-major order, whose swap makes a match.
pub fn find_hint(grid: &Grid) -> Option<(Position, Position)> {
    let n = grid.size();
    for row in 0..n {
        for col in 0..n {
            let a = Position { row, col };
            let neighbours = [
                (col + 1 < n).then(|| Position { row, col: col + 1 }),
                (row + 1 < n).then(|| Position { row: row + 1, col }),
            ];
            for b in neighbours.into_iter().flatten() {
                if grid.kind_at(a.row, a.col) == grid.kind_at(b.row, b.col) {
                    continue;
                }
                let swapped = swap(grid, a, b);
                if is_part_of_match(&swapped, a) || is_part_of_match(&swapped, b) {
                    return Some((a, b));
                }
            }
        }
    }
    None
}

pub fn has_valid_move(grid: &Grid) -> bool {
    find_hint(grid).is_some()
}
