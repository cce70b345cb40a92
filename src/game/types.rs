use serde::{Serialize, Deserialize};

use crate::config::game::PIECE_KIND_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Color of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::Red,
        PieceKind::Orange,
        PieceKind::Yellow,
        PieceKind::Green,
        PieceKind::Blue,
        PieceKind::Purple,
    ];

    /// Single-letter tag used when printing boards to the log.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Red => 'R',
            PieceKind::Orange => 'O',
            PieceKind::Yellow => 'Y',
            PieceKind::Green => 'G',
            PieceKind::Blue => 'B',
            PieceKind::Purple => 'P',
        }
    }
}

/// Opaque piece identity. Never reused by the factory that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub row: usize,
    pub col: usize,
}

impl Piece {
    pub fn pos(&self) -> Position {
        Position { row: self.row, col: self.col }
    }

    /// Rewrite the coordinates after the piece moved.
    pub fn move_to(&mut self, pos: Position) {
        self.row = pos.row;
        self.col = pos.col;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Average grid coordinates of a match group. Not pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub row: f64,
    pub col: f64,
}

/// One maximal straight run of identical pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub orientation: Orientation,
    pub kind: PieceKind,
    /// Cells of the run, from its start outward (left to right, or top to bottom).
    pub positions: Vec<Position>,
    pub centroid: Centroid,
    pub piece_count: usize,
}

impl MatchGroup {
    pub fn new(orientation: Orientation, kind: PieceKind, positions: Vec<Position>) -> Self {
        let piece_count = positions.len();
        let n = piece_count.max(1) as f64;
        let centroid = Centroid {
            row: positions.iter().map(|p| p.row as f64).sum::<f64>() / n,
            col: positions.iter().map(|p| p.col as f64).sum::<f64>() / n,
        };
        Self { orientation, kind, positions, centroid, piece_count }
    }
}

/// Difficulty parameters of a level. Derived from the level number, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub grid_size: usize,
    pub time_limit: u32,
    pub target_score: u32,
    pub initial_lives: u32,
}
