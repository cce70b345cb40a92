//! Piece entity logic.
//!
//! This module handles spawning new pieces with fresh identities.

use log::trace;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::game::types::{Piece, PieceId, PieceKind, Position};

/// Spawns pieces from a caller-owned random source.
///
/// Identities come from a monotonic counter, so every piece a factory hands out
/// is distinct from every other piece it has produced.
#[derive(Debug, Clone)]
pub struct PieceFactory<R: Rng = StdRng> {
    rng: R,
    next_id: u64,
}

impl<R: Rng> PieceFactory<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, next_id: 0 }
    }

    /// Spawn a piece at `pos`, avoiding the kinds in `excluded`.
    /// If every kind is excluded, the exclusion is ignored.
    pub fn spawn(&mut self, pos: Position, excluded: &[PieceKind]) -> Piece {
        let allowed: Vec<PieceKind> = PieceKind::ALL
            .iter()
            .copied()
            .filter(|kind| !excluded.contains(kind))
            .collect();

        let candidates: &[PieceKind] = if allowed.is_empty() {
            trace!("[PieceFactory] Every kind excluded at {:?}, using the full set", pos);
            &PieceKind::ALL
        } else {
            &allowed
        };

        let kind = *candidates
            .choose(&mut self.rng)
            .unwrap_or(&PieceKind::ALL[0]);

        let id = PieceId(self.next_id);
        self.next_id += 1;

        Piece { id, kind, row: pos.row, col: pos.col }
    }

    /// Number of pieces spawned so far.
    #[cfg(test)]
    pub(crate) fn spawned(&self) -> u64 {
        self.next_id
    }
}
