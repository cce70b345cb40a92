use std::collections::HashSet;

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::game::entities::PieceFactory;
use crate::game::grid::{Grid, are_adjacent, initialize, swap};
use crate::game::systems::{
    find_hint, find_match_groups, has_valid_move, is_game_over, is_level_complete, level_config,
    matched_ids_of, resolve, score_groups,
};
use crate::game::types::{MatchGroup, PieceId, Position};

/// Attempts at drawing a board with at least one valid move before giving up.
const MAX_RESHUFFLE_ATTEMPTS: u32 = 16;

/// Where a level is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Waiting for the first cell of a move.
    Idle,
    /// One cell chosen.
    Selected,
    /// Two cells exchanged, match check pending.
    Checking,
    /// Matches found, removal and refill pending.
    Cascading,
    LevelComplete,
    GameOver,
}

/// Player input the state machine refused. Refusals never change the state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("A swap or cascade is still resolving")]
    Busy,
    #[error("The level is over")]
    Finished,
    #[error("The level is not complete yet")]
    LevelNotComplete,
    #[error("Cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
}

impl ActionRejected {
    /// Stable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ActionRejected::Busy => "BUSY",
            ActionRejected::Finished => "FINISHED",
            ActionRejected::LevelNotComplete => "LEVEL_NOT_COMPLETE",
            ActionRejected::OutOfBounds { .. } => "OUT_OF_BOUNDS",
        }
    }

    /// Extra detail for the client, when the refusal concerns a cell.
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            ActionRejected::OutOfBounds { row, col } => Some(serde_json::json!({ "row": row, "col": col })),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected(Position),
    Deselected,
    /// A non-adjacent cell replaced the selection.
    Reselected(Position),
    Swapped { from: Position, to: Position },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwapCheck {
    Matched { groups: Vec<MatchGroup>, points: u32 },
    /// No match: the swap was undone and a life lost.
    Reverted { lives: u32 },
    NothingPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Ready,
    /// No valid move was left, so a fresh board was dealt.
    Reshuffled,
    LevelComplete,
    /// The clock ran out while the cascade was falling.
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CascadeStep {
    /// Refilling produced more matches; they were scored and await resolution.
    Chain { groups: Vec<MatchGroup>, points: u32, chain: u32 },
    Settled(Settlement),
    NothingPending,
}

/// One level in play: the board plus score, lives, clock and turn phase.
///
/// Every transition is synchronous. Callers pace them (see the game session
/// actor) but only one swap or cascade is ever in flight, and player input
/// is refused until it settles.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub level: u32,
    pub grid: Grid,
    pub score: u32,
    pub target_score: u32,
    pub lives: u32,
    pub time_remaining: u32,
    pub moves: u32,
    pub selected: Option<Position>,
    pub phase: Phase,
    pub matched: HashSet<PieceId>,
    pub last_groups: Vec<MatchGroup>,
    /// Rounds of matches in the current cascade, starting at 1 for the swap itself.
    pub chain: u32,
    pub reshuffles: u32,
    #[serde(skip)]
    pending_swap: Option<(Position, Position)>,
}

impl GameState {
    /// Start `level` with a board dealt by `factory`.
    pub fn new<R: Rng>(level: u32, factory: &mut PieceFactory<R>) -> Self {
        let mut state = GameState {
            level,
            grid: Grid::from_rows(Vec::new()),
            score: 0,
            target_score: 0,
            lives: 0,
            time_remaining: 0,
            moves: 0,
            selected: None,
            phase: Phase::Idle,
            matched: HashSet::new(),
            last_groups: Vec::new(),
            chain: 0,
            reshuffles: 0,
            pending_swap: None,
        };
        state.reset(level, factory);
        state
    }

    fn reset<R: Rng>(&mut self, level: u32, factory: &mut PieceFactory<R>) {
        let level = level.max(1);
        let config = level_config(level);

        self.level = level;
        self.grid = initialize(config.grid_size, factory);
        self.score = 0;
        self.target_score = config.target_score;
        self.lives = config.initial_lives;
        self.time_remaining = config.time_limit;
        self.moves = 0;
        self.selected = None;
        self.phase = Phase::Idle;
        self.matched.clear();
        self.last_groups.clear();
        self.chain = 0;
        self.reshuffles = 0;
        self.pending_swap = None;

        info!(
            "[GameState] Level {} started: {}x{} board, target {}, {}s",
            level, config.grid_size, config.grid_size, config.target_score, config.time_limit
        );
    }

    /// A swap or cascade is in flight.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Checking | Phase::Cascading)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::LevelComplete | Phase::GameOver)
    }

    fn ensure_accepting_input(&self) -> Result<(), ActionRejected> {
        if self.is_finished() {
            return Err(ActionRejected::Finished);
        }
        if self.is_animating() {
            return Err(ActionRejected::Busy);
        }
        Ok(())
    }

    /// Handle a click or tap on `pos`.
    pub fn select(&mut self, pos: Position) -> Result<SelectOutcome, ActionRejected> {
        self.ensure_accepting_input()?;
        if !self.grid.contains(pos) {
            return Err(ActionRejected::OutOfBounds { row: pos.row, col: pos.col });
        }

        let outcome = match self.selected {
            None => {
                self.selected = Some(pos);
                self.phase = Phase::Selected;
                SelectOutcome::Selected(pos)
            }
            Some(current) if current == pos => {
                self.selected = None;
                self.phase = Phase::Idle;
                SelectOutcome::Deselected
            }
            Some(current) if are_adjacent(current, pos) => {
                self.grid = swap(&self.grid, current, pos);
                self.pending_swap = Some((current, pos));
                self.selected = None;
                self.phase = Phase::Checking;
                SelectOutcome::Swapped { from: current, to: pos }
            }
            Some(_) => {
                self.selected = Some(pos);
                SelectOutcome::Reselected(pos)
            }
        };
        Ok(outcome)
    }

    /// Evaluate the pending swap: score its matches, or undo it at the cost of a life.
    pub fn check_swap(&mut self) -> SwapCheck {
        if self.phase != Phase::Checking {
            return SwapCheck::NothingPending;
        }
        let Some((a, b)) = self.pending_swap.take() else {
            self.phase = Phase::Idle;
            return SwapCheck::NothingPending;
        };

        let groups = find_match_groups(&self.grid);
        if groups.is_empty() {
            self.grid = swap(&self.grid, a, b);
            self.lives = self.lives.saturating_sub(1);
            self.phase = if is_game_over(self.lives, self.time_remaining) {
                Phase::GameOver
            } else {
                Phase::Idle
            };
            debug!("[GameState] Swap {:?}<->{:?} made no match, {} lives left", a, b, self.lives);
            return SwapCheck::Reverted { lives: self.lives };
        }

        self.moves += 1;
        self.chain = 1;
        let points = self.take_matches(&groups);
        self.phase = Phase::Cascading;
        SwapCheck::Matched { groups, points }
    }

    fn take_matches(&mut self, groups: &[MatchGroup]) -> u32 {
        let points = score_groups(groups);
        self.matched = matched_ids_of(&self.grid, groups);
        self.last_groups = groups.to_vec();
        self.score += points;
        points
    }

    /// Remove the current matches and refill. Loops back to scoring when the
    /// refill lines up new runs.
    pub fn resolve_step<R: Rng>(&mut self, factory: &mut PieceFactory<R>) -> CascadeStep {
        if self.phase != Phase::Cascading {
            return CascadeStep::NothingPending;
        }

        self.grid = resolve(&self.grid, &self.matched, factory);

        let groups = find_match_groups(&self.grid);
        if !groups.is_empty() {
            self.chain += 1;
            let points = self.take_matches(&groups);
            debug!("[GameState] Chain {} scored {} points", self.chain, points);
            return CascadeStep::Chain { groups, points, chain: self.chain };
        }

        self.matched.clear();
        self.last_groups.clear();
        CascadeStep::Settled(self.settle(factory))
    }

    fn settle<R: Rng>(&mut self, factory: &mut PieceFactory<R>) -> Settlement {
        if is_level_complete(self.score, self.target_score, self.lives) {
            self.phase = Phase::LevelComplete;
            info!("[GameState] Level {} complete with {} points in {} moves", self.level, self.score, self.moves);
            return Settlement::LevelComplete;
        }
        if is_game_over(self.lives, self.time_remaining) {
            self.phase = Phase::GameOver;
            info!("[GameState] Time up on level {} once the cascade settled, {} points", self.level, self.score);
            return Settlement::GameOver;
        }

        self.phase = Phase::Idle;
        if has_valid_move(&self.grid) {
            return Settlement::Ready;
        }

        let size = self.grid.size();
        let mut attempts = 0;
        loop {
            self.grid = initialize(size, factory);
            attempts += 1;
            if has_valid_move(&self.grid) {
                break;
            }
            if attempts >= MAX_RESHUFFLE_ATTEMPTS {
                warn!("[GameState] No playable board after {} reshuffles", attempts);
                break;
            }
        }
        self.reshuffles += 1;
        info!("[GameState] Board had no valid move, dealt a new one");
        Settlement::Reshuffled
    }

    /// Advance the level clock. Returns true when this tick ended the game.
    ///
    /// A swap still waiting for its check is undone, so the final board is
    /// at rest. A cascade already scored keeps falling and ends the game when
    /// it settles.
    pub fn tick(&mut self, seconds: u32) -> bool {
        if self.is_finished() {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(seconds);
        if !is_game_over(self.lives, self.time_remaining) {
            return false;
        }
        match self.phase {
            Phase::Cascading => return false,
            Phase::Checking => {
                if let Some((a, b)) = self.pending_swap.take() {
                    self.grid = swap(&self.grid, a, b);
                }
            }
            _ => {}
        }
        self.phase = Phase::GameOver;
        self.selected = None;
        self.pending_swap = None;
        info!("[GameState] Time up on level {} with {} points", self.level, self.score);
        true
    }

    pub fn hint(&self) -> Result<Option<(Position, Position)>, ActionRejected> {
        self.ensure_accepting_input()?;
        Ok(find_hint(&self.grid))
    }

    /// Replay the current level from scratch.
    pub fn restart<R: Rng>(&mut self, factory: &mut PieceFactory<R>) {
        self.reset(self.level, factory);
    }

    /// Move on to the next level. Only allowed once the current one is complete.
    pub fn advance_level<R: Rng>(&mut self, factory: &mut PieceFactory<R>) -> Result<(), ActionRejected> {
        if self.phase != Phase::LevelComplete {
            return Err(ActionRejected::LevelNotComplete);
        }
        self.reset(self.level.saturating_add(1), factory);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::grid::test_support::grid_from;
    use crate::game::systems::find_matched_ids;
    use crate::game::types::Orientation;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A 7x7 board on which no swap makes a match.
    const DEAD_BOARD: [&str; 7] = [
        "ROYGBPR",
        "OYGBPRO",
        "YGBPROY",
        "GBPROYG",
        "BPROYGB",
        "PROYGBP",
        "ROYGBPR",
    ];

    fn adjacent_pairs(size: usize) -> Vec<(Position, Position)> {
        let mut pairs = Vec::new();
        for row in 0..size {
            for col in 0..size {
                if col + 1 < size {
                    pairs.push((Position::new(row, col), Position::new(row, col + 1)));
                }
                if row + 1 < size {
                    pairs.push((Position::new(row, col), Position::new(row + 1, col)));
                }
            }
        }
        pairs
    }

    fn invalid_swap(grid: &Grid) -> (Position, Position) {
        adjacent_pairs(grid.size())
            .into_iter()
            .find(|(a, b)| find_match_groups(&swap(grid, *a, *b)).is_empty())
            .expect("some swap makes no match")
    }

    fn start(level: u32, seed: u64) -> (GameState, PieceFactory) {
        let mut factory = PieceFactory::new(StdRng::seed_from_u64(seed));
        let state = GameState::new(level, &mut factory);
        (state, factory)
    }

    fn settle(state: &mut GameState, factory: &mut PieceFactory) -> Settlement {
        loop {
            match state.resolve_step(factory) {
                CascadeStep::Chain { .. } => continue,
                CascadeStep::Settled(settlement) => return settlement,
                CascadeStep::NothingPending => panic!("no cascade in flight"),
            }
        }
    }

    #[test]
    fn test_new_level_matches_config() {
        let (state, _) = start(1, 1);
        assert_eq!(state.grid.size(), 7);
        assert_eq!(state.lives, 3);
        assert_eq!(state.time_remaining, 120);
        assert_eq!(state.target_score, 1000);
        assert_eq!(state.phase, Phase::Idle);
        assert!(find_matched_ids(&state.grid).is_empty());
    }

    #[test]
    fn test_level_zero_is_clamped() {
        let (state, _) = start(0, 1);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_select_and_deselect() {
        let (mut state, _) = start(1, 2);
        let pos = Position::new(3, 3);
        assert_eq!(state.select(pos), Ok(SelectOutcome::Selected(pos)));
        assert_eq!(state.phase, Phase::Selected);
        assert_eq!(state.select(pos), Ok(SelectOutcome::Deselected));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_non_adjacent_selection_replaces() {
        let (mut state, _) = start(1, 3);
        let grid_before = state.grid.clone();
        state.select(Position::new(0, 0)).unwrap();
        let outcome = state.select(Position::new(4, 4)).unwrap();
        assert_eq!(outcome, SelectOutcome::Reselected(Position::new(4, 4)));
        assert_eq!(state.selected, Some(Position::new(4, 4)));
        assert_eq!(state.grid, grid_before);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let (mut state, _) = start(1, 4);
        assert_eq!(
            state.select(Position::new(7, 0)),
            Err(ActionRejected::OutOfBounds { row: 7, col: 0 })
        );
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_invalid_swap_reverts_and_costs_a_life() {
        let (mut state, _) = start(1, 5);
        let before = state.grid.clone();
        let (a, b) = invalid_swap(&state.grid);

        state.select(a).unwrap();
        assert_eq!(state.select(b), Ok(SelectOutcome::Swapped { from: a, to: b }));
        assert!(state.is_animating());

        assert_eq!(state.check_swap(), SwapCheck::Reverted { lives: 2 });
        assert_eq!(state.grid, before);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn test_running_out_of_lives_ends_game() {
        let (mut state, _) = start(1, 6);
        for expected in (0..3).rev() {
            let (a, b) = invalid_swap(&state.grid);
            state.select(a).unwrap();
            state.select(b).unwrap();
            assert_eq!(state.check_swap(), SwapCheck::Reverted { lives: expected });
        }
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.select(Position::new(0, 0)), Err(ActionRejected::Finished));
    }

    #[test]
    fn test_input_refused_while_checking() {
        let (mut state, _) = start(1, 7);
        let (a, b) = invalid_swap(&state.grid);
        state.select(a).unwrap();
        state.select(b).unwrap();
        assert_eq!(state.select(Position::new(0, 0)), Err(ActionRejected::Busy));
        assert_eq!(state.hint(), Err(ActionRejected::Busy));
    }

    #[test]
    fn test_valid_swap_scores_and_settles() {
        let (mut state, mut factory) = start(1, 8);
        let (a, b) = state.hint().unwrap().expect("fresh boards are playable");

        state.select(a).unwrap();
        state.select(b).unwrap();
        let SwapCheck::Matched { groups, points } = state.check_swap() else {
            panic!("hinted swap must match");
        };
        assert!(!groups.is_empty());
        assert_eq!(points, score_groups(&groups));
        assert_eq!(state.score, points);
        assert_eq!(state.moves, 1);
        assert_eq!(state.phase, Phase::Cascading);
        assert_eq!(state.select(a), Err(ActionRejected::Busy));

        let settlement = settle(&mut state, &mut factory);
        assert_ne!(settlement, Settlement::LevelComplete);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.matched.is_empty());
        assert!(find_matched_ids(&state.grid).is_empty());
        assert!(state.score >= points);
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let (mut state, mut factory) = start(1, 9);
        state.score = state.target_score - 1;
        let (a, b) = state.hint().unwrap().unwrap();
        state.select(a).unwrap();
        state.select(b).unwrap();
        assert!(matches!(state.check_swap(), SwapCheck::Matched { .. }));
        assert_eq!(settle(&mut state, &mut factory), Settlement::LevelComplete);
        assert!(state.is_finished());
        assert_eq!(state.select(a), Err(ActionRejected::Finished));

        state.advance_level(&mut factory).unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, 117);
        assert_eq!(state.target_score, 1500);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_advance_requires_completion() {
        let (mut state, mut factory) = start(1, 10);
        assert_eq!(state.advance_level(&mut factory), Err(ActionRejected::LevelNotComplete));
    }

    #[test]
    fn test_clock_runs_out() {
        let (mut state, _) = start(1, 11);
        assert!(!state.tick(119));
        assert_eq!(state.time_remaining, 1);
        assert!(state.tick(1));
        assert_eq!(state.phase, Phase::GameOver);
        assert!(!state.tick(1));
    }

    /// Swapping (2,2) with (2,3) lines up three R in row 2. Once they are
    /// removed, the B at (1,0) drops onto the two B below it.
    const CHAIN_BOARD: [&str; 5] = [
        "GYPOY",
        "BOYPG",
        "RRORP",
        "BGPYO",
        "BYGOP",
    ];

    fn chain_board_swapped(seed: u64) -> (GameState, PieceFactory) {
        let (mut state, factory) = start(1, seed);
        state.grid = grid_from(&CHAIN_BOARD);
        state.select(Position::new(2, 2)).unwrap();
        state.select(Position::new(2, 3)).unwrap();
        assert_eq!(state.phase, Phase::Checking);
        (state, factory)
    }

    #[test]
    fn test_survivors_falling_into_a_run_chain() {
        let (mut state, mut factory) = chain_board_swapped(12);
        let SwapCheck::Matched { groups, points } = state.check_swap() else {
            panic!("swap lines up three R");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(points, 150);
        assert_eq!(state.score, 150);

        let CascadeStep::Chain { groups, points, chain } = state.resolve_step(&mut factory) else {
            panic!("fallen B must chain");
        };
        assert_eq!(chain, 2);
        assert_eq!(state.chain, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].orientation, Orientation::Vertical);
        assert_eq!(
            groups[0].positions,
            vec![Position::new(2, 0), Position::new(3, 0), Position::new(4, 0)]
        );
        assert_eq!(points, score_groups(&groups));
        assert_eq!(state.score, 150 + points);
        assert_eq!(state.phase, Phase::Cascading);

        let mut settled = None;
        for _ in 0..20 {
            match state.resolve_step(&mut factory) {
                CascadeStep::Chain { chain, .. } => assert!(chain > 2),
                CascadeStep::Settled(settlement) => {
                    settled = Some(settlement);
                    break;
                }
                CascadeStep::NothingPending => panic!("cascade dropped"),
            }
        }
        assert!(matches!(settled, Some(Settlement::Ready | Settlement::Reshuffled)));
        assert_eq!(state.phase, Phase::Idle);
        assert!(find_matched_ids(&state.grid).is_empty());
    }

    #[test]
    fn test_time_up_while_checking_undoes_swap() {
        let (mut state, _) = chain_board_swapped(13);
        assert!(state.tick(1000));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.grid.to_string(), grid_from(&CHAIN_BOARD).to_string());
        assert!(find_matched_ids(&state.grid).is_empty());
        assert_eq!(state.check_swap(), SwapCheck::NothingPending);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_time_up_while_cascading_settles_into_game_over() {
        let (mut state, mut factory) = chain_board_swapped(14);
        assert!(matches!(state.check_swap(), SwapCheck::Matched { .. }));

        assert!(!state.tick(1000));
        assert_eq!(state.time_remaining, 0);
        assert_eq!(state.phase, Phase::Cascading);

        assert_eq!(settle(&mut state, &mut factory), Settlement::GameOver);
        assert_eq!(state.phase, Phase::GameOver);
        assert!(find_matched_ids(&state.grid).is_empty());
        assert!(state.score >= 300);
    }

    #[test]
    fn test_dead_board_is_reshuffled() {
        let (mut state, mut factory) = start(1, 12);
        state.grid = grid_from(&DEAD_BOARD);
        assert!(!has_valid_move(&state.grid));

        assert_eq!(state.settle(&mut factory), Settlement::Reshuffled);
        assert_eq!(state.reshuffles, 1);
        assert_eq!(state.grid.size(), 7);
        assert!(has_valid_move(&state.grid));
        assert!(find_matched_ids(&state.grid).is_empty());
    }

    #[test]
    fn test_restart_resets_progress() {
        let (mut state, mut factory) = start(3, 13);
        state.score = 400;
        state.lives = 1;
        state.time_remaining = 5;
        state.restart(&mut factory);
        assert_eq!(state.level, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.grid.size(), 8);
        assert_eq!(state.time_remaining, 114);
    }

    #[test]
    fn test_restart_never_reuses_identities() {
        let (mut state, mut factory) = start(1, 14);
        let first: HashSet<PieceId> = state.grid.pieces().map(|p| p.id).collect();
        state.restart(&mut factory);
        assert!(state.grid.pieces().all(|p| !first.contains(&p.id)));
    }

    /// A seeded 7x7 board, a swap that lines up exactly one horizontal three,
    /// and a refill that leaves the board at rest.
    #[test]
    fn test_single_horizontal_match_end_to_end() {
        let mut found = false;

        'seeds: for seed in 0..200 {
            let mut factory = PieceFactory::new(StdRng::seed_from_u64(seed));
            let grid = initialize(7, &mut factory);
            assert!(find_matched_ids(&grid).is_empty());

            for (a, b) in adjacent_pairs(7) {
                let swapped = swap(&grid, a, b);
                let groups = find_match_groups(&swapped);
                if groups.len() != 1
                    || groups[0].orientation != Orientation::Horizontal
                    || groups[0].piece_count != 3
                {
                    continue;
                }

                let matched = find_matched_ids(&swapped);
                let expected: HashSet<PieceId> = groups[0]
                    .positions
                    .iter()
                    .map(|pos| swapped.get(*pos).unwrap().id)
                    .collect();
                assert_eq!(matched, expected);

                let mut trial = factory.clone();
                let resolved = resolve(&swapped, &matched, &mut trial);
                if !find_matched_ids(&resolved).is_empty() {
                    continue;
                }

                let row = groups[0].positions[0].row;
                for pos in &groups[0].positions {
                    for r in 0..=row {
                        let piece = resolved.get(Position::new(r, pos.col)).unwrap();
                        assert!(!matched.contains(&piece.id));
                    }
                    // Everything above the removed piece dropped one row.
                    for r in 0..row {
                        let old = swapped.get(Position::new(r, pos.col)).unwrap();
                        assert_eq!(resolved.get(Position::new(r + 1, pos.col)).unwrap().id, old.id);
                    }
                }
                found = true;
                break 'seeds;
            }
        }

        assert!(found, "no seed produced a clean single horizontal match");
    }
}
