/// Game configuration constants.
/// 
/// This module defines the gameplay parameters: board bounds, the level curve,
/// scoring, and the pacing delays used by game sessions.

/// Number of distinct piece kinds on the board.
pub const PIECE_KIND_COUNT: usize = 6;

/// Shortest run of identical pieces that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

/// Board size at level 1.
pub const BASE_GRID_SIZE: usize = 7;

/// Largest board size any level uses.
pub const MAX_GRID_SIZE: usize = 10;

/// The board grows by one every this many levels.
pub const LEVELS_PER_GRID_STEP: u32 = 3;

/// Time limit (in seconds) at level 1.
pub const BASE_TIME_LIMIT: u32 = 120;

/// Seconds removed from the time limit per level.
pub const TIME_LIMIT_STEP: u32 = 3;

/// Time limit never drops below this (in seconds).
pub const MIN_TIME_LIMIT: u32 = 45;

/// Score needed to clear level 1.
pub const BASE_TARGET_SCORE: u32 = 1000;

/// Extra score needed per level.
pub const TARGET_SCORE_STEP: u32 = 500;

/// Lives at the start of every level.
pub const INITIAL_LIVES: u32 = 3;

/// Flat points for any match group.
pub const MATCH_BASE_POINTS: u32 = 60;

/// Points per piece in a match group.
pub const POINTS_PER_PIECE: u32 = 30;

/// Delay between a swap and its match check, so clients can show the exchange.
pub const SWAP_CHECK_DELAY_MS: u64 = 250;

/// Delay between two cascade steps.
pub const CASCADE_STEP_DELAY_MS: u64 = 350;

/// Interval of the level clock (in seconds).
pub const TICK_INTERVAL_SECS: u64 = 1;
