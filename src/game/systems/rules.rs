//! Scoring, level curve and end-of-level predicates.

use crate::config::game::{
    BASE_GRID_SIZE, BASE_TARGET_SCORE, BASE_TIME_LIMIT, INITIAL_LIVES, LEVELS_PER_GRID_STEP,
    MATCH_BASE_POINTS, MAX_GRID_SIZE, MIN_MATCH_LEN, MIN_TIME_LIMIT, POINTS_PER_PIECE,
    TARGET_SCORE_STEP, TIME_LIMIT_STEP,
};
use crate::game::types::{LevelConfig, MatchGroup};

/// Points for one match group of `match_count` pieces.
///
/// Runs longer than three earn an extra half multiplier per extra piece.
pub fn score(match_count: usize) -> u32 {
    let count = match_count as u32;
    let base = MATCH_BASE_POINTS + POINTS_PER_PIECE * count;
    if match_count <= MIN_MATCH_LEN {
        base
    } else {
        // base * (1 + 0.5 * (n - 3)) == base * (n - 1) / 2
        base * (count - 1) / 2
    }
}

/// Points for a batch of groups. Cells shared by two groups count in both.
pub fn score_groups(groups: &[MatchGroup]) -> u32 {
    groups.iter().map(|group| score(group.piece_count)).sum()
}

pub fn level_config(level: u32) -> LevelConfig {
    let grid_size = (BASE_GRID_SIZE + (level / LEVELS_PER_GRID_STEP) as usize).min(MAX_GRID_SIZE);
    let steps = level.saturating_sub(1);
    let time_limit = BASE_TIME_LIMIT
        .saturating_sub(TIME_LIMIT_STEP.saturating_mul(steps))
        .max(MIN_TIME_LIMIT);
    let target_score = BASE_TARGET_SCORE.saturating_add(TARGET_SCORE_STEP.saturating_mul(steps));

    LevelConfig {
        grid_size,
        time_limit,
        target_score,
        initial_lives: INITIAL_LIVES,
    }
}

pub fn is_level_complete(score: u32, target: u32, lives: u32) -> bool {
    score >= target && lives > 0
}

pub fn is_game_over(lives: u32, time_remaining: u32) -> bool {
    lives == 0 || time_remaining == 0
}
