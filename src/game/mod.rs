//! Board engine and turn orchestration.
//!
//! `entities`, `grid` and `systems` are pure functions over immutable boards;
//! `state` drives them through the select/swap/cascade cycle of a level.

pub mod types;
pub mod state;

pub mod entities;
pub mod grid;
pub mod systems;
