//! Game entities module.
//!
//! This module organizes piece creation.

pub mod piece;

pub use piece::*;
