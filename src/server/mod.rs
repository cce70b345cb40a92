// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and the JSON API
//! - Game session orchestration (one actor per game, one per connection)

pub mod state;
pub mod router;
pub mod api;
pub mod game_session;
pub mod ws_error;
