//! HTTP and WebSocket routing configuration.
//!
//! Defines the JSON API for creating games and reading level settings, and the
//! WebSocket endpoint through which a client plays a game.

use actix_web::web;
use crate::server::api::{create_game, get_level};
use crate::server::game_session::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/games")
            .route(web::post().to(create_game))
    )
    .service(
        web::resource("/api/levels/{level}")
            .route(web::get().to(get_level))
    )
    .service(
        web::resource("/ws/game/{game_id}")
            .to(ws_game)
    );
}
