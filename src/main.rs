//! Main entry point for the backend server.
//!
//! Initializes logging and the actor system, then launches the HTTP server
//! with the JSON API and the WebSocket game endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::game_session::server::GameSessionManager;

use crate::config::server::ServerConfig;

pub mod config;
mod server;
mod game;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::from_env();

    // Start the GameSessionManager actor (creates and tracks running games).
    let game_session_manager = GameSessionManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(game_session_manager));

    info!("[Server] Listening on {}:{}", server_config.host, server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
