//! JSON endpoints: game creation and level lookup.

use actix_web::{HttpResponse, Responder, web, http::StatusCode};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::systems::level_config;
use crate::server::game_session::server::CreateGame;
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Deserialize, Debug, Default)]
pub struct NewGameRequest {
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NewGameResponse {
    pub game_id: Uuid,
    pub level: u32,
}

/// Start a new game. The body is optional; the level defaults to 1.
pub async fn create_game(
    data: web::Data<AppState>,
    body: Option<web::Json<NewGameRequest>>,
) -> HttpResponse {
    let request = body.map(|json| json.into_inner()).unwrap_or_default();
    let level = request.level.unwrap_or(1);
    if level == 0 {
        return http_error_response(
            "INVALID_LEVEL",
            "Levels start at 1.",
            None,
            StatusCode::BAD_REQUEST,
        );
    }

    match data.game_session_manager.send(CreateGame { level }).await {
        Ok(game_id) => HttpResponse::Ok().json(NewGameResponse { game_id, level }),
        Err(e) => http_error_response(
            "MANAGER_UNAVAILABLE",
            "Game session manager is not responding.",
            Some(&e.to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    }
}

/// Difficulty parameters for one level.
pub async fn get_level(path: web::Path<u32>) -> impl Responder {
    let level = path.into_inner().max(1);
    HttpResponse::Ok().json(level_config(level))
}
