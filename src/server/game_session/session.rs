//! WebSocket session handler for one connection to a game.
//!
//! Relays client actions to the `GameSession` actor and forwards its
//! messages back to the client as JSON text frames.
use actix::{Actor, ActorContext, Addr, AsyncContext, Handler, StreamHandler};
use actix_web::{HttpRequest, HttpResponse, web, Error, http::StatusCode};
use actix_web_actors::ws;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::server::game_session::server::{GameSession, GetGameSession};
use crate::server::game_session::messages::{
    ClientAction, ProcessClientMessage, RegisterSession, ServerWsMessage, UnregisterSession,
};
use crate::server::ws_error::{http_error_response, ws_error_message};

pub struct GameSessionActor {
    pub connection_id: Uuid,
    pub game_id: Uuid,
    pub session_addr: Addr<GameSession>,
}

impl Actor for GameSessionActor {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the connection with its game, which answers with the current state.
    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[GameSessionActor] Connection {} joined game {}", self.connection_id, self.game_id);
        self.session_addr.do_send(RegisterSession {
            connection_id: self.connection_id,
            addr: ctx.address(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GameSessionActor] Connection {} left game {}", self.connection_id, self.game_id);
        self.session_addr.do_send(UnregisterSession {
            connection_id: self.connection_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameSessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let action: ClientAction = match serde_json::from_str(&text) {
                    Ok(action) => action,
                    Err(e) => {
                        debug!("[GameSessionActor] Unparsable message {:?}: {}", text, e);
                        ctx.text(ws_error_message(
                            "INVALID_COMMAND",
                            "Message is not a valid game action.",
                            None,
                        ));
                        return;
                    }
                };
                self.session_addr.do_send(ProcessClientMessage {
                    msg: action,
                    addr: ctx.address(),
                });
            }
            Ok(ws::Message::Ping(bytes)) => ctx.pong(&bytes),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[GameSessionActor] Protocol error on {}: {}", self.connection_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

// Envoie les messages du jeu au client via WebSocket
impl Handler<ServerWsMessage> for GameSessionActor {
    type Result = ();
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(ws_error_message(
                "SERIALIZATION_FAILED",
                "Failed to serialize game message.",
                None,
            )),
        }
    }
}

pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let raw_id = req.match_info().get("game_id").unwrap_or("");
    let game_id = match Uuid::parse_str(raw_id) {
        Ok(id) => id,
        Err(_) => {
            return Ok(http_error_response(
                "INVALID_GAME_ID",
                "Game id is not a valid UUID.",
                Some(raw_id),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let session_addr = match data
        .game_session_manager
        .send(GetGameSession { game_id })
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
    {
        Ok(addr) => addr,
        Err(message) => {
            return Ok(http_error_response(
                "GAME_NOT_FOUND",
                &message,
                Some(&game_id.to_string()),
                StatusCode::NOT_FOUND,
            ));
        }
    };

    ws::start(
        GameSessionActor {
            connection_id: Uuid::new_v4(),
            game_id,
            session_addr,
        },
        &req,
        stream,
    )
}
