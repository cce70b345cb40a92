use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use super::session::GameSessionActor;
use crate::game::state::{ActionRejected, GameState};
use crate::game::types::{MatchGroup, Position};

#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientMessage {
    pub msg: ClientAction,
    pub addr: Addr<GameSessionActor>,
}

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    Select { row: usize, col: usize },
    Hint,
    Restart,
    NextLevel,
}

// Message serveur -> client
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    State(Box<GameState>),
    Matched {
        groups: Vec<MatchGroup>,
        points: u32,
        chain: u32,
    },
    InvalidMove {
        lives: u32,
    },
    Hint {
        cells: Option<[Position; 2]>,
    },
    Error {
        code: String,
        message: String,
        context: Option<Value>,
    },
}

impl ServerWsMessage {
    pub fn state(state: &GameState) -> Self {
        Self::State(Box::new(state.clone()))
    }
    pub fn hint(hint: Option<(Position, Position)>) -> Self {
        Self::Hint { cells: hint.map(|(a, b)| [a, b]) }
    }
    pub fn rejected(reason: &ActionRejected) -> Self {
        Self::Error {
            code: reason.code().to_string(),
            message: reason.to_string(),
            context: reason.context(),
        }
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterSession {
    pub connection_id: Uuid,
    pub addr: Addr<GameSessionActor>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct UnregisterSession {
    pub connection_id: Uuid,
}
