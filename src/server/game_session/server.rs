use actix::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use actix::MessageResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;
use log::{debug, info, warn};

use crate::config::game::{CASCADE_STEP_DELAY_MS, SWAP_CHECK_DELAY_MS, TICK_INTERVAL_SECS};
use crate::game::entities::PieceFactory;
use crate::game::state::{CascadeStep, GameState, SelectOutcome, SwapCheck};
use crate::game::types::Position;
use crate::server::game_session::messages::{
    ClientAction, ProcessClientMessage, RegisterSession, ServerWsMessage, UnregisterSession,
};
use crate::server::game_session::session::GameSessionActor;

/// Seconds a game may sit with no connection before it is dropped.
const IDLE_TIMEOUT_SECS: u64 = 60;

/// One game in play. Owns the state, its random source, and the timers that
/// pace swaps and cascades.
pub struct GameSession {
    pub game_id: Uuid,
    pub clients: HashMap<Uuid, Addr<GameSessionActor>>,
    pub game_state: GameState,

    factory: PieceFactory,
    manager: Addr<GameSessionManager>,
    step_timer: Option<SpawnHandle>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.run_interval(Duration::from_secs(TICK_INTERVAL_SECS), |act, _ctx| {
            act.tick();
        });
        ctx.run_later(Duration::from_secs(IDLE_TIMEOUT_SECS), |act, ctx| {
            if act.clients.is_empty() {
                info!("[GameSession] Game {} was never joined, closing", act.game_id);
                ctx.stop();
            }
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.manager.do_send(RemoveGame { game_id: self.game_id });
    }
}

impl GameSession {
    pub fn new(game_id: Uuid, level: u32, manager: Addr<GameSessionManager>) -> Self {
        let mut factory = PieceFactory::new(StdRng::from_os_rng());
        let game_state = GameState::new(level, &mut factory);
        Self {
            game_id,
            clients: HashMap::new(),
            game_state,
            factory,
            manager,
            step_timer: None,
        }
    }

    fn broadcast(&self, msg: ServerWsMessage) {
        for addr in self.clients.values() {
            addr.do_send(msg.clone());
        }
    }

    pub fn send_state(&self) {
        debug!(
            "[GameSession] Broadcast GameState: game_id={} phase={:?} score={} lives={} time={}",
            self.game_id,
            self.game_state.phase,
            self.game_state.score,
            self.game_state.lives,
            self.game_state.time_remaining,
        );
        self.broadcast(ServerWsMessage::state(&self.game_state));
    }

    fn tick(&mut self) {
        if self.game_state.is_finished() {
            return;
        }
        if self.game_state.tick(TICK_INTERVAL_SECS as u32) {
            info!("[GameSession] Game {} ran out of time", self.game_id);
        }
        self.send_state();
    }

    fn cancel_step(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.step_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn schedule_swap_check(&mut self, ctx: &mut Context<Self>) {
        let handle = ctx.run_later(Duration::from_millis(SWAP_CHECK_DELAY_MS), |act, ctx| {
            act.step_timer = None;
            act.check_swap(ctx);
        });
        self.step_timer = Some(handle);
    }

    fn schedule_cascade_step(&mut self, ctx: &mut Context<Self>) {
        let handle = ctx.run_later(Duration::from_millis(CASCADE_STEP_DELAY_MS), |act, ctx| {
            act.step_timer = None;
            act.cascade_step(ctx);
        });
        self.step_timer = Some(handle);
    }

    fn check_swap(&mut self, ctx: &mut Context<Self>) {
        match self.game_state.check_swap() {
            SwapCheck::Matched { groups, points } => {
                self.broadcast(ServerWsMessage::Matched { groups, points, chain: 1 });
                self.send_state();
                self.schedule_cascade_step(ctx);
            }
            SwapCheck::Reverted { lives } => {
                self.broadcast(ServerWsMessage::InvalidMove { lives });
                self.send_state();
            }
            SwapCheck::NothingPending => {}
        }
    }

    fn cascade_step(&mut self, ctx: &mut Context<Self>) {
        match self.game_state.resolve_step(&mut self.factory) {
            CascadeStep::Chain { groups, points, chain } => {
                self.broadcast(ServerWsMessage::Matched { groups, points, chain });
                self.send_state();
                self.schedule_cascade_step(ctx);
            }
            CascadeStep::Settled(settlement) => {
                debug!("[GameSession] Game {} settled: {:?}", self.game_id, settlement);
                self.send_state();
            }
            CascadeStep::NothingPending => {}
        }
    }

    fn handle_action(&mut self, action: ClientAction, from: &Addr<GameSessionActor>, ctx: &mut Context<Self>) {
        match action {
            ClientAction::Select { row, col } => match self.game_state.select(Position::new(row, col)) {
                Ok(SelectOutcome::Swapped { from: a, to: b }) => {
                    debug!("[GameSession] Game {} swap {:?} <-> {:?}", self.game_id, a, b);
                    self.send_state();
                    self.schedule_swap_check(ctx);
                }
                Ok(_) => self.send_state(),
                Err(reason) => {
                    warn!("[GameSession] Game {} rejected select ({}, {}): {}", self.game_id, row, col, reason);
                    from.do_send(ServerWsMessage::rejected(&reason));
                }
            },
            ClientAction::Hint => match self.game_state.hint() {
                Ok(hint) => from.do_send(ServerWsMessage::hint(hint)),
                Err(reason) => from.do_send(ServerWsMessage::rejected(&reason)),
            },
            ClientAction::Restart => {
                self.cancel_step(ctx);
                self.game_state.restart(&mut self.factory);
                self.send_state();
            }
            ClientAction::NextLevel => match self.game_state.advance_level(&mut self.factory) {
                Ok(()) => self.send_state(),
                Err(reason) => from.do_send(ServerWsMessage::rejected(&reason)),
            },
        }
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        self.handle_action(msg.msg, &msg.addr, ctx);
    }
}

impl Handler<RegisterSession> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: RegisterSession, _: &mut Context<Self>) -> Self::Result {
        msg.addr.do_send(ServerWsMessage::state(&self.game_state));
        self.clients.insert(msg.connection_id, msg.addr);
    }
}

impl Handler<UnregisterSession> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: UnregisterSession, ctx: &mut Context<Self>) -> Self::Result {
        self.clients.remove(&msg.connection_id);
        if self.clients.is_empty() {
            info!("[GameSession] Last connection left game {}, closing", self.game_id);
            ctx.stop();
        }
    }
}

/// Registry of running games.
pub struct GameSessionManager {
    sessions: HashMap<Uuid, Addr<GameSession>>,
}

impl GameSessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Uuid")]
pub struct CreateGame {
    pub level: u32,
}

impl Handler<CreateGame> for GameSessionManager {
    type Result = MessageResult<CreateGame>;

    fn handle(&mut self, msg: CreateGame, ctx: &mut Context<Self>) -> Self::Result {
        let game_id = Uuid::new_v4();
        let session = GameSession::new(game_id, msg.level, ctx.address()).start();
        self.sessions.insert(game_id, session);
        info!("[Manager] Game created: game_id={} level={} running={}", game_id, msg.level, self.sessions.len());
        MessageResult(game_id)
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<GameSession>, String>")]
pub struct GetGameSession {
    pub game_id: Uuid,
}

impl Handler<GetGameSession> for GameSessionManager {
    type Result = Result<Addr<GameSession>, String>;

    fn handle(&mut self, msg: GetGameSession, _: &mut Context<Self>) -> Self::Result {
        self.sessions.get(&msg.game_id)
            .cloned()
            .ok_or_else(|| "Game session not found".to_string())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct RemoveGame {
    pub game_id: Uuid,
}

impl Handler<RemoveGame> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: RemoveGame, _: &mut Context<Self>) -> Self::Result {
        if self.sessions.remove(&msg.game_id).is_some() {
            info!("[Manager] Game removed: game_id={} running={}", msg.game_id, self.sessions.len());
        }
    }
}
