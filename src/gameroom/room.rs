use super::*;
use crate::Position;
use crate::gameplay::Action;
use crate::gameplay::ActionKind;
use crate::gameplay::Engine;
use crate::gameplay::EngineError;
use crate::gameplay::TableConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Per-table session coordinator.
///
/// Owns the rules engine exclusively behind a single async mutex: join,
/// action, disconnect, and timer-expiry paths all lock, mutate, queue their
/// outbound frames, and release. Engine mutations therefore never
/// interleave, and no client sees event N+1 before event N.
///
/// Cloning is cheap and shares the table; bridge tasks and timer tasks each
/// hold a clone.
#[derive(Clone)]
pub struct Room {
    shared: Arc<Shared>,
}

struct Shared {
    table_id: String,
    state: Mutex<State>,
}

struct State {
    engine: Engine,
    table: Table,
    pending: Option<Pending>,
    timer: Timer,
    over: bool,
}

/// The seat currently owed an action.
struct Pending {
    seat: Position,
}

impl State {
    /// Clock left on the pending turn, or the full allowance when no
    /// deadline is armed.
    fn remaining_ms(&self) -> u64 {
        self.timer
            .remaining()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(self.engine.config().move_time_ms)
    }
}

impl Room {
    pub fn new(table_id: &str, config: TableConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                table_id: table_id.to_string(),
                state: Mutex::new(State {
                    engine: Engine::new(config),
                    table: Table::new(),
                    pending: None,
                    timer: Timer::new(),
                    over: false,
                }),
            }),
        }
    }
    pub fn table_id(&self) -> &str {
        &self.shared.table_id
    }
}

/// Connection lifecycle.
impl Room {
    /// Registers a player connection after a valid hello.
    ///
    /// Assigns or recovers the team's seat, replaces any prior connection
    /// for it, sends `welcome`, broadcasts the lobby, and either catches the
    /// joiner up on the live hand (snapshot, plus an `act` re-prompt with
    /// the remaining clock if it is their turn) or starts a hand when two
    /// funded seats are ready.
    pub async fn join(
        &self,
        team: &str,
        outbox: UnboundedSender<Outbound>,
    ) -> Result<Position, EngineError> {
        let mut state = self.shared.state.lock().await;
        let seat = state.engine.assign_seat(team)?;
        let label = state.engine.seat(seat).expect("just assigned").team().to_string();
        if let Some(previous) = state.table.attach(Session::new(seat, &label, outbox)) {
            previous.close("replaced by new connection");
        }
        state.engine.set_connected(seat, true);
        log::info!("[room {}] seat {} joined as {}", self.shared.table_id, seat, label);
        state.table.unicast(
            seat,
            &ServerMessage::welcome(&self.shared.table_id, seat, state.engine.config()),
        );
        state.table.broadcast(&ServerMessage::lobby(&state.engine));
        if state.engine.hand().is_some() {
            let remaining = state.remaining_ms();
            let next = state.engine.next_actor();
            let snapshot = SnapshotPayload::compose(&state.engine, seat, next, remaining);
            state.table.unicast(seat, &ServerMessage::snapshot(snapshot));
            if state.pending.as_ref().map_or(false, |p| p.seat == seat) {
                let act = ActPayload::compose(&state.engine, seat, remaining);
                state.table.unicast(seat, &ServerMessage::act(act));
            }
        } else {
            self.pump(&mut state);
        }
        Ok(seat)
    }
    /// Tears down a dead connection. The seat itself (stack, identity)
    /// remains so the bot can reconnect and resume; a connection that was
    /// already replaced leaves the new session untouched.
    pub async fn leave(&self, seat: Position, outbox: &UnboundedSender<Outbound>) {
        let mut state = self.shared.state.lock().await;
        if !state.table.session(seat).map_or(false, |s| s.is(outbox)) {
            return;
        }
        state.table.detach(seat);
        state.engine.set_connected(seat, false);
        log::info!("[room {}] seat {} disconnected", self.shared.table_id, seat);
        state.table.broadcast(&ServerMessage::lobby(&state.engine));
    }
    /// Registers a read-only subscriber and sends it the current roster.
    pub async fn spectate(&self, outbox: UnboundedSender<Outbound>) -> u64 {
        let mut state = self.shared.state.lock().await;
        let _ = outbox.send(Outbound::Frame(ServerMessage::lobby(&state.engine).to_frame()));
        state.table.spectate(outbox)
    }
    pub async fn unspectate(&self, id: u64) {
        self.shared.state.lock().await.table.unspectate(id);
    }
}

/// Inbound message handling.
impl Room {
    /// Dispatches one in-session message from a seated client. The only
    /// accepted type is `action`; anything else elicits UNKNOWN_TYPE.
    pub async fn handle(&self, seat: Position, text: &str) {
        let mut state = self.shared.state.lock().await;
        match ClientMessage::try_from(text) {
            Ok(ClientMessage::Action {
                hand_id,
                action,
                amount,
            }) => self.handle_action(&mut state, seat, hand_id, action, amount),
            Ok(_) | Err(_) => state.table.unicast(
                seat,
                &ServerMessage::error(ErrorCode::UnknownType, "unsupported message type"),
            ),
        }
    }
    /// Applies the timeout fallback to the pending actor on an operator's
    /// behalf. The path for tables running without a clock.
    pub async fn skip(&self) {
        let mut state = self.shared.state.lock().await;
        let seat = match state.pending.as_ref() {
            Some(pending) => pending.seat,
            None => return,
        };
        let action = state.engine.fallback(seat);
        log::info!("[room {}] operator skip: seat {} {}", self.shared.table_id, seat, action);
        self.apply_forced(&mut state, seat, action);
    }

    fn handle_action(
        &self,
        state: &mut State,
        seat: Position,
        hand_id: Option<String>,
        action: Option<String>,
        amount: Option<serde_json::Value>,
    ) {
        let live = state.engine.hand().map(|ctx| ctx.id().to_string());
        if live.is_none() || hand_id != live {
            state.table.unicast(
                seat,
                &ServerMessage::error(ErrorCode::ActionTooLate, "hand no longer active"),
            );
            return;
        }
        if state.pending.as_ref().map_or(true, |p| p.seat != seat) {
            state.table.unicast(
                seat,
                &ServerMessage::error(ErrorCode::OutOfTurn, "not your turn"),
            );
            return;
        }
        let kind = match action.as_deref().map(ActionKind::try_from) {
            Some(Ok(kind)) => kind,
            _ => {
                state.table.unicast(
                    seat,
                    &ServerMessage::error(ErrorCode::InvalidAction, "unknown action"),
                );
                return;
            }
        };
        let action = match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            ActionKind::RaiseTo => match amount
                .as_ref()
                .and_then(|v| v.as_u64())
                .and_then(|n| crate::Chips::try_from(n).ok())
            {
                Some(amount) => Action::RaiseTo(amount),
                None => {
                    state.table.unicast(
                        seat,
                        &ServerMessage::error(ErrorCode::BadSchema, "amount required for raise"),
                    );
                    return;
                }
            },
        };
        match state.engine.apply_action(seat, action) {
            Ok(events) => {
                state.pending = None;
                state.timer.disarm();
                for event in events {
                    state.table.broadcast(&ServerMessage::event(event));
                }
                self.pump(state);
            }
            // the turn stays open; the client may retry until the clock runs out
            Err(e) => {
                log::warn!(
                    "[room {}] rejected action from seat {}: {}",
                    self.shared.table_id,
                    seat,
                    e
                );
                state.table.unicast(
                    seat,
                    &ServerMessage::error(ErrorCode::InvalidAction, &e.to_string()),
                );
            }
        }
    }
}

/// The hand loop.
impl Room {
    /// Drives the table forward until it waits on input: starts hands,
    /// prompts the next actor, finishes hands, ends the match.
    fn pump(&self, state: &mut State) {
        loop {
            if state.over {
                return;
            }
            if state.engine.hand().is_none() {
                if !state.engine.can_start_hand() {
                    return;
                }
                match state.engine.start_hand(None) {
                    Ok(()) => {}
                    Err(e) => {
                        log::error!("[room {}] failed to start hand: {}", self.shared.table_id, e);
                        return;
                    }
                }
                state.table.broadcast(&ServerMessage::start_hand(&state.engine));
                for event in state.engine.consume_pre_events() {
                    state.table.broadcast(&ServerMessage::event(event));
                }
            }
            if state.engine.is_hand_complete() {
                state.table.broadcast(&ServerMessage::end_hand(&state.engine));
                state.engine.finish_hand();
                state.pending = None;
                state.timer.disarm();
                if state.engine.is_match_over() {
                    log::info!("[room {}] match over", self.shared.table_id);
                    state.table.broadcast(&ServerMessage::match_end(&state.engine));
                    state.over = true;
                    return;
                }
                continue;
            }
            match state.engine.next_actor() {
                Some(seat) => {
                    self.prompt(state, seat);
                    return;
                }
                None => {
                    // a live hand always has an actor or is complete
                    panic!("live hand with no pending actor");
                }
            }
        }
    }
    /// Prompts a seat and arms its deadline. A disconnected seat's clock
    /// still runs; with the clock disabled the hand waits for an operator
    /// skip.
    fn prompt(&self, state: &mut State, seat: Position) {
        state.pending = Some(Pending { seat });
        match state.engine.config().move_time_ms {
            0 => state.timer.disarm(),
            ms => {
                let duration = Duration::from_millis(ms);
                let generation = state.timer.arm(duration);
                let room = self.clone();
                state.timer.attach(tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    room.expire(generation).await;
                }));
            }
        }
        if !state.table.is_connected(seat) {
            log::info!(
                "[room {}] seat {} is disconnected; its clock keeps running",
                self.shared.table_id,
                seat
            );
        }
        let act = ActPayload::compose(&state.engine, seat, state.remaining_ms());
        state.table.unicast(seat, &ServerMessage::act(act));
    }
    /// Timer expiry: applies the fallback if this deadline is still live.
    async fn expire(&self, generation: u64) {
        let mut state = self.shared.state.lock().await;
        if !state.timer.matches(generation) {
            return;
        }
        let seat = match state.pending.as_ref() {
            Some(pending) => pending.seat,
            None => return,
        };
        let action = state.engine.fallback(seat);
        log::info!(
            "[room {}] seat {} timed out; applying {}",
            self.shared.table_id,
            seat,
            action
        );
        self.apply_forced(&mut state, seat, action);
    }
    fn apply_forced(&self, state: &mut State, seat: Position, action: Action) {
        let events = state
            .engine
            .apply_action(seat, action)
            .expect("fallback action is always legal");
        state.pending = None;
        state.timer.disarm();
        for event in events {
            state.table.broadcast(&ServerMessage::event(event));
        }
        self.pump(state);
    }
}
