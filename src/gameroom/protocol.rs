use crate::Chips;
use crate::Position;
use crate::gameplay::ActionKind;
use crate::gameplay::Engine;
use crate::gameplay::Event;
use crate::gameplay::Phase;
use crate::gameplay::TableConfig;
use serde::Deserialize;
use serde::Serialize;

/// Error codes reported to clients in `error` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadHello,
    BadSchema,
    TeamRequired,
    TableFull,
    OutOfTurn,
    ActionTooLate,
    InvalidAction,
    UnknownType,
}

/// Messages sent from server to client over the websocket.
///
/// Serialization produces the wire shape directly; [`Self::to_frame`] adds
/// the protocol version `v: 1` and a UTC ISO-8601 `ts` to every frame.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection accepted: seat assignment and table configuration.
    Welcome {
        table_id: String,
        seat: Position,
        config: TableConfig,
    },
    /// Roster update, broadcast on every join and disconnect.
    Lobby { players: Vec<LobbyPlayer> },
    /// A new hand is starting; stacks include chips already posted.
    StartHand {
        hand_id: String,
        seed: u64,
        button: Position,
        stacks: Vec<SeatStack>,
    },
    /// An engine event, broadcast in engine order.
    Event {
        #[serde(flatten)]
        event: Event,
    },
    /// It's your turn: full public state plus your private panel.
    Act {
        #[serde(flatten)]
        payload: ActPayload,
    },
    /// State view for a client reconnecting during a live hand.
    Snapshot {
        #[serde(flatten)]
        payload: SnapshotPayload,
    },
    /// Hand finished with final stacks.
    EndHand {
        hand_id: String,
        stacks: Vec<SeatStack>,
    },
    /// Match finished; `winner` is absent if everyone busted at once.
    MatchEnd {
        winner: Option<MatchWinner>,
        final_stacks: Vec<FinalStack>,
    },
    Error { code: ErrorCode, msg: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct LobbyPlayer {
    pub seat: Position,
    pub team: String,
    pub connected: bool,
    pub stack: Chips,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatStack {
    pub seat: Position,
    pub stack: Chips,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchWinner {
    pub seat: Position,
    pub team: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalStack {
    pub seat: Position,
    pub team: String,
    pub stack: Chips,
}

/// Public per-seat state as seen by every client.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSeat {
    pub seat: Position,
    pub stack: Chips,
    pub has_folded: bool,
    pub committed: Chips,
}

/// The acting seat's private panel inside an `act` prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ActYou {
    pub hole: Vec<String>,
    pub stack: Chips,
    pub committed: Chips,
    pub to_call: Chips,
    pub time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActTable {
    pub sb: Chips,
    pub bb: Chips,
    pub seats: usize,
    pub button: Position,
}

/// Turn prompt: everything a bot needs to pick a legal action.
#[derive(Debug, Clone, Serialize)]
pub struct ActPayload {
    pub hand_id: String,
    pub seat: Position,
    pub phase: Phase,
    pub pot: Chips,
    pub current_bet: Chips,
    pub min_raise_increment: Chips,
    pub you: ActYou,
    pub table: ActTable,
    pub players: Vec<PublicSeat>,
    pub community: Vec<String>,
    pub legal: Vec<ActionKind>,
    pub call_amount: Option<Chips>,
    pub min_raise_to: Option<Chips>,
    pub max_raise_to: Option<Chips>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotYou {
    pub seat: Position,
    pub hole: Vec<String>,
    pub stack: Chips,
    pub to_call: Chips,
}

/// Reconnect view: the hand as it stands, plus the legal-action block when
/// it is the recipient's turn.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPayload {
    pub at_hand_id: String,
    pub phase: Phase,
    pub you: SnapshotYou,
    pub players: Vec<PublicSeat>,
    pub community: Vec<String>,
    pub next_actor: Option<Position>,
    pub time_ms_remaining: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal: Option<Vec<ActionKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_amount: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_raise_to: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_raise_to: Option<Chips>,
}

impl ActPayload {
    /// Builds the turn prompt for the seat to act. `time_ms` is the clock
    /// the recipient has left, which on reconnect is less than the full
    /// per-decision allowance.
    pub fn compose(engine: &Engine, pos: Position, time_ms: u64) -> Self {
        let ctx = engine.hand().expect("hand in progress");
        let seat = engine.seat(pos).expect("prompted seat is occupied");
        let legal = engine.legal_actions(pos).expect("prompted seat is active");
        Self {
            hand_id: ctx.id().to_string(),
            seat: pos,
            phase: ctx.phase(),
            pot: ctx.pot(),
            current_bet: ctx.current_bet(),
            min_raise_increment: ctx.min_raise_increment(),
            you: ActYou {
                hole: seat.hole().iter().map(|c| c.to_string()).collect(),
                stack: seat.stack(),
                committed: seat.stake(),
                to_call: ctx.current_bet().saturating_sub(seat.stake()),
                time_ms,
            },
            table: ActTable {
                sb: engine.config().sb,
                bb: engine.config().bb,
                seats: engine.config().seats,
                button: ctx.button(),
            },
            players: public_seats(engine),
            community: ctx.community().iter().map(|c| c.to_string()).collect(),
            legal: legal.actions,
            call_amount: legal.call_amount,
            min_raise_to: legal.min_raise_to,
            max_raise_to: legal.max_raise_to,
        }
    }
}

impl SnapshotPayload {
    /// Builds the reconnect view for `pos`. The legal-action block is
    /// present only when the recipient is the pending actor.
    pub fn compose(
        engine: &Engine,
        pos: Position,
        next_actor: Option<Position>,
        time_ms_remaining: u64,
    ) -> Self {
        let ctx = engine.hand().expect("hand in progress");
        let seat = engine.seat(pos).expect("occupied seat");
        let turn = next_actor == Some(pos);
        let legal = match turn {
            true => engine.legal_actions(pos).ok(),
            false => None,
        };
        Self {
            at_hand_id: ctx.id().to_string(),
            phase: ctx.phase(),
            you: SnapshotYou {
                seat: pos,
                hole: seat.hole().iter().map(|c| c.to_string()).collect(),
                stack: seat.stack(),
                to_call: ctx.current_bet().saturating_sub(seat.stake()),
            },
            players: public_seats(engine),
            community: ctx.community().iter().map(|c| c.to_string()).collect(),
            next_actor,
            time_ms_remaining,
            legal: legal.as_ref().map(|l| l.actions.clone()),
            call_amount: legal.as_ref().and_then(|l| l.call_amount),
            min_raise_to: legal.as_ref().and_then(|l| l.min_raise_to),
            max_raise_to: legal.as_ref().and_then(|l| l.max_raise_to),
        }
    }
}

fn public_seats(engine: &Engine) -> Vec<PublicSeat> {
    engine
        .seats()
        .map(|s| PublicSeat {
            seat: s.position(),
            stack: s.stack(),
            has_folded: s.folded(),
            committed: s.stake(),
        })
        .collect()
}

impl ServerMessage {
    pub fn welcome(table_id: &str, seat: Position, config: &TableConfig) -> Self {
        Self::Welcome {
            table_id: table_id.to_string(),
            seat,
            config: config.clone(),
        }
    }
    pub fn lobby(engine: &Engine) -> Self {
        Self::Lobby {
            players: engine
                .seats()
                .map(|s| LobbyPlayer {
                    seat: s.position(),
                    team: s.team().to_string(),
                    connected: s.connected(),
                    stack: s.stack(),
                })
                .collect(),
        }
    }
    pub fn start_hand(engine: &Engine) -> Self {
        let ctx = engine.hand().expect("hand in progress");
        Self::StartHand {
            hand_id: ctx.id().to_string(),
            seed: ctx.seed(),
            button: ctx.button(),
            stacks: engine
                .opening_stacks()
                .into_iter()
                .map(|(seat, stack)| SeatStack { seat, stack })
                .collect(),
        }
    }
    pub fn event(event: Event) -> Self {
        Self::Event { event }
    }
    pub fn act(payload: ActPayload) -> Self {
        Self::Act { payload }
    }
    pub fn snapshot(payload: SnapshotPayload) -> Self {
        Self::Snapshot { payload }
    }
    pub fn end_hand(engine: &Engine) -> Self {
        let ctx = engine.hand().expect("hand in progress");
        Self::EndHand {
            hand_id: ctx.id().to_string(),
            stacks: engine
                .stacks()
                .into_iter()
                .map(|(seat, stack)| SeatStack { seat, stack })
                .collect(),
        }
    }
    pub fn match_end(engine: &Engine) -> Self {
        Self::MatchEnd {
            winner: engine.match_winner().map(|s| MatchWinner {
                seat: s.position(),
                team: s.team().to_string(),
            }),
            final_stacks: engine
                .seats()
                .map(|s| FinalStack {
                    seat: s.position(),
                    team: s.team().to_string(),
                    stack: s.stack(),
                })
                .collect(),
        }
    }
    pub fn error(code: ErrorCode, msg: &str) -> Self {
        Self::Error {
            code,
            msg: msg.to_string(),
        }
    }
    /// Serializes with the envelope fields every outbound frame carries.
    pub fn to_frame(&self) -> String {
        let mut value = serde_json::to_value(self).expect("serialize server message");
        let map = value.as_object_mut().expect("frames are objects");
        map.insert("v".to_string(), 1.into());
        map.insert(
            "ts".to_string(),
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true).into(),
        );
        value.to_string()
    }
}

/// Messages accepted from clients. Field validation happens in the room so
/// each violation maps to its precise error code.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Required first message on every connection.
    Hello {
        #[serde(default)]
        team: Option<String>,
        #[serde(default)]
        role: Option<String>,
    },
    /// A seat's betting decision for the live hand.
    Action {
        #[serde(default)]
        hand_id: Option<String>,
        #[serde(default)]
        action: Option<String>,
        #[serde(default)]
        amount: Option<serde_json::Value>,
    },
    /// Operator commands (skip the pending actor).
    Control {
        #[serde(default)]
        command: Option<String>,
    },
}

impl TryFrom<&str> for ClientMessage {
    type Error = serde_json::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Event;

    #[test]
    fn frame_envelope() {
        let frame = ServerMessage::error(ErrorCode::BadHello, "expected hello").to_frame();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["code"], "BAD_HELLO");
        assert_eq!(value["v"], 1);
        assert!(value["ts"].as_str().unwrap().ends_with("Z"));
    }

    #[test]
    fn event_frame_flattens() {
        let frame = ServerMessage::event(Event::PotAward { seat: 1, amount: 30 }).to_frame();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["ev"], "POT_AWARD");
        assert_eq!(value["seat"], 1);
        assert_eq!(value["amount"], 30);
    }

    #[test]
    fn parses_hello() {
        let msg = ClientMessage::try_from(r#"{"type":"hello","team":"alpha"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Hello { team: Some(t), .. } if t == "alpha"));
    }

    #[test]
    fn parses_action_with_loose_amount() {
        let msg = ClientMessage::try_from(
            r#"{"type":"action","hand_id":"H-1","action":"RAISE_TO","amount":"oops"}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::Action { amount, .. } => assert!(amount.unwrap().as_u64().is_none()),
            _ => panic!("expected action"),
        }
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(ClientMessage::try_from(r#"{"type":"gossip"}"#).is_err());
        assert!(ClientMessage::try_from("not json").is_err());
    }
}
