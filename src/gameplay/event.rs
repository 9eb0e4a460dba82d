use crate::Chips;
use crate::Position;
use serde::Serialize;

/// Events emitted by the engine, broadcast to every client in order.
///
/// Serialization produces the wire shape directly: the `ev` tag plus the
/// event-specific fields, e.g. `{"ev":"CALL","seat":2,"amount":50}`. Cards
/// travel as two-character labels.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ev", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// Blinds posted at hand start; amounts are the configured blinds.
    PostBlinds {
        sb_seat: Position,
        bb_seat: Position,
        sb: Chips,
        bb: Chips,
    },
    Fold {
        seat: Position,
    },
    Check {
        seat: Position,
    },
    /// `amount` is the chips actually committed (short all-in calls less).
    Call {
        seat: Position,
        amount: Chips,
    },
    /// A raise; `amount` is the additional chips committed by the raiser.
    Bet {
        seat: Position,
        amount: Chips,
    },
    Flop {
        cards: Vec<String>,
    },
    Turn {
        card: String,
    },
    River {
        card: String,
    },
    /// A seat's cards revealed at showdown with its best category.
    Showdown {
        seat: Position,
        hand: Vec<String>,
        board: Vec<String>,
        rank: String,
    },
    PotAward {
        seat: Position,
        amount: Chips,
    },
    Eliminated {
        seat: Position,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::PostBlinds { sb_seat, bb_seat, .. } => {
                write!(f, "blinds posted by P{} and P{}", sb_seat, bb_seat)
            }
            Event::Fold { seat } => write!(f, "P{}: folds", seat),
            Event::Check { seat } => write!(f, "P{}: checks", seat),
            Event::Call { seat, amount } => write!(f, "P{}: calls {}", seat, amount),
            Event::Bet { seat, amount } => write!(f, "P{}: bets {}", seat, amount),
            Event::Flop { cards } => write!(f, "flop {}", cards.join(" ")),
            Event::Turn { card } => write!(f, "turn {}", card),
            Event::River { card } => write!(f, "river {}", card),
            Event::Showdown { seat, rank, .. } => write!(f, "P{}: shows {}", seat, rank),
            Event::PotAward { seat, amount } => write!(f, "P{} wins {}", seat, amount),
            Event::Eliminated { seat } => write!(f, "P{}: eliminated", seat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let event = Event::Call { seat: 2, amount: 50 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["ev"], "CALL");
        assert_eq!(json["seat"], 2);
        assert_eq!(json["amount"], 50);
    }

    #[test]
    fn pot_award_tag() {
        let event = Event::PotAward { seat: 0, amount: 30 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["ev"], "POT_AWARD");
    }

    #[test]
    fn flop_carries_labels() {
        let event = Event::Flop {
            cards: vec!["As".into(), "Kd".into(), "2c".into()],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["cards"][0], "As");
    }
}
