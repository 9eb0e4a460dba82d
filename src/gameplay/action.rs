use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// A betting decision submitted by a seat.
///
/// RAISE_TO carries the *target* street commitment, not the delta: raising
/// to 300 from a stake of 100 moves 200 additional chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    RaiseTo(Chips),
}

/// An action's shape without its amount, as listed in legal-action sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    RaiseTo,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::RaiseTo(_) => ActionKind::RaiseTo,
        }
    }
}

/// str isomorphism for the wire's `action` field
impl TryFrom<&str> for ActionKind {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "FOLD" => Ok(ActionKind::Fold),
            "CHECK" => Ok(ActionKind::Check),
            "CALL" => Ok(ActionKind::Call),
            "RAISE_TO" => Ok(ActionKind::RaiseTo),
            _ => Err(format!("unknown action: {}", s)),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ActionKind::Fold => write!(f, "FOLD"),
            ActionKind::Check => write!(f, "CHECK"),
            ActionKind::Call => write!(f, "CALL"),
            ActionKind::RaiseTo => write!(f, "RAISE_TO"),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::RaiseTo(amount) => write!(f, "RAISE_TO {}", amount),
            other => write!(f, "{}", other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(ActionKind::try_from("FOLD"), Ok(ActionKind::Fold));
        assert_eq!(ActionKind::try_from("RAISE_TO"), Ok(ActionKind::RaiseTo));
        assert!(ActionKind::try_from("fold").is_err());
        assert!(ActionKind::try_from("RAISE").is_err());
    }

    #[test]
    fn serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&ActionKind::RaiseTo).unwrap(),
            "\"RAISE_TO\""
        );
    }

    #[test]
    fn displays_with_amount() {
        assert_eq!(Action::RaiseTo(300).to_string(), "RAISE_TO 300");
        assert_eq!(Action::Check.to_string(), "CHECK");
    }
}
