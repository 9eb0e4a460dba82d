use serde::Deserialize;
use serde::Serialize;

/// The five stages of a hand, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::PreFlop => "PRE_FLOP",
            Phase::Flop => "FLOP",
            Phase::Turn => "TURN",
            Phase::River => "RIVER",
            Phase::Showdown => "SHOWDOWN",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_progression() {
        assert!(Phase::PreFlop < Phase::Flop);
        assert!(Phase::River < Phase::Showdown);
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&Phase::PreFlop).unwrap(), "\"PRE_FLOP\"");
        assert_eq!(Phase::Showdown.as_str(), "SHOWDOWN");
    }
}
