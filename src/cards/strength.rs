use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's strength.
///
/// Constructed from a Hand, an unordered set of 5-7 cards. The ranking
/// orders categories and their defining ranks; the kickers break ties.
/// Equal keys mean equal hands and a shared pot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        Self::from(e.evaluate())
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(labels: &str) -> Strength {
        Strength::from(Hand::try_from(labels).unwrap())
    }

    #[test]
    fn wheel_below_six_high() {
        assert!(strength("As 2h 3d 4c 5s 9h 8d") < strength("2s 3h 4d 5c 6s 9h 8d"));
    }

    #[test]
    fn kicker_breaks_pair_tie() {
        assert!(strength("As Ah Kd Qc 2s") > strength("Ad Ac Kh Jc 2d"));
    }

    #[test]
    fn equal_hands_share() {
        assert_eq!(strength("As Ah Kd Qc Js"), strength("Ad Ac Kh Qd Jc"));
    }

    #[test]
    fn flush_tiebreak_goes_deep() {
        assert!(strength("Ah Kh 9h 5h 2h") < strength("As Ks Ts 4s 3s"));
    }

    #[test]
    fn categories_dominate_kickers() {
        assert!(strength("As Ah Kd Qc Js") < strength("2s 2h 2d Qc Js"));
    }

    #[test]
    fn board_plays_for_both() {
        // both players play the board straight
        let board = "6s 7h 8d 9c Ts";
        let a = strength(&format!("{} {}", board, "2h 3d"));
        let b = strength(&format!("{} {}", board, "Ah Kd"));
        assert_eq!(a, b);
    }
}
