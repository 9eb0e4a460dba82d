use super::rank::Rank;

/// A poker hand's category.
///
/// Declaration order is strength order, so the derived `Ord` compares
/// categories correctly and the payload ranks break ties within a category.
/// Kicker cards beyond the payload live in [`super::kicks::Kickers`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    /// Stable lowercase category name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Ranking::HighCard(_) => "high_card",
            Ranking::OnePair(_) => "pair",
            Ranking::TwoPair(_, _) => "two_pair",
            Ranking::ThreeOAK(_) => "three_of_a_kind",
            Ranking::Straight(_) => "straight",
            Ranking::Flush(_) => "flush",
            Ranking::FullHouse(_, _) => "full_house",
            Ranking::FourOAK(_) => "four_of_a_kind",
            Ranking::StraightFlush(_) => "straight_flush",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "HighCard      {} ", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {} ", r),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair       {}{}", r1, r2),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind  {} ", r),
            Ranking::Straight(r) => write!(f, "Straight      {} ", r),
            Ranking::Flush(r) => write!(f, "Flush         {} ", r),
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse     {}{}", r1, r2),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind   {} ", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_ordered() {
        assert!(Ranking::HighCard(Rank::Ace) < Ranking::OnePair(Rank::Two));
        assert!(Ranking::Straight(Rank::Ace) < Ranking::Flush(Rank::Seven));
        assert!(Ranking::Flush(Rank::Ace) < Ranking::FullHouse(Rank::Two, Rank::Three));
        assert!(Ranking::FourOAK(Rank::Ace) < Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn payload_breaks_ties() {
        assert!(Ranking::OnePair(Rank::King) < Ranking::OnePair(Rank::Ace));
        assert!(
            Ranking::TwoPair(Rank::Ace, Rank::Queen) < Ranking::TwoPair(Rank::Ace, Rank::King)
        );
        assert!(Ranking::Straight(Rank::Five) < Ranking::Straight(Rank::Six));
    }
}
