use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;

/// Ranks a 5-7 card set.
///
/// Construction folds the hand into three views: which ranks are present,
/// which ranks each suit holds, and how many copies of each rank there are.
/// Classification reads only those views, so evaluating the whole set at
/// once is equivalent to taking the best five-card subset.
pub struct Evaluator {
    ranks: u16,
    suits: [u16; 4],
    counts: [u8; 13],
}

impl From<Hand> for Evaluator {
    fn from(hand: Hand) -> Self {
        debug_assert!((5..=7).contains(&hand.size()), "evaluator wants 5-7 cards");
        let mut ranks = 0u16;
        let mut suits = [0u16; 4];
        let mut counts = [0u8; 13];
        for card in Vec::<Card>::from(hand) {
            ranks |= u16::from(card.rank());
            suits[u8::from(card.suit()) as usize] |= u16::from(card.rank());
            counts[u8::from(card.rank()) as usize] += 1;
        }
        Self {
            ranks,
            suits,
            counts,
        }
    }
}

impl Evaluator {
    /// Best category with its tie-breaking kickers.
    pub fn evaluate(&self) -> (Ranking, Kickers) {
        let value = self.ranking();
        (value, self.kickers(value))
    }

    fn ranking(&self) -> Ranking {
        // seven cards cannot hold both a flush and quads or a full house,
        // so the suited and offsuit ladders are searched independently
        if let Some(held) = self.flush() {
            return match straight_high(held) {
                Some(high) => Ranking::StraightFlush(high),
                None => Ranking::Flush(Rank::from(held)),
            };
        }
        match (self.strongest(4), self.strongest(3)) {
            (Some(quads), _) => Ranking::FourOAK(quads),
            // the pair filling a full house may outrank the trips
            (None, Some(trips)) => match self.strongest_except(2, trips) {
                Some(pair) => Ranking::FullHouse(trips, pair),
                None => match straight_high(self.ranks) {
                    Some(high) => Ranking::Straight(high),
                    None => Ranking::ThreeOAK(trips),
                },
            },
            (None, None) => {
                if let Some(high) = straight_high(self.ranks) {
                    return Ranking::Straight(high);
                }
                match self.strongest(2) {
                    Some(hi) => match self.strongest_below(2, hi) {
                        Some(lo) => Ranking::TwoPair(hi, lo),
                        None => Ranking::OnePair(hi),
                    },
                    None => Ranking::HighCard(Rank::from(self.ranks)),
                }
            }
        }
    }

    fn kickers(&self, value: Ranking) -> Kickers {
        let (made, keep) = match value {
            // flush kickers come from the flush suit alone
            Ranking::Flush(high) => {
                let held = self.flush().expect("flush suit present");
                return Kickers::from(trim(held & !u16::from(high), 4));
            }
            Ranking::HighCard(hi) => (u16::from(hi), 4),
            Ranking::OnePair(hi) => (u16::from(hi), 3),
            Ranking::ThreeOAK(hi) => (u16::from(hi), 2),
            Ranking::FourOAK(hi) => (u16::from(hi), 1),
            Ranking::TwoPair(hi, lo) => (u16::from(hi) | u16::from(lo), 1),
            _ => return Kickers::default(),
        };
        Kickers::from(trim(self.ranks & !made, keep))
    }

    /// Ranks held by a suit with five or more cards.
    fn flush(&self) -> Option<u16> {
        self.suits.iter().copied().find(|held| held.count_ones() >= 5)
    }
    /// Highest rank appearing at least `n` times.
    fn strongest(&self, n: u8) -> Option<Rank> {
        (0..13u8)
            .rev()
            .find(|&r| self.counts[r as usize] >= n)
            .map(Rank::from)
    }
    /// Highest rank strictly below `under` appearing at least `n` times.
    fn strongest_below(&self, n: u8, under: Rank) -> Option<Rank> {
        (0..u8::from(under))
            .rev()
            .find(|&r| self.counts[r as usize] >= n)
            .map(Rank::from)
    }
    /// Highest rank other than `skip` appearing at least `n` times.
    fn strongest_except(&self, n: u8, skip: Rank) -> Option<Rank> {
        (0..13u8)
            .rev()
            .filter(|&r| r != u8::from(skip))
            .find(|&r| self.counts[r as usize] >= n)
            .map(Rank::from)
    }
}

/// Highest straight in a rank mask, with the ace also playing low.
///
/// Prepends an ace-low bit to the mask and scans for the longest run of
/// consecutive ranks, keeping the top of the last run of five or more.
fn straight_high(ranks: u16) -> Option<Rank> {
    let lattice = (ranks << 1) | (ranks >> 12);
    let mut run = 0u8;
    let mut high = None;
    for bit in 0..14u8 {
        match lattice >> bit & 1 {
            1 => {
                run += 1;
                if run >= 5 {
                    high = Some(Rank::from(bit - 1));
                }
            }
            _ => run = 0,
        }
    }
    high
}

/// Keeps only the `n` highest set bits.
fn trim(mut mask: u16, n: u32) -> u16 {
    while mask.count_ones() > n {
        mask &= mask - 1;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_of(labels: &str) -> Ranking {
        Evaluator::from(Hand::try_from(labels).unwrap()).evaluate().0
    }
    fn kicks_of(labels: &str) -> Vec<Rank> {
        Evaluator::from(Hand::try_from(labels).unwrap())
            .evaluate()
            .1
            .ranks()
    }

    #[test]
    fn ace_on_a_ragged_board() {
        assert_eq!(rank_of("Qd 8c As 3h Jc"), Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn pocket_nines() {
        assert_eq!(rank_of("9c 9d Ks 6h 2s"), Ranking::OnePair(Rank::Nine));
    }

    #[test]
    fn jacks_over_fours() {
        assert_eq!(
            rank_of("Jc Jh 4s 4d Qc"),
            Ranking::TwoPair(Rank::Jack, Rank::Four)
        );
    }

    #[test]
    fn set_of_sixes() {
        assert_eq!(rank_of("6c 6d 6h Ah 9s"), Ranking::ThreeOAK(Rank::Six));
    }

    #[test]
    fn nine_high_straight() {
        assert_eq!(rank_of("5d 6s 7c 8h 9d"), Ranking::Straight(Rank::Nine));
    }

    #[test]
    fn wheel_is_five_high() {
        assert_eq!(rank_of("Ad 2c 3s 4h 5c"), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn jack_high_flush() {
        assert_eq!(rank_of("Jd 9d 6d 4d 2d"), Ranking::Flush(Rank::Jack));
    }

    #[test]
    fn kings_full_of_sevens() {
        assert_eq!(
            rank_of("Kc Kd Kh 7s 7h"),
            Ranking::FullHouse(Rank::King, Rank::Seven)
        );
    }

    #[test]
    fn quad_deuces() {
        assert_eq!(rank_of("2c 2d 2h 2s Td"), Ranking::FourOAK(Rank::Two));
    }

    #[test]
    fn steel_wheel() {
        assert_eq!(rank_of("Ah 2h 3h 4h 5h"), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn royal_is_just_an_ace_high_straight_flush() {
        assert_eq!(rank_of("Th Jh Qh Kh Ah"), Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn sevens_full_of_aces() {
        assert_eq!(
            rank_of("7c 7d 7h Ac Ad"),
            Ranking::FullHouse(Rank::Seven, Rank::Ace)
        );
    }

    #[test]
    fn two_sets_make_the_bigger_boat() {
        assert_eq!(
            rank_of("8c 8d 8h 3c 3d 3s Ad"),
            Ranking::FullHouse(Rank::Eight, Rank::Three)
        );
    }

    #[test]
    fn flush_outranks_a_straight_in_seven() {
        // nine-to-king straight on the side, but five spades play
        assert_eq!(rank_of("2s 5s 9s Js Ks Qd Tc"), Ranking::Flush(Rank::King));
    }

    #[test]
    fn straight_outranks_the_pair_riding_along() {
        assert_eq!(rank_of("7c 7d 8h 9s Tc Jd 2c"), Ranking::Straight(Rank::Jack));
    }

    #[test]
    fn quads_over_a_paired_board() {
        assert_eq!(rank_of("5c 5d 5h 5s Kc Kd 2h"), Ranking::FourOAK(Rank::Five));
    }

    #[test]
    fn three_pairs_keep_the_best_two() {
        assert_eq!(
            rank_of("Ac Ad 7c 7d 4s 4h Qc"),
            Ranking::TwoPair(Rank::Ace, Rank::Seven)
        );
    }

    #[test]
    fn six_long_run_tops_out() {
        assert_eq!(rank_of("3c 4d 5h 6s 7c 8d Kh"), Ranking::Straight(Rank::Eight));
    }

    #[test]
    fn pair_carries_the_top_three_kickers() {
        assert_eq!(
            kicks_of("Tc Td Ah 8s 6d 4c 2h"),
            vec![Rank::Ace, Rank::Eight, Rank::Six]
        );
    }

    #[test]
    fn quads_carry_a_single_kicker() {
        assert_eq!(kicks_of("Jc Jd Jh Js 9c 7d 5s"), vec![Rank::Nine]);
    }

    #[test]
    fn two_pair_kicker_may_come_off_a_third_pair() {
        assert_eq!(kicks_of("Kc Kd 9c 9d 5c 5d Ac"), vec![Rank::Ace]);
    }

    #[test]
    fn flush_kickers_ignore_offsuit_paint() {
        assert_eq!(
            kicks_of("Qc 9c 7c 4c 2c Ad Kh"),
            vec![Rank::Nine, Rank::Seven, Rank::Four, Rank::Two]
        );
    }

    #[test]
    fn straights_and_boats_carry_none() {
        assert!(kicks_of("5d 6s 7c 8h 9d").is_empty());
        assert!(kicks_of("Kc Kd Kh 7s 7h").is_empty());
    }
}
