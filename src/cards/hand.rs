use super::card::Card;

/// Hand is a bitstring of 52 bits
/// stored as a u64
/// each bit represents a card in the (unordered) set
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn add(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// Card isomorphism
impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// Vec<Card> isomorphism
/// we OR the cards to get the bitstring
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |h, c| h | c))
    }
}
/// we pluck the 1s out of the bitstring and convert them to cards
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut value = hand.0;
        let mut index = 0u8;
        let mut cards = Vec::new();
        while value != 0 {
            if value & 1 == 1 {
                cards.push(Card::from(index));
            }
            value = value >> 1;
            index = index + 1;
        }
        cards
    }
}

/// str isomorphism, whitespace-separated labels
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Hand::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in Vec::<Card>::from(*self) {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_vec() {
        let hand = Hand::try_from("2c Th As").unwrap();
        assert_eq!(hand.size(), 3);
        assert_eq!(hand, Hand::from(Vec::<Card>::from(hand)));
    }

    #[test]
    fn duplicates_collapse() {
        let card = Card::try_from("Qd").unwrap();
        let hand = Hand::from(vec![card, card]);
        assert_eq!(hand.size(), 1);
    }

    #[test]
    fn add_unions_overlapping_sets() {
        let a = Hand::try_from("7h 8h").unwrap();
        let b = Hand::try_from("8h 9h").unwrap();
        assert_eq!(Hand::add(a, b), Hand::try_from("7h 8h 9h").unwrap());
    }
}
