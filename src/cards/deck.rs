use super::card::Card;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Error returned when a deal asks for more cards than remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckExhausted;

impl std::fmt::Display for DeckExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck exhausted")
    }
}

impl std::error::Error for DeckExhausted {}

/// An ordered deck of the 52 distinct cards, dealt from the front.
///
/// The shuffle is driven by a ChaCha stream cipher seeded explicitly, so a
/// deck built from the same seed deals the same cards in the same order on
/// every platform and every run. Hands are replayable from `(seed, actions)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// All 52 cards shuffled deterministically by `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let ref mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = (0..52u8).map(Card::from).collect::<Vec<Card>>();
        cards.shuffle(rng);
        Self(cards)
    }
    /// Pops the front `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if self.0.len() < n {
            Err(DeckExhausted)
        } else {
            Ok(self.0.drain(..n).collect())
        }
    }
    /// Cards not yet dealt.
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}
