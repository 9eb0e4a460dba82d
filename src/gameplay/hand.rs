use super::event::Event;
use super::phase::Phase;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use crate::cards::Deck;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// All mutable state of the hand in progress.
///
/// Lives only for the duration of the hand; the engine owns it exclusively.
/// `pending_callers` holds the funded, unfolded seats still owed action this
/// round, `actor_queue` the order they are prompted in, and `acted` the
/// seats that have acted since the last full raise (a seat in `acted` may
/// not re-raise until a full raise reopens the betting).
#[derive(Debug, Clone)]
pub struct HandContext {
    pub(crate) id: String,
    pub(crate) seed: u64,
    pub(crate) button: Position,
    pub(crate) deck: Deck,
    pub(crate) community: Vec<Card>,
    pub(crate) phase: Phase,
    pub(crate) pot: Chips,
    pub(crate) current_bet: Chips,
    pub(crate) min_raise_increment: Chips,
    pub(crate) last_raise_seat: Option<Position>,
    pub(crate) pending_callers: BTreeSet<Position>,
    pub(crate) acted: BTreeSet<Position>,
    pub(crate) actor_queue: VecDeque<Position>,
    pub(crate) pre_events: Vec<Event>,
}

impl HandContext {
    pub(crate) fn new(id: String, seed: u64, button: Position, bb: Chips) -> Self {
        Self {
            id,
            seed,
            button,
            deck: Deck::shuffled(seed),
            community: Vec::new(),
            phase: Phase::PreFlop,
            pot: 0,
            current_bet: 0,
            min_raise_increment: bb,
            last_raise_seat: None,
            pending_callers: BTreeSet::new(),
            acted: BTreeSet::new(),
            actor_queue: VecDeque::new(),
            pre_events: Vec::new(),
        }
    }
}

/// Read-only view for the coordinator and payload builders.
impl HandContext {
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn button(&self) -> Position {
        self.button
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn min_raise_increment(&self) -> Chips {
        self.min_raise_increment
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
}
