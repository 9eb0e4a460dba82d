use super::*;
use crate::Chips;
use crate::Position;
use crate::cards::Hand;
use crate::cards::Strength;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// Legal moves for the seat to act, with call and raise bounds.
///
/// `min_raise_to == max_raise_to` means the only legal raise is all-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalActions {
    pub actions: Vec<ActionKind>,
    pub call_amount: Option<Chips>,
    pub min_raise_to: Option<Chips>,
    pub max_raise_to: Option<Chips>,
}

/// No-Limit Texas Hold'em rules engine for a single table.
///
/// The engine is pure and synchronous: every mutation returns the events it
/// produced, nothing suspends, and nothing here touches the network. The
/// coordinator owns one engine exclusively and serialises every call.
///
/// Chip conservation is a hard invariant: no action creates or destroys
/// chips, and a breach panics rather than corrupting the table.
pub struct Engine {
    config: TableConfig,
    seats: Vec<Option<Seat>>,
    button: Option<Position>,
    counter: u64,
    bankroll: Chips,
    hand: Option<HandContext>,
}

/// Construction and accessors.
impl Engine {
    pub fn new(config: TableConfig) -> Self {
        assert!(config.seats >= 2, "a table needs at least two seats");
        assert!(config.seats * 2 + 5 <= 52, "the deck must cover every seat");
        assert!(config.sb <= config.bb, "small blind cannot exceed big blind");
        assert!(config.starting_stack > 0, "starting stack must be positive");
        Self {
            seats: vec![None; config.seats],
            button: None,
            counter: 0,
            bankroll: 0,
            hand: None,
            config,
        }
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seat(&self, pos: Position) -> Option<&Seat> {
        self.seats.get(pos).and_then(|s| s.as_ref())
    }
    /// Occupied seats in ascending seat order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().flatten()
    }
    pub fn hand(&self) -> Option<&HandContext> {
        self.hand.as_ref()
    }
    pub fn set_connected(&mut self, pos: Position, connected: bool) {
        if let Some(seat) = self.seats.get_mut(pos).and_then(|s| s.as_mut()) {
            seat.set_connected(connected);
        }
    }
}

/// Seat management.
impl Engine {
    /// Claims or recovers a seat for a team.
    ///
    /// Identity is the case-folded label: a returning team gets its old seat
    /// back (refreshing the display label), a new team takes the lowest
    /// empty seat with a starting stack. Seats claimed mid-hand sit out
    /// until the next deal.
    pub fn assign_seat(&mut self, team: &str) -> Result<Position, EngineError> {
        let display = team.trim();
        if display.is_empty() {
            return Err(EngineError::TeamRequired);
        }
        let key = Seat::key_of(display);
        if let Some(seat) = self.seats.iter_mut().flatten().find(|s| s.key() == key) {
            seat.rename(display);
            return Ok(seat.position());
        }
        match self.seats.iter().position(|s| s.is_none()) {
            Some(pos) => {
                let mut seat = Seat::new(pos, display, self.config.starting_stack);
                if self.hand.is_some() {
                    seat.fold();
                }
                self.bankroll += self.config.starting_stack;
                self.seats[pos] = Some(seat);
                log::info!("[engine] seat {} claimed by {}", pos, display);
                Ok(pos)
            }
            None => Err(EngineError::TableFull),
        }
    }
}

/// Termination and continuation predicates.
impl Engine {
    /// True if a fresh hand may begin: no hand running, two funded seats.
    pub fn can_start_hand(&self) -> bool {
        self.hand.is_none() && self.funded_positions().count() >= 2
    }
    /// The hand is complete once the pot has been fully awarded.
    pub fn is_hand_complete(&self) -> bool {
        self.hand
            .as_ref()
            .map_or(false, |ctx| ctx.phase == Phase::Showdown && ctx.pot == 0)
    }
    /// The match is over when at most one seat has chips.
    pub fn is_match_over(&self) -> bool {
        self.funded_positions().count() <= 1
    }
    /// The lone funded seat once the match is over.
    pub fn match_winner(&self) -> Option<&Seat> {
        let mut funded = self.seats().filter(|s| s.funded());
        funded.next().filter(|_| self.is_match_over())
    }
}

/// Hand lifecycle.
impl Engine {
    /// Starts a new hand: resets seats, shuffles with `seed` (or one derived
    /// from system time), rotates the button, deals hole cards one at a time
    /// from the seat after the button, and posts the blinds. Either the hand
    /// starts fully or not at all.
    pub fn start_hand(&mut self, seed: Option<u64>) -> Result<(), EngineError> {
        if self.hand.is_some() {
            return Err(EngineError::IllegalAction("hand already in progress".into()));
        }
        if self.funded_positions().count() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        for seat in self.seats.iter_mut().flatten() {
            match seat.funded() {
                true => seat.reset_for_hand(),
                false => seat.retire(),
            }
        }
        let heads_up = self.funded_positions().count() == 2;
        let button = match self.button {
            None => self.funded_positions().next().expect("funded seats exist"),
            Some(prev) => self.seat_after(prev),
        };
        self.button = Some(button);
        let seed = seed.unwrap_or_else(Self::clock_seed);
        let id = format!("H-{}-{:05}", chrono::Utc::now().format("%Y%m%d"), self.counter);
        self.counter += 1;
        log::info!("[engine] hand {} (seed {}, button P{})", id, seed, button);
        self.hand = Some(HandContext::new(id, seed, button, self.config.bb));
        match self.setup_hand(heads_up) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.hand = None;
                Err(e)
            }
        }
    }
    /// Engine-emitted events pending first broadcast (blind posts).
    pub fn consume_pre_events(&mut self) -> Vec<Event> {
        self.hand
            .as_mut()
            .map(|ctx| std::mem::take(&mut ctx.pre_events))
            .unwrap_or_default()
    }
    /// Drops the completed hand context so the next one can start.
    pub fn finish_hand(&mut self) {
        debug_assert!(self.is_hand_complete());
        self.hand = None;
    }

    fn setup_hand(&mut self, heads_up: bool) -> Result<(), EngineError> {
        self.deal_hole()?;
        self.post_blinds(heads_up);
        self.open_preflop(heads_up);
        // blinds can put everyone all-in; run the board out immediately
        if self.ctx().pending_callers.is_empty() {
            let events = self.advance_phase()?;
            self.ctx_mut().pre_events.extend(events);
        }
        Ok(())
    }
    fn deal_hole(&mut self) -> Result<(), EngineError> {
        let order = self.ring_after(self.ctx().button);
        for _ in 0..2 {
            for &pos in order.iter() {
                let card = self.ctx_mut().deck.deal(1)?[0];
                self.seat_mut(pos).deal(card);
            }
        }
        Ok(())
    }
    fn post_blinds(&mut self, heads_up: bool) {
        let button = self.ctx().button;
        // heads-up, the button posts the small blind
        let (sb_seat, bb_seat) = match heads_up {
            true => (button, self.seat_after(button)),
            false => {
                let sb = self.seat_after(button);
                (sb, self.seat_after(sb))
            }
        };
        let (sb, bb) = (self.config.sb, self.config.bb);
        self.commit(sb_seat, sb);
        self.commit(bb_seat, bb);
        let bet = self
            .seat_ref(sb_seat)
            .stake()
            .max(self.seat_ref(bb_seat).stake());
        let ctx = self.ctx_mut();
        ctx.current_bet = bet;
        ctx.min_raise_increment = bb;
        ctx.last_raise_seat = Some(bb_seat);
        ctx.pre_events.push(Event::PostBlinds {
            sb_seat,
            bb_seat,
            sb,
            bb,
        });
    }
    fn open_preflop(&mut self, heads_up: bool) {
        let pending = self.actionable_positions().collect::<BTreeSet<_>>();
        // heads-up, the button acts first pre-flop; otherwise the seat after
        // the big blind opens
        let start = match heads_up {
            true => self.ctx().button,
            false => self.seat_after(self.ctx().last_raise_seat.expect("blinds posted")),
        };
        let queue = self.rotation_at(start);
        let ctx = self.ctx_mut();
        ctx.pending_callers = pending;
        ctx.acted.clear();
        ctx.actor_queue = queue;
    }
    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time moves slow")
            .as_millis() as u64
    }
}

/// Action legality.
impl Engine {
    /// Every legal move for a seat plus the call and raise bounds.
    pub fn legal_actions(&self, pos: Position) -> Result<LegalActions, EngineError> {
        let ctx = self.hand.as_ref().ok_or(EngineError::NoHand)?;
        let seat = self
            .seat(pos)
            .filter(|s| s.in_hand())
            .ok_or(EngineError::SeatInactive)?;
        let mut actions = vec![ActionKind::Fold];
        let owed = ctx.current_bet.saturating_sub(seat.stake());
        let mut call_amount = None;
        if owed == 0 {
            actions.push(ActionKind::Check);
        } else if seat.funded() {
            actions.push(ActionKind::Call);
            call_amount = Some(owed);
        }
        let mut min_raise_to = None;
        let mut max_raise_to = None;
        let all_in_to = seat.stack() + seat.stake();
        let full_min = ctx.current_bet + ctx.min_raise_increment;
        if seat.funded() && all_in_to > ctx.current_bet && !ctx.acted.contains(&pos) {
            actions.push(ActionKind::RaiseTo);
            max_raise_to = Some(all_in_to);
            // a stack short of the full minimum may only raise all-in
            min_raise_to = Some(match all_in_to > full_min {
                true => full_min,
                false => all_in_to,
            });
        }
        Ok(LegalActions {
            actions,
            call_amount,
            min_raise_to,
            max_raise_to,
        })
    }
    /// Timeout fallback: check if legal, else call, else fold.
    pub fn fallback(&self, pos: Position) -> Action {
        match self.legal_actions(pos) {
            Ok(legal) if legal.actions.contains(&ActionKind::Check) => Action::Check,
            Ok(legal) if legal.actions.contains(&ActionKind::Call) => Action::Call,
            _ => Action::Fold,
        }
    }
}

/// Action application.
impl Engine {
    /// Applies a seat's action and returns the events it produced, including
    /// any street reveals or showdown resolution it triggered. Rule
    /// violations leave the table untouched.
    pub fn apply_action(&mut self, pos: Position, action: Action) -> Result<Vec<Event>, EngineError> {
        self.hand.as_ref().ok_or(EngineError::NoHand)?;
        self.seat(pos)
            .filter(|s| s.in_hand())
            .ok_or(EngineError::SeatInactive)?;
        log::debug!("[engine] P{}: {}", pos, action);
        let mut events = Vec::new();
        match action {
            Action::Fold => {
                self.seat_mut(pos).fold();
                let ctx = self.ctx_mut();
                ctx.pending_callers.remove(&pos);
                ctx.acted.insert(pos);
                events.push(Event::Fold { seat: pos });
            }
            Action::Check => {
                if self.ctx().current_bet > self.seat_ref(pos).stake() {
                    return Err(EngineError::IllegalAction(
                        "cannot check facing a bet".into(),
                    ));
                }
                let ctx = self.ctx_mut();
                ctx.pending_callers.remove(&pos);
                ctx.acted.insert(pos);
                events.push(Event::Check { seat: pos });
            }
            Action::Call => {
                let owed = self
                    .ctx()
                    .current_bet
                    .saturating_sub(self.seat_ref(pos).stake());
                if owed == 0 {
                    return Err(EngineError::IllegalAction("nothing to call".into()));
                }
                let paid = self.commit(pos, owed);
                let ctx = self.ctx_mut();
                ctx.pending_callers.remove(&pos);
                ctx.acted.insert(pos);
                events.push(Event::Call { seat: pos, amount: paid });
            }
            Action::RaiseTo(target) => {
                let seat = self.seat_ref(pos);
                let stake = seat.stake();
                let all_in_to = seat.stack() + stake;
                let ctx = self.ctx();
                if !self.seat_ref(pos).funded() {
                    return Err(EngineError::IllegalAction("no chips left to raise".into()));
                }
                if target > all_in_to {
                    return Err(EngineError::IllegalAction("raise exceeds stack".into()));
                }
                if target <= ctx.current_bet {
                    return Err(EngineError::IllegalAction(
                        "raise must exceed current bet".into(),
                    ));
                }
                let full_min = ctx.current_bet + ctx.min_raise_increment;
                let short = target < full_min;
                if short && target != all_in_to {
                    return Err(EngineError::IllegalAction("raise below minimum".into()));
                }
                if ctx.acted.contains(&pos) {
                    return Err(EngineError::IllegalAction(
                        "betting is not reopened".into(),
                    ));
                }
                let previous = ctx.current_bet;
                let paid = self.commit(pos, target - stake);
                debug_assert_eq!(paid, target - stake);
                let pending = self
                    .actionable_positions()
                    .filter(|&p| p != pos)
                    .collect::<BTreeSet<_>>();
                let ctx = self.ctx_mut();
                ctx.current_bet = target;
                // a short all-in never reopens the betting
                if !short {
                    ctx.min_raise_increment = target - previous;
                    ctx.last_raise_seat = Some(pos);
                    ctx.acted.clear();
                }
                ctx.acted.insert(pos);
                ctx.pending_callers = pending;
                events.push(Event::Bet { seat: pos, amount: paid });
            }
        }
        if self.seat_ref(pos).stack() == 0 {
            self.ctx_mut().pending_callers.remove(&pos);
        }
        events.extend(self.advance_after_action()?);
        debug_assert_eq!(self.total_chips(), self.bankroll, "chips conserved");
        Ok(events)
    }
    /// Total chips visible on the table: every stack plus the live pot.
    pub fn total_chips(&self) -> Chips {
        self.seats().map(Seat::stack).sum::<Chips>()
            + self.hand.as_ref().map_or(0, |ctx| ctx.pot)
    }
}

/// Actor rotation.
impl Engine {
    /// The seat owed the next prompt, dropping folded or all-in seats from
    /// the head of the queue. `None` once the round (or hand) is done.
    pub fn next_actor(&mut self) -> Option<Position> {
        loop {
            let head = self.hand.as_ref()?.actor_queue.front().copied()?;
            let live = self
                .seat(head)
                .map_or(false, |s| s.in_hand() && s.funded());
            match live {
                true => return Some(head),
                false => self.ctx_mut().actor_queue.pop_front(),
            };
        }
    }
}

/// Phase progression.
impl Engine {
    fn advance_after_action(&mut self) -> Result<Vec<Event>, EngineError> {
        let mut events = Vec::new();
        let live = self.live_positions().collect::<Vec<_>>();
        // last seat standing wins without further reveals
        if let [winner] = live[..] {
            let pot = self.ctx().pot;
            if pot > 0 {
                self.seat_mut(winner).win(pot);
                self.ctx_mut().pot = 0;
                events.push(Event::PotAward {
                    seat: winner,
                    amount: pot,
                });
            }
            for seat in self.seats.iter_mut().flatten() {
                seat.settle();
            }
            let ctx = self.ctx_mut();
            ctx.phase = Phase::Showdown;
            ctx.pending_callers.clear();
            ctx.actor_queue.clear();
            return Ok(events);
        }
        // the actor who just acted moves to the back of the queue
        let ctx = self.ctx_mut();
        if let Some(head) = ctx.actor_queue.pop_front() {
            ctx.actor_queue.push_back(head);
        }
        let round_over = ctx.pending_callers.is_empty();
        if round_over {
            events.extend(self.advance_phase()?);
        }
        Ok(events)
    }
    fn advance_phase(&mut self) -> Result<Vec<Event>, EngineError> {
        let mut events = Vec::new();
        loop {
            match self.ctx().phase {
                Phase::PreFlop => {
                    let cards = self.ctx_mut().deck.deal(3)?;
                    let labels = cards.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                    let ctx = self.ctx_mut();
                    ctx.community.extend(cards.iter().copied());
                    ctx.phase = Phase::Flop;
                    events.push(Event::Flop { cards: labels });
                }
                Phase::Flop => {
                    let card = self.ctx_mut().deck.deal(1)?[0];
                    let ctx = self.ctx_mut();
                    ctx.community.push(card);
                    ctx.phase = Phase::Turn;
                    events.push(Event::Turn {
                        card: card.to_string(),
                    });
                }
                Phase::Turn => {
                    let card = self.ctx_mut().deck.deal(1)?[0];
                    let ctx = self.ctx_mut();
                    ctx.community.push(card);
                    ctx.phase = Phase::River;
                    events.push(Event::River {
                        card: card.to_string(),
                    });
                }
                Phase::River | Phase::Showdown => {
                    self.ctx_mut().phase = Phase::Showdown;
                    events.extend(self.resolve_showdown());
                    return Ok(events);
                }
            }
            // open the next betting round
            for seat in self.seats.iter_mut().flatten().filter(|s| s.in_hand()) {
                seat.reset_for_round();
            }
            let bb = self.config.bb;
            let pending = self.actionable_positions().collect::<BTreeSet<_>>();
            let queue = match pending.is_empty() {
                true => VecDeque::new(),
                false => self.rotation_at(self.seat_after(self.ctx().button)),
            };
            let betting = !pending.is_empty();
            let ctx = self.ctx_mut();
            ctx.current_bet = 0;
            ctx.min_raise_increment = bb;
            ctx.last_raise_seat = None;
            ctx.acted.clear();
            ctx.pending_callers = pending;
            ctx.actor_queue = queue;
            if betting {
                return Ok(events);
            }
            // everyone is all-in: keep revealing until showdown
        }
    }
}

/// Showdown and payouts.
impl Engine {
    fn resolve_showdown(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let board = self.ctx().community.clone();
        debug_assert_eq!(board.len(), 5, "showdown needs a full board");
        let board_labels = board.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        // reveal and score every unfolded seat in ascending seat order
        let mut scores = std::collections::BTreeMap::new();
        for pos in self.live_positions().collect::<Vec<_>>() {
            let seat = self.seat_ref(pos);
            let cards = Hand::add(Hand::from(seat.hole().to_vec()), Hand::from(board.clone()));
            let strength = Strength::from(cards);
            events.push(Event::Showdown {
                seat: pos,
                hand: seat.hole().iter().map(|c| c.to_string()).collect(),
                board: board_labels.clone(),
                rank: strength.ranking().name().to_string(),
            });
            scores.insert(pos, strength);
        }
        // the best hand among each layer's contenders takes it; ties split
        // with odd chips going to the lowest seats
        let contributions = self
            .seats()
            .filter(|s| s.spent() > 0)
            .map(|s| (s.position(), s.spent(), s.folded()))
            .collect::<Vec<_>>();
        for pot in side_pots(&contributions) {
            debug_assert!(!pot.contenders.is_empty(), "every layer has a live contender");
            let best = pot
                .contenders
                .iter()
                .filter_map(|p| scores.get(p))
                .max()
                .copied();
            if let Some(best) = best {
                let winners = pot
                    .contenders
                    .iter()
                    .copied()
                    .filter(|p| scores.get(p) == Some(&best))
                    .collect::<Vec<_>>();
                for (pos, share) in split(pot.amount, &winners) {
                    self.seat_mut(pos).win(share);
                    events.push(Event::PotAward {
                        seat: pos,
                        amount: share,
                    });
                }
            }
            self.ctx_mut().pot -= pot.amount;
        }
        for pos in self
            .seats()
            .filter(|s| s.stack() == 0 && !s.hole().is_empty())
            .map(Seat::position)
            .collect::<Vec<_>>()
        {
            events.push(Event::Eliminated { seat: pos });
        }
        for seat in self.seats.iter_mut().flatten() {
            seat.settle();
        }
        let ctx = self.ctx_mut();
        ctx.pending_callers.clear();
        ctx.actor_queue.clear();
        debug_assert_eq!(ctx.pot, 0, "pot fully distributed");
        events
    }
}

/// Views for the coordinator's payload builders.
impl Engine {
    /// Stacks at hand start: current stack plus chips already posted.
    pub fn opening_stacks(&self) -> Vec<(Position, Chips)> {
        self.seats()
            .map(|s| (s.position(), s.stack() + s.spent()))
            .collect()
    }
    /// Current stacks in ascending seat order.
    pub fn stacks(&self) -> Vec<(Position, Chips)> {
        self.seats().map(|s| (s.position(), s.stack())).collect()
    }
}

/// Private position arithmetic.
impl Engine {
    fn funded_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.seats().filter(|s| s.funded()).map(|s| s.position())
    }
    fn live_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.seats().filter(|s| s.in_hand()).map(|s| s.position())
    }
    fn actionable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.seats()
            .filter(|s| s.in_hand() && s.funded())
            .map(|s| s.position())
    }
    /// Next funded, unfolded seat strictly after `start`, clockwise.
    fn seat_after(&self, start: Position) -> Position {
        let n = self.config.seats;
        (1..=n)
            .map(|i| (start + i) % n)
            .find(|&p| self.seat(p).map_or(false, |s| s.in_hand() && s.funded()))
            .expect("a live seat exists")
    }
    /// Funded, unfolded seats clockwise, beginning after `start`.
    fn ring_after(&self, start: Position) -> Vec<Position> {
        let n = self.config.seats;
        let first = self.seat_after(start);
        (0..n)
            .map(|i| (first + i) % n)
            .filter(|&p| self.seat(p).map_or(false, |s| s.in_hand() && s.funded()))
            .collect()
    }
    /// Funded, unfolded seats clockwise, beginning at `start` itself.
    fn rotation_at(&self, start: Position) -> VecDeque<Position> {
        let n = self.config.seats;
        (0..n)
            .map(|i| (start + i) % n)
            .filter(|&p| self.seat(p).map_or(false, |s| s.in_hand() && s.funded()))
            .collect()
    }
    /// Moves chips from a seat's stack into the pot, capped at the stack.
    fn commit(&mut self, pos: Position, amount: Chips) -> Chips {
        let paid = self.seat_mut(pos).bet(amount);
        self.ctx_mut().pot += paid;
        paid
    }
    fn ctx(&self) -> &HandContext {
        self.hand.as_ref().expect("hand in progress")
    }
    fn ctx_mut(&mut self) -> &mut HandContext {
        self.hand.as_mut().expect("hand in progress")
    }
    fn seat_ref(&self, pos: Position) -> &Seat {
        self.seat(pos).expect("occupied seat")
    }
    fn seat_mut(&mut self, pos: Position) -> &mut Seat {
        self.seats
            .get_mut(pos)
            .and_then(|s| s.as_mut())
            .expect("occupied seat")
    }
}
