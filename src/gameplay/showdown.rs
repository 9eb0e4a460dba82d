use crate::Chips;
use crate::Position;

/// One layer of the pot: an amount and the seats eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub contenders: Vec<Position>,
}

/// Builds side pots by the classic layering algorithm.
///
/// Input is each seat's total contribution this hand plus its folded flag.
/// Take the smallest remaining contribution among still-contributing seats,
/// collect that much from each of them, and repeat until nothing remains.
/// Folded seats contribute chips to a layer but never contend for it; a
/// layer with a single contributor is that seat's own uncalled chips coming
/// back.
pub fn side_pots(contributions: &[(Position, Chips, bool)]) -> Vec<Pot> {
    let mut remaining = contributions
        .iter()
        .filter(|(_, spent, _)| *spent > 0)
        .map(|(pos, spent, folded)| (*pos, *spent, *folded))
        .collect::<Vec<_>>();
    let mut pots = Vec::new();
    loop {
        let layer = match remaining
            .iter()
            .filter(|(_, spent, _)| *spent > 0)
            .map(|(_, spent, _)| *spent)
            .min()
        {
            Some(layer) => layer,
            None => break,
        };
        let mut amount = 0;
        let mut contenders = Vec::new();
        for (pos, spent, folded) in remaining.iter_mut() {
            if *spent > 0 {
                amount += layer;
                *spent -= layer;
                if !*folded {
                    contenders.push(*pos);
                }
            }
        }
        pots.push(Pot { amount, contenders });
    }
    pots
}

/// Splits a pot equally among its winners, handing the integer remainder
/// out one chip per seat in ascending seat order.
pub fn split(amount: Chips, winners: &[Position]) -> Vec<(Position, Chips)> {
    debug_assert!(!winners.is_empty());
    let mut winners = winners.to_vec();
    winners.sort_unstable();
    let share = amount / winners.len() as Chips;
    let bonus = amount % winners.len() as Chips;
    winners
        .into_iter()
        .enumerate()
        .map(|(i, pos)| (pos, share + if (i as Chips) < bonus { 1 } else { 0 }))
        .collect()
}
