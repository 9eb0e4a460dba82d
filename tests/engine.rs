//! End-to-end hand engine scenarios driven through the public API.

use botarena::Chips;
use botarena::gameplay::Action;
use botarena::gameplay::ActionKind;
use botarena::gameplay::Engine;
use botarena::gameplay::Event;
use botarena::gameplay::Phase;
use botarena::gameplay::TableConfig;

fn table(seats: usize, stack: Chips) -> Engine {
    Engine::new(TableConfig {
        seats,
        starting_stack: stack,
        sb: 10,
        bb: 20,
        move_time_ms: 0,
        ..TableConfig::default()
    })
}

fn seated(n: usize, stack: Chips) -> Engine {
    let mut engine = table(n, stack);
    for i in 0..n {
        engine.assign_seat(&format!("team-{}", i)).unwrap();
    }
    engine
}

/// All-in if raising is legal, otherwise call, otherwise check.
fn jam(engine: &mut Engine, pos: usize) -> Action {
    let legal = engine.legal_actions(pos).unwrap();
    if legal.actions.contains(&ActionKind::RaiseTo) {
        Action::RaiseTo(legal.max_raise_to.unwrap())
    } else if legal.actions.contains(&ActionKind::Call) {
        Action::Call
    } else {
        Action::Check
    }
}

#[test]
fn heads_up_fold_preflop() {
    let mut engine = seated(2, 1_000);
    engine.start_hand(Some(1)).unwrap();
    let pre = engine.consume_pre_events();
    assert!(matches!(
        pre[..],
        [Event::PostBlinds { sb_seat: 0, bb_seat: 1, sb: 10, bb: 20 }]
    ));
    assert_eq!(engine.next_actor(), Some(0));
    let events = engine.apply_action(0, Action::Fold).unwrap();
    assert!(matches!(events[0], Event::Fold { seat: 0 }));
    assert!(matches!(events[1], Event::PotAward { seat: 1, amount: 30 }));
    assert_eq!(events.len(), 2);
    assert_eq!(engine.seat(0).unwrap().stack(), 990);
    assert_eq!(engine.seat(1).unwrap().stack(), 1_010);
    assert!(engine.is_hand_complete());
    assert!(!engine.is_match_over());
    // no community cards were revealed
    assert!(engine.hand().unwrap().community().is_empty());
}

#[test]
fn three_handed_raise_and_calls_to_showdown() {
    let mut engine = seated(3, 1_000);
    engine.start_hand(Some(42)).unwrap();
    engine.consume_pre_events();
    // button 0, sb 1, bb 2; action opens on the button's seat
    assert_eq!(engine.next_actor(), Some(0));
    let events = engine.apply_action(0, Action::RaiseTo(40)).unwrap();
    assert!(matches!(events[..], [Event::Bet { seat: 0, amount: 40 }]));
    assert_eq!(engine.next_actor(), Some(1));
    let events = engine.apply_action(1, Action::Call).unwrap();
    assert!(matches!(events[..], [Event::Call { seat: 1, amount: 30 }]));
    assert_eq!(engine.next_actor(), Some(2));
    let events = engine.apply_action(2, Action::Call).unwrap();
    assert!(matches!(events[0], Event::Call { seat: 2, amount: 20 }));
    assert!(matches!(events[1], Event::Flop { .. }));
    assert_eq!(engine.hand().unwrap().pot(), 120);
    // everyone checks down to showdown
    let mut all = Vec::new();
    while !engine.is_hand_complete() {
        let pos = engine.next_actor().unwrap();
        all.extend(engine.apply_action(pos, Action::Check).unwrap());
    }
    assert_eq!(engine.hand().unwrap().phase(), Phase::Showdown);
    let reveals = all
        .iter()
        .filter(|e| matches!(e, Event::Showdown { .. }))
        .count();
    assert_eq!(reveals, 3);
    let awarded = all
        .iter()
        .filter_map(|e| match e {
            Event::PotAward { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum::<Chips>();
    assert_eq!(awarded, 120);
    assert_eq!(engine.total_chips(), 3_000);
}

#[test]
fn all_in_match_runs_to_a_winner() {
    let mut engine = seated(2, 100);
    let mut hands = 0;
    while !engine.is_match_over() {
        hands += 1;
        assert!(hands < 1_000, "match should terminate");
        engine.start_hand(Some(hands)).unwrap();
        engine.consume_pre_events();
        while !engine.is_hand_complete() {
            let pos = engine.next_actor().unwrap();
            let action = jam(&mut engine, pos);
            engine.apply_action(pos, action).unwrap();
        }
        assert_eq!(engine.total_chips(), 200);
        engine.finish_hand();
    }
    let winner = engine.match_winner().unwrap();
    assert_eq!(winner.stack(), 200);
}

#[test]
fn fallback_driven_hands_conserve_chips() {
    let mut engine = seated(3, 500);
    for seed in 0..20 {
        if engine.is_match_over() {
            break;
        }
        engine.start_hand(Some(seed)).unwrap();
        engine.consume_pre_events();
        while !engine.is_hand_complete() {
            let pos = engine.next_actor().unwrap();
            let action = engine.fallback(pos);
            engine.apply_action(pos, action).unwrap();
            assert_eq!(engine.total_chips(), 1_500);
            if let Some(ctx) = engine.hand() {
                for seat in engine.seats().filter(|s| s.in_hand() && s.funded()) {
                    assert!(seat.stake() <= ctx.current_bet());
                }
            }
        }
        // pot emptied and per-hand counters zeroed
        assert_eq!(engine.hand().unwrap().pot(), 0);
        for seat in engine.seats() {
            assert_eq!(seat.stake(), 0);
            assert_eq!(seat.spent(), 0);
        }
        engine.finish_hand();
    }
    assert_eq!(engine.total_chips(), 1_500);
}

#[test]
fn button_walks_the_table_between_hands() {
    let mut engine = seated(3, 1_000);
    let mut buttons = Vec::new();
    for seed in 0..6 {
        engine.start_hand(Some(seed)).unwrap();
        engine.consume_pre_events();
        buttons.push(engine.hand().unwrap().button());
        while !engine.is_hand_complete() {
            let pos = engine.next_actor().unwrap();
            let action = engine.fallback(pos);
            engine.apply_action(pos, action).unwrap();
        }
        engine.finish_hand();
    }
    assert_eq!(buttons, vec![0, 1, 2, 0, 1, 2]);
}
