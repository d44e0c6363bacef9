use roulette_sim::strategy::{Martingale, Strategy};
use roulette_sim::{settle, Bet, BetKind, Color, Dozen, Outcome, Session, Wheel};

/// A wheel whose first spin lands on `target`.
fn wheel_landing_on(target: u8) -> Wheel {
    let seed = (0u64..)
        .find(|seed| Wheel::seeded(*seed).spin() == target)
        .unwrap();
    Wheel::seeded(seed)
}

#[test]
fn straight_bet_on_seven_hits() {
    let mut session = Session::new(1000);
    let bet = Bet::parse("number", Some("7"), 100).unwrap();
    let result = session.play_round(bet, &mut wheel_landing_on(7)).unwrap();
    assert_eq!(result.outcome, Outcome { won: true, payout: 3600 });
    assert_eq!(session.balance(), 4500);
    assert_eq!(session.statistics().profit, 3500);
}

#[test]
fn red_loses_on_zero() {
    let mut session = Session::new(1000);
    let bet = Bet::new(BetKind::Color(Color::Red), 50).unwrap();
    let result = session.play_round(bet, &mut wheel_landing_on(0)).unwrap();
    assert_eq!(result.color, Color::Green);
    assert_eq!(result.outcome, Outcome { won: false, payout: 0 });
    assert_eq!(session.balance(), 950);
    assert_eq!(session.statistics().current_loss_streak, 1);
}

#[test]
fn first_dozen_pays_three_to_one_on_twelve() {
    let bet = Bet::new(BetKind::Dozen(Dozen::First), 20).unwrap();
    assert_eq!(settle(&bet, 12), Outcome { won: true, payout: 60 });
}

#[test]
fn martingale_after_three_losses() {
    let mut strategy = Martingale::new(10);
    strategy.on_loss();
    strategy.on_loss();
    strategy.on_loss();
    assert_eq!(strategy.bet_amount(), 80);
    strategy.on_win();
    assert_eq!(strategy.bet_amount(), 10);
}

#[test]
fn hot_numbers_after_known_spins() {
    let mut session = Session::default();
    let bet = Bet::new(BetKind::Even, 10).unwrap();
    for n in [5, 5, 5, 2, 2, 7] {
        session.record(bet, n, settle(&bet, n));
    }
    assert_eq!(session.hot_numbers(3), vec![(5, 3), (2, 2), (7, 1)]);
    assert_eq!(session.statistics().wins, 2);
}

#[test]
fn settlement_preview_does_not_touch_the_session() {
    let session = Session::default();
    let before = session.clone();
    let bet = Bet::new(BetKind::High, 100).unwrap();
    for n in 0..=36 {
        let _ = settle(&bet, n);
    }
    assert_eq!(session, before);
}
