use proptest::prelude::*;
use roulette_sim::config::{MAXIMUM_BET, MINIMUM_BET};
use roulette_sim::settlement::multiplier;
use roulette_sim::{color_of, settle, Bet, BetKind, Color, Dozen, Session, Wheel};

fn bet_kind() -> impl Strategy<Value = BetKind> {
    prop_oneof![
        (0u8..=36).prop_map(BetKind::Number),
        Just(BetKind::Color(Color::Red)),
        Just(BetKind::Color(Color::Black)),
        Just(BetKind::Odd),
        Just(BetKind::Even),
        Just(BetKind::High),
        Just(BetKind::Low),
        prop::sample::select(Dozen::ALL.to_vec()).prop_map(BetKind::Dozen),
    ]
}

fn bet() -> impl Strategy<Value = Bet> {
    (bet_kind(), MINIMUM_BET..=MAXIMUM_BET).prop_map(|(kind, stake)| Bet::new(kind, stake).unwrap())
}

#[test]
fn colors_partition_zero_to_thirty_six() {
    let mut counts = [0usize; 3];
    for n in 0..=36u8 {
        let slot = match color_of(n) {
            Color::Green => 0,
            Color::Red => 1,
            Color::Black => 2,
        };
        counts[slot] += 1;
    }
    assert_eq!(counts, [1, 18, 18]);
}

proptest! {
    #[test]
    fn payout_is_zero_exactly_on_a_loss(bet in bet(), n in 0u8..=36) {
        let outcome = settle(&bet, n);
        prop_assert_eq!(outcome.payout == 0, !outcome.won);
        if outcome.won {
            prop_assert_eq!(outcome.payout, bet.stake() * multiplier(bet.kind()));
        }
        prop_assert_eq!(settle(&bet, n), outcome);
    }

    #[test]
    fn zero_only_pays_straight_zero(bet in bet()) {
        prop_assert_eq!(settle(&bet, 0).won, bet.kind() == BetKind::Number(0));
    }

    #[test]
    fn streaks_stay_consistent(seed in any::<u64>(), kinds in prop::collection::vec(bet_kind(), 1..60)) {
        let mut session = Session::new(1_000_000);
        let mut wheel = Wheel::seeded(seed);
        for kind in kinds {
            session.play_round(Bet::new(kind, MINIMUM_BET).unwrap(), &mut wheel).unwrap();
            let stats = session.statistics();
            prop_assert!(stats.current_win_streak == 0 || stats.current_loss_streak == 0);
            prop_assert!(stats.current_win_streak + stats.current_loss_streak > 0);
            prop_assert!(stats.max_win_streak >= stats.current_win_streak);
            prop_assert!(stats.max_loss_streak >= stats.current_loss_streak);
            prop_assert_eq!(stats.total_bets as usize, session.history().len());
            prop_assert_eq!(session.number_frequency().values().sum::<u64>(), stats.total_bets);
        }
    }

    #[test]
    fn snapshot_round_trips(seed in any::<u64>(), bets in prop::collection::vec(bet(), 0..30)) {
        let mut session = Session::new(1_000_000);
        let mut wheel = Wheel::seeded(seed);
        for bet in bets {
            session.play_round(bet, &mut wheel).unwrap();
        }
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, session);
    }
}
