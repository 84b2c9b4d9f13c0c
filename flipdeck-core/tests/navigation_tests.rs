use flipdeck_core::{reduce, wrap_index, Action, Card, DeckState};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn deck(n: usize, current: usize) -> DeckState {
    let cards = (0..n).map(|i| Card::new(format!("q{i}"), format!("a{i}"))).collect();
    DeckState::from_parts(cards, current)
}

proptest! {
    #[test]
    fn navigation_stays_in_range(len in 1usize..50, start in 0usize..50, step in any::<i64>()) {
        let state = deck(len, start);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let t = reduce(&state, Action::Navigate(step), &mut rng).unwrap();
        prop_assert!(t.state.current < len);
        prop_assert!(!t.state.flipped);
    }

    #[test]
    fn forward_then_back_returns_home(len in 1usize..50, start in 0usize..50) {
        let state = deck(len, start);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let fwd = reduce(&state, Action::Navigate(1), &mut rng).unwrap().state;
        let back = reduce(&fwd, Action::Navigate(-1), &mut rng).unwrap().state;
        prop_assert_eq!(back.current, state.current);
    }

    #[test]
    fn delete_shrinks_by_one_and_keeps_cursor_valid(len in 2usize..40, start in 0usize..40) {
        let state = deck(len, start);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let next = reduce(&state, Action::Delete, &mut rng).unwrap().state;
        prop_assert_eq!(next.len(), len - 1);
        prop_assert!(next.current <= len - 2);
    }
}

#[test]
fn previous_from_first_wraps_to_last() {
    let state = deck(4, 0);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let t = reduce(&state, Action::Navigate(-1), &mut rng).unwrap();
    assert_eq!(t.state.current, 3);
    assert_eq!(wrap_index(3, 1, 4), 0);
}
