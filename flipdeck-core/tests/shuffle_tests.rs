use flipdeck_core::{fisher_yates, reduce, Action, Card, DeckState, Outcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

#[test]
fn shuffle_preserves_multiset_and_resets_cursor() {
    let cards: Vec<Card> = (0..10)
        .map(|i| Card::new(format!("q{}", i % 4), format!("a{i}")))
        .collect();
    let mut state = DeckState::from_parts(cards.clone(), 6);
    state.flipped = true;
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let t = reduce(&state, Action::Shuffle, &mut rng).unwrap();
    assert_eq!(t.outcome, Outcome::Shuffled);
    assert_eq!(t.state.current, 0);
    assert!(!t.state.flipped);

    let mut before = cards;
    let mut after = t.state.cards;
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn shuffle_of_single_card_is_identity() {
    let mut items = vec![1];
    fisher_yates(&mut items, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(items, vec![1]);
}

#[test]
fn permutations_are_roughly_uniform() {
    const TRIALS: usize = 60_000;
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
    for _ in 0..TRIALS {
        let mut items = vec![0u8, 1, 2, 3];
        fisher_yates(&mut items, &mut rng);
        *counts.entry(items).or_default() += 1;
    }

    // 4! permutations, each expected TRIALS / 24 = 2500 times.
    assert_eq!(counts.len(), 24);
    let expected = TRIALS as f64 / 24.0;
    let chi_sq: f64 = counts
        .values()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    // 23 degrees of freedom: a fair shuffle lands near 23, a biased one far above.
    assert!(chi_sq < 70.0, "chi-square too large: {chi_sq}");
}
