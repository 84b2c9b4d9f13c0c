use flipdeck_core::{default_cards, reduce, Action, Card, DeckState, Outcome, Rejection};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn deck(n: usize) -> DeckState {
    let cards = (0..n).map(|i| Card::new(format!("q{i}"), format!("a{i}"))).collect();
    DeckState::from_parts(cards, 0)
}

fn apply(state: &DeckState, action: Action) -> (DeckState, Outcome) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let t = reduce(state, action, &mut rng).unwrap();
    (t.state, t.outcome)
}

#[test]
fn add_rejects_blank_fields() {
    let start = deck(2);
    for (front, back) in [("", "x"), ("x", ""), ("   ", "x"), ("x", "\n\t")] {
        let (s, out) = apply(
            &start,
            Action::Add { front: front.into(), back: back.into() },
        );
        assert_eq!(s, start);
        assert_eq!(out, Outcome::Rejected(Rejection::EmptyField));
    }
}

#[test]
fn add_appends_without_moving_cursor() {
    let mut start = deck(3);
    start.current = 1;
    start.flipped = true;
    let (s, out) = apply(&start, Action::Add { front: "a".into(), back: "b".into() });
    assert_eq!(out, Outcome::Added);
    assert_eq!(s.len(), 4);
    assert_eq!(s.cards.last(), Some(&Card::new("a", "b")));
    assert_eq!(s.current, 1);
    assert!(!s.flipped);
}

#[test]
fn delete_last_remaining_card_is_noop() {
    let start = deck(1);
    let (s, out) = apply(&start, Action::Delete);
    assert_eq!(s, start);
    assert_eq!(out, Outcome::Rejected(Rejection::LastCard));
}

#[test]
fn delete_at_end_moves_cursor_back() {
    let mut start = deck(3);
    start.current = 2;
    start.flipped = true;
    let (s, out) = apply(&start, Action::Delete);
    assert_eq!(out, Outcome::Deleted);
    assert_eq!(s.len(), 2);
    assert_eq!(s.current, 1);
    assert!(!s.flipped);
    assert_eq!(s.cards, vec![Card::new("q0", "a0"), Card::new("q1", "a1")]);
}

#[test]
fn delete_in_middle_keeps_cursor_on_following_card() {
    let mut start = deck(4);
    start.current = 1;
    let (s, _) = apply(&start, Action::Delete);
    assert_eq!(s.current, 1);
    assert_eq!(s.current_card(), &Card::new("q2", "a2"));
}

#[test]
fn confirmed_reset_restores_default_deck() {
    let mut start = deck(5);
    start.current = 4;
    start.flipped = true;
    let (s, out) = apply(&start, Action::Reset { confirmed: true });
    assert_eq!(out, Outcome::Reset);
    assert_eq!(s.cards, default_cards());
    assert_eq!(s.cards.len(), 3);
    assert_eq!(s.current, 0);
    assert!(!s.flipped);
}

#[test]
fn flip_toggles_and_shows_back() {
    let start = deck(2);
    let (s, out) = apply(&start, Action::Flip);
    assert_eq!(out, Outcome::Flipped);
    assert_eq!(s.visible_text(), "a0");
    let (s, _) = apply(&s, Action::Flip);
    assert_eq!(s.visible_text(), "q0");
}

#[test]
fn from_parts_never_yields_empty_deck() {
    let s = DeckState::from_parts(Vec::new(), 9);
    assert_eq!(s.cards, default_cards());
    assert_eq!(s.current, 2);
}
