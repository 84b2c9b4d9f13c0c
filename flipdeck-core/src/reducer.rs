use crate::{default_cards, fisher_yates, transfer, DeckError, DeckState};
use rand::Rng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor by `step` cards, wrapping at either end.
    Navigate(i64),
    Flip,
    Add { front: String, back: String },
    /// Remove the card under the cursor.
    Delete,
    Shuffle,
    Reset { confirmed: bool },
    /// Replace the deck with cards parsed from JSON text.
    Import(String),
    ExportRequested,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::Flip => "flip",
            Action::Add { .. } => "add",
            Action::Delete => "delete",
            Action::Shuffle => "shuffle",
            Action::Reset { .. } => "reset",
            Action::Import(_) => "import",
            Action::ExportRequested => "export",
        }
    }
}

/// Why an action was accepted but left the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyField,
    LastCard,
    Unconfirmed,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::EmptyField => "both front and back need text",
            Rejection::LastCard => "cannot delete the last card",
            Rejection::Unconfirmed => "reset needs confirmation",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Navigated,
    Flipped,
    Added,
    Deleted,
    Shuffled,
    Reset,
    Imported { count: usize },
    Exported(String),
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the deck or cursor changed and must be written back.
    pub fn persists(&self) -> bool {
        !matches!(
            self,
            Outcome::Flipped | Outcome::Exported(_) | Outcome::Rejected(_)
        )
    }
}

pub struct Transition {
    pub state: DeckState,
    pub outcome: Outcome,
}

impl Transition {
    fn to(state: DeckState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }

    fn unchanged(state: &DeckState, outcome: Outcome) -> Self {
        Self {
            state: state.clone(),
            outcome,
        }
    }
}

/// Computes the state that follows `action`.
///
/// The only input besides `state` and `action` is `rng`, used by
/// [`Action::Shuffle`]. Errors leave the caller's state as it was.
pub fn reduce<R: Rng + ?Sized>(
    state: &DeckState,
    action: Action,
    rng: &mut R,
) -> Result<Transition, DeckError> {
    let transition = match action {
        Action::Navigate(step) => {
            let mut next = state.clone();
            next.current = wrap_index(state.current, step, state.len());
            next.flipped = false;
            Transition::to(next, Outcome::Navigated)
        }
        Action::Flip => {
            let mut next = state.clone();
            next.flipped = !state.flipped;
            Transition::to(next, Outcome::Flipped)
        }
        Action::Add { front, back } => {
            if front.trim().is_empty() || back.trim().is_empty() {
                return Ok(Transition::unchanged(
                    state,
                    Outcome::Rejected(Rejection::EmptyField),
                ));
            }
            let mut next = state.clone();
            next.cards.push(crate::Card { front, back });
            next.flipped = false;
            Transition::to(next, Outcome::Added)
        }
        Action::Delete => {
            if !state.can_delete() {
                return Ok(Transition::unchanged(
                    state,
                    Outcome::Rejected(Rejection::LastCard),
                ));
            }
            let mut next = state.clone();
            next.cards.remove(state.current);
            next.current = state.current.min(next.cards.len() - 1);
            next.flipped = false;
            Transition::to(next, Outcome::Deleted)
        }
        Action::Shuffle => {
            let mut next = state.clone();
            fisher_yates(&mut next.cards, rng);
            next.current = 0;
            next.flipped = false;
            Transition::to(next, Outcome::Shuffled)
        }
        Action::Reset { confirmed } => {
            if !confirmed {
                return Ok(Transition::unchanged(
                    state,
                    Outcome::Rejected(Rejection::Unconfirmed),
                ));
            }
            Transition::to(DeckState::from_parts(default_cards(), 0), Outcome::Reset)
        }
        Action::Import(raw) => {
            let cards = transfer::parse_import(&raw)?;
            let count = cards.len();
            Transition::to(DeckState::from_parts(cards, 0), Outcome::Imported { count })
        }
        Action::ExportRequested => {
            let text = transfer::export_json(&state.cards)?;
            Transition::unchanged(state, Outcome::Exported(text))
        }
    };
    Ok(transition)
}

/// `(current + step) mod len` with a non-negative result for any step.
pub fn wrap_index(current: usize, step: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i128;
    (current as i128 + step as i128).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn three() -> DeckState {
        DeckState::from_parts(
            vec![Card::new("a", "1"), Card::new("b", "2"), Card::new("c", "3")],
            0,
        )
    }

    #[test]
    fn wrap_index_handles_both_directions() {
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(1, -7, 3), 0);
        assert_eq!(wrap_index(0, i64::MIN, 5), 2);
    }

    #[test]
    fn flip_does_not_persist_but_navigation_does() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let t = reduce(&three(), Action::Flip, &mut rng).unwrap();
        assert!(t.state.flipped);
        assert!(!t.outcome.persists());

        let t = reduce(&t.state, Action::Navigate(1), &mut rng).unwrap();
        assert!(!t.state.flipped);
        assert_eq!(t.state.current, 1);
        assert!(t.outcome.persists());
    }

    #[test]
    fn export_leaves_state_alone() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = three();
        s.current = 2;
        s.flipped = true;
        let t = reduce(&s, Action::ExportRequested, &mut rng).unwrap();
        assert_eq!(t.state, s);
        match t.outcome {
            Outcome::Exported(text) => assert!(text.starts_with("[\n  {")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn unconfirmed_reset_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = three();
        s.current = 1;
        let t = reduce(&s, Action::Reset { confirmed: false }, &mut rng).unwrap();
        assert_eq!(t.state, s);
        assert_eq!(t.outcome, Outcome::Rejected(Rejection::Unconfirmed));
    }
}
