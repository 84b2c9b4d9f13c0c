use serde::{Deserialize, Serialize};

/// Storage key holding the deck as JSON text.
pub const CARDS_KEY: &str = "flipdeck.cards";
/// Storage key holding the cursor as a decimal string.
pub const CURRENT_INDEX_KEY: &str = "flipdeck.current_index";

const DEFAULT_CARDS: [(&str, &str); 3] = [
    (
        "What is a flashcard?",
        "A card with a prompt on the front and the answer on the back.",
    ),
    (
        "How do I flip a card?",
        "Press Space to switch between the front and the back.",
    ),
    (
        "How do I move between cards?",
        "Use the Left and Right arrow keys. The deck wraps around at either end.",
    ),
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// The built-in deck used on first launch and after a reset.
pub fn default_cards() -> Vec<Card> {
    DEFAULT_CARDS
        .iter()
        .map(|(front, back)| Card::new(*front, *back))
        .collect()
}

/// Snapshot of everything the study view depends on.
///
/// `cards` is never empty and `current` is always a valid index into it;
/// every transition produced by [`crate::reduce`] preserves both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckState {
    pub cards: Vec<Card>,
    pub current: usize,
    pub flipped: bool,
}

impl DeckState {
    /// Builds a state from loaded parts, falling back to the default deck when
    /// `cards` is empty and clamping `current` into range.
    pub fn from_parts(cards: Vec<Card>, current: usize) -> Self {
        let cards = if cards.is_empty() { default_cards() } else { cards };
        let current = current.min(cards.len() - 1);
        Self {
            cards,
            current,
            flipped: false,
        }
    }

    pub fn current_card(&self) -> &Card {
        &self.cards[self.current]
    }

    /// Text of the side currently facing the user.
    pub fn visible_text(&self) -> &str {
        let card = self.current_card();
        if self.flipped {
            &card.back
        } else {
            &card.front
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn can_delete(&self) -> bool {
        self.cards.len() > 1
    }
}

impl Default for DeckState {
    fn default() -> Self {
        Self::from_parts(default_cards(), 0)
    }
}
