use crate::{default_cards, Card, DeckError, DeckState, KeyValueStore, CARDS_KEY, CURRENT_INDEX_KEY};
use log::{debug, warn};

/// Reads the deck and cursor left by a previous session.
///
/// A missing or unreadable deck yields the default deck. A missing or
/// non-numeric cursor yields 0, and any cursor is clamped to the loaded deck.
pub fn load_state(store: &dyn KeyValueStore) -> Result<DeckState, DeckError> {
    let cards = match store.get(CARDS_KEY)? {
        None => {
            debug!("event=load key={CARDS_KEY} status=absent");
            default_cards()
        }
        Some(text) => match serde_json::from_str::<Vec<Card>>(&text) {
            Ok(cards) if !cards.is_empty() => cards,
            Ok(_) => {
                warn!("event=load key={CARDS_KEY} status=empty fallback=default");
                default_cards()
            }
            Err(err) => {
                warn!("event=load key={CARDS_KEY} status=corrupt fallback=default error={err}");
                default_cards()
            }
        },
    };

    let stored_index = store
        .get(CURRENT_INDEX_KEY)?
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let current = usize::try_from(stored_index).unwrap_or(0);
    if current >= cards.len() {
        warn!(
            "event=load key={CURRENT_INDEX_KEY} status=out_of_range index={current} len={}",
            cards.len()
        );
    }

    Ok(DeckState::from_parts(cards, current))
}

/// Writes the deck as JSON text and the cursor as a decimal string.
pub fn save_state(store: &dyn KeyValueStore, state: &DeckState) -> Result<(), DeckError> {
    let cards = serde_json::to_string(&state.cards).map_err(|_| DeckError::Storage("encode"))?;
    let current = state.current.to_string();
    store.set_many(&[(CARDS_KEY, cards.as_str()), (CURRENT_INDEX_KEY, current.as_str())])
}
