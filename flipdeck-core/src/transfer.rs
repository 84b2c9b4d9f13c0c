use crate::{Card, DeckError};
use serde_json::Value;

/// Pretty JSON (two-space indent) of the whole deck, in deck order.
pub fn export_json(cards: &[Card]) -> Result<String, DeckError> {
    serde_json::to_string_pretty(cards).map_err(|e| DeckError::Export(e.to_string()))
}

/// Parses import text into the cards that should replace the deck.
///
/// Entries without a non-empty string `front` and `back` are dropped without
/// being reported individually.
pub fn parse_import(raw: &str) -> Result<Vec<Card>, DeckError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| DeckError::Parse(e.to_string()))?;
    let entries = match value {
        Value::Array(entries) if !entries.is_empty() => entries,
        _ => return Err(DeckError::InvalidFormat),
    };
    accept_entries(entries.iter().map(|entry| {
        (
            entry.get("front").and_then(Value::as_str),
            entry.get("back").and_then(Value::as_str),
        )
    }))
}

/// Keeps the `(front, back)` pairs where both sides are present and non-empty.
///
/// Shared by every import format so they agree on what a valid card is.
pub fn accept_entries<'a, I>(entries: I) -> Result<Vec<Card>, DeckError>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    let cards: Vec<Card> = entries
        .into_iter()
        .filter_map(|pair| match pair {
            (Some(front), Some(back)) if !front.is_empty() && !back.is_empty() => {
                Some(Card::new(front, back))
            }
            _ => None,
        })
        .collect();
    if cards.is_empty() {
        return Err(DeckError::NoValidCards);
    }
    Ok(cards)
}
