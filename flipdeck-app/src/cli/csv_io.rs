use flipdeck_core::{transfer::accept_entries, Card, DeckError};
use serde::Deserialize;
use std::io::Write;

#[derive(Deserialize)]
struct CsvRow {
    #[serde(default)]
    front: Option<String>,
    #[serde(default)]
    back: Option<String>,
}

/// Writes a `front,back` header followed by one row per card.
pub fn write_csv<W: Write>(cards: &[Card], out: W) -> Result<(), DeckError> {
    let mut wtr = csv::Writer::from_writer(out);
    for card in cards {
        wtr.serialize(card).map_err(|e| DeckError::Export(e.to_string()))?;
    }
    wtr.flush().map_err(|e| DeckError::Export(e.to_string()))?;
    Ok(())
}

/// Reads cards from CSV text with a `front,back` header.
///
/// Follows the JSON import rules: no rows is `InvalidFormat`, rows with a
/// blank side are dropped, and nothing left is `NoValidCards`.
pub fn read_csv(raw: &str) -> Result<Vec<Card>, DeckError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw.as_bytes());
    let rows = rdr
        .deserialize::<CsvRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DeckError::Parse(e.to_string()))?;
    if rows.is_empty() {
        return Err(DeckError::InvalidFormat);
    }
    accept_entries(
        rows.iter()
            .map(|r| (r.front.as_deref(), r.back.as_deref())),
    )
}
