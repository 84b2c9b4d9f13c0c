use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("not valid JSON: {0}")]
    Parse(String),
    #[error("expected a non-empty array of cards")]
    InvalidFormat,
    #[error("no valid cards found; every card needs a non-empty front and back")]
    NoValidCards,
    #[error("clipboard unavailable; select the text and copy it manually")]
    ClipboardUnavailable,
    #[error("export failed: {0}")]
    Export(String),
    #[error("storage error: {0}")]
    Storage(&'static str),
}
