use crate::DeckError;

pub mod memory;

/// String key-value persistence, the moral equivalent of browser local storage.
///
/// Implementations use interior mutability so a store can be shared behind an
/// `Arc` and written from `&self`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DeckError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DeckError>;

    /// Writes several entries as one update. Stores that persist on every
    /// write override this so a deck and its cursor land together.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), DeckError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
