use crate::{load_state, reduce, save_state, Action, DeckError, DeckState, KeyValueStore, Outcome};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DeckState, &Outcome)>;

/// Owns the live deck state and writes it back after every change.
///
/// Views hold a manager, send it [`Action`]s (directly or through the
/// convenience methods) and learn about applied changes via [`subscribe`].
///
/// [`subscribe`]: DeckManager::subscribe
pub struct DeckManager {
    state: DeckState,
    store: Arc<dyn KeyValueStore>,
    rng: Box<dyn RngCore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl DeckManager {
    /// Loads the previous session from `store`, shuffling with OS entropy.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, DeckError> {
        Self::open_with_rng(store, StdRng::from_entropy())
    }

    pub fn open_with_rng(
        store: Arc<dyn KeyValueStore>,
        rng: impl RngCore + 'static,
    ) -> Result<Self, DeckError> {
        let state = load_state(store.as_ref())?;
        info!(
            "event=deck_open status=ok cards={} current={}",
            state.len(),
            state.current
        );
        Ok(Self {
            state,
            store,
            rng: Box::new(rng),
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Applies `action`, persists if the deck or cursor changed, then notifies
    /// subscribers.
    ///
    /// Rejected actions and failed imports/exports leave the state untouched
    /// and notify nobody. A failed store write is returned after the in-memory
    /// state has already moved on.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, DeckError> {
        let name = action.name();
        let transition = reduce(&self.state, action, &mut *self.rng).map_err(|err| {
            debug!("event=dispatch action={name} status=error error={err}");
            err
        })?;
        let outcome = transition.outcome;
        if let Outcome::Rejected(reason) = &outcome {
            debug!("event=dispatch action={name} status=rejected reason={reason:?}");
            return Ok(outcome);
        }

        self.state = transition.state;
        let saved = if outcome.persists() {
            save_state(self.store.as_ref(), &self.state)
        } else {
            Ok(())
        };
        debug!(
            "event=dispatch action={name} status=applied cards={} current={} flipped={}",
            self.state.len(),
            self.state.current,
            self.state.flipped
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, &outcome);
        }

        if let Err(err) = saved {
            error!("event=persist action={name} status=error error={err}");
            return Err(err);
        }
        Ok(outcome)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&DeckState, &Outcome) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn navigate(&mut self, step: i64) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Navigate(step))
    }

    pub fn next(&mut self) -> Result<Outcome, DeckError> {
        self.navigate(1)
    }

    pub fn previous(&mut self) -> Result<Outcome, DeckError> {
        self.navigate(-1)
    }

    pub fn flip(&mut self) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Flip)
    }

    pub fn add_card(&mut self, front: &str, back: &str) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Add {
            front: front.to_string(),
            back: back.to_string(),
        })
    }

    pub fn delete_card(&mut self) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Delete)
    }

    pub fn shuffle_cards(&mut self) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Shuffle)
    }

    pub fn reset_cards(&mut self, confirmed: bool) -> Result<Outcome, DeckError> {
        self.dispatch(Action::Reset { confirmed })
    }

    /// Pretty JSON of the current deck.
    pub fn export_cards(&mut self) -> Result<String, DeckError> {
        match self.dispatch(Action::ExportRequested)? {
            Outcome::Exported(text) => Ok(text),
            _ => Err(DeckError::Export("unexpected outcome".into())),
        }
    }

    /// Replaces the deck from JSON text and returns how many cards were kept.
    pub fn import_cards(&mut self, raw: &str) -> Result<usize, DeckError> {
        match self.dispatch(Action::Import(raw.to_string()))? {
            Outcome::Imported { count } => Ok(count),
            _ => Err(DeckError::InvalidFormat),
        }
    }
}
