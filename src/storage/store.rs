//! Load/save bridge between the in-memory collection and a slot backend

use thiserror::Error;

use crate::decks::{Card, Collection, Deck};

use super::slot::SlotBackend;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence for the collection document
pub struct DeckStore<B: SlotBackend> {
    backend: B,
}

impl<B: SlotBackend> DeckStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the collection from the slot
    ///
    /// An absent, unreadable, or malformed slot falls back to the empty
    /// collection: losing a corrupt cache is preferable to blocking the
    /// caller, so the failure is logged rather than surfaced. An absent
    /// or dangling active pointer falls back to the first deck in
    /// display order.
    pub fn load(&self) -> Collection {
        let raw = match self.backend.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::default(),
            Err(e) => {
                log::warn!("Failed to read collection slot: {}", e);
                return Collection::default();
            }
        };

        let mut collection: Collection = match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(e) => {
                log::warn!("Discarding malformed collection document: {}", e);
                return Collection::default();
            }
        };

        if !collection.is_consistent() {
            log::warn!("Discarding collection with out-of-sync deck order");
            return Collection::default();
        }

        match collection.active {
            Some(id) if collection.decks.contains_key(&id) => {}
            _ => collection.active = collection.order.first().copied(),
        }

        collection
    }

    /// Seed a default deck when nothing is active after load
    ///
    /// The seeded state is persisted immediately so a first launch and a
    /// recovered-from-corruption launch leave the same slot behind.
    pub fn ensure_non_empty(&self, collection: &mut Collection) -> Result<()> {
        if collection.active.is_some() {
            return Ok(());
        }

        let mut deck = Deck::new("Default".to_string());
        deck.cards.push(Card::new(
            "What is the capital of France?".to_string(),
            "Paris".to_string(),
        ));
        deck.cards.push(Card::new(
            "What does HTML stand for?".to_string(),
            "HyperText Markup Language".to_string(),
        ));

        log::info!("Seeding default deck {}", deck.id);

        collection.order = vec![deck.id];
        collection.active = Some(deck.id);
        collection.decks.clear();
        collection.decks.insert(deck.id, deck);

        self.save(collection)
    }

    /// Serialize the full collection and overwrite the slot
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string_pretty(collection)?;
        self.backend.write(&json)?;
        Ok(())
    }
}
