//! In-memory CRUD over decks and their cards
//!
//! Every mutation validates its inputs first, applies in memory, then
//! writes the whole collection back through the store before returning.
//! A failed operation leaves the collection untouched.

use thiserror::Error;
use uuid::Uuid;

use crate::exchange::CardRecord;
use crate::ident;
use crate::storage::{DeckStore, SlotBackend, StoreError};

use super::models::{Card, Collection, Deck};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Invariant-enforcing CRUD over the collection
pub struct DeckRepository<B: SlotBackend> {
    collection: Collection,
    store: DeckStore<B>,
}

impl<B: SlotBackend> DeckRepository<B> {
    pub fn new(collection: Collection, store: DeckStore<B>) -> Self {
        Self { collection, store }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Decks in display order
    pub fn list_decks(&self) -> Vec<&Deck> {
        self.collection
            .order
            .iter()
            .filter_map(|id| self.collection.decks.get(id))
            .collect()
    }

    pub fn get_deck(&self, id: Uuid) -> Result<&Deck> {
        self.collection
            .decks
            .get(&id)
            .ok_or(RepositoryError::DeckNotFound(id))
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.collection.active
    }

    /// The active deck, or a read-only placeholder when nothing is active
    pub fn active_deck(&self) -> Deck {
        self.collection
            .active
            .and_then(|id| self.collection.decks.get(&id))
            .cloned()
            .unwrap_or_else(Deck::placeholder)
    }

    /// Create an empty deck, append it to the display order, and make
    /// it active
    ///
    /// An empty title is replaced with a placeholder.
    pub fn create_deck(&mut self, title: &str) -> Result<Deck> {
        let title = title.trim();
        let title = if title.is_empty() { "Untitled" } else { title };

        let deck = Deck::new(title.to_string());
        self.collection.order.push(deck.id);
        self.collection.active = Some(deck.id);
        self.collection.decks.insert(deck.id, deck.clone());
        self.store.save(&self.collection)?;
        Ok(deck)
    }

    /// Delete a deck and all its cards
    ///
    /// When the active deck is deleted, the first remaining deck in
    /// display order becomes active.
    pub fn delete_deck(&mut self, id: Uuid) -> Result<()> {
        if self.collection.decks.remove(&id).is_none() {
            return Err(RepositoryError::DeckNotFound(id));
        }
        self.collection.order.retain(|d| *d != id);
        if self.collection.active == Some(id) {
            self.collection.active = self.collection.order.first().copied();
        }
        self.store.save(&self.collection)?;
        Ok(())
    }

    pub fn switch_active(&mut self, id: Uuid) -> Result<()> {
        if !self.collection.decks.contains_key(&id) {
            return Err(RepositoryError::DeckNotFound(id));
        }
        self.collection.active = Some(id);
        self.store.save(&self.collection)?;
        Ok(())
    }

    /// Append a new card to a deck
    pub fn add_card(&mut self, deck_id: Uuid, q: &str, a: &str) -> Result<Card> {
        let q = q.trim();
        if q.is_empty() {
            return Err(RepositoryError::EmptyQuestion);
        }

        let card = Card::new(q.to_string(), a.trim().to_string());
        let deck = self.deck_mut(deck_id)?;
        deck.cards.push(card.clone());
        self.store.save(&self.collection)?;
        Ok(card)
    }

    /// Replace a card's question and answer in place; identity is preserved
    pub fn update_card(&mut self, deck_id: Uuid, card_id: Uuid, q: &str, a: &str) -> Result<Card> {
        let q = q.trim();
        if q.is_empty() {
            return Err(RepositoryError::EmptyQuestion);
        }

        let a = a.trim().to_string();
        let deck = self.deck_mut(deck_id)?;
        let card = deck
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or(RepositoryError::CardNotFound(card_id))?;
        card.q = q.to_string();
        card.a = a;
        let card = card.clone();
        self.store.save(&self.collection)?;
        Ok(card)
    }

    pub fn delete_card(&mut self, deck_id: Uuid, card_id: Uuid) -> Result<()> {
        let deck = self.deck_mut(deck_id)?;
        let pos = deck
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(RepositoryError::CardNotFound(card_id))?;
        deck.cards.remove(pos);
        self.store.save(&self.collection)?;
        Ok(())
    }

    /// Append imported records to the end of a deck, in input order
    ///
    /// Every record gets a fresh id regardless of what it carried:
    /// honoring incoming ids could collide with existing cards. Returns
    /// the number of cards appended.
    pub fn import_cards(&mut self, deck_id: Uuid, records: Vec<CardRecord>) -> Result<usize> {
        let deck = self.deck_mut(deck_id)?;
        let count = records.len();
        for record in records {
            deck.cards.push(Card {
                id: ident::fresh(),
                q: record.q,
                a: record.a,
            });
        }
        self.store.save(&self.collection)?;
        Ok(count)
    }

    fn deck_mut(&mut self, id: Uuid) -> Result<&mut Deck> {
        self.collection
            .decks
            .get_mut(&id)
            .ok_or(RepositoryError::DeckNotFound(id))
    }
}
