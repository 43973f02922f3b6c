//! The operations surface consumed by a presentation layer
//!
//! A session owns one repository and one review cursor and keeps the
//! two coherent: editing, importing, and switching decks all leave the
//! cursor pointing at a valid card of the active deck. The presentation
//! layer re-renders from the returned values and holds no business
//! logic of its own.

use thiserror::Error;
use uuid::Uuid;

use crate::decks::{Card, Deck, DeckRepository, RepositoryError};
use crate::exchange::{self, CardRecord, ImportError};
use crate::review::ReviewCursor;
use crate::storage::{DeckStore, SlotBackend, StoreError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct StudySession<B: SlotBackend> {
    repository: DeckRepository<B>,
    cursor: ReviewCursor,
}

impl<B: SlotBackend> StudySession<B> {
    /// Load the collection from `backend`, seeding a default deck when
    /// the slot is empty or unusable
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let store = DeckStore::new(backend);
        let mut collection = store.load();
        store.ensure_non_empty(&mut collection)?;
        Ok(Self {
            repository: DeckRepository::new(collection, store),
            cursor: ReviewCursor::new(),
        })
    }

    pub fn repository(&self) -> &DeckRepository<B> {
        &self.repository
    }

    pub fn cursor(&self) -> ReviewCursor {
        self.cursor
    }

    // ===== Deck operations =====

    pub fn create_deck(&mut self, title: &str) -> Result<Deck, RepositoryError> {
        let deck = self.repository.create_deck(title)?;
        self.cursor.reset();
        Ok(deck)
    }

    pub fn delete_deck(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        let was_active = self.repository.active_id() == Some(id);
        self.repository.delete_deck(id)?;
        if was_active {
            self.cursor.reset();
        }
        Ok(())
    }

    pub fn switch_active(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        self.repository.switch_active(id)?;
        self.cursor.reset();
        Ok(())
    }

    pub fn active_deck(&self) -> Deck {
        self.repository.active_deck()
    }

    pub fn list_decks(&self) -> Vec<&Deck> {
        self.repository.list_decks()
    }

    // ===== Card operations =====

    /// Add a card; when it lands in the active deck the cursor moves to it
    pub fn add_card(&mut self, deck_id: Uuid, q: &str, a: &str) -> Result<Card, RepositoryError> {
        let card = self.repository.add_card(deck_id, q, a)?;
        if self.repository.active_id() == Some(deck_id) {
            let size = self.active_size();
            self.cursor.jump_to(size - 1, size);
        }
        Ok(card)
    }

    pub fn update_card(
        &mut self,
        deck_id: Uuid,
        card_id: Uuid,
        q: &str,
        a: &str,
    ) -> Result<Card, RepositoryError> {
        self.repository.update_card(deck_id, card_id, q, a)
    }

    /// Delete a card; a cursor past the end of the active deck is clamped
    pub fn delete_card(&mut self, deck_id: Uuid, card_id: Uuid) -> Result<(), RepositoryError> {
        self.repository.delete_card(deck_id, card_id)?;
        if self.repository.active_id() == Some(deck_id) {
            self.cursor.clamp_to(self.active_size());
        }
        Ok(())
    }

    // ===== Import / export =====

    pub fn export_deck(&self, deck_id: Uuid) -> Result<String, RepositoryError> {
        let deck = self.repository.get_deck(deck_id)?;
        Ok(exchange::export_cards(&deck.cards).map_err(StoreError::Json)?)
    }

    pub fn import_cards(
        &mut self,
        deck_id: Uuid,
        records: Vec<CardRecord>,
    ) -> Result<usize, RepositoryError> {
        let count = self.repository.import_cards(deck_id, records)?;
        if self.repository.active_id() == Some(deck_id) {
            self.cursor.clamp_to(self.active_size());
        }
        Ok(count)
    }

    /// Parse a portable document and merge its cards into a deck
    ///
    /// The deck is only touched once the whole document has parsed.
    pub fn import_document(&mut self, deck_id: Uuid, raw: &str) -> Result<usize, SessionError> {
        let records = exchange::parse_document(raw)?;
        Ok(self.import_cards(deck_id, records)?)
    }

    // ===== Review =====

    /// The card under the cursor, if the active deck has any
    pub fn current_card(&self) -> Option<&Card> {
        let deck_id = self.repository.active_id()?;
        let deck = self.repository.get_deck(deck_id).ok()?;
        deck.cards.get(self.cursor.position)
    }

    pub fn revealed(&self) -> bool {
        self.cursor.revealed
    }

    pub fn next_card(&mut self) {
        let size = self.active_size();
        self.cursor.next(size);
    }

    pub fn previous_card(&mut self) {
        let size = self.active_size();
        self.cursor.previous(size);
    }

    pub fn toggle_revealed(&mut self) {
        let size = self.active_size();
        self.cursor.toggle_revealed(size);
    }

    pub fn jump_to(&mut self, i: usize) {
        let size = self.active_size();
        self.cursor.jump_to(i, size);
    }

    fn active_size(&self) -> usize {
        self.repository
            .active_id()
            .and_then(|id| self.repository.get_deck(id).ok())
            .map(|deck| deck.cards.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileSlot, MemorySlot};
    use tempfile::TempDir;

    fn open_session() -> StudySession<MemorySlot> {
        StudySession::open(MemorySlot::new()).unwrap()
    }

    #[test]
    fn test_open_on_empty_slot_seeds_default_deck() {
        let session = open_session();

        let decks = session.list_decks();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].title, "Default");
        assert_eq!(decks[0].cards.len(), 2);
        assert_eq!(session.repository().active_id(), Some(decks[0].id));
        assert_eq!(session.cursor().position, 0);
        assert!(!session.revealed());
    }

    #[test]
    fn test_add_card_moves_cursor_to_new_card() {
        let mut session = open_session();
        let deck_id = session.active_deck().id;

        let card = session.add_card(deck_id, "new?", "yes").unwrap();
        assert_eq!(session.cursor().position, 2);
        assert_eq!(session.current_card().map(|c| c.id), Some(card.id));
    }

    #[test]
    fn test_add_card_to_inactive_deck_keeps_cursor() {
        let mut session = open_session();
        let default_id = session.active_deck().id;
        let other = session.create_deck("Other").unwrap();

        session.switch_active(default_id).unwrap();
        session.next_card();
        let before = session.cursor();

        session.add_card(other.id, "elsewhere?", "yes").unwrap();
        assert_eq!(session.cursor(), before);
    }

    #[test]
    fn test_delete_card_clamps_cursor() {
        let mut session = open_session();
        let deck_id = session.active_deck().id;
        let third = session.add_card(deck_id, "third?", "3").unwrap();
        assert_eq!(session.cursor().position, 2);

        session.delete_card(deck_id, third.id).unwrap();
        assert_eq!(session.cursor().position, 1);
    }

    #[test]
    fn test_switch_active_resets_cursor() {
        let mut session = open_session();
        let default_id = session.active_deck().id;
        session.create_deck("Other").unwrap();

        session.switch_active(default_id).unwrap();
        session.next_card();
        session.toggle_revealed();

        let other_id = session
            .list_decks()
            .iter()
            .find(|d| d.title == "Other")
            .unwrap()
            .id;
        session.switch_active(other_id).unwrap();
        assert_eq!(session.cursor(), ReviewCursor::new());
    }

    #[test]
    fn test_delete_active_deck_resets_cursor_and_promotes_next() {
        let mut session = open_session();
        let default_id = session.active_deck().id;
        let other = session.create_deck("Other").unwrap();
        session.add_card(other.id, "question?", "answer").unwrap();

        session.delete_deck(other.id).unwrap();
        assert_eq!(session.repository().active_id(), Some(default_id));
        assert_eq!(session.cursor(), ReviewCursor::new());
    }

    #[test]
    fn test_wrap_around_returns_to_start() {
        let mut session = open_session();
        let size = session.active_deck().cards.len();

        for _ in 0..size {
            session.next_card();
        }
        assert_eq!(session.cursor().position, 0);
    }

    #[test]
    fn test_navigation_on_empty_deck() {
        let mut session = open_session();
        session.create_deck("Empty").unwrap();

        assert_eq!(session.current_card(), None);
        session.next_card();
        session.previous_card();
        session.toggle_revealed();
        assert_eq!(session.cursor(), ReviewCursor::new());
    }

    #[test]
    fn test_export_import_round_trip_preserves_content_and_order() {
        let mut session = open_session();
        let source_id = session.active_deck().id;
        session.add_card(source_id, "third?", "3").unwrap();

        let document = session.export_deck(source_id).unwrap();
        let source_cards = session.repository().get_deck(source_id).unwrap().cards.clone();

        let target = session.create_deck("Copy").unwrap();
        let count = session.import_document(target.id, &document).unwrap();
        assert_eq!(count, source_cards.len());

        let target_cards = &session.repository().get_deck(target.id).unwrap().cards;
        assert_eq!(target_cards.len(), source_cards.len());
        for (source, imported) in source_cards.iter().zip(target_cards.iter()) {
            assert_eq!(imported.q, source.q);
            assert_eq!(imported.a, source.a);
            assert_ne!(imported.id, source.id);
        }
    }

    #[test]
    fn test_import_document_rejects_non_array_without_touching_deck() {
        let mut session = open_session();
        let deck_id = session.active_deck().id;
        let before = session.active_deck().cards.len();

        let result = session.import_document(deck_id, r#"{"a":1}"#);
        assert!(matches!(
            result,
            Err(SessionError::Import(ImportError::NotAnArray))
        ));
        assert_eq!(session.active_deck().cards.len(), before);
    }

    #[test]
    fn test_import_into_active_deck_clamps_cursor() {
        let mut session = open_session();
        let deck_id = session.active_deck().id;
        session.next_card();

        let before = session.cursor().position;
        session
            .import_document(deck_id, r#"[{"q":"imported?"}]"#)
            .unwrap();
        assert_eq!(session.cursor().position, before);
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.json");

        let deck_id = {
            let mut session = StudySession::open(FileSlot::new(path.clone())).unwrap();
            let deck = session.create_deck("Persistent").unwrap();
            session.add_card(deck.id, "kept?", "yes").unwrap();
            deck.id
        };

        let session = StudySession::open(FileSlot::new(path)).unwrap();
        assert_eq!(session.repository().active_id(), Some(deck_id));
        assert_eq!(session.cursor(), ReviewCursor::new());

        let deck = session.repository().get_deck(deck_id).unwrap();
        assert_eq!(deck.title, "Persistent");
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].q, "kept?");
    }
}
