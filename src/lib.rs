//! Mneme - personal study-card manager core
//!
//! Decks of question/answer cards, reviewed one at a time and edited in
//! place. All state lives in a single local document slot and survives
//! across sessions without a server. Rendering and input wiring are
//! left to the embedding application, which drives everything through
//! [`StudySession`] and re-renders from its return values.

pub mod decks;
pub mod exchange;
pub mod ident;
pub mod review;
pub mod session;
pub mod storage;

pub use decks::{Card, Collection, Deck, DeckRepository, RepositoryError};
pub use exchange::{export_cards, parse_document, CardRecord, ImportError};
pub use review::ReviewCursor;
pub use session::{SessionError, StudySession};
pub use storage::{DeckStore, FileSlot, MemorySlot, SlotBackend, StoreError};
