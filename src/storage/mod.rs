//! Persistence for the collection document

mod slot;
mod store;

pub use slot::{FileSlot, MemorySlot, SlotBackend};
pub use store::{DeckStore, StoreError};
