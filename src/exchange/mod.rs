//! Portable card documents
//!
//! Decks exchange cards as a JSON array of `{id, q, a}` objects. The
//! embedding application decides where the bytes come from and go
//! (file dialog, stdin, HTTP body); this module only transforms.

mod export;
mod import;

pub use export::export_cards;
pub use import::{parse_document, CardRecord, ImportError};
