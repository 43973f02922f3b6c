//! Identifier generation for decks and cards
//!
//! Identifiers are random v4 UUIDs: unique without any coordination,
//! and serialized as plain strings in documents.

use uuid::Uuid;

/// Generate a fresh identifier
pub fn fresh() -> Uuid {
    Uuid::new_v4()
}
