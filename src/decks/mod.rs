//! Deck and card state model
//!
//! This module provides:
//! - The durable data model (cards, decks, the collection root)
//! - Invariant-enforcing CRUD over decks and their card lists

pub mod models;
pub mod repository;

pub use models::{Card, Collection, Deck};
pub use repository::{DeckRepository, RepositoryError};
