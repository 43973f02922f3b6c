//! Data models for the card collection

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ident;

/// A single question/answer study unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    /// Question text; must be non-empty to persist
    pub q: String,
    /// Answer text
    #[serde(default)]
    pub a: String,
}

impl Card {
    pub fn new(q: String, a: String) -> Self {
        Self {
            id: ident::fresh(),
            q,
            a,
        }
    }
}

/// A named, ordered collection of cards
///
/// Card order is significant: it drives both review order and list
/// display, and is preserved across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(title: String) -> Self {
        Self {
            id: ident::fresh(),
            title,
            cards: Vec::new(),
        }
    }

    /// Read-only stand-in returned when no deck is active; never persisted
    pub fn placeholder() -> Self {
        Self {
            id: Uuid::nil(),
            title: "Unknown".to_string(),
            cards: Vec::new(),
        }
    }
}

/// The full durable state: all decks, their display order, and the
/// active deck pointer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub decks: HashMap<Uuid, Deck>,
    #[serde(default)]
    pub order: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Uuid>,
}

impl Collection {
    /// Whether `order` and the `decks` keys are exactly in sync
    /// (same ids, no duplicates, no orphans in either direction)
    pub fn is_consistent(&self) -> bool {
        let ordered: HashSet<&Uuid> = self.order.iter().collect();
        ordered.len() == self.order.len()
            && self.order.len() == self.decks.len()
            && self.order.iter().all(|id| self.decks.contains_key(id))
    }
}
