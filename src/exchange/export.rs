//! Export a deck's cards to a portable JSON document

use crate::decks::Card;

/// Serialize cards to a pretty-printed JSON array of `{id, q, a}`
///
/// A pure transform of the card sequence, independent of deck title or
/// any other metadata: the same cards always produce the same bytes.
pub fn export_cards(cards: &[Card]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(cards)
}
