//! Import card records from an external document
//!
//! Parsing is lenient about optional fields: only the question is
//! required per record, the answer defaults to an empty string, and an
//! incoming id is carried through but reassigned on merge.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected an array of cards")]
    NotAnArray,
}

/// One card entry of the portable document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub q: String,
    #[serde(default)]
    pub a: String,
}

/// Parse a portable card document into records
///
/// Fails when the text is not well-formed JSON, when the top-level
/// value is not an array, or when an element lacks a question.
pub fn parse_document(raw: &str) -> Result<Vec<CardRecord>, ImportError> {
    let entries = match serde_json::from_str::<Value>(raw)? {
        Value::Array(entries) => entries,
        _ => return Err(ImportError::NotAnArray),
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        records.push(serde_json::from_value(entry)?);
    }
    Ok(records)
}
