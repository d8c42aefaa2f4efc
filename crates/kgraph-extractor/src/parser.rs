//! Recover a candidate list from model reply text

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// A bracketed array making up the whole reply apart from surrounding whitespace
static ARRAY_FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*(\[.*?\])\s*$").expect("Invalid regex pattern"));

/// How a candidate list was recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPath {
    /// The reply parsed as a JSON array
    DirectArray,

    /// The reply parsed as an object with a single array-valued field
    WrappedArray,

    /// The reply did not parse; a bracketed array was cut out of it
    Fallback,
}

/// Candidates recovered from a reply
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredCandidates {
    /// Candidate triples, still untyped
    pub candidates: Vec<Value>,

    /// Strategy that succeeded
    pub path: RecoveryPath,
}

/// Why no candidate list could be recovered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryFailure {
    /// Parsed as an object without exactly one array-valued field
    #[error("object has {array_fields} array-valued fields, expected exactly one")]
    AmbiguousObject {
        /// Number of array-valued fields found
        array_fields: usize,
    },

    /// Parsed as JSON that is neither array nor object
    #[error("reply is a JSON {0}, expected an array or object")]
    UnexpectedType(&'static str),

    /// Did not parse, and no bracketed array spans the reply
    #[error("reply is not JSON and holds no array")]
    NoArrayFound,

    /// A bracketed array was found but is not valid JSON
    #[error("extracted array is not valid JSON: {0}")]
    InvalidFallback(String),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turn a model reply into a candidate list
///
/// Strategies, first success wins:
///
/// 1. Parse the whole reply. An array is the list. An object must hold
///    exactly one array-valued field, which is the list. Anything else
///    fails without trying the fallback.
/// 2. Only if the reply does not parse: take a bracketed array spanning the
///    whole reply (surrounding whitespace aside) and parse that.
///
/// # Examples
///
/// ```
/// use kgraph_extractor::parser::{recover_candidates, RecoveryPath};
///
/// let recovered = recover_candidates(r#"{"triples": [{"subject": "a"}]}"#).unwrap();
/// assert_eq!(recovered.path, RecoveryPath::WrappedArray);
/// assert_eq!(recovered.candidates.len(), 1);
///
/// assert!(recover_candidates("no json here").is_err());
/// ```
pub fn recover_candidates(raw: &str) -> Result<RecoveredCandidates, RecoveryFailure> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(candidates)) => Ok(RecoveredCandidates {
            candidates,
            path: RecoveryPath::DirectArray,
        }),
        Ok(Value::Object(object)) => {
            let mut arrays: Vec<Vec<Value>> = object
                .into_iter()
                .filter_map(|(_, value)| match value {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .collect();

            if arrays.len() == 1 {
                Ok(RecoveredCandidates {
                    candidates: arrays.remove(0),
                    path: RecoveryPath::WrappedArray,
                })
            } else {
                Err(RecoveryFailure::AmbiguousObject {
                    array_fields: arrays.len(),
                })
            }
        }
        Ok(other) => Err(RecoveryFailure::UnexpectedType(json_kind(&other))),
        Err(e) => {
            debug!(error = %e, "Reply is not JSON, trying array fallback");
            fallback(raw)
        }
    }
}

fn fallback(raw: &str) -> Result<RecoveredCandidates, RecoveryFailure> {
    let captured = ARRAY_FALLBACK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or(RecoveryFailure::NoArrayFound)?;

    match serde_json::from_str::<Value>(captured.as_str()) {
        Ok(Value::Array(candidates)) => Ok(RecoveredCandidates {
            candidates,
            path: RecoveryPath::Fallback,
        }),
        Ok(other) => Err(RecoveryFailure::UnexpectedType(json_kind(&other))),
        Err(e) => Err(RecoveryFailure::InvalidFallback(e.to_string())),
    }
}
