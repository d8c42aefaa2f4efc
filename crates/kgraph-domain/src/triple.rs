//! Subject-Predicate-Object triples at each stage of the pipeline

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A structurally valid triple as returned by the model
///
/// The three primary fields are guaranteed present, string-typed, and
/// non-empty after trimming, but are otherwise kept exactly as the model
/// produced them. Any extra keys the model emitted survive in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTriple {
    /// Subject entity
    pub subject: String,

    /// Relation between subject and object
    pub predicate: String,

    /// Object entity
    pub object: String,

    /// Number of the chunk this triple was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<usize>,

    /// Additional fields from the source object, not contractually meaningful
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidatedTriple {
    /// Create a triple with no chunk stamp and no extra fields
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            chunk: None,
            extra: Map::new(),
        }
    }

    /// Stamp the triple with the chunk it was extracted from
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = Some(chunk);
        self
    }
}

/// Provenance of a normalized triple
///
/// Serialized as the chunk number, or as the string `"unknown"` when the
/// source triple carried no chunk stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceChunk {
    /// Extracted from the chunk with this number
    Chunk(usize),

    /// No chunk information was available
    #[default]
    Unknown,
}

impl SourceChunk {
    /// Literal marker used when provenance is missing
    pub const UNKNOWN_MARKER: &'static str = "unknown";

    /// Chunk number, if known
    pub fn number(&self) -> Option<usize> {
        match self {
            SourceChunk::Chunk(n) => Some(*n),
            SourceChunk::Unknown => None,
        }
    }
}

impl From<Option<usize>> for SourceChunk {
    fn from(chunk: Option<usize>) -> Self {
        chunk.map_or(SourceChunk::Unknown, SourceChunk::Chunk)
    }
}

impl fmt::Display for SourceChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceChunk::Chunk(n) => write!(f, "{}", n),
            SourceChunk::Unknown => f.write_str(Self::UNKNOWN_MARKER),
        }
    }
}

impl Serialize for SourceChunk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SourceChunk::Chunk(n) => serializer.serialize_u64(*n as u64),
            SourceChunk::Unknown => serializer.serialize_str(Self::UNKNOWN_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for SourceChunk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(usize),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(SourceChunk::Chunk(n)),
            Repr::Marker(s) if s == Self::UNKNOWN_MARKER => Ok(SourceChunk::Unknown),
            Repr::Marker(s) => Err(serde::de::Error::custom(format!(
                "invalid source chunk '{}', expected a number or \"{}\"",
                s,
                Self::UNKNOWN_MARKER
            ))),
        }
    }
}

/// A normalized triple, ready for deduplication and graph insertion
///
/// All three fields are lowercase, trimmed and non-empty; the predicate has
/// internal whitespace runs collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedTriple {
    /// Subject entity (graph node id)
    pub subject: String,

    /// Relation label (graph edge label)
    pub predicate: String,

    /// Object entity (graph node id)
    pub object: String,

    /// Chunk the first occurrence of this triple came from
    #[serde(default)]
    pub source_chunk: SourceChunk,
}

impl NormalizedTriple {
    /// Identity used for corpus-wide deduplication
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.subject, &self.predicate, &self.object)
    }
}
