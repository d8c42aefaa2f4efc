//! Structural validation of candidate triples

use kgraph_domain::ValidatedTriple;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Keys every candidate triple must carry
pub const REQUIRED_KEYS: [&str; 3] = ["subject", "predicate", "object"];

/// Key under which the chunk number is stamped on accepted triples
pub const CHUNK_KEY: &str = "chunk";

/// Why a candidate was rejected
///
/// Rejection is not an error: invalid candidates are silently dropped and
/// only surface through counts. The reason is kept for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Candidate is not a JSON object
    NotAnObject,

    /// A required key is absent
    MissingField(&'static str),

    /// A required value is not a string
    NotAString(&'static str),

    /// A required value is empty after trimming
    EmptyField(&'static str),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotAnObject => f.write_str("candidate is not an object"),
            RejectionReason::MissingField(key) => write!(f, "missing '{}'", key),
            RejectionReason::NotAString(key) => write!(f, "'{}' is not a string", key),
            RejectionReason::EmptyField(key) => write!(f, "'{}' is empty", key),
        }
    }
}

/// Aggregate validation statistics for a candidate list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Number of candidates inspected
    pub total_items: usize,

    /// Candidates that passed validation
    pub valid_triples: usize,

    /// Candidates that failed validation
    pub invalid_triples: usize,

    /// Percentage of valid candidates (0 for empty input)
    pub validation_rate: f64,

    /// Set when the input was not a list at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validates the structure of candidate triples returned by the model
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleValidator;

impl TripleValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check a single candidate, reporting the first problem found
    pub fn inspect(&self, candidate: &Value) -> Result<(), RejectionReason> {
        let object = candidate.as_object().ok_or(RejectionReason::NotAnObject)?;

        for key in REQUIRED_KEYS {
            if !object.contains_key(key) {
                return Err(RejectionReason::MissingField(key));
            }
        }

        for key in REQUIRED_KEYS {
            let text = object[key].as_str().ok_or(RejectionReason::NotAString(key))?;
            if text.trim().is_empty() {
                return Err(RejectionReason::EmptyField(key));
            }
        }

        Ok(())
    }

    /// Whether a candidate is a well-formed triple
    ///
    /// # Examples
    ///
    /// ```
    /// use kgraph_gatekeeper::TripleValidator;
    /// use serde_json::json;
    ///
    /// let validator = TripleValidator::new();
    /// assert!(validator.is_valid(&json!({"subject": "a", "predicate": "b", "object": "c"})));
    /// assert!(!validator.is_valid(&json!({"subject": "a", "predicate": "b"})));
    /// ```
    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.inspect(candidate).is_ok()
    }

    /// Keep the valid candidates of a list, in order
    ///
    /// Returns an empty list when `candidates` is not a JSON array. When
    /// `chunk_number` is given it is stamped on every accepted triple;
    /// otherwise a numeric `chunk` key from the model is used. The triple
    /// values themselves are kept unmodified.
    pub fn validate_all(
        &self,
        candidates: &Value,
        chunk_number: Option<usize>,
    ) -> Vec<ValidatedTriple> {
        let Some(items) = candidates.as_array() else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|candidate| match self.inspect(candidate) {
                Ok(()) => candidate
                    .as_object()
                    .map(|object| to_validated(object, chunk_number)),
                Err(reason) => {
                    tracing::debug!(%reason, "Dropping invalid triple candidate");
                    None
                }
            })
            .collect()
    }

    /// Summarize how many candidates of a list are valid
    pub fn report(&self, candidates: &Value) -> ValidationReport {
        let Some(items) = candidates.as_array() else {
            return ValidationReport {
                total_items: 0,
                valid_triples: 0,
                invalid_triples: 0,
                validation_rate: 0.0,
                error: Some("Input is not a list".to_string()),
            };
        };

        let total = items.len();
        let valid = items.iter().filter(|item| self.is_valid(item)).count();
        let validation_rate = if total > 0 {
            valid as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        ValidationReport {
            total_items: total,
            valid_triples: valid,
            invalid_triples: total - valid,
            validation_rate,
            error: None,
        }
    }
}

/// Build a typed triple from an object already known to be valid
fn to_validated(object: &Map<String, Value>, chunk_number: Option<usize>) -> ValidatedTriple {
    let field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let mut extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| !REQUIRED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    // The "chunk" key always belongs to provenance; a model-supplied value is
    // only honored when no stamp is given, and dropped unless it is a chunk number
    let model_chunk = extra.remove(CHUNK_KEY);
    let chunk = chunk_number.or_else(|| {
        model_chunk
            .as_ref()
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    });

    ValidatedTriple {
        subject: field("subject"),
        predicate: field("predicate"),
        object: field("object"),
        chunk,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_triple() {
        let validator = TripleValidator::new();
        let candidate = json!({"subject": "marie curie", "predicate": "discovered", "object": "radium"});
        assert!(validator.is_valid(&candidate));
    }

    #[test]
    fn test_extra_key_accepted() {
        let validator = TripleValidator::new();
        let candidate = json!({
            "subject": "marie curie",
            "predicate": "won",
            "object": "nobel prize",
            "year": 1903
        });
        assert!(validator.is_valid(&candidate));
    }

    #[test]
    fn test_missing_key_rejected() {
        let validator = TripleValidator::new();
        for missing in REQUIRED_KEYS {
            let mut candidate = json!({"subject": "a", "predicate": "b", "object": "c"});
            candidate.as_object_mut().unwrap().remove(missing);
            assert_eq!(
                validator.inspect(&candidate),
                Err(RejectionReason::MissingField(missing))
            );
        }
    }

    #[test]
    fn test_non_string_value_rejected() {
        let validator = TripleValidator::new();
        let candidate = json!({"subject": "a", "predicate": 42, "object": "c"});
        assert_eq!(
            validator.inspect(&candidate),
            Err(RejectionReason::NotAString("predicate"))
        );

        let candidate = json!({"subject": null, "predicate": "b", "object": "c"});
        assert!(!validator.is_valid(&candidate));
    }

    #[test]
    fn test_whitespace_value_rejected() {
        let validator = TripleValidator::new();
        let candidate = json!({"subject": "a", "predicate": "b", "object": " \t\n "});
        assert_eq!(
            validator.inspect(&candidate),
            Err(RejectionReason::EmptyField("object"))
        );
    }

    #[test]
    fn test_non_object_rejected() {
        let validator = TripleValidator::new();
        assert_eq!(
            validator.inspect(&json!(["a", "b", "c"])),
            Err(RejectionReason::NotAnObject)
        );
        assert!(!validator.is_valid(&json!("a b c")));
    }

    #[test]
    fn test_validate_all_filters_and_stamps() {
        let validator = TripleValidator::new();
        let candidates = json!([
            {"subject": "Marie Curie", "predicate": "discovered", "object": "Radium"},
            {"subject": "pierre curie", "predicate": "married"},
            "not a triple",
            {"subject": "marie curie", "predicate": "won", "object": "nobel prize", "note": "x"}
        ]);

        let triples = validator.validate_all(&candidates, Some(3));

        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, "Marie Curie");
        assert_eq!(triples[0].object, "Radium");
        assert_eq!(triples[0].chunk, Some(3));
        assert_eq!(triples[1].chunk, Some(3));
        assert_eq!(triples[1].extra.get("note"), Some(&json!("x")));
    }

    #[test]
    fn test_validate_all_keeps_values_unmodified() {
        let validator = TripleValidator::new();
        let candidates = json!([{"subject": "  Padded ", "predicate": "is", "object": "x"}]);

        let triples = validator.validate_all(&candidates, None);

        assert_eq!(triples[0].subject, "  Padded ");
        assert_eq!(triples[0].chunk, None);
    }

    #[test]
    fn test_validate_all_without_stamp_keeps_model_chunk() {
        let validator = TripleValidator::new();
        let candidates = json!([{"subject": "a", "predicate": "b", "object": "c", "chunk": 4}]);

        let triples = validator.validate_all(&candidates, None);
        assert_eq!(triples[0].chunk, Some(4));
        assert!(triples[0].extra.is_empty());

        let stamped = validator.validate_all(&candidates, Some(9));
        assert_eq!(stamped[0].chunk, Some(9));
    }

    #[test]
    fn test_non_numeric_model_chunk_is_dropped() {
        let validator = TripleValidator::new();
        let candidates = json!([{"subject": "a", "predicate": "b", "object": "c", "chunk": "two", "note": 1}]);

        let triples = validator.validate_all(&candidates, None);
        assert_eq!(triples[0].chunk, None);
        assert!(!triples[0].extra.contains_key(CHUNK_KEY));
        assert_eq!(triples[0].extra.get("note"), Some(&json!(1)));

        // Accepted triples deserialize back unchanged
        let value = serde_json::to_value(&triples[0]).unwrap();
        let back: ValidatedTriple = serde_json::from_value(value).unwrap();
        assert_eq!(back, triples[0]);
    }

    #[test]
    fn test_validate_all_non_list() {
        let validator = TripleValidator::new();
        let candidate = json!({"subject": "a", "predicate": "b", "object": "c"});
        assert!(validator.validate_all(&candidate, Some(1)).is_empty());
    }

    #[test]
    fn test_report() {
        let validator = TripleValidator::new();
        let candidates = json!([
            {"subject": "a", "predicate": "b", "object": "c"},
            {"subject": "a", "predicate": "b", "object": ""},
            {"subject": "d", "predicate": "e", "object": "f"},
            7
        ]);

        let report = validator.report(&candidates);
        assert_eq!(report.total_items, 4);
        assert_eq!(report.valid_triples, 2);
        assert_eq!(report.invalid_triples, 2);
        assert!((report.validation_rate - 50.0).abs() < f64::EPSILON);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_report_empty_and_non_list() {
        let validator = TripleValidator::new();

        let empty = validator.report(&json!([]));
        assert_eq!(empty.total_items, 0);
        assert_eq!(empty.validation_rate, 0.0);

        let not_list = validator.report(&json!({"triples": []}));
        assert_eq!(not_list.total_items, 0);
        assert_eq!(not_list.validation_rate, 0.0);
        assert_eq!(not_list.error.as_deref(), Some("Input is not a list"));
    }
}
