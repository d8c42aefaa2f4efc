//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Per-chunk transport and recovery failures are not errors: they are
/// recorded as failed chunks and extraction continues.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Invalid chunking or extractor configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
