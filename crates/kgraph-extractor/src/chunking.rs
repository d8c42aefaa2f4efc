//! Word-window chunking with overlap

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use kgraph_domain::TextChunk;
use serde::Serialize;
use tracing::debug;

/// Splits text into overlapping windows of whitespace-separated words
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `chunk_size` is zero or
    /// `overlap` is not smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        ExtractorConfig {
            chunk_size,
            overlap,
        }
        .validate()?;

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create a chunker from an extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Words per window
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Words shared by consecutive windows
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk the given text
    ///
    /// Words are rejoined with single spaces, so the original whitespace is
    /// not preserved. Empty or whitespace-only text yields no chunks.
    ///
    /// # Examples
    ///
    /// ```
    /// use kgraph_extractor::TextChunker;
    ///
    /// let chunker = TextChunker::new(4, 1).unwrap();
    /// let chunks = chunker.chunk("one two three four five six seven");
    ///
    /// assert_eq!(chunks.len(), 2);
    /// assert_eq!(chunks[0].text, "one two three four");
    /// assert_eq!(chunks[1].text, "four five six seven");
    /// ```
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let total = words.len();
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total {
            let end = (start + self.chunk_size).min(total);
            chunks.push(TextChunk::from_words(chunks.len() + 1, &words, start, end));

            if end == total || chunks.len() >= total {
                break;
            }
            start += stride;
        }

        debug!(
            words = total,
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.overlap,
            "Chunked text"
        );

        chunks
    }

    /// Statistics for chunks produced by this chunker
    pub fn statistics(&self, chunks: &[TextChunk]) -> ChunkStatistics {
        ChunkStatistics::from_chunks(chunks, self.chunk_size, self.overlap)
    }
}

/// Summary of a chunking run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkStatistics {
    /// Number of chunks
    pub total_chunks: usize,

    /// Sum of per-chunk word counts (overlapping words counted per chunk)
    pub total_words: usize,

    /// Mean words per chunk
    pub avg_words_per_chunk: f64,

    /// Smallest chunk
    pub min_words: usize,

    /// Largest chunk
    pub max_words: usize,

    /// Configured window size
    pub chunk_size: usize,

    /// Configured overlap
    pub overlap: usize,
}

impl ChunkStatistics {
    /// Compute statistics over a chunk list; all counts are zero when empty
    pub fn from_chunks(chunks: &[TextChunk], chunk_size: usize, overlap: usize) -> Self {
        let counts = chunks.iter().map(|c| c.word_count);
        let total_words: usize = counts.clone().sum();

        Self {
            total_chunks: chunks.len(),
            total_words,
            avg_words_per_chunk: if chunks.is_empty() {
                0.0
            } else {
                total_words as f64 / chunks.len() as f64
            },
            min_words: counts.clone().min().unwrap_or(0),
            max_words: counts.max().unwrap_or(0),
            chunk_size,
            overlap,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: adjacent windows share exactly `overlap` word indices
        /// unless the later one is the tail, and together cover every word
        #[test]
        fn test_adjacent_windows_overlap(
            total in 1usize..400,
            chunk_size in 1usize..60,
            overlap_seed in 0usize..60,
        ) {
            let overlap = overlap_seed % chunk_size;
            let text = (0..total).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            let chunker = TextChunker::new(chunk_size, overlap).unwrap();
            let chunks = chunker.chunk(&text);

            prop_assert!(!chunks.is_empty());
            prop_assert_eq!(chunks[0].start_word, 0);
            prop_assert_eq!(chunks.last().unwrap().end_word, total - 1);

            for pair in chunks.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                prop_assert_eq!(next.chunk_number, prev.chunk_number + 1);
                prop_assert_eq!(next.start_word, prev.start_word + chunk_size - overlap);

                let shared = next.start_word..prev.end_word + 1;
                prop_assert_eq!(shared.len(), overlap);

                let prev_words: Vec<&str> = prev.text.split(' ').collect();
                let next_words: Vec<&str> = next.text.split(' ').collect();
                prop_assert_eq!(&prev_words[prev_words.len() - overlap..], &next_words[..overlap]);
            }

            for chunk in &chunks {
                prop_assert!(chunk.word_count <= chunk_size);
                prop_assert_eq!(chunk.word_range().len(), chunk.word_count);
            }
        }
    }
}
