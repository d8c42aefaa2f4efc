//! Text chunk - a window of words cut from the source document

use serde::{Deserialize, Serialize};

/// A contiguous window of words from the source text
///
/// Chunks are produced once per run, never mutated, and ordered by
/// `chunk_number`. Word indices refer to positions in the whitespace-split
/// source text, so overlapping windows share index ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Window words rejoined with single spaces
    pub text: String,

    /// Sequential chunk number, starting at 1
    pub chunk_number: usize,

    /// Index of the first word of the window
    pub start_word: usize,

    /// Index of the last word of the window (inclusive)
    pub end_word: usize,

    /// Number of words in the window
    pub word_count: usize,
}

impl TextChunk {
    /// Create a chunk from the half-open word range `[start, end)`
    ///
    /// # Examples
    ///
    /// ```
    /// use kgraph_domain::TextChunk;
    ///
    /// let words = ["marie", "curie", "discovered", "radium"];
    /// let chunk = TextChunk::from_words(1, &words, 0, 3);
    /// assert_eq!(chunk.text, "marie curie discovered");
    /// assert_eq!(chunk.end_word, 2);
    /// assert_eq!(chunk.word_count, 3);
    /// ```
    pub fn from_words(chunk_number: usize, words: &[&str], start: usize, end: usize) -> Self {
        debug_assert!(start < end && end <= words.len(), "empty or out-of-range window");

        Self {
            text: words[start..end].join(" "),
            chunk_number,
            start_word: start,
            end_word: end - 1,
            word_count: end - start,
        }
    }

    /// Half-open word index range covered by this chunk
    pub fn word_range(&self) -> std::ops::Range<usize> {
        self.start_word..self.end_word + 1
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_window_bounds_agree(len in 1usize..40, a in 0usize..40, b in 0usize..40) {
            let words: Vec<String> = (0..len).map(|i| format!("w{}", i)).collect();
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let start = a % len;
            let end = start + 1 + b % (len - start);

            let chunk = TextChunk::from_words(1, &refs, start, end);
            prop_assert_eq!(chunk.word_range(), start..end);
            prop_assert_eq!(chunk.text.split(' ').count(), chunk.word_count);
        }
    }
}
