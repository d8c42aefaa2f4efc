//! End-to-end tests for chunking, extraction and normalization

#[cfg(test)]
mod tests {
    use crate::{TextChunker, TripleExtractor};
    use kgraph_domain::SourceChunk;
    use kgraph_gatekeeper::normalize_and_deduplicate;
    use kgraph_llm::MockProvider;

    const CURIE: &str = "Marie Curie was born in Warsaw. She discovered radium with Pierre Curie. \
                         Marie Curie won the Nobel Prize in Physics. Pierre Curie was her husband.";

    #[test]
    fn test_full_extraction_flow() {
        let mut llm = MockProvider::new("[]");
        llm.add_response(
            "Warsaw",
            r#"[
                {"subject": "Marie Curie", "predicate": "was born in", "object": "Warsaw"},
                {"subject": "marie curie", "predicate": "discovered", "object": "radium"}
            ]"#,
        );
        let chunker = TextChunker::new(12, 4).unwrap();
        let chunks = chunker.chunk(CURIE);
        assert!(chunks.len() > 1);

        let mut extractor = TripleExtractor::new(llm);
        let triples = extractor.extract_all(&chunks);

        // Only chunks containing "Warsaw" produce triples
        assert!(!triples.is_empty());
        assert!(triples.iter().all(|t| t.chunk.is_some()));
        assert_eq!(extractor.statistics().total_chunks, chunks.len());
        assert_eq!(extractor.statistics().failed_chunks, 0);
        assert_eq!(extractor.provider().call_count(), chunks.len());
    }

    #[test]
    fn test_extraction_continues_past_failures() {
        let llm = MockProvider::new("[]");
        llm.push_response(r#"[{"subject": "a", "predicate": "b", "object": "c"}]"#);
        llm.push_error("Communication error: timed out");
        llm.push_response("This is not JSON");
        llm.push_response(r#"{"triples": [{"subject": "d", "predicate": "e", "object": "f"}, {"subject": "x"}]}"#);

        let chunker = TextChunker::new(4, 1).unwrap();
        let chunks = chunker.chunk("one two three four five six seven eight nine ten eleven twelve");
        assert_eq!(chunks.len(), 4);

        let mut extractor = TripleExtractor::new(llm);
        let triples = extractor.extract_all(&chunks);

        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].chunk, Some(1));
        assert_eq!(triples[1].chunk, Some(4));

        let failed = extractor.failed_chunks();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].chunk_number, 2);
        assert!(failed[0].error.starts_with("Extraction error: "));
        assert!(failed[0].raw_response.is_none());
        assert_eq!(failed[1].chunk_number, 3);
        assert_eq!(failed[1].error, "JSON parsing failed");
        assert_eq!(failed[1].raw_response.as_deref(), Some("This is not JSON"));

        let stats = extractor.statistics();
        assert_eq!(stats.total_chunks, 4);
        assert_eq!(stats.failed_chunks, 2);
        assert_eq!(stats.successful_chunks, 2);
        assert_eq!(stats.total_triples, 2);
        assert!((stats.avg_triples_per_chunk - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_chunks_reset_between_runs() {
        let llm = MockProvider::new("not json");
        let chunker = TextChunker::new(5, 0).unwrap();
        let chunks = chunker.chunk("a b c d e f g h i j");

        let mut extractor = TripleExtractor::new(llm.clone());
        extractor.extract_all(&chunks);
        assert_eq!(extractor.failed_chunks().len(), 2);

        llm.push_response("[]");
        llm.push_response("[]");
        extractor.extract_all(&chunks);
        assert!(extractor.failed_chunks().is_empty());
        assert_eq!(extractor.statistics().failed_chunks, 0);
    }

    #[test]
    fn test_overlap_duplicates_collapse_after_normalization() {
        // Every chunk reports the same fact in different casing
        let llm = MockProvider::new(
            r#"[{"subject": "Pierre Curie", "predicate": "Married  To", "object": "Marie Curie"}]"#,
        );
        let chunker = TextChunker::new(10, 3).unwrap();
        let chunks = chunker.chunk(CURIE);

        let mut extractor = TripleExtractor::new(llm);
        let triples = extractor.extract_all(&chunks);
        assert_eq!(triples.len(), chunks.len());

        let corpus = normalize_and_deduplicate(&triples);

        assert_eq!(corpus.triples.len(), 1);
        assert_eq!(corpus.triples[0].predicate, "married to");
        assert_eq!(corpus.triples[0].source_chunk, SourceChunk::Chunk(1));
        assert_eq!(corpus.stats.duplicates_removed, chunks.len() - 1);
    }

    #[test]
    fn test_empty_text_makes_no_calls() {
        let llm = MockProvider::default();
        let chunks = TextChunker::new(10, 2).unwrap().chunk("   ");

        let mut extractor = TripleExtractor::new(llm);
        let triples = extractor.extract_all(&chunks);

        assert!(triples.is_empty());
        assert_eq!(extractor.provider().call_count(), 0);
        assert_eq!(extractor.statistics().avg_triples_per_chunk, 0.0);
    }
}
