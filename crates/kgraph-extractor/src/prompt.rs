//! LLM prompt engineering for triple extraction

/// Builds the system and user prompts for one chunk
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build `(system, user)` prompts for a chunk of text
    pub fn for_chunk(text: &str) -> (String, String) {
        let builder = Self::new(text);
        (builder.system_prompt(), builder.build())
    }

    /// The system prompt, which does not depend on the chunk
    pub fn system_prompt(&self) -> String {
        SYSTEM_PROMPT.to_string()
    }

    /// Build the user prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and rules
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The text to analyze
        prompt.push_str("**Text to Process:**\n");
        prompt.push_str("```text\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n```\n\n");

        // 3. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const SYSTEM_PROMPT: &str = r#"You are an AI expert specialized in knowledge graph extraction.
Your task is to identify and extract factual Subject-Predicate-Object (SPO) triples from the given text.
Focus on accuracy and adhere strictly to the JSON output format requested in the user prompt.
Extract core entities and the most direct relationship."#;

const EXTRACTION_INSTRUCTIONS: &str = r#"Please extract Subject-Predicate-Object (S-P-O) triples from the text below.

**VERY IMPORTANT RULES:**
1. **Output Format:** Respond ONLY with a single, valid JSON array. Each element MUST be an object with keys "subject", "predicate", "object".
2. **JSON Only:** Do NOT include any text before or after the JSON array. Do NOT use markdown code fences.
3. **Concise Predicates:** Keep the 'predicate' value concise (1-3 words, ideally 1-2). Use verbs or short verb phrases (e.g., 'discovered', 'was born in', 'won').
4. **Lowercase:** ALL values for 'subject', 'predicate', and 'object' MUST be lowercase.
5. **Pronoun Resolution:** Replace pronouns (she, he, it, her, etc.) with the specific lowercase entity name they refer to based on the text context (e.g., 'marie curie').
6. **Specificity:** Capture specific details (e.g., 'nobel prize in physics' instead of just 'nobel prize' if specified).
7. **Completeness:** Extract all distinct factual relationships mentioned."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"**Required JSON Output Format Example:**
[
  { "subject": "marie curie", "predicate": "discovered", "object": "radium" },
  { "subject": "marie curie", "predicate": "won", "object": "nobel prize in physics" }
]

**Your JSON Output (MUST start with '[' and end with ']'):**"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let (_, user) = PromptBuilder::for_chunk("Marie Curie discovered radium in 1898.");
        assert!(user.contains("Marie Curie discovered radium in 1898."));
        assert!(user.contains("```text\nMarie Curie"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let builder = PromptBuilder::new("Test text");
        let prompt = builder.build();

        assert!(prompt.contains("\"subject\", \"predicate\", \"object\""));
        assert!(prompt.contains("MUST be lowercase"));
        assert!(prompt.ends_with("end with ']'):**"));
    }

    #[test]
    fn test_system_prompt_is_chunk_independent() {
        let (first, _) = PromptBuilder::for_chunk("one");
        let (second, _) = PromptBuilder::for_chunk("two");

        assert_eq!(first, second);
        assert!(first.contains("Subject-Predicate-Object"));
    }

    #[test]
    fn test_text_with_braces_is_kept_verbatim() {
        let (_, user) = PromptBuilder::for_chunk("set {a, b} and {{c}}");
        assert!(user.contains("set {a, b} and {{c}}"));
    }
}
