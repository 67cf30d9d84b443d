//! Document records and per-document processing

use crate::config::Config;
use crate::error::Result;
use crate::processing::normalizer::Normalizer;
use crate::processing::skills::SkillExtractor;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Text extracted by the ingestion layer, plus an optional display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub text: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub original_text: String,
    /// Empty when nothing could be derived, never absent.
    pub normalized_text: String,
    pub skills: Vec<String>,
    pub skill_count: usize,
    pub label: Option<String>,
}

impl RawDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
        }
    }

    pub fn with_label(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: Some(label.into()),
        }
    }
}

impl ProcessedDocument {
    fn empty(original_text: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            normalized_text: String::new(),
            skills: Vec::new(),
            skill_count: 0,
            label: None,
        }
    }

    /// Minimal record used when processing fails.
    fn degraded(original_text: &str) -> Self {
        Self {
            original_text: original_text.to_lowercase(),
            ..Self::empty("")
        }
    }
}

/// Runs normalization and skill extraction over single documents.
pub struct DocumentProcessor {
    normalizer: Normalizer,
    skill_extractor: SkillExtractor,
}

impl DocumentProcessor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::from_parts(
            Normalizer::new(&config.processing),
            SkillExtractor::with_vocabulary(config.skills.vocabulary.clone())?,
        ))
    }

    pub fn from_parts(normalizer: Normalizer, skill_extractor: SkillExtractor) -> Self {
        Self {
            normalizer,
            skill_extractor,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skill_extractor
    }

    /// Process one text. Failures are absorbed into a degraded record so
    /// a bad document never aborts a batch.
    pub fn process(&self, raw_text: &str) -> ProcessedDocument {
        match self.try_process(raw_text) {
            Ok(document) => document,
            Err(e) => {
                warn!("Error processing document, using fallback record: {}", e);
                ProcessedDocument::degraded(raw_text)
            }
        }
    }

    pub fn process_document(&self, raw: &RawDocument) -> ProcessedDocument {
        ProcessedDocument {
            label: raw.label.clone(),
            ..self.process(&raw.text)
        }
    }

    /// Process documents independently, keeping input order.
    pub fn process_batch(&self, documents: &[RawDocument]) -> Vec<ProcessedDocument> {
        documents.iter().map(|raw| self.process_document(raw)).collect()
    }

    fn try_process(&self, raw_text: &str) -> Result<ProcessedDocument> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Ok(ProcessedDocument::empty(raw_text));
        }

        let normalized = self.normalizer.normalize(trimmed)?;
        // Skills come from the original text: stemming would break phrases
        let skills = self.skill_extractor.extract_skills(trimmed);

        debug!("Processed text length: {}", normalized.len());
        debug!("Skills found: {:?}", skills);

        let normalized_text = if normalized.trim().is_empty() {
            trimmed.to_lowercase()
        } else {
            normalized
        };

        Ok(ProcessedDocument {
            original_text: raw_text.to_string(),
            normalized_text,
            skill_count: skills.len(),
            skills,
            label: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeRankerError;
    use crate::processing::capability::LanguageCapability;

    struct FailingCapability;

    impl LanguageCapability for FailingCapability {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn tokenize(&self, _text: &str) -> Result<Vec<String>> {
            Err(ResumeRankerError::TextProcessing("tokenizer unavailable".to_string()))
        }

        fn reduce(&self, token: &str) -> Result<String> {
            Ok(token.to_string())
        }

        fn is_stop_word(&self, _token: &str) -> bool {
            false
        }
    }

    fn processor() -> DocumentProcessor {
        DocumentProcessor::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_process_extracts_skills_from_original_text() {
        let doc = processor().process("  Built machine learning services in Python and SQL.  ");

        assert_eq!(doc.original_text, "  Built machine learning services in Python and SQL.  ");
        assert!(!doc.normalized_text.is_empty());
        assert!(doc.skills.contains(&"machine learning".to_string()));
        assert!(doc.skills.contains(&"python".to_string()));
        assert!(doc.skills.contains(&"sql".to_string()));
        assert_eq!(doc.skill_count, doc.skills.len());
    }

    #[test]
    fn test_blank_input_is_not_an_error() {
        let doc = processor().process("   \n\t ");
        assert_eq!(doc.original_text, "   \n\t ");
        assert_eq!(doc.normalized_text, "");
        assert!(doc.skills.is_empty());
        assert_eq!(doc.skill_count, 0);
    }

    #[test]
    fn test_symbol_only_input_falls_back_to_lowercased_text() {
        let doc = processor().process("!!!");
        assert_eq!(doc.normalized_text, "!!!");
    }

    #[test]
    fn test_failure_degrades_instead_of_propagating() {
        let processor = DocumentProcessor::from_parts(
            Normalizer::with_capability(Box::new(FailingCapability), 10),
            SkillExtractor::new().unwrap(),
        );
        let doc = processor.process("Senior PYTHON engineer with Docker experience");

        assert_eq!(doc.original_text, "senior python engineer with docker experience");
        assert_eq!(doc.normalized_text, "");
        assert!(doc.skills.is_empty());
        assert_eq!(doc.skill_count, 0);
    }

    #[test]
    fn test_batch_keeps_order_and_labels() {
        let docs = vec![
            RawDocument::with_label("Python developer with Django", "a.txt"),
            RawDocument::new(""),
            RawDocument::with_label("Kotlin and Swift mobile development", "c.pdf"),
        ];
        let processed = processor().process_batch(&docs);

        assert_eq!(processed.len(), 3);
        assert_eq!(processed[0].label.as_deref(), Some("a.txt"));
        assert_eq!(processed[1].label, None);
        assert_eq!(processed[2].label.as_deref(), Some("c.pdf"));
        assert!(processed[2].skills.contains(&"mobile development".to_string()));
    }
}
