//! End-to-end ranking: process raw documents, then rank the batch

use crate::config::Config;
use crate::error::Result;
use crate::processing::document::{DocumentProcessor, ProcessedDocument, RawDocument};
use crate::processing::ranker::{RankedResult, VectorRanker};
use log::{debug, info};

pub struct RankingPipeline {
    processor: DocumentProcessor,
    ranker: VectorRanker,
    normalize_query: bool,
}

impl RankingPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let processor = DocumentProcessor::new(config)?;
        debug!(
            "Pipeline ready: {} preprocessing, {} skills",
            processor.normalizer().capability_name(),
            processor.skill_extractor().skill_count()
        );

        Ok(Self {
            processor,
            ranker: VectorRanker::new(&config.vectorizer)?,
            normalize_query: config.processing.normalize_query,
        })
    }

    pub fn processor(&self) -> &DocumentProcessor {
        &self.processor
    }

    /// The text the job description is scored with.
    pub fn prepare_query(&self, job_description: &str) -> String {
        if !self.normalize_query {
            return job_description.to_string();
        }
        match self.processor.normalizer().normalize(job_description) {
            Ok(normalized) if !normalized.trim().is_empty() => normalized,
            Ok(_) => job_description.to_string(),
            Err(e) => {
                log::warn!("Could not normalize job description, using it as-is: {}", e);
                job_description.to_string()
            }
        }
    }

    pub fn process(&self, documents: &[RawDocument]) -> Vec<ProcessedDocument> {
        self.processor.process_batch(documents)
    }

    pub fn rank_documents(&self, documents: &[RawDocument], job_description: &str) -> Result<Vec<RankedResult>> {
        let processed = self.process(documents);
        let query = self.prepare_query(job_description);
        let results = self.ranker.rank(&processed, &query)?;
        info!("Ranked {} of {} documents", results.len(), documents.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_left_alone_by_default() {
        let pipeline = RankingPipeline::new(&Config::default()).unwrap();
        assert_eq!(pipeline.prepare_query("Developing APIs!"), "Developing APIs!");
    }

    #[test]
    fn test_query_normalized_when_enabled() {
        let mut config = Config::default();
        config.processing.normalize_query = true;
        config.processing.stemming = false;
        let pipeline = RankingPipeline::new(&config).unwrap();

        assert_eq!(
            pipeline.prepare_query("Looking for the Python developer!"),
            "looking python developer"
        );
    }

    #[test]
    fn test_rank_documents_end_to_end() {
        let pipeline = RankingPipeline::new(&Config::default()).unwrap();
        let docs = vec![
            RawDocument::with_label("Watercolor painting and pottery classes", "art.txt"),
            RawDocument::with_label("Kotlin and Swift engineer building Android and iOS apps", "mobile.txt"),
        ];

        let results = pipeline
            .rank_documents(&docs, "Mobile engineer: Kotlin, Swift, Android")
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "mobile.txt");
        assert!(results[0].skills.contains(&"kotlin".to_string()));
        assert_eq!(results[1].similarity_score, 0.0);
    }
}
