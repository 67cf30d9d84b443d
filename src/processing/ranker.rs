//! Cosine-similarity ranking of processed documents against a job description

use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::processing::document::ProcessedDocument;
use crate::processing::vectorizer::TfidfVectorizer;
use log::debug;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Position in the input batch.
    pub ordinal: usize,
    pub label: String,
    /// Raw cosine similarity in [0, 1].
    pub similarity_score: f64,
    /// Similarity as a percentage, two decimals.
    pub percentage_match: f64,
    pub skills: Vec<String>,
    pub skill_count: usize,
    /// 1 is the best match.
    pub rank: usize,
}

pub struct VectorRanker {
    vectorizer: TfidfVectorizer,
}

impl VectorRanker {
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        Ok(Self {
            vectorizer: TfidfVectorizer::new(config)?,
        })
    }

    /// Rank `documents` by similarity to `query`, most similar first.
    ///
    /// An empty batch or blank query yields no results. The only error is a
    /// batch whose vector space cannot be built at all.
    pub fn rank(&self, documents: &[ProcessedDocument], query: &str) -> Result<Vec<RankedResult>> {
        if documents.is_empty() || query.trim().is_empty() {
            debug!("Nothing to rank: empty batch or job description");
            return Ok(Vec::new());
        }

        let scores = self.score(documents, query)?;

        let mut results: Vec<RankedResult> = documents
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(ordinal, (doc, score))| RankedResult {
                ordinal,
                label: doc
                    .label
                    .clone()
                    .unwrap_or_else(|| format!("Resume_{}", ordinal + 1)),
                similarity_score: score,
                percentage_match: round_percentage(score),
                skills: doc.skills.clone(),
                skill_count: doc.skill_count,
                rank: 0,
            })
            .collect();

        // sort_by is stable, ties keep input order
        results.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        for (position, result) in results.iter_mut().enumerate() {
            result.rank = position + 1;
        }

        let top: Vec<String> = results
            .iter()
            .take(3)
            .map(|r| format!("{} - {}%", r.label, r.percentage_match))
            .collect();
        debug!("Final ranking (top-3): {:?}", top);

        Ok(results)
    }

    /// Similarities in input order. Degenerate input gives all zeros.
    pub fn similarity_scores(&self, documents: &[ProcessedDocument], query: &str) -> Result<Vec<f64>> {
        if documents.is_empty() || query.trim().is_empty() {
            return Ok(vec![0.0; documents.len()]);
        }
        self.score(documents, query)
    }

    fn score(&self, documents: &[ProcessedDocument], query: &str) -> Result<Vec<f64>> {
        let mut corpus: Vec<String> = Vec::with_capacity(documents.len() + 1);
        corpus.push(query.trim().to_lowercase());
        corpus.extend(documents.iter().map(scoring_text));

        let texts: Vec<&str> = corpus.iter().map(String::as_str).collect();
        let matrix = self.vectorizer.fit_transform(&texts)?;

        let query_vec = matrix.weights.row(0);
        Ok(matrix
            .weights
            .rows()
            .into_iter()
            .skip(1)
            .map(|doc_vec| cosine_similarity(query_vec, doc_vec))
            .collect())
    }
}

/// Normalized text, else the lowercased original, else empty.
fn scoring_text(doc: &ProcessedDocument) -> String {
    let normalized = doc.normalized_text.trim();
    if normalized.is_empty() {
        doc.original_text.to_lowercase()
    } else {
        normalized.to_lowercase()
    }
}

/// Cosine of the angle between two vectors, 0 when either has no magnitude.
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(&b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn round_percentage(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}
