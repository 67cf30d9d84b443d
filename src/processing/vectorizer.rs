//! TF-IDF vector space built over a single ranking batch.
//!
//! The vocabulary is fitted on the whole corpus at once: terms are n-grams of
//! pattern-matched tokens with English stop words removed, pruned by document
//! frequency and capped by corpus frequency. Rows are smoothed TF-IDF weights,
//! L2-normalized.

use crate::config::VectorizerConfig;
use crate::error::{Result, ResumeRankerError};
use crate::processing::stop_words::VECTORIZER_STOP_WORDS;
use log::debug;
use ndarray::Array2;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

pub struct TfidfVectorizer {
    config: VectorizerConfig,
    token_regex: Regex,
}

/// Fitted vocabulary and the document-term weight matrix (one row per input).
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub weights: Array2<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        let token_regex = Regex::new(&config.token_pattern)?;
        Ok(Self {
            config: config.clone(),
            token_regex,
        })
    }

    /// Tokens (after stop word removal) expanded into the configured n-grams.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !VECTORIZER_STOP_WORDS.contains(token))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Fit the vocabulary on `documents` and return their weight rows.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let n_docs = documents.len();
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyze(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // (document frequency, corpus term frequency), alphabetical by term
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for doc_counts in &counts {
            for (term, &count) in doc_counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        if stats.is_empty() {
            return Err(ResumeRankerError::Scoring(
                "empty vocabulary; the documents may only contain stop words".to_string(),
            ));
        }

        let max_doc_count = self.config.max_df * n_docs as f64;
        if max_doc_count < self.config.min_df as f64 {
            return Err(ResumeRankerError::Scoring(
                "max_df corresponds to fewer documents than min_df".to_string(),
            ));
        }

        let mut kept: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.config.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, (df, tf))| (term, df, tf))
            .collect();

        if kept.is_empty() {
            return Err(ResumeRankerError::Scoring(
                "after pruning, no terms remain; try a lower min_df or a higher max_df".to_string(),
            ));
        }

        if kept.len() > self.config.max_features {
            // Stable: equal frequencies keep alphabetical order
            kept.sort_by(|a, b| b.2.cmp(&a.2));
            kept.truncate(self.config.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let vocabulary: Vec<String> = kept.iter().map(|(term, _, _)| term.to_string()).collect();
        let index: HashMap<&str, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, (term, _, _))| (*term, i))
            .collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, df, _)| ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let mut weights = Array2::<f64>::zeros((n_docs, vocabulary.len()));
        for (row, doc_counts) in counts.iter().enumerate() {
            for (term, &count) in doc_counts {
                if let Some(&col) = index.get(term.as_str()) {
                    weights[[row, col]] = count as f64 * idf[col];
                }
            }
        }

        for mut row in weights.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        debug!(
            "Fitted TF-IDF space: {} documents, {} terms",
            n_docs,
            vocabulary.len()
        );

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            weights,
        })
    }
}
