//! Ranking report structures

use crate::processing::ranker::RankedResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PREVIEW_CHARS: usize = 200;

/// Everything a formatter needs to present one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,

    /// First characters of the job description
    pub job_description_preview: String,

    /// Documents that were ranked
    pub total_documents: usize,

    /// Inputs dropped before ranking, with the reason
    pub skipped: Vec<SkippedInput>,

    pub results: Vec<RankedResult>,

    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedInput {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl MatchBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 50.0 {
            MatchBand::Strong
        } else if percentage >= 25.0 {
            MatchBand::Moderate
        } else if percentage >= 10.0 {
            MatchBand::Weak
        } else {
            MatchBand::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Strong => "STRONG",
            MatchBand::Moderate => "MODERATE",
            MatchBand::Weak => "WEAK",
            MatchBand::Poor => "POOR",
        }
    }
}

impl RankingReport {
    pub fn new(
        job_description: &str,
        results: Vec<RankedResult>,
        skipped: Vec<SkippedInput>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            job_description_preview: preview(job_description, PREVIEW_CHARS),
            total_documents: results.len(),
            skipped,
            results,
            processing_time_ms,
        }
    }

    /// The first `n` results, or all of them.
    pub fn top(&self, n: Option<usize>) -> &[RankedResult] {
        match n {
            Some(n) => &self.results[..n.min(self.results.len())],
            None => &self.results,
        }
    }

    pub fn best(&self) -> Option<&RankedResult> {
        self.results.first()
    }
}

/// Collapse whitespace and cut at a word boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
