//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// The batch as a whole cannot be turned into a vector space.
    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeRankerError>;

impl From<regex::Error> for ResumeRankerError {
    fn from(err: regex::Error) -> Self {
        ResumeRankerError::Configuration(format!("Invalid pattern: {}", err))
    }
}

impl From<aho_corasick::BuildError> for ResumeRankerError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ResumeRankerError::Configuration(format!("Failed to build skill matcher: {}", err))
    }
}
