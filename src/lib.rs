//! Resume ranker library

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeRankerError};
pub use processing::document::{DocumentProcessor, ProcessedDocument, RawDocument};
pub use processing::pipeline::RankingPipeline;
pub use processing::ranker::{RankedResult, VectorRanker};
