//! Text processing, skill tagging and ranking

pub mod stop_words;
pub mod capability;
pub mod normalizer;
pub mod skills;
pub mod document;
pub mod vectorizer;
pub mod ranker;
pub mod pipeline;
