//! Tokenizer and stemmer capabilities used by the normalizer.
//!
//! The full capability segments words with Unicode rules and stems them with
//! the Snowball English stemmer. The basic capability splits on whitespace
//! and leaves tokens untouched. One of them is picked when the normalizer is
//! built; nothing downstream checks which one it got.

use crate::error::Result;
use crate::processing::stop_words::BASIC_STOP_WORDS;
use log::debug;

pub trait LanguageCapability: Send + Sync {
    fn name(&self) -> &'static str;

    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Reduce a token to its root form.
    fn reduce(&self, token: &str) -> Result<String>;

    fn is_stop_word(&self, token: &str) -> bool;
}

/// Whitespace tokens, identity reduction, built-in stop words.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCapability;

impl LanguageCapability for BasicCapability {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn reduce(&self, token: &str) -> Result<String> {
        Ok(token.to_string())
    }

    fn is_stop_word(&self, token: &str) -> bool {
        BASIC_STOP_WORDS.contains(token)
    }
}

#[cfg(feature = "stemming")]
pub use full::FullCapability;

#[cfg(feature = "stemming")]
mod full {
    use super::LanguageCapability;
    use crate::error::Result;
    use crate::processing::stop_words::NORMALIZER_STOP_WORDS;
    use rust_stemmers::{Algorithm, Stemmer};
    use unicode_segmentation::UnicodeSegmentation;

    pub struct FullCapability {
        stemmer: Stemmer,
    }

    impl Default for FullCapability {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FullCapability {
        pub fn new() -> Self {
            Self {
                stemmer: Stemmer::create(Algorithm::English),
            }
        }
    }

    impl LanguageCapability for FullCapability {
        fn name(&self) -> &'static str {
            "full"
        }

        /// Effectively a whitespace split that also strips trailing periods.
        /// Word-boundary segments are glued back together until the next
        /// whitespace, so this is not word-level tokenization: `c++`, `c#`
        /// and `node.js` stay whole, and only a period ending a token is
        /// removed (`done.` becomes `done`).
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            let mut tokens = Vec::new();
            let mut parts: Vec<&str> = Vec::new();

            for segment in text.split_word_bounds() {
                if segment.chars().all(char::is_whitespace) {
                    flush_token(&mut parts, &mut tokens);
                } else {
                    parts.push(segment);
                }
            }
            flush_token(&mut parts, &mut tokens);

            Ok(tokens)
        }

        fn reduce(&self, token: &str) -> Result<String> {
            Ok(self.stemmer.stem(token).into_owned())
        }

        fn is_stop_word(&self, token: &str) -> bool {
            NORMALIZER_STOP_WORDS.contains(token)
        }
    }

    fn flush_token(parts: &mut Vec<&str>, tokens: &mut Vec<String>) {
        while parts.last() == Some(&".") {
            parts.pop();
        }
        if !parts.is_empty() {
            tokens.push(parts.concat());
        }
        parts.clear();
    }
}

/// Pick the capability once. Falls back to basic mode when the full one is
/// not compiled in.
pub fn select_capability(prefer_full: bool) -> Box<dyn LanguageCapability> {
    if prefer_full {
        #[cfg(feature = "stemming")]
        {
            debug!("Using full tokenizer and Snowball stemmer");
            return Box::new(FullCapability::new());
        }
        #[cfg(not(feature = "stemming"))]
        {
            log::warn!("Stemming support not compiled in, using basic preprocessing");
        }
    }
    debug!("Using basic preprocessing ({} stop words)", BASIC_STOP_WORDS.len());
    Box::new(BasicCapability)
}
