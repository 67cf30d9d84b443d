//! Text cleaning and normalization

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::processing::capability::{select_capability, LanguageCapability};
use regex::Regex;

pub struct Normalizer {
    capability: Box<dyn LanguageCapability>,
    short_text_threshold: usize,
    special_chars_regex: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self::with_capability(select_capability(config.stemming), config.short_text_threshold)
    }

    pub fn with_capability(capability: Box<dyn LanguageCapability>, short_text_threshold: usize) -> Self {
        // `+`, `#` and `.` survive so c++, c# and node.js stay intact
        let special_chars_regex = Regex::new(r"[^\w\s+#.]").expect("Invalid special character regex");

        Self {
            capability,
            short_text_threshold,
            special_chars_regex,
        }
    }

    pub fn capability_name(&self) -> &'static str {
        self.capability.name()
    }

    /// Lowercase, replace special characters with spaces, collapse whitespace.
    pub fn clean_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let replaced = self.special_chars_regex.replace_all(&lowered, " ");
        replaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Full normalization pipeline. Never erases all signal: if nothing
    /// survives tokenization the cleaned text is returned instead.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let cleaned = self.clean_text(text);

        if cleaned.chars().count() < self.short_text_threshold {
            return Ok(cleaned);
        }

        let tokens = self.tokenize_and_remove_stop_words(&cleaned)?;
        let reduced = tokens
            .iter()
            .map(|token| self.capability.reduce(token))
            .collect::<Result<Vec<_>>>()?;

        let processed = reduced.join(" ");
        if processed.trim().is_empty() {
            Ok(cleaned)
        } else {
            Ok(processed)
        }
    }

    fn tokenize_and_remove_stop_words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .capability
            .tokenize(text)?
            .into_iter()
            .filter(|token| token.chars().count() > 1 && !self.capability.is_stop_word(token))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::capability::BasicCapability;

    fn basic() -> Normalizer {
        Normalizer::with_capability(Box::new(BasicCapability), 10)
    }

    #[test]
    fn test_short_text_returned_cleaned() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("Hi!!").unwrap(), "hi");
        assert_eq!(normalizer.normalize("").unwrap(), "");
        assert_eq!(normalizer.normalize("  ?? ").unwrap(), "");
    }

    #[test]
    fn test_clean_text() {
        let normalizer = basic();
        assert_eq!(
            normalizer.clean_text("Hello,   World!\n(Rust) & C++/C#"),
            "hello world rust c++ c#"
        );
    }

    #[test]
    fn test_symbols_preserved() {
        for normalizer in [basic(), Normalizer::default()] {
            let normalized = normalizer.normalize("Skilled in C++ and C# development").unwrap();
            let tokens: Vec<&str> = normalized.split(' ').collect();
            assert!(tokens.contains(&"c++"), "{:?}", tokens);
            assert!(tokens.contains(&"c#"), "{:?}", tokens);
            assert!(!tokens.contains(&"c"));
        }
    }

    #[test]
    fn test_stop_words_and_single_chars_removed() {
        let normalized = basic().normalize("the cat and a dog x of the farm").unwrap();
        assert_eq!(normalized, "cat dog farm");
    }

    #[test]
    fn test_falls_back_to_cleaned_when_everything_filtered() {
        let normalized = basic().normalize("The and of the a is are was").unwrap();
        assert_eq!(normalized, "the and of the a is are was");
    }

    #[cfg(feature = "stemming")]
    #[test]
    fn test_stemming_applied_in_full_mode() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.capability_name(), "full");
        let normalized = normalizer.normalize("Developing scalable services").unwrap();
        assert!(normalized.starts_with("develop "), "{}", normalized);
    }
}
