//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use crate::processing::skills::default_vocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub vectorizer: VectorizerConfig,
    pub skills: SkillsConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Use the full tokenizer and stemmer when it is compiled in.
    pub stemming: bool,
    /// Cleaned texts shorter than this (in characters) skip tokenization.
    pub short_text_threshold: usize,
    /// Run the job description through the normalizer before ranking.
    pub normalize_query: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum proportion of documents a term may appear in.
    pub max_df: f64,
    pub token_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Extracted texts shorter than this are skipped by the CLI.
    pub min_text_chars: usize,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ngram_range: (1, 3),
            min_df: 1,
            max_df: 0.8,
            token_pattern: r"[a-zA-Z][a-zA-Z+#.]{2,}".to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            stemming: true,
            short_text_threshold: 10,
            normalize_query: false,
        }
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 50,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            top_n: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            vectorizer: VectorizerConfig::default(),
            skills: SkillsConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite `path` with the defaults without reading what is there.
    pub fn reset(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.vectorizer;
        if v.max_features == 0 {
            return Err(ResumeRankerError::Configuration(
                "vectorizer.max_features must be greater than 0".to_string(),
            ));
        }
        let (min_n, max_n) = v.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ResumeRankerError::Configuration(format!(
                "Invalid vectorizer.ngram_range: ({}, {})",
                min_n, max_n
            )));
        }
        if !(v.max_df > 0.0 && v.max_df <= 1.0) {
            return Err(ResumeRankerError::Configuration(format!(
                "vectorizer.max_df must be in (0, 1], got {}",
                v.max_df
            )));
        }
        regex::Regex::new(&v.token_pattern)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vectorizer.max_features, 1000);
        assert_eq!(config.vectorizer.ngram_range, (1, 3));
        assert_eq!(config.processing.short_text_threshold, 10);
        assert!(!config.skills.vocabulary.is_empty());
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.skills.vocabulary = vec!["rust".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert_eq!(loaded.skills.vocabulary, vec!["rust".to_string()]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.vectorizer.max_df = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.vectorizer.ngram_range = (3, 1);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.vectorizer.token_pattern = "[unclosed".to_string();
        assert!(matches!(config.validate(), Err(ResumeRankerError::Configuration(_))));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[vectorizer]\nmax_df = 0.5\n\n[output]\nformat = \"json\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.vectorizer.max_df, 0.5);
        assert_eq!(loaded.vectorizer.max_features, 1000);
        assert_eq!(loaded.vectorizer.ngram_range, (1, 3));
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert!(loaded.output.color_output);
        assert_eq!(loaded.input.min_text_chars, 50);
        assert!(loaded.processing.stemming);
        assert_eq!(loaded.skills.vocabulary, default_vocabulary());
    }

    #[test]
    fn test_empty_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.vectorizer.max_features, 1000);
        assert_eq!(loaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_reset_repairs_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[vectorizer]\nmax_df = 1.5\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        Config::reset(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.vectorizer.max_df, 0.8);
    }
}
