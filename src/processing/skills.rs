//! Skill tagging against a fixed keyword vocabulary

use crate::error::Result;
use aho_corasick::AhoCorasick;

/// Default vocabulary, in output order.
const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "sql", "mongodb", "react", "angular",
    "machine learning", "data science", "artificial intelligence", "ai",
    "flask", "django", "nodejs", "express", "html", "css", "bootstrap",
    "git", "docker", "kubernetes", "aws", "azure", "gcp", "cloud",
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch",
    "mysql", "postgresql", "redis", "spark", "hadoop", "big data",
    "tableau", "power bi", "excel", "api", "rest", "json", "xml",
    "linux", "windows", "devops", "ci/cd", "agile", "scrum",
    "spring", "hibernate", "microservices", "web development",
    "mobile development", "android", "ios", "swift", "kotlin",
];

pub fn default_vocabulary() -> Vec<String> {
    DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Finds vocabulary phrases contained anywhere in a text.
///
/// Matching is plain substring containment on the lowercased text, so
/// `java` is also reported for `javascript`.
pub struct SkillExtractor {
    vocabulary: Vec<String>,
    matcher: AhoCorasick,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(default_vocabulary())
    }

    pub fn with_vocabulary(vocabulary: Vec<String>) -> Result<Self> {
        let mut unique: Vec<String> = Vec::with_capacity(vocabulary.len());
        for skill in vocabulary {
            let skill = skill.trim().to_lowercase();
            if !skill.is_empty() && !unique.contains(&skill) {
                unique.push(skill);
            }
        }

        // Standard match kind: overlapping search needs it
        let matcher = AhoCorasick::new(&unique)?;

        Ok(Self {
            vocabulary: unique,
            matcher,
        })
    }

    /// Distinct matched phrases in vocabulary order.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut found = vec![false; self.vocabulary.len()];

        for mat in self.matcher.find_overlapping_iter(&lowered) {
            found[mat.pattern().as_usize()] = true;
        }

        self.vocabulary
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary.len()
    }
}
