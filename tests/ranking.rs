//! Ranking properties checked through the public API

use resume_ranker::config::Config;
use resume_ranker::processing::normalizer::Normalizer;
use resume_ranker::processing::skills::SkillExtractor;
use resume_ranker::{RankingPipeline, RawDocument, ResumeRankerError};
use std::collections::HashSet;

const QUERY: &str = "Looking for a Python developer with machine learning and SQL experience";

fn scenario_batch() -> Vec<RawDocument> {
    vec![
        RawDocument::with_label(
            "Graphic design and photography portfolio with print layouts.",
            "c",
        ),
        RawDocument::with_label("Frontend engineer who once used Python for scripting.", "b"),
        RawDocument::with_label(
            "Python developer with machine learning and SQL experience. \
             Built machine learning pipelines in Python and SQL. Python, SQL, machine learning.",
            "a",
        ),
    ]
}

fn pipeline() -> RankingPipeline {
    RankingPipeline::new(&Config::default()).unwrap()
}

#[test]
fn test_scenario_order() {
    let results = pipeline().rank_documents(&scenario_batch(), QUERY).unwrap();
    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);

    let (a, b, c) = (&results[0], &results[1], &results[2]);
    assert_eq!(c.percentage_match, 0.0);
    assert!(a.percentage_match > 2.0 * b.percentage_match);
    assert!(b.percentage_match > c.percentage_match);
    assert_eq!(a.ordinal, 2);
    assert!(a.skills.contains(&"machine learning".to_string()));
}

#[test]
fn test_one_result_per_document() {
    let batch = scenario_batch();
    let results = pipeline().rank_documents(&batch, QUERY).unwrap();
    assert_eq!(results.len(), batch.len());

    let ordinals: HashSet<usize> = results.iter().map(|r| r.ordinal).collect();
    assert_eq!(ordinals, (0..batch.len()).collect());

    let mut ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, (1..=batch.len()).collect::<Vec<_>>());

    assert!(results.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
    assert!(results
        .iter()
        .all(|r| (0.0..=1.0).contains(&r.similarity_score)));
}

#[test]
fn test_ranking_is_idempotent() {
    let pipeline = pipeline();
    let batch = scenario_batch();
    let first = pipeline.rank_documents(&batch, QUERY).unwrap();
    let second = pipeline.rank_documents(&batch, QUERY).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_degenerate_inputs() {
    let pipeline = pipeline();
    assert!(pipeline.rank_documents(&[], QUERY).unwrap().is_empty());
    assert!(pipeline.rank_documents(&scenario_batch(), "").unwrap().is_empty());
    assert!(pipeline.rank_documents(&scenario_batch(), "  \n\t").unwrap().is_empty());
}

#[test]
fn test_batch_without_vocabulary_fails_to_score() {
    let pipeline = pipeline();

    let stop_words = vec![RawDocument::new("The and of it."), RawDocument::new("A an the with.")];
    let result = pipeline.rank_documents(&stop_words, "the and for");
    assert!(matches!(result, Err(ResumeRankerError::Scoring(_))));

    let cjk = vec![RawDocument::new("日本語の履歴書です"), RawDocument::new("データベース設計の経験があります")];
    let result = pipeline.rank_documents(&cjk, "ソフトウェアエンジニア");
    assert!(matches!(result, Err(ResumeRankerError::Scoring(_))));
}

#[test]
fn test_equal_documents_keep_input_order() {
    let batch = vec![
        RawDocument::with_label("Graphic design portfolio and print layouts.", "first"),
        RawDocument::with_label("Python developer who writes SQL every day.", "match"),
        RawDocument::with_label("Graphic design portfolio and print layouts.", "second"),
    ];
    let results = pipeline().rank_documents(&batch, QUERY).unwrap();
    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["match", "first", "second"]);
    assert_eq!(results[1].rank, 2);
    assert_eq!(results[2].rank, 3);
}

#[test]
fn test_blank_document_still_ranked() {
    let batch = vec![RawDocument::new("   "), RawDocument::new("Python and SQL developer with machine learning.")];
    let results = pipeline().rank_documents(&batch, QUERY).unwrap();
    assert_eq!(results.len(), 2);
    let blank = results.iter().find(|r| r.ordinal == 0).unwrap();
    assert_eq!(blank.similarity_score, 0.0);
    assert_eq!(blank.skill_count, 0);
    assert_eq!(blank.label, "Resume_1");
}

#[test]
fn test_skill_extraction_example() {
    let extractor = SkillExtractor::new().unwrap();
    let skills: HashSet<String> = extractor
        .extract_skills("Experienced in Python and React with REST APIs")
        .into_iter()
        .collect();
    for expected in ["python", "react", "api", "rest"] {
        assert!(skills.contains(expected), "missing {}", expected);
    }
}

#[test]
fn test_normalizer_short_text_and_symbols() {
    let normalizer = Normalizer::default();
    assert_eq!(normalizer.normalize("Hi!!").unwrap(), "hi");

    let normalized = normalizer.normalize("Skilled in C++ and C# development").unwrap();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    assert!(tokens.contains(&"c++"));
    assert!(tokens.contains(&"c#"));
}
