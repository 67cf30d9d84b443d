//! Built-in sample batch for trying the ranker without any files

use crate::processing::document::RawDocument;

pub const DEMO_JOB_DESCRIPTION: &str = "We are looking for a Python Developer with experience in machine learning, \
data science, and web development. Requirements: Python, Flask, scikit-learn, pandas, SQL, \
REST APIs, Git, and cloud platforms like AWS.";

const DEMO_RESUMES: &[(&str, &str)] = &[
    (
        "john_doe_senior.pdf",
        "John Doe - Senior Python Developer
5 years experience in Python development, machine learning, and data science.
Skills: Python, Flask, Django, scikit-learn, pandas, numpy, SQL, PostgreSQL,
REST APIs, Git, AWS, Docker, machine learning algorithms, data analysis.
Experience with TensorFlow, Keras, and deep learning projects.",
    ),
    (
        "jane_smith_fullstack.pdf",
        "Jane Smith - Full Stack Developer
3 years experience in web development. Some Python experience.
Skills: JavaScript, React, Node.js, Python, HTML, CSS, MongoDB,
Express.js, Git, basic machine learning knowledge.",
    ),
    (
        "mike_jones_data.pdf",
        "Mike Jones - Data Scientist
4 years in data science and analytics. Strong Python background.
Skills: Python, pandas, numpy, scikit-learn, matplotlib, seaborn,
SQL, Jupyter, statistics, machine learning, data visualization,
AWS, big data processing.",
    ),
];

pub fn demo_documents() -> Vec<RawDocument> {
    DEMO_RESUMES
        .iter()
        .map(|(label, text)| RawDocument::with_label(*text, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::pipeline::RankingPipeline;

    #[test]
    fn test_demo_batch_ranks_every_resume() {
        let pipeline = RankingPipeline::new(&Config::default()).unwrap();
        let results = pipeline.rank_documents(&demo_documents(), DEMO_JOB_DESCRIPTION).unwrap();

        assert_eq!(results.len(), 3);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(results.iter().all(|r| r.skill_count > 0));
        assert!(results.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
    }
}
