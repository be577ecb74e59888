//! Batch ranking of several resumes against one job description

use crate::error::ScreenerError;
use crate::processing::scorer::{KeywordScorer, ScoreResult};
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    /// 1-based position after sorting
    pub rank: usize,
    pub name: String,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// A resume whose text could not be extracted. Never scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub ranked: Vec<RankedResult>,
    pub failures: Vec<ExtractionFailure>,
}

/// Score every resume against `jd_text` and sort by score, highest first.
///
/// Resumes with equal scores keep their input order.
pub fn rank<I, N, T>(scorer: &KeywordScorer, jd_text: &str, resumes: I) -> Vec<RankedResult>
where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: AsRef<str>,
{
    let jd_keywords = scorer.tokenize(jd_text);

    let mut scored: Vec<(String, ScoreResult)> = resumes
        .into_iter()
        .map(|(name, text)| {
            let resume_keywords = scorer.tokenize(text.as_ref());
            (name.into(), scorer.score_keywords(&resume_keywords, &jd_keywords))
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (name, result))| RankedResult {
            rank: idx + 1,
            name,
            result,
        })
        .collect()
}

/// Rank the documents whose extraction succeeded and report the others apart.
pub fn rank_extracted<I>(scorer: &KeywordScorer, jd_text: &str, documents: I) -> BatchOutcome
where
    I: IntoIterator<Item = (String, std::result::Result<String, ScreenerError>)>,
{
    let mut extracted = Vec::new();
    let mut failures = Vec::new();

    for (name, outcome) in documents {
        match outcome {
            Ok(text) => extracted.push((name, text)),
            Err(e) => {
                warn!("Skipping '{}': {}", name, e);
                failures.push(ExtractionFailure {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    let ranked = rank(scorer, jd_text, extracted);
    info!(
        "Ranked {} resumes, {} extraction failures",
        ranked.len(),
        failures.len()
    );

    BatchOutcome { ranked, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::core_skills::CoreSkillList;

    fn plain_scorer() -> KeywordScorer {
        KeywordScorer::new(CoreSkillList::new(Vec::<String>::new()).unwrap())
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let scorer = plain_scorer();
        // 200 JD words: covering 84, 182 and 135 of them
        let jd: Vec<String> = (0..200).map(|i| format!("w{}", i)).collect();
        let jd_text = jd.join(" ");
        let resume = |n: usize| jd[..n].join(" ");

        let ranked = rank(
            &scorer,
            &jd_text,
            vec![("low", resume(84)), ("high", resume(182)), ("mid", resume(135))],
        );

        let scores: Vec<f64> = ranked.iter().map(|r| r.result.score).collect();
        assert_eq!(scores, vec![91.0, 67.5, 42.0]);

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);

        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let scorer = plain_scorer();
        let ranked = rank(
            &scorer,
            "rust tokio serde",
            vec![
                ("first", "rust"),
                ("best", "rust tokio serde"),
                ("second", "tokio"),
                ("third", "serde"),
            ],
        );

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["best", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_empty_batch() {
        let scorer = plain_scorer();
        let ranked = rank(&scorer, "rust", Vec::<(String, String)>::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_failed_extractions_are_excluded() {
        let scorer = KeywordScorer::default();
        let documents = vec![
            ("a.pdf".to_string(), Ok("python sql".to_string())),
            (
                "broken.pdf".to_string(),
                Err(ScreenerError::PdfExtraction("bad xref".to_string())),
            ),
            ("b.txt".to_string(), Ok(String::new())),
        ];

        let outcome = rank_extracted(&scorer, "python sql", documents);

        assert_eq!(outcome.ranked.len(), 2);
        assert_eq!(outcome.ranked[0].name, "a.pdf");
        assert_eq!(outcome.ranked[0].result.score, 100.0);
        assert_eq!(outcome.ranked[1].name, "b.txt");
        assert_eq!(outcome.ranked[1].result.score, 0.0);

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "broken.pdf");
        assert!(outcome.failures[0].reason.contains("bad xref"));
    }
}
