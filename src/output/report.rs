//! Report structures handed to the formatters

use crate::processing::ranking::{BatchOutcome, ExtractionFailure, RankedResult};
use crate::processing::scorer::{round_score, KeywordScorer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Everything a formatter needs to render one screening run
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    /// Ranked best first
    pub entries: Vec<ReportEntry>,
    /// Resumes that could not be read and were left out of the ranking
    pub failures: Vec<ExtractionFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// JD file name or preset name
    pub job_source: String,
    pub screener_version: String,
    pub core_skills: Vec<String>,
    pub core_skill_weight: u32,
    pub excellent_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub scored: usize,
    pub failed: usize,
    pub average_score: f64,
    pub excellent_matches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_core_skills: Vec<String>,
    pub feedback: String,
    pub excellent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl ReportEntry {
    pub fn from_ranked(ranked: RankedResult) -> Self {
        let result = ranked.result;
        Self {
            rank: ranked.rank,
            name: ranked.name,
            score: result.score,
            matched_keywords: result.matched_keywords.iter().map(|t| t.to_string()).collect(),
            missing_core_skills: result.missing_core_skills.iter().map(|t| t.to_string()).collect(),
            feedback: result.feedback.to_string(),
            excellent: result.feedback.is_excellent(),
            preview: None,
        }
    }
}

impl ScreeningReport {
    pub fn new(outcome: BatchOutcome, scorer: &KeywordScorer, job_source: &str) -> Self {
        let entries: Vec<ReportEntry> = outcome.ranked.into_iter().map(ReportEntry::from_ranked).collect();

        let average_score = if entries.is_empty() {
            0.0
        } else {
            let total: f64 = entries.iter().map(|e| e.score).sum();
            round_score(total / entries.len() as f64)
        };

        let summary = ReportSummary {
            scored: entries.len(),
            failed: outcome.failures.len(),
            average_score,
            excellent_matches: entries.iter().filter(|e| e.excellent).count(),
        };

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                job_source: job_source.to_string(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                core_skills: scorer.core_skills().names(),
                core_skill_weight: scorer.core_skill_weight(),
                excellent_threshold: scorer.excellent_threshold(),
            },
            summary,
            entries,
            failures: outcome.failures,
        }
    }

    /// Attach a leading slice of each resume's text, keyed by entry name.
    pub fn with_previews(mut self, texts: &HashMap<String, String>, max_chars: usize) -> Self {
        for entry in &mut self.entries {
            if let Some(text) = texts.get(&entry.name) {
                entry.preview = Some(preview_text(text, max_chars));
            }
        }
        self
    }

    pub fn best(&self) -> Option<&ReportEntry> {
        self.entries.first()
    }
}

/// Truncate to at most `max_chars` graphemes, backing off to the last space.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let graphemes: Vec<&str> = trimmed.graphemes(true).collect();

    if graphemes.len() <= max_chars {
        return trimmed.to_string();
    }

    let mut cut = graphemes[..max_chars].concat();
    if let Some(last_space) = cut.rfind(char::is_whitespace) {
        if last_space > 0 {
            cut.truncate(last_space);
        }
    }

    format!("{}...", cut.trim_end())
}
