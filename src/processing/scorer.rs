//! Weighted keyword overlap scoring of a resume against a job description

use crate::config::ScoringConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::core_skills::CoreSkillList;
use crate::processing::feedback::Feedback;
use crate::processing::tokenizer::{KeywordSet, Token, Tokenizer};
use log::debug;
use serde::Serialize;

pub const DEFAULT_CORE_SKILL_WEIGHT: u32 = 3;
pub const BASE_WEIGHT: u32 = 1;
pub const DEFAULT_EXCELLENT_THRESHOLD: f64 = 80.0;

/// Scores resumes by how much of the JD vocabulary they cover.
///
/// Every JD keyword carries weight 1, except core skills which carry the
/// core skill weight. The score is the covered share of total JD weight,
/// as a percentage rounded to two decimals.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    tokenizer: Tokenizer,
    core_skills: CoreSkillList,
    core_skill_weight: u32,
    excellent_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// 0.0 to 100.0, two decimals
    pub score: f64,
    /// JD keywords also present in the resume, sorted
    pub matched_keywords: Vec<Token>,
    /// Core skills in the JD but not in the resume, in core list order
    pub missing_core_skills: Vec<Token>,
    pub feedback: Feedback,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(CoreSkillList::default())
    }
}

impl KeywordScorer {
    pub fn new(core_skills: CoreSkillList) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            core_skills,
            core_skill_weight: DEFAULT_CORE_SKILL_WEIGHT,
            excellent_threshold: DEFAULT_EXCELLENT_THRESHOLD,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let core_skills = CoreSkillList::new(&config.core_skills)?;

        Self::new(core_skills)
            .with_core_skill_weight(config.core_skill_weight)?
            .with_excellent_threshold(config.excellent_threshold)
    }

    pub fn with_core_skill_weight(mut self, weight: u32) -> Result<Self> {
        if weight < BASE_WEIGHT {
            return Err(ScreenerError::Configuration(format!(
                "Core skill weight must be at least {}, got {}",
                BASE_WEIGHT, weight
            )));
        }
        self.core_skill_weight = weight;
        Ok(self)
    }

    pub fn with_excellent_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ScreenerError::Configuration(format!(
                "Excellent threshold must be within 0..=100, got {}",
                threshold
            )));
        }
        self.excellent_threshold = threshold;
        Ok(self)
    }

    pub fn tokenize(&self, text: &str) -> KeywordSet {
        self.tokenizer.tokenize(text)
    }

    pub fn weight(&self, token: &Token) -> u32 {
        if self.core_skills.contains(token) {
            self.core_skill_weight
        } else {
            BASE_WEIGHT
        }
    }

    /// Score raw resume text against raw JD text. Never fails.
    pub fn score(&self, resume_text: &str, jd_text: &str) -> ScoreResult {
        let jd_keywords = self.tokenize(jd_text);
        let resume_keywords = self.tokenize(resume_text);
        self.score_keywords(&resume_keywords, &jd_keywords)
    }

    /// Score already tokenized texts, so a batch can tokenize its JD once.
    pub fn score_keywords(&self, resume: &KeywordSet, jd: &KeywordSet) -> ScoreResult {
        let matched_keywords: Vec<Token> = jd.intersection(resume).cloned().collect();

        let earned_weight: u64 = matched_keywords.iter().map(|t| u64::from(self.weight(t))).sum();
        let total_weight: u64 = jd.iter().map(|t| u64::from(self.weight(t))).sum();

        let score = if total_weight > 0 {
            round_score(100.0 * earned_weight as f64 / total_weight as f64)
        } else {
            0.0
        };

        let missing_core_skills: Vec<Token> = self
            .core_skills
            .iter()
            .filter(|skill| jd.contains(skill) && !resume.contains(skill))
            .cloned()
            .collect();

        let feedback = Feedback::select(score, &missing_core_skills, self.excellent_threshold);

        debug!(
            "Scored resume: {}/{} weight, {} of {} JD keywords matched, {} core skills missing",
            earned_weight,
            total_weight,
            matched_keywords.len(),
            jd.len(),
            missing_core_skills.len()
        );

        ScoreResult {
            score,
            matched_keywords,
            missing_core_skills,
            feedback,
        }
    }

    pub fn core_skills(&self) -> &CoreSkillList {
        &self.core_skills
    }

    pub fn core_skill_weight(&self) -> u32 {
        self.core_skill_weight
    }

    pub fn excellent_threshold(&self) -> f64 {
        self.excellent_threshold
    }
}

/// Round to two decimals from the exact binary value, ties to even (3.125 -> 3.12).
pub fn round_score(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
