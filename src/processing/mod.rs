//! Scoring engine: tokenize, weight, score, rank

pub mod tokenizer;
pub mod core_skills;
pub mod feedback;
pub mod scorer;
pub mod ranking;
