//! Categorical feedback derived from a score

use crate::processing::tokenizer::Token;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    ExcellentMatch,
    /// Core skills the JD asks for but the resume lacks, in core list order.
    MissingCoreSkills(Vec<Token>),
    NeedsMoreContent,
}

impl Feedback {
    /// First matching rule wins: an excellent score beats missing skills.
    pub fn select(score: f64, missing_core: &[Token], excellent_threshold: f64) -> Self {
        if score >= excellent_threshold {
            Feedback::ExcellentMatch
        } else if !missing_core.is_empty() {
            Feedback::MissingCoreSkills(missing_core.to_vec())
        } else {
            Feedback::NeedsMoreContent
        }
    }

    pub fn is_excellent(&self) -> bool {
        matches!(self, Feedback::ExcellentMatch)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::ExcellentMatch => write!(f, "Excellent match"),
            Feedback::MissingCoreSkills(skills) => {
                let names: Vec<&str> = skills.iter().map(|t| t.as_str()).collect();
                write!(f, "Missing important skills: {}", names.join(", "))
            }
            Feedback::NeedsMoreContent => write!(f, "Needs more relevant content"),
        }
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(w).unwrap()).collect()
    }

    #[test]
    fn test_excellent_wins_over_missing_skills() {
        let feedback = Feedback::select(80.0, &tokens(&["sql"]), 80.0);
        assert_eq!(feedback, Feedback::ExcellentMatch);
        assert_eq!(feedback.to_string(), "Excellent match");
    }

    #[test]
    fn test_missing_skills_message_keeps_order() {
        let feedback = Feedback::select(79.99, &tokens(&["java", "sql", "react"]), 80.0);
        assert_eq!(
            feedback.to_string(),
            "Missing important skills: java, sql, react"
        );
    }

    #[test]
    fn test_generic_message() {
        let feedback = Feedback::select(10.0, &[], 80.0);
        assert_eq!(feedback, Feedback::NeedsMoreContent);
        assert_eq!(feedback.to_string(), "Needs more relevant content");
    }

    #[test]
    fn test_serializes_as_message() {
        let feedback = Feedback::MissingCoreSkills(tokens(&["css"]));
        let json = serde_json::to_string(&feedback).unwrap();
        assert_eq!(json, "\"Missing important skills: css\"");
    }
}
