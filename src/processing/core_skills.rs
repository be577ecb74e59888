//! High-priority skills that weigh more in scoring and drive feedback

use crate::error::{Result, ScreenerError};
use crate::processing::tokenizer::Token;

/// Skills used when the configuration does not provide its own list.
pub const DEFAULT_CORE_SKILLS: &[&str] = &[
    "python",
    "java",
    "sql",
    "html",
    "css",
    "javascript",
    "react",
    "machine",
    "learning",
];

/// Ordered, duplicate-free list of core skill tokens.
///
/// Order is significant: missing skills are always reported in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSkillList {
    skills: Vec<Token>,
}

impl CoreSkillList {
    /// Build a list from raw skill names.
    ///
    /// Names are trimmed and lowercased. Each must then be a single token
    /// (`[a-z0-9_]+`), since the scorer only ever compares whole tokens.
    /// Later duplicates are dropped.
    pub fn new<I, S>(skills: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens: Vec<Token> = Vec::new();

        for raw in skills {
            let normalized = raw.as_ref().trim().to_lowercase();
            let token = Token::new(&normalized).ok_or_else(|| {
                ScreenerError::Configuration(format!(
                    "Core skill '{}' is not a single word token",
                    raw.as_ref()
                ))
            })?;

            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        Ok(Self { skills: tokens })
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.skills.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.skills.iter().map(|t| t.to_string()).collect()
    }
}

impl Default for CoreSkillList {
    fn default() -> Self {
        Self {
            skills: DEFAULT_CORE_SKILLS
                .iter()
                .filter_map(|s| Token::new(s))
                .collect(),
        }
    }
}
