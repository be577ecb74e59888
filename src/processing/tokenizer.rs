//! Keyword extraction: case-folded word tokens collected into sets

use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A lowercase run of word characters (`[a-z0-9_]`), never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(String);

impl Token {
    /// Build a token from an already-normalized word.
    ///
    /// Returns `None` unless `word` is non-empty and made only of lowercase
    /// ASCII letters, digits and underscores.
    pub fn new(word: &str) -> Option<Self> {
        if word.is_empty() {
            return None;
        }

        let valid = word
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if valid {
            Some(Self(word.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Unique tokens of a text. Iterates in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    tokens: BTreeSet<Token>,
}

impl KeywordSet {
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Tokens present in both sets, sorted.
    pub fn intersection<'a>(&'a self, other: &'a KeywordSet) -> impl Iterator<Item = &'a Token> {
        self.tokens.intersection(&other.tokens)
    }

    pub fn is_superset(&self, other: &KeywordSet) -> bool {
        self.tokens.is_superset(&other.tokens)
    }
}

impl FromIterator<Token> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Splits free text into a [`KeywordSet`].
///
/// The whole text is lowercased first, then every maximal run of
/// `[A-Za-z0-9_]` becomes a token. Punctuation, whitespace and any other
/// characters (including PDF extraction noise) are separators.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        let word_regex = Regex::new(r"[A-Za-z0-9_]+").expect("Invalid word regex");
        Self { word_regex }
    }

    pub fn tokenize(&self, text: &str) -> KeywordSet {
        let lowered = text.to_lowercase();

        self.word_regex
            .find_iter(&lowered)
            .filter_map(|m| Token::new(m.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(set: &KeywordSet) -> Vec<&str> {
        set.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_token_validation() {
        assert!(Token::new("python").is_some());
        assert!(Token::new("c_99").is_some());
        assert!(Token::new("").is_none());
        assert!(Token::new("Python").is_none());
        assert!(Token::new("c++").is_none());
        assert!(Token::new("machine learning").is_none());
    }

    #[test]
    fn test_tokenize_lowercases_and_dedups() {
        let tokenizer = Tokenizer::new();
        let set = tokenizer.tokenize("Rust, rust; RUST and Python_3!");

        assert_eq!(words(&set), vec!["and", "python_3", "rust"]);
    }

    #[test]
    fn test_tokenize_empty_and_noise() {
        let tokenizer = Tokenizer::new();

        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \n\t—•·…  ").is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokenizer = Tokenizer::new();
        let set = tokenizer.tokenize("node.js/C++ e-mail: dev@example.com");

        assert_eq!(
            words(&set),
            vec!["c", "com", "dev", "e", "example", "js", "mail", "node"]
        );
    }

    #[test]
    fn test_tokens_are_always_normalized() {
        let tokenizer = Tokenizer::new();
        let set = tokenizer.tokenize("Ünïcode MIXED Case 42 snake_Case élan");

        for token in set.iter() {
            assert!(!token.as_str().is_empty());
            assert!(token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
        assert!(set.contains(&Token::new("snake_case").unwrap()));
        assert!(set.contains(&Token::new("42").unwrap()));
    }

    #[test]
    fn test_intersection_is_sorted() {
        let tokenizer = Tokenizer::new();
        let a = tokenizer.tokenize("zeta alpha mid");
        let b = tokenizer.tokenize("mid zeta other alpha");

        let common: Vec<&str> = a.intersection(&b).map(|t| t.as_str()).collect();
        assert_eq!(common, vec!["alpha", "mid", "zeta"]);
    }
}
