//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod presets;
pub mod processing;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use processing::ranking::{rank, rank_extracted};
pub use processing::scorer::{KeywordScorer, ScoreResult};
