//! CLI interface for the resume screener

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Score and rank resumes against a job description")]
#[command(long_about = "Match resumes (PDF, TXT, MD) against a job description by weighted keyword overlap, with extra weight on core skills, and get actionable feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Where the job description comes from
#[derive(Args, Debug, Clone)]
pub struct JobSource {
    /// Path to job description file (TXT, MD, PDF)
    #[arg(short, long, required_unless_present = "preset", conflicts_with = "preset")]
    pub job: Option<PathBuf>,

    /// Name of a job description preset (see `presets`)
    #[arg(short, long)]
    pub preset: Option<String>,
}

/// Rendering options shared by scoring commands
#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Output format: console, json, markdown, csv (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to a file, or into a directory with a generated name
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Include details and resume previews
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single resume against a job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobSource,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Rank several resumes against one job description
    Rank {
        /// Paths to resume files (PDF, TXT, MD)
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        #[command(flatten)]
        job: JobSource,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// List job description presets
    Presets {
        /// Print the full text of one preset
        #[arg(long)]
        show: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "pdf"];

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
