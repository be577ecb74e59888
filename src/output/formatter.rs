//! Output formatters: console, JSON, Markdown and CSV

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::*;
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a ranked table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// CSV formatter, one row per ranked resume
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

const NAME_COLUMN_WIDTH: usize = 28;
/// Scores below this (or below the excellent threshold, if lower) show red
const PARTIAL_MATCH_FLOOR: f64 = 50.0;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: f64, excellent_threshold: f64) -> Color {
        if score >= excellent_threshold {
            Color::Green
        } else if score >= PARTIAL_MATCH_FLOOR.min(excellent_threshold) {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn format_score_badge(&self, score: f64, excellent_threshold: f64) -> String {
        let badge = format!("{:>6.2}%", score);
        if self.use_colors {
            badge
                .as_str()
                .color(Self::score_color(score, excellent_threshold))
                .bold()
                .to_string()
        } else {
            badge
        }
    }

    fn fit_name(name: &str) -> String {
        if name.chars().count() <= NAME_COLUMN_WIDTH {
            format!("{:<width$}", name, width = NAME_COLUMN_WIDTH)
        } else {
            let head: String = name.chars().take(NAME_COLUMN_WIDTH - 1).collect();
            format!("{}…", head)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME SCREENING RESULTS", 1));
        output.push_str(&format!(
            "Job: {} | Generated: {}\n",
            report.metadata.job_source,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if report.entries.is_empty() {
            output.push_str(&self.colorize("\nNo resumes could be scored.\n", Color::Yellow));
        } else {
            output.push_str(&self.format_header("Ranking", 2));
            output.push_str(&format!(
                "{:<4}  {}  {:>7}  {}\n",
                "#",
                Self::fit_name("Resume"),
                "Score",
                "Feedback"
            ));
            output.push_str(&format!("{}\n", "─".repeat(NAME_COLUMN_WIDTH + 50)));

            for entry in &report.entries {
                let feedback_color = if entry.excellent {
                    Color::Green
                } else if entry.missing_core_skills.is_empty() {
                    Color::BrightBlack
                } else {
                    Color::Yellow
                };

                output.push_str(&format!(
                    "{:<4}  {}  {}  {}\n",
                    entry.rank,
                    Self::fit_name(&entry.name),
                    self.format_score_badge(entry.score, report.metadata.excellent_threshold),
                    self.colorize(&entry.feedback, feedback_color)
                ));
            }

            output.push_str(&self.format_header("🔍 Matched Keywords", 2));
            for entry in &report.entries {
                let keywords = if entry.matched_keywords.is_empty() {
                    "(none)".to_string()
                } else {
                    entry.matched_keywords.join(", ")
                };
                output.push_str(&format!(
                    "{} {}\n",
                    self.colorize(&format!("{}:", entry.name), Color::Cyan),
                    keywords
                ));
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("⚠️  Extraction Failures", 2));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&failure.name, Color::Red),
                    self.colorize(&format!("({})", failure.reason), Color::BrightBlack)
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Details", 2));
            output.push_str(&format!(
                "Core skills (weight {}): {}\n",
                report.metadata.core_skill_weight,
                report.metadata.core_skills.join(", ")
            ));
            output.push_str(&format!(
                "Scored: {} | Failed: {} | Average score: {:.2}% | Excellent matches: {}\n",
                report.summary.scored,
                report.summary.failed,
                report.summary.average_score,
                report.summary.excellent_matches
            ));

            for entry in report.entries.iter().filter(|e| e.preview.is_some()) {
                output.push_str(&self.format_header(&format!("📃 {} preview", entry.name), 3));
                if let Some(preview) = &entry.preview {
                    output.push_str(preview);
                    output.push('\n');
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Screener v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.screener_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut content = String::new();

        content.push_str("# Resume Screening Results\n\n");
        content.push_str(&format!("**Job:** {}\n\n", Self::escape_cell(&report.metadata.job_source)));

        if report.entries.is_empty() {
            content.push_str("_No resumes could be scored._\n\n");
        } else {
            content.push_str("| Rank | Resume | Score | Feedback | Matched Keywords |\n");
            content.push_str("|-----:|--------|------:|----------|------------------|\n");
            for entry in &report.entries {
                content.push_str(&format!(
                    "| {} | {} | {:.2}% | {} | {} |\n",
                    entry.rank,
                    Self::escape_cell(&entry.name),
                    entry.score,
                    Self::escape_cell(&entry.feedback),
                    Self::escape_cell(&entry.matched_keywords.join(", "))
                ));
            }
            content.push('\n');
        }

        if !report.failures.is_empty() {
            content.push_str("## Extraction Failures\n\n");
            for failure in &report.failures {
                content.push_str(&format!("- **{}**: {}\n", failure.name, failure.reason));
            }
            content.push('\n');
        }

        if self.include_metadata {
            content.push_str("---\n\n");
            content.push_str(&format!(
                "_Generated {} by Resume Screener v{}. Core skills (weight {}): {}._\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.screener_version,
                report.metadata.core_skill_weight,
                report.metadata.core_skills.join(", ")
            ));
        }

        Ok(content)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    name: &'a str,
    score: f64,
    feedback: &'a str,
    matched_keywords: String,
    missing_core_skills: String,
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        // Header is written even when nothing was scored
        if report.entries.is_empty() {
            writer.write_record([
                "rank",
                "name",
                "score",
                "feedback",
                "matched_keywords",
                "missing_core_skills",
            ])?;
        }

        for entry in &report.entries {
            writer.serialize(CsvRow {
                rank: entry.rank,
                name: &entry.name,
                score: entry.score,
                feedback: &entry.feedback,
                matched_keywords: entry.matched_keywords.join(" "),
                missing_core_skills: entry.missing_core_skills.join(" "),
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ScreenerError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| ScreenerError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter,
        }
    }

    fn formatters(&self) -> [&dyn OutputFormatter; 4] {
        [
            &self.console_formatter,
            &self.json_formatter,
            &self.markdown_formatter,
            &self.csv_formatter,
        ]
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        let formatter = self
            .formatters()
            .into_iter()
            .find(|f| f.supports_format() == *format)
            .ok_or_else(|| ScreenerError::OutputFormatting(format!("No formatter for {:?}", format)))?;

        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, stem_source: &str, timestamp: bool) -> String {
    let base_name = Path::new(stem_source)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
        OutputFormat::Csv => format!("{}_screening{}.csv", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenerError;
    use crate::processing::ranking::rank_extracted;
    use crate::processing::scorer::KeywordScorer;

    fn sample_report() -> ScreeningReport {
        let scorer = KeywordScorer::default();
        let outcome = rank_extracted(
            &scorer,
            "Looking for Python and SQL skills",
            vec![
                ("jane, doe.txt".to_string(), Ok("I know Python very well".to_string())),
                (
                    "broken.pdf".to_string(),
                    Err(ScreenerError::PdfExtraction("bad header".to_string())),
                ),
            ],
        );
        ScreeningReport::new(outcome, &scorer, "data_role.txt")
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("RESUME SCREENING RESULTS"));
        assert!(output.contains(" 30.00%"));
        assert!(output.contains("Missing important skills: sql"));
        assert!(output.contains("broken.pdf"));
        assert!(output.contains("Core skills (weight 3)"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["entries"][0]["score"], 30.0);
        assert_eq!(value["entries"][0]["matched_keywords"][0], "python");
        assert_eq!(value["failures"][0]["name"], "broken.pdf");
        assert!(value["entries"][0].get("preview").is_none());
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("| 1 | jane, doe.txt | 30.00% | Missing important skills: sql | python |"));
        assert!(output.contains("## Extraction Failures"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_csv_output_quotes_fields() {
        let output = CsvFormatter.format_report(&sample_report()).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("rank,name,score,feedback,matched_keywords,missing_core_skills")
        );
        assert_eq!(
            lines.next(),
            Some("1,\"jane, doe.txt\",30.0,Missing important skills: sql,python,sql")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_header_without_entries() {
        let scorer = KeywordScorer::default();
        let report = ScreeningReport::new(Default::default(), &scorer, "job.txt");
        let output = CsvFormatter.format_report(&report).unwrap();

        assert_eq!(output.trim_end(), "rank,name,score,feedback,matched_keywords,missing_core_skills");
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, true);
        let report = sample_report();

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let csv = generator.generate_report(&report, &OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("rank,name,score"));
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Resume Screening Results"));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("RESUME SCREENING RESULTS"));
    }

    #[test]
    fn test_each_format_has_one_formatter() {
        let generator = ReportGenerator::new();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Csv] {
            let count = generator
                .formatters()
                .iter()
                .filter(|f| f.supports_format() == format)
                .count();
            assert_eq!(count, 1, "{:?}", format);
        }
    }

    #[test]
    fn test_score_color_follows_threshold() {
        assert_eq!(ConsoleFormatter::score_color(85.0, 80.0), Color::Green);
        assert_eq!(ConsoleFormatter::score_color(66.67, 80.0), Color::Yellow);
        assert_eq!(ConsoleFormatter::score_color(30.0, 80.0), Color::Red);

        assert_eq!(ConsoleFormatter::score_color(66.67, 60.0), Color::Green);
        assert_eq!(ConsoleFormatter::score_color(45.0, 40.0), Color::Green);
        assert_eq!(ConsoleFormatter::score_color(30.0, 40.0), Color::Red);
        assert_eq!(ConsoleFormatter::score_color(100.0, 100.0), Color::Green);
    }

    #[test]
    fn test_report_badge_and_feedback_agree_on_custom_threshold() {
        let scorer = KeywordScorer::default().with_excellent_threshold(60.0).unwrap();
        let outcome = rank_extracted(
            &scorer,
            "python data science engineering",
            vec![("cv.txt".to_string(), Ok("python data".to_string()))],
        );
        let report = ScreeningReport::new(outcome, &scorer, "job.txt");
        let entry = &report.entries[0];

        // python 3 + data 1 of 6
        assert_eq!(entry.score, 66.67);
        assert!(entry.excellent);
        assert_eq!(report.metadata.excellent_threshold, 60.0);
        assert_eq!(
            ConsoleFormatter::score_color(entry.score, report.metadata.excellent_threshold),
            Color::Green
        );

        let weaker = rank_extracted(
            &scorer,
            "python data science engineering",
            vec![("cv.txt".to_string(), Ok("python".to_string()))],
        );
        let report = ScreeningReport::new(weaker, &scorer, "job.txt");
        // python 3 of 6
        assert_eq!(report.entries[0].score, 50.0);
        assert!(!report.entries[0].excellent);
        assert_eq!(
            ConsoleFormatter::score_color(50.0, report.metadata.excellent_threshold),
            Color::Yellow
        );
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Csv, "jobs/data_role.txt", false),
            "data_role_screening.csv"
        );
        let stamped = suggest_filename(&OutputFormat::Json, "job.md", true);
        assert!(stamped.starts_with("job_screening_"));
        assert!(stamped.ends_with(".json"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");

        save_report_to_file("# hi\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi\n");
    }
}
