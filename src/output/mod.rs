//! Report rendering and export

pub mod report;
pub mod formatter;

pub use formatter::{ReportGenerator, save_report_to_file, suggest_filename};
pub use report::ScreeningReport;
