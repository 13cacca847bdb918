//! Output module for writing run results
//!
//! This module handles:
//! - Writing records as CSV (and reading them back)
//! - Rendering the static HTML product report
//! - Aggregate statistics shown in the report and logs
//! - The raw HTML debug dump of the last fetched page

mod csv_output;
mod html_report;
pub mod stats;

pub use csv_output::{read_csv, write_csv, write_csv_file};
pub use html_report::{render_html_report, write_html_report};
pub use stats::{print_statistics, ReportStats};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the raw body of the most recently fetched page
///
/// Each call replaces the previous dump.
pub fn write_debug_dump(path: &Path, html: &str) -> OutputResult<()> {
    fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_debug_dump_is_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last-page.html");

        write_debug_dump(&path, "<html>first</html>").unwrap();
        write_debug_dump(&path, "<html>second</html>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>second</html>");
    }

    #[test]
    fn test_debug_dump_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("page.html");
        assert!(matches!(
            write_debug_dump(&path, "x"),
            Err(OutputError::Io(_))
        ));
    }
}
