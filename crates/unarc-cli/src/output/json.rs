//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unarc_core::ArchiveEntry;
use unarc_core::CreationReport;
use unarc_core::ExtractionReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
            files: Vec<String>,
        }

        let data = ExtractionOutput {
            files_extracted: report.files_extracted(),
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            files: report
                .files_written
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            output_path: String,
            files_added: usize,
            bytes_written: u64,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = CreationOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        };

        let output = JsonOutput::success("create", data);
        Self::output(&output)
    }

    fn format_listing(
        &self,
        entries: &[ArchiveEntry],
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ListEntry {
            name: String,
            is_directory: bool,
            size: u64,
        }

        #[derive(Serialize)]
        struct ListOutput {
            total_entries: usize,
            entries: Vec<ListEntry>,
        }

        let data = ListOutput {
            total_entries: entries.len(),
            entries: entries
                .iter()
                .map(|e| ListEntry {
                    name: e.name.clone(),
                    is_directory: e.is_directory,
                    size: e.size,
                })
                .collect(),
        };

        let output = JsonOutput::success("list", data);
        Self::output(&output)
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
