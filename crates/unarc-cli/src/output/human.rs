//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unarc_core::ArchiveEntry;
use unarc_core::CreationReport;
use unarc_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted()));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
            for file in &report.files_written {
                let _ = self.term.write_line(&format!("  {}", file.display()));
            }
        }

        Ok(())
    }

    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        // Warnings print even in quiet mode: a caller who asked for a
        // password must hear that it was not honored.
        if report.has_warnings() {
            for warning in &report.warnings {
                self.format_warning(&warning.to_string());
            }
        }

        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Archive created: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Archive created: {}", output_path.display()));
        }

        let _ = self
            .term
            .write_line(&format!("  Files added: {}", report.files_added));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_listing(
        &self,
        entries: &[ArchiveEntry],
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in entries {
                let _ = self.term.write_line(&entry.name);
            }
            return Ok(());
        }

        let mut total_size = 0u64;
        let mut file_count = 0usize;
        for entry in entries {
            let size_str = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            let type_char = if entry.is_directory { "d" } else { "-" };
            let _ = self
                .term
                .write_line(&format!("{type_char} {size_str:>10}  {}", entry.name));

            if !entry.is_directory {
                total_size += entry.size;
                file_count += 1;
            }
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {file_count} files, {}",
            Self::format_size(total_size)
        ));

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
