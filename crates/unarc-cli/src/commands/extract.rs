//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use unarc_core::ExtractionJob;
use unarc_core::NoopProgress;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let destination = match &args.destination {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut job = add_archive_context(
        ExtractionJob::prepare(&args.archive, &destination),
        &args.archive,
    )?;

    // Draw a bar only on a real terminal; reports still flow through
    // the formatter either way.
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_archive_context(job.run(&mut progress), &args.archive)?
    } else {
        add_archive_context(job.run(&mut NoopProgress), &args.archive)?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}
