//! List command implementation.

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use unarc_core::ArchiveEntry;
use unarc_core::ArchiveReader;
use unarc_core::detect;
use unarc_core::open_reader;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let kind = add_archive_context(detect(&args.archive), &args.archive)?;
    let reader = add_archive_context(open_reader(&args.archive, kind), &args.archive)?;

    // Metadata only: entry streams are never read.
    let mut entries: Vec<ArchiveEntry> = Vec::new();
    add_archive_context(
        reader.for_each_entry(&mut |entry, _stream| {
            entries.push(entry.clone());
            Ok(())
        }),
        &args.archive,
    )?;

    formatter.format_listing(&entries, args.long, args.human_readable)?;

    Ok(())
}
