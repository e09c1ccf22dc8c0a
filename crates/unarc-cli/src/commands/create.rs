//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use unarc_core::CreationRequest;
use unarc_core::create_archive;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut request = CreationRequest::new(&args.output).add_sources(args.sources.clone());
    if let Some(password) = &args.password {
        request = request.with_password(password.clone());
    }

    let report = add_archive_context(create_archive(&request), &args.output)?;

    formatter.format_creation_result(&args.output, &report)?;

    Ok(())
}
