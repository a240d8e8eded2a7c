//! Resolve command handler.

use std::io::{self, Write};

use anyhow::Result;

use hapi_locate_core::{Resolution, resolve_installation_with_deps};

use crate::bootstrap::{CliContext, Host};
use crate::error::CliError;

/// Run one resolution pass for the context's request.
///
/// Under the strict policy a missing SDK comes back as
/// [`CliError::NotFound`]; under the permissive policy it is an empty
/// [`Resolution`].
pub fn run(ctx: &CliContext, host: &Host<'_>) -> Result<Resolution, CliError> {
    Ok(resolve_installation_with_deps(
        &ctx.request,
        host.env,
        host.fs,
        host.registry,
    )?)
}

/// Execute the resolve command.
pub fn execute(ctx: &CliContext, host: &Host<'_>, attempts: bool, out: &mut dyn Write) -> Result<()> {
    let resolution = run(ctx, host)?;
    write_resolution(&resolution, attempts, out).map_err(CliError::from)?;
    Ok(())
}

fn write_resolution(resolution: &Resolution, attempts: bool, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{resolution}")?;
    if attempts {
        for line in resolution.diagnostics() {
            writeln!(out, "# {line}")?;
        }
    }
    Ok(())
}
