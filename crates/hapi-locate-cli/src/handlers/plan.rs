//! Plan command handler.
//!
//! Shows the probe order without touching the filesystem or registry.

use std::io::{self, Write};

use anyhow::Result;

use hapi_locate_core::LocateError;
use hapi_locate_core::resolver::candidate_plan;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the plan command.
pub fn execute(ctx: &CliContext, out: &mut dyn Write) -> Result<()> {
    let request = &ctx.request;
    if !request.platform.is_supported() {
        return Err(CliError::from(LocateError::UnsupportedPlatform(
            request.platform.name().to_string(),
        ))
        .into());
    }

    write_plan(ctx, out).map_err(CliError::from)?;
    Ok(())
}

fn write_plan(ctx: &CliContext, out: &mut dyn Write) -> io::Result<()> {
    let request = &ctx.request;
    writeln!(out, "platform = {}", request.platform)?;
    writeln!(out, "version = {}", request.version)?;
    writeln!(out, "policy = {:?}", request.policy)?;
    if let Some(path) = &ctx.settings_path {
        writeln!(out, "settings = {}", path.display())?;
    }

    for (index, step) in candidate_plan(&request.platform).iter().enumerate() {
        writeln!(out, "{:>2}. {step}", index + 1)?;
    }
    Ok(())
}
