//! Build-config command handler.
//!
//! Prints what a plugin build consumes. A missing SDK under the permissive
//! policy yields empty values so the build can disable Houdini Engine.

use std::io::Write;

use anyhow::Result;

use hapi_locate_core::BuildConfiguration;

use crate::bootstrap::{CliContext, Host};
use crate::error::CliError;

/// Execute the build-config command.
pub fn execute(ctx: &CliContext, host: &Host<'_>, json: bool, out: &mut dyn Write) -> Result<()> {
    let resolution = super::resolve::run(ctx, host)?;
    let config =
        BuildConfiguration::from_resolution(&resolution, host.fs, ctx.settings.use_loader_library);

    let rendered = if json {
        serde_json::to_string_pretty(&config)?
    } else {
        config.to_string()
    };
    writeln!(out, "{rendered}").map_err(CliError::from)?;
    Ok(())
}
