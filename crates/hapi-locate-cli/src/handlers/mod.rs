//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, host: &Host, ..., out: &mut dyn Write) -> Result<()>`
//! - Thin wrappers that:
//!   1. Run a resolution pass against the host providers
//!   2. Derive whatever the command reports
//!   3. Write `key = value` (or JSON) output
//!
//! Failures that map to a specific exit code are returned as [`CliError`](crate::CliError)
//! inside `anyhow::Error` so `main` can downcast them.

pub mod build_config;
pub mod check;
pub mod plan;
pub mod resolve;
