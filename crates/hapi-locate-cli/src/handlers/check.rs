//! Check command handler.
//!
//! Succeeds only when the SDK root and its HAPI headers are both present,
//! whatever the configured policy.

use std::io::Write;

use anyhow::Result;

use hapi_locate_core::{BuildConfiguration, LocateError};

use crate::bootstrap::{CliContext, Host};
use crate::error::CliError;

/// Execute the check command.
pub fn execute(ctx: &CliContext, host: &Host<'_>, out: &mut dyn Write) -> Result<()> {
    let resolution = super::resolve::run(ctx, host)?;
    if !resolution.is_found() {
        return Err(CliError::from(LocateError::not_found(
            &resolution.version,
            &resolution.attempts,
        ))
        .into());
    }

    let config =
        BuildConfiguration::from_resolution(&resolution, host.fs, ctx.settings.use_loader_library);
    if config.headers_missing() {
        let root = config
            .install_dir
            .as_deref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        return Err(CliError::HeadersMissing(root).into());
    }

    if let (Some(install), Some(include)) = (config.install_dir.as_deref(), config.include_dir()) {
        writeln!(
            out,
            "✓ Houdini {} at {}\n✓ HAPI headers at {}",
            resolution.version,
            install.display(),
            include.display()
        )
        .map_err(CliError::from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{context, output};
    use hapi_locate_core::TargetPlatform;
    use hapi_locate_core::resolver::{MemoryEnv, MemoryFs, MemoryRegistry};

    #[test]
    fn test_check_passes_with_custom_headers() {
        let env = MemoryEnv::new().with_var("HFS", "/opt/hfs19.0");
        let fs = MemoryFs::new()
            .with_dir("/opt/hfs19.0")
            .with_dir("/opt/hfs19.0/custom/houdini/include/HAPI");
        let registry = MemoryRegistry::new();
        let host = Host {
            env: &env,
            fs: &fs,
            registry: &registry,
        };
        let mut buf = Vec::new();

        execute(&context(TargetPlatform::Linux), &host, &mut buf).unwrap();

        assert!(output(buf).contains("custom/houdini/include/HAPI"));
    }

    #[test]
    fn test_check_fails_without_headers() {
        let env = MemoryEnv::new().with_var("HFS", "/opt/hfs19.0");
        let fs = MemoryFs::new().with_dir("/opt/hfs19.0");
        let registry = MemoryRegistry::new();
        let host = Host {
            env: &env,
            fs: &fs,
            registry: &registry,
        };

        let err = execute(&context(TargetPlatform::Linux), &host, &mut Vec::new()).unwrap_err();

        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 66);
    }

    #[test]
    fn test_check_fails_when_not_found_even_if_permissive() {
        let env = MemoryEnv::new();
        let fs = MemoryFs::new();
        let registry = MemoryRegistry::new();
        let host = Host {
            env: &env,
            fs: &fs,
            registry: &registry,
        };

        let err = execute(&context(TargetPlatform::Linux), &host, &mut Vec::new()).unwrap_err();

        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 1);
    }
}
