//! CLI bootstrap - the composition root.
//!
//! Settings are layered here: settings file, then `HAPI_LOCATE_*`
//! environment variables, then command-line flags. Host access is bundled
//! into [`Host`] so handlers can run against in-memory providers in tests.

use std::path::PathBuf;

use hapi_locate_core::resolver::{
    EnvProvider, FsProvider, RegistryProvider, SystemEnv, SystemFs, SystemRegistry,
};
use hapi_locate_core::{
    LocateRequest, LocatorSettings, ResolutionPolicy, TargetPlatform, default_settings_path,
};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Host capabilities used by command handlers.
pub struct Host<'a> {
    pub env: &'a dyn EnvProvider,
    pub fs: &'a dyn FsProvider,
    pub registry: &'a dyn RegistryProvider,
}

impl Host<'static> {
    /// The real machine.
    pub fn system() -> Self {
        Self {
            env: &SystemEnv,
            fs: &SystemFs,
            registry: &SystemRegistry,
        }
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub settings: LocatorSettings,
    pub request: LocateRequest,
    /// Settings file that was consulted, if any.
    pub settings_path: Option<PathBuf>,
}

/// Build the context from parsed arguments, reading settings through `env`.
pub fn bootstrap(cli: &Cli, env: &dyn EnvProvider) -> Result<CliContext, CliError> {
    let settings_path = cli.config.clone().or_else(default_settings_path);

    let mut settings = match (&cli.config, &settings_path) {
        // An explicitly named file must exist.
        (Some(path), _) => LocatorSettings::load(path)?,
        (None, Some(path)) => LocatorSettings::load_or_default(path)?,
        (None, None) => LocatorSettings::default(),
    };
    settings.apply_env(env)?;
    apply_flags(&mut settings, cli)?;

    let platform = cli
        .platform
        .as_deref()
        .map_or_else(TargetPlatform::host, |name| match name.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        });

    let request = settings.to_request(platform)?;
    debug!(
        platform = %request.platform,
        version = %request.version,
        policy = ?request.policy,
        settings = ?settings_path,
        "Bootstrapped locator"
    );

    Ok(CliContext {
        settings,
        request,
        settings_path,
    })
}

fn apply_flags(settings: &mut LocatorSettings, cli: &Cli) -> Result<(), CliError> {
    if let Some(version) = &cli.sdk_version {
        if version.trim().is_empty() {
            return Err(CliError::Arguments("--sdk-version must not be empty".into()));
        }
        settings.sdk_version.clone_from(version);
    }
    if let Some(path) = &cli.install_override {
        settings.install_override = Some(path.clone());
    }
    if let Some(path) = &cli.static_path {
        settings.static_path = Some(path.clone());
    }
    if let Some(name) = &cli.env_var {
        settings.env_var.clone_from(name);
    }
    if cli.strict {
        settings.policy = ResolutionPolicy::Strict;
    }
    if cli.no_loader {
        settings.use_loader_library = false;
    }
    Ok(())
}
