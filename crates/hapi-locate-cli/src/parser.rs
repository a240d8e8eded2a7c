//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for locating a Houdini Engine SDK.
///
/// Global options override the settings file and `HAPI_LOCATE_*`
/// environment variables for this invocation only.
#[derive(Parser)]
#[command(name = "hapi-locate")]
#[command(about = "Locate an installed Houdini Engine SDK and derive its build configuration")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long = "config", global = true, env = "HAPI_LOCATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target platform (windows, macos, linux); defaults to the host
    #[arg(long = "platform", global = true)]
    pub platform: Option<String>,

    /// SDK version the plugin is built against, e.g. 19.0.500
    #[arg(long = "sdk-version", global = true)]
    pub sdk_version: Option<String>,

    /// Pinned install root, checked before anything else
    #[arg(long = "override", global = true)]
    pub install_override: Option<String>,

    /// macOS fallback install root
    #[arg(long = "static-path", global = true)]
    pub static_path: Option<String>,

    /// Environment variable holding the install root on Linux
    #[arg(long = "env-var", global = true)]
    pub env_var: Option<String>,

    /// Treat a missing SDK as an error
    #[arg(long = "strict", global = true)]
    pub strict: bool,

    /// Link against libHAPI instead of the libHAPIL loader
    #[arg(long = "no-loader", global = true)]
    pub no_loader: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Load `.env` (or `dotenv_file`) and then parse `args`, so variables
    /// from the file reach clap's `env` fallbacks. A missing file is ignored.
    pub fn parse_with_dotenv<I, T>(dotenv_file: Option<&Path>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match dotenv_file {
            Some(path) => dotenvy::from_path(path).ok(),
            None => dotenvy::dotenv().ok().map(|_| ()),
        };
        Self::parse_from(args)
    }
}
