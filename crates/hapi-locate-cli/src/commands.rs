//! Subcommand definitions.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the SDK install root and print it as `key = value` lines
    Resolve {
        /// Also print every candidate that was considered
        #[arg(long)]
        attempts: bool,
    },
    /// Print include path, library and definitions for the plugin build
    BuildConfig {
        /// Emit JSON instead of `key = value` lines
        #[arg(long)]
        json: bool,
    },
    /// Show the probe order for the target platform without probing
    Plan,
    /// Exit non-zero unless both the SDK and its headers are found
    Check,
}
