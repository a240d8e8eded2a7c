//! Types for SDK installation resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::registry::RegistryRoot;
use crate::platform::TargetPlatform;
use crate::version::SdkVersion;

/// Default vendor directory on Windows hosts.
pub const DEFAULT_VENDOR_INSTALL_ROOT: &str = "C:/Program Files/Side Effects Software";

/// Environment variable read on Linux.
pub const DEFAULT_SDK_ENV_VAR: &str = "HFS";

/// Installable product flavours, each with its own registry subkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Product {
    /// The standalone engine (`Houdini Engine <v>`).
    Engine,
    /// The full application (`Houdini <v>`).
    Houdini,
}

impl Product {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Engine => "Houdini Engine",
            Self::Houdini => "Houdini",
        }
    }

    /// Registry subkey / install directory name for a given version.
    pub fn versioned_name(self, version: &str) -> String {
        format!("{} {version}", self.label())
    }

    /// Value on the vendor key naming the active version of this product.
    pub const fn active_value_name(self) -> &'static str {
        match self {
            Self::Engine => "ActiveEngineVersion",
            Self::Houdini => "ActiveVersion",
        }
    }
}

/// What to do when no installation is found on a supported platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Absence is an error.
    Strict,
    /// Absence yields an empty resolution.
    #[default]
    Permissive,
}

/// Where a candidate path came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CandidateSource {
    ExplicitOverride,
    RegistryInstallPath {
        product: Product,
        root: RegistryRoot,
    },
    DefaultInstallDir {
        product: Product,
    },
    AppBundle,
    SteamBundle,
    LegacyFramework,
    StaticPath,
    ActiveVersion {
        product: Product,
        active: Option<String>,
    },
    EnvironmentVariable {
        name: String,
    },
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitOverride => write!(f, "explicit override"),
            Self::RegistryInstallPath { product, root } => match root {
                RegistryRoot::Primary => write!(f, "{} registry key", product.label()),
                RegistryRoot::Wow6432 => {
                    write!(f, "{} registry key (WOW6432Node)", product.label())
                }
            },
            Self::DefaultInstallDir { product } => {
                write!(f, "default {} install dir", product.label())
            }
            Self::AppBundle => write!(f, "application bundle"),
            Self::SteamBundle => write!(f, "Steam application bundle"),
            Self::LegacyFramework => write!(f, "legacy framework"),
            Self::StaticPath => write!(f, "configured static path"),
            Self::ActiveVersion { product, active } => match active {
                Some(active) => write!(f, "active {} version {active}", product.label()),
                None => write!(f, "active {} version (unset)", product.label()),
            },
            Self::EnvironmentVariable { name } => write!(f, "environment variable ${name}"),
        }
    }
}

/// A location worth probing. `path` is `None` when the source had no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub source: CandidateSource,
    pub path: Option<PathBuf>,
}

impl Candidate {
    pub const fn new(source: CandidateSource, path: Option<PathBuf>) -> Self {
        Self { source, path }
    }
}

/// A single probe of a candidate during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub candidate: Candidate,
    pub outcome: AttemptOutcome,
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    /// Directory exists (success case).
    Found,
    /// Directory does not exist.
    NotFound,
    /// The source had no value to probe (registry value or env var absent).
    Unresolved,
    /// The same path was already probed earlier in this pass.
    AlreadyProbed,
    /// Active version does not share the desired major.minor.
    VersionMismatch,
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => write!(f, "found"),
            Self::NotFound => write!(f, "not found"),
            Self::Unresolved => write!(f, "no value"),
            Self::AlreadyProbed => write!(f, "already probed"),
            Self::VersionMismatch => write!(f, "major.minor mismatch"),
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.candidate.path {
            Some(path) => write!(
                f,
                "{}: {} ({})",
                self.candidate.source,
                path.display(),
                self.outcome
            ),
            None => write!(f, "{}: ({})", self.candidate.source, self.outcome),
        }
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub platform: TargetPlatform,
    pub version: SdkVersion,
    /// The winning install root, `None` when nothing matched.
    pub install_dir: Option<PathBuf>,
    /// Source of the winning candidate.
    pub source: Option<CandidateSource>,
    /// Every candidate considered, in order.
    pub attempts: Vec<Attempt>,
}

impl Resolution {
    pub const fn is_found(&self) -> bool {
        self.install_dir.is_some()
    }

    pub fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    /// Human-readable trace of the pass, one line per attempt plus a verdict.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .attempts
            .iter()
            .map(|attempt| format!("Looking for Houdini {}: {attempt}", self.version))
            .collect();

        match &self.install_dir {
            Some(dir) => lines.push(format!("Found Houdini in {}", dir.display())),
            None => lines.push(format!(
                "Houdini {} could not be found. Houdini Engine will not be available in this build.",
                self.version
            )),
        }
        lines
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "platform = {}", self.platform)?;
        writeln!(f, "version = {}", self.version)?;
        match &self.install_dir {
            Some(dir) => writeln!(f, "install_dir = {}", dir.display())?,
            None => writeln!(f, "install_dir = ")?,
        }
        match &self.source {
            Some(source) => write!(f, "source = {source}"),
            None => write!(f, "source = "),
        }
    }
}

/// Error returned when resolution cannot proceed or (strictly) fails.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Houdini Engine: compiling for unsupported platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("SDK version is empty")]
    EmptyVersion,

    #[error("Houdini {version} could not be found. Tried:\n{attempts}")]
    VersionNotFound { version: String, attempts: String },
}

impl LocateError {
    /// Create a `VersionNotFound` error with formatted attempt details.
    pub fn not_found(version: &SdkVersion, attempts: &[Attempt]) -> Self {
        let attempts_str = attempts
            .iter()
            .map(|a| format!("  ✗ {a}"))
            .collect::<Vec<_>>()
            .join("\n");

        Self::VersionNotFound {
            version: version.to_string(),
            attempts: if attempts_str.is_empty() {
                "  (no candidates checked)".to_string()
            } else {
                attempts_str
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_attempts() {
        let version = SdkVersion::new("19.0.500").unwrap();
        let attempts = vec![Attempt {
            candidate: Candidate::new(
                CandidateSource::EnvironmentVariable {
                    name: "HFS".to_string(),
                },
                None,
            ),
            outcome: AttemptOutcome::Unresolved,
        }];

        let err = LocateError::not_found(&version, &attempts);
        let message = err.to_string();
        assert!(message.contains("Houdini 19.0.500 could not be found"));
        assert!(message.contains("environment variable $HFS: (no value)"));
    }

    #[test]
    fn test_not_found_without_attempts() {
        let version = SdkVersion::new("19.0.500").unwrap();
        let err = LocateError::not_found(&version, &[]);
        assert!(err.to_string().contains("(no candidates checked)"));
    }

    #[test]
    fn test_versioned_names() {
        assert_eq!(
            Product::Engine.versioned_name("19.0.500"),
            "Houdini Engine 19.0.500"
        );
        assert_eq!(Product::Houdini.active_value_name(), "ActiveVersion");
    }
}
