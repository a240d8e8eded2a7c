//! Target platform identification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform the plugin is being configured for.
///
/// `Other` carries the name the caller supplied so that the unsupported
/// platform can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
    Other(String),
}

impl TargetPlatform {
    /// Detect the platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other(std::env::consts::OS.to_string())
        }
    }

    /// Whether the SDK ships for this platform.
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Short lowercase name, matching the accepted parse spelling.
    pub fn name(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetPlatform {
    type Err = std::convert::Infallible;

    /// Parsing never fails: unknown names become [`TargetPlatform::Other`]
    /// and are rejected later by the resolver.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "windows" | "win64" | "win" => Self::Windows,
            "macos" | "mac" | "darwin" | "osx" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}
