//! Locator settings.
//!
//! Settings come from three layers, later ones winning:
//! 1. `settings.json` (see [`default_settings_path`])
//! 2. `HAPI_LOCATE_*` environment variables
//! 3. Explicit values set by the caller (CLI flags)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::TargetPlatform;
use crate::resolver::{
    DEFAULT_SDK_ENV_VAR, DEFAULT_VENDOR_INSTALL_ROOT, EnvProvider, LocateRequest, ResolutionPolicy,
};
use crate::version::SdkVersion;

/// SDK version this plugin is built against.
pub const DEFAULT_SDK_VERSION: &str = "19.0.500";

pub const ENV_SDK_VERSION: &str = "HAPI_LOCATE_SDK_VERSION";
pub const ENV_OVERRIDE: &str = "HAPI_LOCATE_OVERRIDE";
pub const ENV_STATIC_PATH: &str = "HAPI_LOCATE_STATIC_PATH";
pub const ENV_POLICY: &str = "HAPI_LOCATE_POLICY";
pub const ENV_SDK_ENV_VAR: &str = "HAPI_LOCATE_ENV_VAR";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid settings file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Cannot determine home directory")]
    NoHomeDir,
}

/// Persistent locator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocatorSettings {
    /// Version the plugin was compiled against.
    pub sdk_version: String,

    /// Pinned install root (CI / pinned builds).
    pub install_override: Option<String>,

    /// macOS fallback probed after the bundle paths.
    pub static_path: Option<String>,

    pub policy: ResolutionPolicy,

    /// Variable consulted on Linux.
    pub env_var: String,

    /// Prefix of the conventional Windows install directories.
    pub vendor_install_root: String,

    /// Link against the loader library (`libHAPIL`) instead of `libHAPI`.
    pub use_loader_library: bool,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            sdk_version: DEFAULT_SDK_VERSION.to_string(),
            install_override: None,
            static_path: None,
            policy: ResolutionPolicy::Permissive,
            env_var: DEFAULT_SDK_ENV_VAR.to_string(),
            vendor_install_root: DEFAULT_VENDOR_INSTALL_ROOT.to_string(),
            use_loader_library: true,
        }
    }
}

impl LocatorSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `HAPI_LOCATE_*` overrides. Empty values are ignored.
    pub fn apply_env(&mut self, env: &dyn EnvProvider) -> Result<(), SettingsError> {
        let read = |key: &str| {
            env.get(key)
                .map(|v| v.to_string_lossy().trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(version) = read(ENV_SDK_VERSION) {
            self.sdk_version = version;
        }
        if let Some(path) = read(ENV_OVERRIDE) {
            self.install_override = Some(path);
        }
        if let Some(path) = read(ENV_STATIC_PATH) {
            self.static_path = Some(path);
        }
        if let Some(policy) = read(ENV_POLICY) {
            self.policy = parse_policy(&policy)?;
        }
        if let Some(name) = read(ENV_SDK_ENV_VAR) {
            self.env_var = name;
        }
        Ok(())
    }

    /// Build a resolution request for `platform`.
    pub fn to_request(&self, platform: TargetPlatform) -> Result<LocateRequest, SettingsError> {
        validate_settings(self)?;

        let version =
            SdkVersion::new(self.sdk_version.as_str()).map_err(|e| SettingsError::InvalidValue {
                field: "sdk_version",
                reason: e.to_string(),
            })?;

        let mut request = LocateRequest::new(platform, version)
            .with_policy(self.policy)
            .with_env_var(self.env_var.as_str());
        request.vendor_install_root.clone_from(&self.vendor_install_root);

        if let Some(path) = &self.install_override {
            request = request.with_override(normalize_user_path(path)?);
        }
        if let Some(path) = &self.static_path {
            request = request.with_static_path(normalize_user_path(path)?);
        }
        Ok(request)
    }
}

/// Validate settings values.
pub fn validate_settings(settings: &LocatorSettings) -> Result<(), SettingsError> {
    if settings.sdk_version.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "sdk_version",
            reason: "must not be empty".to_string(),
        });
    }
    if settings.env_var.trim().is_empty() || settings.env_var.contains('=') {
        return Err(SettingsError::InvalidValue {
            field: "env_var",
            reason: format!("'{}' is not a valid variable name", settings.env_var),
        });
    }
    if settings.vendor_install_root.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "vendor_install_root",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Parse `strict` / `permissive` (case-insensitive).
pub fn parse_policy(raw: &str) -> Result<ResolutionPolicy, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(ResolutionPolicy::Strict),
        "permissive" => Ok(ResolutionPolicy::Permissive),
        other => Err(SettingsError::InvalidValue {
            field: "policy",
            reason: format!("expected 'strict' or 'permissive', got '{other}'"),
        }),
    }
}

/// Default settings location: `<config dir>/hapi-locate/settings.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hapi-locate").join("settings.json"))
}

/// Expand a leading `~`. Paths are otherwise kept verbatim.
fn normalize_user_path(raw: &str) -> Result<PathBuf, SettingsError> {
    let trimmed = raw.trim();
    if trimmed == "~" || trimmed.starts_with("~/") {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        return Ok(if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        });
    }
    Ok(PathBuf::from(trimmed))
}
