//! Resolution inputs.

use std::path::PathBuf;

use super::types::{DEFAULT_SDK_ENV_VAR, DEFAULT_VENDOR_INSTALL_ROOT, ResolutionPolicy};
use crate::platform::TargetPlatform;
use crate::version::SdkVersion;

/// Everything one resolution pass needs besides the host providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateRequest {
    pub platform: TargetPlatform,
    /// Version the plugin was built against.
    pub version: SdkVersion,
    /// Pinned install root; wins over every other candidate when it exists.
    pub explicit_override: Option<PathBuf>,
    /// macOS fallback probed after the bundle locations.
    pub static_path: Option<PathBuf>,
    pub policy: ResolutionPolicy,
    /// Variable holding the install root on Linux.
    pub env_var: String,
    /// Prefix for the conventional Windows install directories.
    pub vendor_install_root: String,
}

impl LocateRequest {
    pub fn new(platform: TargetPlatform, version: SdkVersion) -> Self {
        Self {
            platform,
            version,
            explicit_override: None,
            static_path: None,
            policy: ResolutionPolicy::default(),
            env_var: DEFAULT_SDK_ENV_VAR.to_string(),
            vendor_install_root: DEFAULT_VENDOR_INSTALL_ROOT.to_string(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_override = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_static_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }
}
