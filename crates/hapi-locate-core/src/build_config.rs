//! Build configuration derived from a resolution.
//!
//! This is what a plugin build consumes: an include search path, a library
//! search directory plus file name, and preprocessor definitions.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::layout::{IncludeResolution, LibraryLayout, resolve_include_dir};
use crate::platform::TargetPlatform;
use crate::resolver::{FsProvider, Resolution};

/// Definition carrying the resolved install root into native code.
pub const HFS_PATH_DEFINE: &str = "HOUDINI_ENGINE_HFS_PATH_DEFINE";

/// A `NAME=value` preprocessor definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub name: String,
    pub value: String,
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Everything the plugin build needs from the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    pub platform: TargetPlatform,
    /// Install root with forward slashes, `None` when the SDK was not found.
    pub install_dir: Option<PathBuf>,
    pub include: Option<IncludeResolution>,
    pub library_dir: Option<PathBuf>,
    pub library_name: Option<String>,
    pub definitions: Vec<Definition>,
}

impl BuildConfiguration {
    /// Derive the configuration for `resolution`.
    ///
    /// With no install root everything stays empty and dependent
    /// functionality is expected to be disabled by the caller.
    pub fn from_resolution(resolution: &Resolution, fs: &dyn FsProvider, loader: bool) -> Self {
        let platform = resolution.platform.clone();
        let Some(raw_dir) = resolution.install_dir() else {
            return Self {
                platform,
                install_dir: None,
                include: None,
                library_dir: None,
                library_name: None,
                definitions: Vec::new(),
            };
        };

        let install_dir = normalize_separators(raw_dir);
        let include = resolve_include_dir(&install_dir, fs);
        let layout = LibraryLayout::for_platform(&platform, loader);

        // Only the Windows toolchain needs the path baked in at compile time.
        let mut definitions = Vec::new();
        if platform == TargetPlatform::Windows {
            definitions.push(Definition {
                name: HFS_PATH_DEFINE.to_string(),
                value: install_dir.to_string_lossy().into_owned(),
            });
        }

        info!(
            install_dir = %install_dir.display(),
            include_dir = ?include.path(),
            "Derived Houdini Engine build configuration"
        );

        Self {
            library_dir: layout.map(|l| l.library_dir(&install_dir)),
            library_name: layout.map(|l| l.file_name.to_string()),
            include: Some(include),
            install_dir: Some(install_dir),
            platform,
            definitions,
        }
    }

    pub fn include_dir(&self) -> Option<&Path> {
        self.include.as_ref().and_then(IncludeResolution::path)
    }

    /// Install root found but headers absent.
    pub fn headers_missing(&self) -> bool {
        matches!(self.include, Some(IncludeResolution::Missing))
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt_path(path: Option<&Path>) -> String {
            path.map(|p| p.display().to_string()).unwrap_or_default()
        }

        writeln!(f, "platform = {}", self.platform)?;
        writeln!(f, "install_dir = {}", opt_path(self.install_dir.as_deref()))?;
        writeln!(f, "include_dir = {}", opt_path(self.include_dir()))?;
        writeln!(f, "library_dir = {}", opt_path(self.library_dir.as_deref()))?;
        writeln!(
            f,
            "library_name = {}",
            self.library_name.as_deref().unwrap_or_default()
        )?;
        let definitions = self
            .definitions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "definitions = {definitions}")
    }
}

/// Replace backslashes with forward slashes, as registry values use `\`.
pub fn normalize_separators(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}
