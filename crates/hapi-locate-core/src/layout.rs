//! SDK tree layout: where headers and the HAPI library live under an
//! install root.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::platform::TargetPlatform;
use crate::resolver::FsProvider;

/// Headers shipped with a regular install.
pub const TOOLKIT_INCLUDE_SUBDIR: &str = "toolkit/include/HAPI";

/// Headers in a custom/development tree that has no toolkit folder yet.
pub const CUSTOM_INCLUDE_SUBDIR: &str = "custom/houdini/include/HAPI";

/// Outcome of looking for the HAPI headers under an install root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IncludeResolution {
    Primary(PathBuf),
    Custom(PathBuf),
    /// Install root found but neither header directory exists.
    Missing,
}

impl IncludeResolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Primary(path) | Self::Custom(path) => Some(path),
            Self::Missing => None,
        }
    }
}

/// Find the HAPI include directory under `install_dir`.
pub fn resolve_include_dir(install_dir: &Path, fs: &dyn FsProvider) -> IncludeResolution {
    let primary = install_dir.join(TOOLKIT_INCLUDE_SUBDIR);
    if fs.is_dir(&primary) {
        return IncludeResolution::Primary(primary);
    }

    let custom = install_dir.join(CUSTOM_INCLUDE_SUBDIR);
    if fs.is_dir(&custom) {
        return IncludeResolution::Custom(custom);
    }

    warn!(install_dir = %install_dir.display(), "Couldn't find the HAPI include folder");
    IncludeResolution::Missing
}

/// Where the HAPI shared library lives and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryLayout {
    /// Folder under the install root holding the library.
    pub subdir: &'static str,
    pub file_name: &'static str,
}

impl LibraryLayout {
    /// Layout for `platform`; `loader` selects the thin loader library
    /// (`libHAPIL`) over the full one (`libHAPI`).
    pub const fn for_platform(platform: &TargetPlatform, loader: bool) -> Option<Self> {
        let (subdir, loader_name, full_name) = match platform {
            TargetPlatform::Windows => ("bin", "libHAPIL.dll", "libHAPI.dll"),
            TargetPlatform::MacOs => ("dsolib", "libHAPIL.dylib", "libHAPI.dylib"),
            TargetPlatform::Linux => ("dsolib", "libHAPIL.so", "libHAPI.so"),
            TargetPlatform::Other(_) => return None,
        };
        Some(Self {
            subdir,
            file_name: if loader { loader_name } else { full_name },
        })
    }

    pub fn library_dir(&self, install_dir: &Path) -> PathBuf {
        install_dir.join(self.subdir)
    }
}
