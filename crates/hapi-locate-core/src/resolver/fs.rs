//! Filesystem provider trait for testable path resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for filesystem existence checks (injectable for testing).
#[cfg_attr(test, mockall::automock)]
pub trait FsProvider: Send + Sync {
    /// Whether `path` names an existing directory.
    ///
    /// Access errors count as "does not exist".
    fn is_dir(&self, path: &Path) -> bool;
}

/// Production filesystem provider that uses real filesystem operations.
pub struct SystemFs;

impl FsProvider for SystemFs {
    fn is_dir(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        std::fs::metadata(path).is_ok_and(|meta| meta.is_dir())
    }
}

/// In-memory filesystem holding a fixed set of directories.
///
/// Only exact paths registered with [`MemoryFs::with_dir`] exist; parents
/// are not implied.
#[derive(Default)]
pub struct MemoryFs {
    dirs: HashSet<PathBuf>,
    probes: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Number of `is_dir` calls served so far.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }
}

impl FsProvider for MemoryFs {
    fn is_dir(&self, path: &Path) -> bool {
        self.probes.fetch_add(1, Ordering::Relaxed);
        self.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_system_fs_detects_directories() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("libHAPIL.so");
        std::fs::write(&file, b"stub").unwrap();

        assert!(SystemFs.is_dir(temp.path()));
        assert!(!SystemFs.is_dir(&file));
        assert!(!SystemFs.is_dir(&temp.path().join("missing")));
        assert!(!SystemFs.is_dir(Path::new("")));
    }

    #[test]
    fn test_memory_fs_exact_match_only() {
        let fs = MemoryFs::new().with_dir("/opt/hfs19.0/toolkit/include/HAPI");
        assert!(fs.is_dir(Path::new("/opt/hfs19.0/toolkit/include/HAPI")));
        assert!(!fs.is_dir(Path::new("/opt/hfs19.0")));
        assert_eq!(fs.probe_count(), 2);
    }
}
