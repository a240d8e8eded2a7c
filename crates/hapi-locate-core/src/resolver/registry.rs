//! Registry provider trait for testable path resolution.
//!
//! The installer writes one subkey per installed product under the vendor
//! key, e.g. `Houdini Engine 19.0.500` with an `InstallPath` value, and the
//! vendor key itself carries `ActiveEngineVersion` / `ActiveVersion`.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Vendor key under `HKEY_LOCAL_MACHINE`, in both registry views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegistryRoot {
    /// `SOFTWARE\Side Effects Software`
    Primary,
    /// `SOFTWARE\WOW6432Node\Side Effects Software` (32-bit view)
    Wow6432,
}

impl RegistryRoot {
    /// Lookup order for roots.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Wow6432];

    /// Key path relative to `HKEY_LOCAL_MACHINE`.
    pub const fn key_path(self) -> &'static str {
        match self {
            Self::Primary => r"SOFTWARE\Side Effects Software",
            Self::Wow6432 => r"SOFTWARE\WOW6432Node\Side Effects Software",
        }
    }
}

impl fmt::Display for RegistryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r"HKEY_LOCAL_MACHINE\{}", self.key_path())
    }
}

/// Read-only access to string values in the vendor registry keys.
pub trait RegistryProvider: Send + Sync {
    /// Read value `name` from `root` (or from `root\subkey` when given).
    ///
    /// Missing keys, missing values and access errors all yield `None`.
    fn lookup(&self, root: RegistryRoot, subkey: Option<&str>, name: &str) -> Option<String>;
}

/// Production registry provider backed by the Windows registry.
///
/// On other hosts every lookup yields `None`.
pub struct SystemRegistry;

#[cfg(windows)]
impl RegistryProvider for SystemRegistry {
    fn lookup(&self, root: RegistryRoot, subkey: Option<&str>, name: &str) -> Option<String> {
        use winreg::RegKey;
        use winreg::enums::HKEY_LOCAL_MACHINE;

        let path = match subkey {
            Some(subkey) => format!(r"{}\{subkey}", root.key_path()),
            None => root.key_path().to_string(),
        };
        let key = RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey(&path).ok()?;
        key.get_value::<String, _>(name).ok()
    }
}

#[cfg(not(windows))]
impl RegistryProvider for SystemRegistry {
    fn lookup(&self, _root: RegistryRoot, _subkey: Option<&str>, _name: &str) -> Option<String> {
        None
    }
}

type ValueKey = (RegistryRoot, Option<String>, String);

/// In-memory registry for tests on any host.
#[derive(Default)]
pub struct MemoryRegistry {
    values: HashMap<ValueKey, String>,
    reads: AtomicUsize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set value `name` on `root` or `root\subkey`.
    #[must_use]
    pub fn with_value(
        mut self,
        root: RegistryRoot,
        subkey: Option<&str>,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        self.values.insert(
            (root, subkey.map(str::to_string), name.to_string()),
            value.into(),
        );
        self
    }

    /// Shorthand for the `InstallPath` value of a product subkey.
    #[must_use]
    pub fn with_install_path(
        self,
        root: RegistryRoot,
        subkey: &str,
        path: impl Into<String>,
    ) -> Self {
        self.with_value(root, Some(subkey), "InstallPath", path)
    }

    /// Number of `lookup` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl RegistryProvider for MemoryRegistry {
    fn lookup(&self, root: RegistryRoot, subkey: Option<&str>, name: &str) -> Option<String> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.values
            .get(&(root, subkey.map(str::to_string), name.to_string()))
            .cloned()
    }
}
