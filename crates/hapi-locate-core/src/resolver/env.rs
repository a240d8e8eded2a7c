//! Environment provider trait for testable path resolution.

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Production environment provider that reads from the actual process environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// In-memory environment with predefined variables.
///
/// Counts lookups so callers can assert that a code path never consulted
/// the environment.
#[derive(Default)]
pub struct MemoryEnv {
    vars: HashMap<String, OsString>,
    reads: AtomicUsize,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Number of `get` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl EnvProvider for MemoryEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.vars.get(key).cloned()
    }
}
