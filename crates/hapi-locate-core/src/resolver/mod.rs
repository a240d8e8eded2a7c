//! Houdini installation resolution.
//!
//! Given a target platform and the SDK version a plugin was built against,
//! find the installed SDK root by probing candidate locations in a fixed
//! priority order. The first existing directory wins.
//!
//! ## Architecture
//!
//! The resolver is split into small, focused modules:
//! - `types`: Core types (`Resolution`, `Attempt`, `CandidateSource`, `LocateError`)
//! - `request`: Resolution inputs (`LocateRequest`)
//! - `env`: Environment variable access trait (injectable for testing)
//! - `fs`: Filesystem existence trait (injectable for testing)
//! - `registry`: Windows registry access trait (injectable for testing)
//! - `plan`: Per-platform candidate order and lazy candidate expansion
//! - `resolve`: Main resolution loop and policy handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hapi_locate_core::resolver::{LocateRequest, resolve_installation};
//! use hapi_locate_core::{SdkVersion, TargetPlatform};
//!
//! let request = LocateRequest::new(TargetPlatform::host(), SdkVersion::new("19.0.500").unwrap());
//! let resolution = resolve_installation(&request).unwrap();
//! for line in resolution.diagnostics() {
//!     println!("{line}");
//! }
//! ```

mod env;
mod fs;
mod plan;
mod registry;
mod request;
mod resolve;
mod types;

pub use env::{EnvProvider, MemoryEnv, SystemEnv};
pub use fs::{FsProvider, MemoryFs, SystemFs};
pub use plan::{CandidateExpander, CandidateStep, Expanded, candidate_plan};
pub use registry::{MemoryRegistry, RegistryProvider, RegistryRoot, SystemRegistry};
pub use request::LocateRequest;
pub use resolve::{resolve_installation, resolve_installation_with_deps};
pub use types::{
    Attempt, AttemptOutcome, Candidate, CandidateSource, DEFAULT_SDK_ENV_VAR,
    DEFAULT_VENDOR_INSTALL_ROOT, LocateError, Product, Resolution, ResolutionPolicy,
};

#[cfg(test)]
pub use fs::MockFsProvider;
