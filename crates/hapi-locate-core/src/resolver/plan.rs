//! Platform-specific candidate plans.
//!
//! A plan is the ordered list of [`CandidateStep`]s probed for a platform.
//! Steps are expanded lazily by [`CandidateExpander`] so that registry and
//! environment reads only happen once every earlier step has failed.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::env::EnvProvider;
use super::registry::{RegistryProvider, RegistryRoot};
use super::request::LocateRequest;
use super::types::{Attempt, AttemptOutcome, Candidate, CandidateSource, Product};
use crate::platform::TargetPlatform;

const INSTALL_PATH_VALUE: &str = "InstallPath";

/// One entry in a platform's probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandidateStep {
    ExplicitOverride,
    RegistryInstallPath { product: Product, root: RegistryRoot },
    DefaultInstallDir { product: Product },
    ActiveVersion { product: Product },
    AppBundle,
    SteamBundle,
    LegacyFramework,
    StaticPath,
    EnvironmentVariable,
}

impl fmt::Display for CandidateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitOverride => write!(f, "explicit override"),
            Self::RegistryInstallPath { product, root } => {
                write!(f, r"{root}\{} <version> InstallPath", product.label())
            }
            Self::DefaultInstallDir { product } => {
                write!(f, "default {} <version> install dir", product.label())
            }
            Self::ActiveVersion { product } => write!(
                f,
                "{} fallback (same major.minor only)",
                product.active_value_name()
            ),
            Self::AppBundle => write!(f, "/Applications bundle"),
            Self::SteamBundle => write!(f, "Steam bundle"),
            Self::LegacyFramework => write!(f, "/Library/Frameworks"),
            Self::StaticPath => write!(f, "configured static path"),
            Self::EnvironmentVariable => write!(f, "SDK environment variable"),
        }
    }
}

/// Ordered probe plan for `platform`. Empty for unsupported platforms.
pub fn candidate_plan(platform: &TargetPlatform) -> Vec<CandidateStep> {
    use CandidateStep as S;

    let platform_steps = match platform {
        TargetPlatform::Windows => vec![
            S::RegistryInstallPath {
                product: Product::Engine,
                root: RegistryRoot::Primary,
            },
            S::RegistryInstallPath {
                product: Product::Engine,
                root: RegistryRoot::Wow6432,
            },
            S::DefaultInstallDir {
                product: Product::Engine,
            },
            S::RegistryInstallPath {
                product: Product::Houdini,
                root: RegistryRoot::Primary,
            },
            S::RegistryInstallPath {
                product: Product::Houdini,
                root: RegistryRoot::Wow6432,
            },
            S::DefaultInstallDir {
                product: Product::Houdini,
            },
            S::ActiveVersion {
                product: Product::Engine,
            },
            S::ActiveVersion {
                product: Product::Houdini,
            },
        ],
        TargetPlatform::MacOs => vec![
            S::AppBundle,
            S::SteamBundle,
            S::LegacyFramework,
            S::StaticPath,
        ],
        TargetPlatform::Linux => vec![S::EnvironmentVariable],
        TargetPlatform::Other(_) => return Vec::new(),
    };

    let mut plan = Vec::with_capacity(platform_steps.len() + 1);
    plan.push(S::ExplicitOverride);
    plan.extend(platform_steps);
    plan
}

/// A step expanded into either something to probe or an attempt that was
/// rejected without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expanded {
    Probe(Candidate),
    Rejected(Attempt),
}

/// Turns plan steps into concrete candidates for one request.
pub struct CandidateExpander<'a> {
    request: &'a LocateRequest,
    env: &'a dyn EnvProvider,
    registry: &'a dyn RegistryProvider,
}

impl<'a> CandidateExpander<'a> {
    pub fn new(
        request: &'a LocateRequest,
        env: &'a dyn EnvProvider,
        registry: &'a dyn RegistryProvider,
    ) -> Self {
        Self {
            request,
            env,
            registry,
        }
    }

    /// Expand one step. Returns `None` for steps that do not apply
    /// (e.g. no override configured).
    pub fn expand(&self, step: CandidateStep) -> Option<Expanded> {
        let version = self.request.version.as_str();

        let candidate = match step {
            CandidateStep::ExplicitOverride => Candidate::new(
                CandidateSource::ExplicitOverride,
                Some(self.request.explicit_override.clone()?),
            ),
            CandidateStep::RegistryInstallPath { product, root } => Candidate::new(
                CandidateSource::RegistryInstallPath { product, root },
                self.install_path(root, product, version).map(PathBuf::from),
            ),
            CandidateStep::DefaultInstallDir { product } => Candidate::new(
                CandidateSource::DefaultInstallDir { product },
                Some(PathBuf::from(format!(
                    "{}/{}",
                    self.request.vendor_install_root.trim_end_matches(['/', '\\']),
                    product.versioned_name(version)
                ))),
            ),
            CandidateStep::ActiveVersion { product } => return Some(self.active_version(product)),
            CandidateStep::AppBundle => Candidate::new(
                CandidateSource::AppBundle,
                Some(PathBuf::from(format!(
                    "/Applications/Houdini/Houdini{version}/Frameworks/Houdini.framework/Versions/Current/Resources"
                ))),
            ),
            CandidateStep::SteamBundle => Candidate::new(
                CandidateSource::SteamBundle,
                Some(PathBuf::from(
                    "/Users/Shared/Houdini/HoudiniIndieSteam/Frameworks/Houdini.framework/Versions/Current/Resources",
                )),
            ),
            CandidateStep::LegacyFramework => Candidate::new(
                CandidateSource::LegacyFramework,
                Some(PathBuf::from(format!(
                    "/Library/Frameworks/Houdini.framework/Versions/{version}/Resources"
                ))),
            ),
            CandidateStep::StaticPath => Candidate::new(
                CandidateSource::StaticPath,
                Some(self.request.static_path.clone()?),
            ),
            CandidateStep::EnvironmentVariable => {
                let name = self.request.env_var.clone();
                let value = self
                    .env
                    .get(&name)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from);
                Candidate::new(CandidateSource::EnvironmentVariable { name }, value)
            }
        };

        Some(Expanded::Probe(candidate))
    }

    fn install_path(&self, root: RegistryRoot, product: Product, version: &str) -> Option<String> {
        self.registry
            .lookup(root, Some(&product.versioned_name(version)), INSTALL_PATH_VALUE)
            .filter(|path| !path.trim().is_empty())
    }

    fn active_version(&self, product: Product) -> Expanded {
        let active = RegistryRoot::ALL
            .into_iter()
            .find_map(|root| self.registry.lookup(root, None, product.active_value_name()))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let Some(active) = active else {
            return Expanded::Rejected(Attempt {
                candidate: Candidate::new(
                    CandidateSource::ActiveVersion {
                        product,
                        active: None,
                    },
                    None,
                ),
                outcome: AttemptOutcome::Unresolved,
            });
        };

        let source = CandidateSource::ActiveVersion {
            product,
            active: Some(active.clone()),
        };

        if !self.request.version.shares_major_minor(&active) {
            return Expanded::Rejected(Attempt {
                candidate: Candidate::new(source, None),
                outcome: AttemptOutcome::VersionMismatch,
            });
        }

        let path = RegistryRoot::ALL
            .into_iter()
            .find_map(|root| self.install_path(root, product, &active))
            .map(PathBuf::from);
        Expanded::Probe(Candidate::new(source, path))
    }
}
