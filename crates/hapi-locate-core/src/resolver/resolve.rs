//! Main installation resolution logic.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::env::{EnvProvider, SystemEnv};
use super::fs::{FsProvider, SystemFs};
use super::plan::{CandidateExpander, Expanded, candidate_plan};
use super::registry::{RegistryProvider, SystemRegistry};
use super::request::LocateRequest;
use super::types::{Attempt, AttemptOutcome, Candidate, LocateError, Resolution, ResolutionPolicy};

/// Resolve the SDK install root for `request` against the real host.
///
/// Search order:
/// 1. Explicit override
/// 2. Platform plan (see [`candidate_plan`])
/// 3. Policy decides whether an empty result is an error
pub fn resolve_installation(request: &LocateRequest) -> Result<Resolution, LocateError> {
    resolve_installation_with_deps(request, &SystemEnv, &SystemFs, &SystemRegistry)
}

/// Resolve with injected dependencies (for testing).
pub fn resolve_installation_with_deps(
    request: &LocateRequest,
    env: &dyn EnvProvider,
    fs: &dyn FsProvider,
    registry: &dyn RegistryProvider,
) -> Result<Resolution, LocateError> {
    if !request.platform.is_supported() {
        warn!(platform = %request.platform, "Houdini Engine: compiling for unsupported platform");
        return Err(LocateError::UnsupportedPlatform(
            request.platform.name().to_string(),
        ));
    }

    if !request.version.is_well_formed() {
        debug!(version = %request.version, "SDK version is not MAJOR.MINOR.BUILD, matching it verbatim");
    }

    let expander = CandidateExpander::new(request, env, registry);
    let mut attempts = Vec::new();
    let mut probed: HashSet<PathBuf> = HashSet::new();

    for step in candidate_plan(&request.platform) {
        let Some(expanded) = expander.expand(step) else {
            continue;
        };

        let attempt = match expanded {
            Expanded::Rejected(attempt) => attempt,
            Expanded::Probe(candidate) => {
                let outcome = probe(&candidate, fs, &mut probed);
                Attempt { candidate, outcome }
            }
        };

        debug!(
            version = %request.version,
            source = %attempt.candidate.source,
            path = ?attempt.candidate.path,
            outcome = %attempt.outcome,
            "Looking for Houdini"
        );

        let found = attempt.outcome == AttemptOutcome::Found;
        let winner = found.then(|| attempt.candidate.clone());
        attempts.push(attempt);

        if let Some(Candidate {
            source,
            path: Some(path),
        }) = winner
        {
            info!(path = %path.display(), %source, "Found Houdini");
            return Ok(Resolution {
                platform: request.platform.clone(),
                version: request.version.clone(),
                install_dir: Some(path),
                source: Some(source),
                attempts,
            });
        }
    }

    warn!(
        version = %request.version,
        attempts = attempts.len(),
        "Houdini could not be found. Houdini Engine will not be available in this build."
    );

    match request.policy {
        ResolutionPolicy::Strict => Err(LocateError::not_found(&request.version, &attempts)),
        ResolutionPolicy::Permissive => Ok(Resolution {
            platform: request.platform.clone(),
            version: request.version.clone(),
            install_dir: None,
            source: None,
            attempts,
        }),
    }
}

/// Probe one candidate, never checking the same path twice in a pass.
fn probe(candidate: &Candidate, fs: &dyn FsProvider, probed: &mut HashSet<PathBuf>) -> AttemptOutcome {
    let Some(path) = &candidate.path else {
        return AttemptOutcome::Unresolved;
    };

    if !probed.insert(path.clone()) {
        return AttemptOutcome::AlreadyProbed;
    }

    if fs.is_dir(path) {
        AttemptOutcome::Found
    } else {
        AttemptOutcome::NotFound
    }
}
