//! Integration tests for SDK installation resolution.
//!
//! These run the full cascade against in-memory hosts, so Windows registry
//! scenarios are exercised on every CI platform.

use std::path::{Path, PathBuf};

use hapi_locate_core::resolver::{
    AttemptOutcome, CandidateSource, LocateError, LocateRequest, MemoryEnv, MemoryFs,
    MemoryRegistry, Product, RegistryRoot, resolve_installation_with_deps,
};
use hapi_locate_core::{
    BuildConfiguration, IncludeResolution, SdkVersion, TargetPlatform, resolve_include_dir,
};

const VERSION: &str = "19.0.500";
const HOUDINI_DEFAULT: &str = "C:/Program Files/Side Effects Software/Houdini 19.0.500";

fn request(platform: TargetPlatform) -> LocateRequest {
    LocateRequest::new(platform, SdkVersion::new(VERSION).expect("valid version"))
}

/// Unsupported platforms fail before any host state is read.
#[test]
fn unsupported_platform_fails_without_probing() {
    for name in ["ps5", "android", "ios", ""] {
        let env = MemoryEnv::new().with_var("HFS", "/opt/hfs");
        let fs = MemoryFs::new().with_dir("/opt/hfs").with_dir("/pinned");
        let registry = MemoryRegistry::new();
        let req = request(TargetPlatform::Other(name.to_string())).with_override("/pinned");

        let result = resolve_installation_with_deps(&req, &env, &fs, &registry);

        assert!(matches!(result, Err(LocateError::UnsupportedPlatform(_))));
        assert_eq!(fs.probe_count(), 0, "fs probed for {name:?}");
        assert_eq!(registry.read_count(), 0, "registry read for {name:?}");
        assert_eq!(env.read_count(), 0, "env read for {name:?}");
    }
}

/// An existing override wins on every supported platform.
#[test]
fn existing_override_short_circuits() {
    for platform in [
        TargetPlatform::Windows,
        TargetPlatform::MacOs,
        TargetPlatform::Linux,
    ] {
        let env = MemoryEnv::new().with_var("HFS", "/opt/hfs");
        let fs = MemoryFs::new().with_dir("/pinned").with_dir("/opt/hfs");
        let registry = MemoryRegistry::new();
        let req = request(platform.clone()).with_override("/pinned");

        let resolution = resolve_installation_with_deps(&req, &env, &fs, &registry).unwrap();

        assert_eq!(resolution.install_dir(), Some(Path::new("/pinned")));
        assert_eq!(resolution.source, Some(CandidateSource::ExplicitOverride));
        assert_eq!(fs.probe_count(), 1, "{platform}");
        assert_eq!(registry.read_count(), 0, "{platform}");
        assert_eq!(env.read_count(), 0, "{platform}");
    }
}

/// With no registry entries, the default bare-SDK dir is found after every
/// registry step has been tried.
#[test]
fn windows_falls_through_registry_to_default_dir() {
    let env = MemoryEnv::new();
    let fs = MemoryFs::new().with_dir(HOUDINI_DEFAULT);
    let registry = MemoryRegistry::new();

    let resolution =
        resolve_installation_with_deps(&request(TargetPlatform::Windows), &env, &fs, &registry)
            .unwrap();

    assert_eq!(resolution.install_dir(), Some(Path::new(HOUDINI_DEFAULT)));
    assert_eq!(
        resolution.source,
        Some(CandidateSource::DefaultInstallDir {
            product: Product::Houdini
        })
    );

    let registry_attempts: Vec<_> = resolution
        .attempts
        .iter()
        .filter(|a| matches!(a.candidate.source, CandidateSource::RegistryInstallPath { .. }))
        .collect();
    assert_eq!(registry_attempts.len(), 4);
    assert!(
        registry_attempts
            .iter()
            .all(|a| a.outcome == AttemptOutcome::Unresolved)
    );
    // Active-version fallbacks never ran.
    assert!(
        !resolution
            .attempts
            .iter()
            .any(|a| matches!(a.candidate.source, CandidateSource::ActiveVersion { .. }))
    );
}

/// The 32-bit registry view is consulted when the primary one is empty.
#[test]
fn windows_reads_wow6432_view() {
    let env = MemoryEnv::new();
    let fs = MemoryFs::new().with_dir("D:/Houdini19");
    let registry = MemoryRegistry::new().with_install_path(
        RegistryRoot::Wow6432,
        "Houdini 19.0.500",
        "D:/Houdini19",
    );

    let resolution =
        resolve_installation_with_deps(&request(TargetPlatform::Windows), &env, &fs, &registry)
            .unwrap();

    assert_eq!(
        resolution.source,
        Some(CandidateSource::RegistryInstallPath {
            product: Product::Houdini,
            root: RegistryRoot::Wow6432
        })
    );
}

/// A patch-different active version is accepted on a major.minor match.
#[test]
fn windows_active_version_accepted_on_matching_prefix() {
    let env = MemoryEnv::new();
    let fs = MemoryFs::new().with_dir("C:/Houdini 19.0.531");
    let registry = MemoryRegistry::new()
        .with_value(RegistryRoot::Primary, None, "ActiveVersion", "19.0.531")
        .with_install_path(
            RegistryRoot::Primary,
            "Houdini 19.0.531",
            "C:/Houdini 19.0.531",
        );

    let resolution =
        resolve_installation_with_deps(&request(TargetPlatform::Windows), &env, &fs, &registry)
            .unwrap();

    assert_eq!(resolution.install_dir(), Some(Path::new("C:/Houdini 19.0.531")));
    assert_eq!(
        resolution.source,
        Some(CandidateSource::ActiveVersion {
            product: Product::Houdini,
            active: Some("19.0.531".to_string())
        })
    );
}

/// A major/minor mismatch blocks the fallback even though the directory exists.
#[test]
fn windows_active_version_rejected_on_prefix_mismatch() {
    let env = MemoryEnv::new();
    let fs = MemoryFs::new().with_dir("C:/Houdini 18.5.462");
    let registry = MemoryRegistry::new()
        .with_value(RegistryRoot::Primary, None, "ActiveVersion", "18.5.462")
        .with_value(RegistryRoot::Primary, None, "ActiveEngineVersion", "18.5.462")
        .with_install_path(
            RegistryRoot::Primary,
            "Houdini 18.5.462",
            "C:/Houdini 18.5.462",
        );

    let resolution =
        resolve_installation_with_deps(&request(TargetPlatform::Windows), &env, &fs, &registry)
            .unwrap();

    assert!(!resolution.is_found());
    let mismatches = resolution
        .attempts
        .iter()
        .filter(|a| a.outcome == AttemptOutcome::VersionMismatch)
        .count();
    assert_eq!(mismatches, 2);
    assert!(
        !resolution
            .attempts
            .iter()
            .any(|a| a.candidate.path.as_deref() == Some(Path::new("C:/Houdini 18.5.462")))
    );
}

/// The custom header tree is used when the toolkit one is absent.
#[test]
fn include_falls_back_to_custom_tree() {
    let fs = MemoryFs::new()
        .with_dir("/opt/hfs19.0")
        .with_dir("/opt/hfs19.0/custom/houdini/include/HAPI");

    assert_eq!(
        resolve_include_dir(Path::new("/opt/hfs19.0"), &fs),
        IncludeResolution::Custom(PathBuf::from("/opt/hfs19.0/custom/houdini/include/HAPI"))
    );
}

/// A found install with no headers is reported distinctly from "not found".
#[test]
fn headers_missing_is_distinct_from_not_found() {
    let env = MemoryEnv::new().with_var("HFS", "/opt/hfs19.0");
    let fs = MemoryFs::new().with_dir("/opt/hfs19.0");
    let registry = MemoryRegistry::new();

    let resolution =
        resolve_installation_with_deps(&request(TargetPlatform::Linux), &env, &fs, &registry)
            .unwrap();
    let config = BuildConfiguration::from_resolution(&resolution, &fs, true);

    assert!(resolution.is_found());
    assert!(config.headers_missing());
    assert_eq!(config.include_dir(), None);
}

/// Two passes over the same host state agree on everything.
#[test]
fn resolution_is_idempotent() {
    let env = MemoryEnv::new();
    let fs = MemoryFs::new()
        .with_dir(HOUDINI_DEFAULT)
        .with_dir(format!("{HOUDINI_DEFAULT}/toolkit/include/HAPI"));
    let registry = MemoryRegistry::new().with_install_path(
        RegistryRoot::Primary,
        "Houdini Engine 19.0.500",
        "E:/missing",
    );
    let req = request(TargetPlatform::Windows);

    let first = resolve_installation_with_deps(&req, &env, &fs, &registry).unwrap();
    let second = resolve_installation_with_deps(&req, &env, &fs, &registry).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.diagnostics(), second.diagnostics());
    assert_eq!(
        BuildConfiguration::from_resolution(&first, &fs, true),
        BuildConfiguration::from_resolution(&second, &fs, true)
    );
}

/// On Linux only the SDK variable matters.
#[test]
fn linux_depends_only_on_sdk_variable() {
    let fs = MemoryFs::new().with_dir("/opt/hfs19.0").with_dir(HOUDINI_DEFAULT);
    let req = request(TargetPlatform::Linux);

    let plain = MemoryEnv::new().with_var("HFS", "/opt/hfs19.0");
    let noisy = MemoryEnv::new()
        .with_var("HFS", "/opt/hfs19.0")
        .with_var("HOUDINI_PATH", "/elsewhere")
        .with_var("PATH", "/usr/bin");
    let busy_registry = MemoryRegistry::new()
        .with_value(RegistryRoot::Primary, None, "ActiveVersion", "19.0.500")
        .with_install_path(RegistryRoot::Primary, "Houdini 19.0.500", HOUDINI_DEFAULT);

    let a = resolve_installation_with_deps(&req, &plain, &fs, &MemoryRegistry::new()).unwrap();
    let b = resolve_installation_with_deps(&req, &noisy, &fs, &busy_registry).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.install_dir(), Some(Path::new("/opt/hfs19.0")));
    assert_eq!(busy_registry.read_count(), 0);
}

/// A custom variable name replaces `HFS`.
#[test]
fn linux_custom_variable_name() {
    let fs = MemoryFs::new().with_dir("/sdk/houdini");
    let env = MemoryEnv::new()
        .with_var("HFS", "/opt/ignored")
        .with_var("HOUDINI_SDK_HOME", "/sdk/houdini");
    let req = request(TargetPlatform::Linux).with_env_var("HOUDINI_SDK_HOME");

    let resolution =
        resolve_installation_with_deps(&req, &env, &fs, &MemoryRegistry::new()).unwrap();

    assert_eq!(resolution.install_dir(), Some(Path::new("/sdk/houdini")));
}
