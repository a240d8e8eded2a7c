#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod build_config;
pub mod layout;
pub mod platform;
pub mod resolver;
pub mod settings;
pub mod version;

pub use build_config::{BuildConfiguration, Definition, HFS_PATH_DEFINE, normalize_separators};
pub use layout::{
    CUSTOM_INCLUDE_SUBDIR, IncludeResolution, LibraryLayout, TOOLKIT_INCLUDE_SUBDIR,
    resolve_include_dir,
};
pub use platform::TargetPlatform;
pub use resolver::{
    Attempt, AttemptOutcome, CandidateSource, LocateError, LocateRequest, Resolution,
    ResolutionPolicy, resolve_installation, resolve_installation_with_deps,
};
pub use settings::{
    DEFAULT_SDK_VERSION, LocatorSettings, SettingsError, default_settings_path, validate_settings,
};
pub use version::SdkVersion;
