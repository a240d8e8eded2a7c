//! SDK version strings.
//!
//! Versions are dotted triples such as `19.0.500`. The raw string is kept
//! verbatim because it is spliced into registry key names and install
//! directory names; the numeric segments are only informational.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::LocateError;

/// Number of leading characters compared when accepting an active version.
pub const MAJOR_MINOR_PREFIX_LEN: usize = 4;

/// A `MAJOR.MINOR.BUILD` SDK version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SdkVersion {
    raw: String,
}

impl SdkVersion {
    /// Wrap a version string, rejecting empty input.
    pub fn new(raw: impl Into<String>) -> Result<Self, LocateError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty() {
            return Err(LocateError::EmptyVersion);
        }
        Ok(Self { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> Option<u32> {
        self.segment(0)
    }

    pub fn minor(&self) -> Option<u32> {
        self.segment(1)
    }

    pub fn build(&self) -> Option<u32> {
        self.segment(2)
    }

    /// True when all three segments parse as numbers and nothing trails them.
    pub fn is_well_formed(&self) -> bool {
        self.raw.split('.').count() == 3
            && self.major().is_some()
            && self.minor().is_some()
            && self.build().is_some()
    }

    /// The `MM.m` prefix, or `None` for versions too short to carry one.
    pub fn major_minor_prefix(&self) -> Option<&str> {
        self.raw
            .char_indices()
            .nth(MAJOR_MINOR_PREFIX_LEN - 1)
            .map(|(idx, ch)| &self.raw[..idx + ch.len_utf8()])
    }

    /// Whether `other` may stand in for this version (same major.minor).
    pub fn shares_major_minor(&self, other: &str) -> bool {
        self.major_minor_prefix()
            .is_some_and(|prefix| other.starts_with(prefix))
    }

    fn segment(&self, index: usize) -> Option<u32> {
        self.raw.split('.').nth(index)?.trim().parse().ok()
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for SdkVersion {
    type Error = LocateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SdkVersion> for String {
    fn from(value: SdkVersion) -> Self {
        value.raw
    }
}

impl std::str::FromStr for SdkVersion {
    type Err = LocateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let v = SdkVersion::new("19.0.500").unwrap();
        assert_eq!(v.major(), Some(19));
        assert_eq!(v.minor(), Some(0));
        assert_eq!(v.build(), Some(500));
        assert!(v.is_well_formed());
        assert_eq!(v.major_minor_prefix(), Some("19.0"));
    }

    #[test]
    fn test_malformed_segment_is_absent() {
        let v = SdkVersion::new("19.x.500").unwrap();
        assert_eq!(v.major(), Some(19));
        assert_eq!(v.minor(), None);
        assert_eq!(v.build(), Some(500));
        assert!(!v.is_well_formed());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(SdkVersion::new("  "), Err(LocateError::EmptyVersion)));
    }

    #[test]
    fn test_short_version_never_matches() {
        let v = SdkVersion::new("19").unwrap();
        assert_eq!(v.major_minor_prefix(), None);
        assert!(!v.shares_major_minor("19"));
    }

    #[test]
    fn test_prefix_match() {
        let v = SdkVersion::new("18.5.462").unwrap();
        assert!(v.shares_major_minor("18.5.499"));
        assert!(!v.shares_major_minor("18.0.462"));
        assert!(!v.shares_major_minor("18."));
    }
}
