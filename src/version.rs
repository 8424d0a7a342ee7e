//! Release version identifier parsing and validation.
use regex::Regex;
use semver::Version as SemVer;
use std::fmt;

use crate::{error::ReleaseError, result::Result};

/// Exact `major.minor.patch` shape accepted for a release.
const VERSION_SHAPE: &str = r"^\d+\.\d+\.\d+$";

/// A plain `x.y.z` release version.
///
/// Stricter than full semver: no prerelease or build metadata, and no
/// surrounding whitespace. Validation happens before any file or git
/// operation so a malformed version has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(SemVer);

impl ReleaseVersion {
    /// Parse a `x.y.z` version string, rejecting any other shape.
    pub fn parse(raw: &str) -> Result<Self> {
        let shape = Regex::new(VERSION_SHAPE)?;
        if !shape.is_match(raw) {
            return Err(ReleaseError::invalid_version(raw).into());
        }

        // semver additionally rejects leading-zero components
        let version = SemVer::parse(raw)
            .map_err(|_| ReleaseError::invalid_version(raw))?;

        Ok(Self(version))
    }

    /// Major component, used for the next unreleased heading.
    pub fn major(&self) -> u64 {
        self.0.major
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
