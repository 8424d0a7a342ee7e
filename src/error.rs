//! Typed error variants for release failures.

use thiserror::Error;

/// Failures a release run can hit before or while driving git.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("version number must be in format 'x.y.z' but was '{0}'")]
    InvalidVersion(String),

    #[error(
        "releases must be cut from branch '{expected}' but the active branch is '{actual}'"
    )]
    WrongBranch { expected: String, actual: String },

    #[error("no unreleased version heading found in changelog")]
    MissingUnreleasedHeading,

    #[error("command failed: {0}")]
    CommandFailed(String),
}

impl ReleaseError {
    /// Create an invalid version error from the raw argument.
    pub fn invalid_version(raw: impl Into<String>) -> Self {
        Self::InvalidVersion(raw.into())
    }

    /// Create a wrong branch error.
    pub fn wrong_branch(
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::WrongBranch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a command failed error from an already rendered command line.
    pub fn command_failed(rendered: impl Into<String>) -> Self {
        Self::CommandFailed(rendered.into())
    }
}
