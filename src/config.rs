//! Configuration loading and resolution for `relcut.toml` files.
//!
//! The release sequence itself never touches ambient process state: everything
//! it needs is resolved up front into a [`ReleaseConfig`].
use chrono::NaiveDate;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{result::Result, version::ReleaseVersion};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "relcut.toml";

/// Optional per-repository settings read from `relcut.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct FileConfig {
    /// Changelog file rewritten during the release, relative to the repository root.
    pub changelog: String,
    /// Branch releases are cut from.
    pub main_branch: String,
    /// Branch fast-forwarded to the release tag.
    pub release_branch: String,
    /// Remote all refs are pushed to on confirmation.
    pub remote: String,
    /// Name used in the release tag; defaults to the repository directory basename.
    pub app_name: Option<String>,
    /// History viewer launched for manual inspection before the confirmation prompt.
    pub viewer: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            changelog: "README.md".to_string(),
            main_branch: "master".to_string(),
            release_branch: "release".to_string(),
            remote: "origin".to_string(),
            app_name: None,
            viewer: vec!["gitk".to_string(), "--all".to_string()],
        }
    }
}

impl FileConfig {
    /// Load `relcut.toml` from the repository root, falling back to defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(DEFAULT_CONFIG_FILE);

        if let Ok(content) = fs::read_to_string(&path) {
            let config: FileConfig = toml::from_str(&content)
                .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
            return Ok(config);
        }

        Ok(Self::default())
    }
}

/// Fully resolved configuration for one release run.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Version being released.
    pub version: ReleaseVersion,
    /// Application name, the first half of the release tag.
    pub app_name: String,
    /// Repository working directory all commands run in.
    pub root: PathBuf,
    /// Changelog file, relative to `root`.
    pub changelog: String,
    /// Branch releases are cut from.
    pub main_branch: String,
    /// Branch fast-forwarded to the release tag.
    pub release_branch: String,
    /// Remote pushed on confirmation.
    pub remote: String,
    /// History viewer command.
    pub viewer: Vec<String>,
    /// Date stamped into the release heading.
    pub release_date: NaiveDate,
}

impl ReleaseConfig {
    /// Resolve the full configuration for a run rooted at `path`.
    pub fn resolve(
        version: ReleaseVersion,
        path: &Path,
        release_date: NaiveDate,
    ) -> Result<Self> {
        let root = fs::canonicalize(path).wrap_err_with(|| {
            format!("failed to resolve working directory {}", path.display())
        })?;

        let file = FileConfig::load(&root)?;

        let app_name = match file.app_name {
            Some(name) => name,
            None => root
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    eyre!("cannot derive app name from {}", root.display())
                })?,
        };

        Ok(Self {
            version,
            app_name,
            root,
            changelog: file.changelog,
            main_branch: file.main_branch,
            release_branch: file.release_branch,
            remote: file.remote,
            viewer: file.viewer,
            release_date,
        })
    }

    /// Release tag, `<app_name>-<version>`, used as both a git tag name and
    /// a URL path segment in the rewritten changelog.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.app_name, self.version)
    }

    /// Absolute path of the changelog file.
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(&self.changelog)
    }
}
