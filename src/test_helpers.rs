//! Common test helper functions shared across test modules.
use chrono::NaiveDate;
use std::path::Path;

use crate::{config::ReleaseConfig, version::ReleaseVersion};

/// Creates a ReleaseConfig for app "demo" with a fixed release date of
/// 2024-05-01, rooted at `root`.
pub fn create_test_config(version: &str, root: impl AsRef<Path>) -> ReleaseConfig {
    ReleaseConfig {
        version: ReleaseVersion::parse(version).unwrap(),
        app_name: "demo".to_string(),
        root: root.as_ref().to_path_buf(),
        changelog: "README.md".to_string(),
        main_branch: "master".to_string(),
        release_branch: "release".to_string(),
        remote: "origin".to_string(),
        viewer: vec!["gitk".to_string(), "--all".to_string()],
        release_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    }
}
