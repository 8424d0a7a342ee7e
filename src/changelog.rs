//! Changelog rewriting for a release.
//!
//! The changelog is split around its single unreleased version heading and
//! reassembled twice: once as the release document, with the heading dated
//! and repository URLs pinned to the release tag, and once as the
//! next-iteration document, with a fresh unreleased heading prepended above
//! the entry that was just released.
use regex::Regex;

use crate::{config::ReleaseConfig, error::ReleaseError, result::Result};

/// Heading marking the in-progress, not-yet-dated version section,
/// e.g. `**1.x.x (2024-xx-xx)**`.
const UNRELEASED_HEADING: &str = r"\*\*\d+\.x\.x \(20..-xx-xx\)\*\*";

/// Repository path segments pinned to the release tag. Only `/tree/master/`
/// and `/blob/master/` are rewritten; the word "master" anywhere else is
/// left alone.
const MASTER_PATH_SEGMENT: &str = r"/(tree|blob)/master/";

/// Both documents derived from the current changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogVariants {
    /// Document committed with the release: dated heading, tag-pinned URLs.
    pub release: String,
    /// Document committed afterwards: new unreleased heading on top of the
    /// released entry, URLs untouched.
    pub next: String,
}

/// Computes both changelog variants for a release. Pure: all inputs come
/// from the configuration and the document text.
pub struct Rewriter<'c> {
    config: &'c ReleaseConfig,
    marker: Regex,
    master_path: Regex,
}

impl<'c> Rewriter<'c> {
    /// Create a rewriter for the given release configuration.
    pub fn new(config: &'c ReleaseConfig) -> Result<Self> {
        Ok(Self {
            config,
            marker: Regex::new(UNRELEASED_HEADING)?,
            master_path: Regex::new(MASTER_PATH_SEGMENT)?,
        })
    }

    /// Compute `(release, next)` variants of `document`.
    pub fn render(&self, document: &str) -> Result<ChangelogVariants> {
        let (prefix, suffix) = self.partition(document)?;
        let tag = self.config.tag();

        let release_heading = format!(
            "**{} ({})**",
            self.config.version,
            self.config.release_date.format("%Y-%m-%d")
        );

        let next_heading = format!(
            "**{}.x.x ({}-xx-xx)**\n\n- ...\n\n",
            self.config.version.major(),
            self.config.release_date.format("%Y")
        );

        let release = format!(
            "{}{}{}",
            self.update_urls(prefix, &tag),
            release_heading,
            self.update_urls(suffix, &tag)
        );

        let next = format!("{prefix}{next_heading}{release_heading}{suffix}");

        Ok(ChangelogVariants { release, next })
    }

    /// Split the document around the first unreleased heading, discarding
    /// the heading itself. A document without one is malformed.
    fn partition<'d>(&self, document: &'d str) -> Result<(&'d str, &'d str)> {
        match self.marker.find(document) {
            Some(found) => Ok((
                &document[..found.start()],
                &document[found.end()..],
            )),
            None => Err(ReleaseError::MissingUnreleasedHeading.into()),
        }
    }

    /// Rewrite `/tree/master/` and `/blob/master/` path segments to point
    /// at the release tag.
    fn update_urls(&self, text: &str, tag: &str) -> String {
        self.master_path
            .replace_all(text, format!("/$1/{tag}/"))
            .into_owned()
    }
}
