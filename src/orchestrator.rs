//! Sequences the release: verify, rewrite, commit, tag, merge, confirm,
//! then publish or roll back.
//!
//! Every step is a blocking external command; the first failure aborts the
//! whole run with no automatic cleanup. The only undo path is the explicit
//! operator decline, which restores both branches to the commit ids recorded
//! before any mutation and deletes the created tag.
use log::*;
use std::fs;

use color_eyre::eyre::WrapErr;

use crate::{
    changelog::Rewriter,
    command::{CommandRunner, render_command},
    config::ReleaseConfig,
    confirm::Confirm,
    error::ReleaseError,
    git::Git,
    result::Result,
};

/// Terminal state of a completed release run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All refs were pushed to the remote.
    Pushed,
    /// The operator declined and local state was restored.
    RolledBack,
}

/// Drives one release run over injected collaborators.
pub struct Orchestrator<'a> {
    config: &'a ReleaseConfig,
    runner: &'a dyn CommandRunner,
    confirm: &'a mut dyn Confirm,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a ReleaseConfig,
        runner: &'a dyn CommandRunner,
        confirm: &'a mut dyn Confirm,
    ) -> Self {
        Self {
            config,
            runner,
            confirm,
        }
    }

    /// Run the full release sequence.
    pub fn execute(&mut self) -> Result<Outcome> {
        let config = self.config;
        let git = Git::new(self.runner);
        let tag = config.tag();

        // no mutation unless we are on the main branch
        let active = git.current_branch()?;
        if active != config.main_branch {
            return Err(
                ReleaseError::wrong_branch(&config.main_branch, active).into()
            );
        }

        let changelog_path = config.changelog_path();
        let document =
            fs::read_to_string(&changelog_path).wrap_err_with(|| {
                format!("failed to read {}", changelog_path.display())
            })?;
        let variants = Rewriter::new(config)?
            .render(&document)
            .wrap_err_with(|| format!("cannot release {}", config.changelog))?;

        // record both branch heads so a decline can restore them exactly
        let main_start = git.rev_parse(&config.main_branch)?;
        let release_start = git.rev_parse(&config.release_branch)?;
        debug!(
            "recorded {} at {main_start}, {} at {release_start}",
            config.main_branch, config.release_branch
        );

        info!("cutting release {} as tag {tag}", config.version);
        fs::write(&changelog_path, &variants.release).wrap_err_with(|| {
            format!("failed to write {}", changelog_path.display())
        })?;
        git.add(&config.changelog)?;
        git.commit(&format!("Release {}", config.version))?;
        git.tag(&tag)?;

        git.checkout(&config.release_branch)?;
        git.merge_ff_only(&tag)?;
        git.checkout(&config.main_branch)?;

        fs::write(&changelog_path, &variants.next).wrap_err_with(|| {
            format!("failed to write {}", changelog_path.display())
        })?;
        git.add(&config.changelog)?;
        git.commit("Prepare for next development iteration")?;

        // manual inspection before anything leaves the machine
        debug!("launching history viewer: {}", render_command(&config.viewer));
        self.runner.run_attached(&config.viewer)?;

        if self.confirm.confirm("Proceed with release? (yes/no)")? {
            self.publish(&git)?;
            info!("release done");
            Ok(Outcome::Pushed)
        } else {
            self.roll_back(&git, &tag, &main_start, &release_start)?;
            info!("release aborted");
            Ok(Outcome::RolledBack)
        }
    }

    /// Push main, release, then tags. A failure aborts the remaining
    /// pushes; refs already pushed stay pushed.
    fn publish(&self, git: &Git) -> Result<()> {
        let config = self.config;
        git.push(&config.remote, &format!("{0}:{0}", config.main_branch))?;
        git.push(&config.remote, &format!("{0}:{0}", config.release_branch))?;
        git.push_tags(&config.remote)?;
        Ok(())
    }

    /// Destroy the local release state: drop the tag and reset both
    /// branches to their recorded pre-run commits.
    fn roll_back(
        &self,
        git: &Git,
        tag: &str,
        main_start: &str,
        release_start: &str,
    ) -> Result<()> {
        let config = self.config;
        git.delete_tag(tag)?;
        git.checkout(&config.release_branch)?;
        git.reset_hard(release_start)?;
        git.checkout(&config.main_branch)?;
        git.reset_hard(main_start)?;
        Ok(())
    }
}
