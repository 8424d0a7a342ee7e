//! Typed git operations over the command seam.
//!
//! Each method is one blocking `git` invocation; any non-zero exit
//! propagates immediately with no retries.
use log::*;

use color_eyre::eyre::eyre;

use crate::{
    command::{CommandOutput, CommandRunner},
    result::Result,
};

/// The git operations the release sequence needs.
pub struct Git<'r> {
    runner: &'r dyn CommandRunner,
}

impl<'r> Git<'r> {
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut command = Vec::with_capacity(args.len() + 1);
        command.push("git".to_string());
        command.extend(args.iter().map(|arg| arg.to_string()));
        self.runner.run(&command)
    }

    /// Branch carrying the active marker in the `git branch` list.
    pub fn current_branch(&self) -> Result<String> {
        let output = self.run(&["branch"])?;
        output
            .stdout
            .lines()
            .find_map(|line| line.strip_prefix("* "))
            .map(|name| name.trim().to_string())
            .ok_or_else(|| eyre!("could not determine the active branch"))
    }

    /// Commit id a reference currently points at.
    pub fn rev_parse(&self, reference: &str) -> Result<String> {
        let output = self.run(&["rev-parse", reference])?;
        Ok(output.stdout.trim().to_string())
    }

    /// Stage a single file.
    pub fn add(&self, path: &str) -> Result<()> {
        debug!("staging {path}");
        self.run(&["add", path])?;
        Ok(())
    }

    /// Commit the staged changes.
    pub fn commit(&self, message: &str) -> Result<()> {
        debug!("committing changes with msg: {message}");
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) -> Result<()> {
        info!("creating tag: {name}");
        self.run(&["tag", name])?;
        Ok(())
    }

    /// Delete a local tag.
    pub fn delete_tag(&self, name: &str) -> Result<()> {
        info!("deleting tag: {name}");
        self.run(&["tag", "-d", name])?;
        Ok(())
    }

    /// Switch the working directory to a branch.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        info!("switching to branch: {branch}");
        self.run(&["checkout", branch])?;
        Ok(())
    }

    /// Fast-forward-only merge; fails if the current branch has diverged.
    pub fn merge_ff_only(&self, reference: &str) -> Result<()> {
        info!("fast-forward merging {reference}");
        self.run(&["merge", "--ff-only", reference])?;
        Ok(())
    }

    /// Hard-reset the current branch to a commit.
    pub fn reset_hard(&self, reference: &str) -> Result<()> {
        info!("resetting to {reference}");
        self.run(&["reset", "--hard", reference])?;
        Ok(())
    }

    /// Push a single refspec to a remote.
    pub fn push(&self, remote: &str, refspec: &str) -> Result<()> {
        info!("pushing {refspec} to {remote}");
        self.run(&["push", remote, refspec])?;
        Ok(())
    }

    /// Push all tags to a remote.
    pub fn push_tags(&self, remote: &str) -> Result<()> {
        info!("pushing tags to {remote}");
        self.run(&["push", "--tags", remote])?;
        Ok(())
    }
}
