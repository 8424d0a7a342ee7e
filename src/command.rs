//! Narrow execution seam for the external git and viewer processes.
//!
//! Everything the release sequence runs goes through [`CommandRunner`], so
//! tests can substitute a mock and assert on the exact command lines.
use log::*;
use std::path::PathBuf;
use std::process::Command;

use color_eyre::eyre::{WrapErr, eyre};

use crate::{error::ReleaseError, result::Result};

/// Captured output of a successfully completed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Blocking executor for external commands.
///
/// `command[0]` is the program, the rest its arguments. Every invocation
/// blocks until the subprocess exits; a non-zero exit is an error naming
/// the full command line.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run a command to completion, capturing its output.
    fn run(&self, command: &[String]) -> Result<CommandOutput>;

    /// Run a command attached to the terminal, for interactive tools.
    fn run_attached(&self, command: &[String]) -> Result<()>;
}

/// Runs commands as subprocesses in a fixed working directory.
pub struct SystemRunner {
    root: PathBuf,
}

impl SystemRunner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[String]) -> Result<CommandOutput> {
        let (program, args) = split_command(command)?;
        debug!("running: {}", render_command(command));

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .wrap_err_with(|| format!("failed to launch {program}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                warn!("{program} stderr: {}", stderr.trim());
            }
            return Err(
                ReleaseError::command_failed(render_command(command)).into()
            );
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_attached(&self, command: &[String]) -> Result<()> {
        let (program, args) = split_command(command)?;
        debug!("running attached: {}", render_command(command));

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .status()
            .wrap_err_with(|| format!("failed to launch {program}"))?;

        if !status.success() {
            return Err(
                ReleaseError::command_failed(render_command(command)).into()
            );
        }

        Ok(())
    }
}

fn split_command(command: &[String]) -> Result<(&String, &[String])> {
    command
        .split_first()
        .ok_or_else(|| eyre!("cannot run an empty command"))
}

/// Render a command line for diagnostics, space-joined with arguments
/// containing spaces individually quoted.
pub fn render_command(command: &[String]) -> String {
    command
        .iter()
        .map(|part| {
            if part.contains(' ') {
                format!("\"{part}\"")
            } else {
                part.clone()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
