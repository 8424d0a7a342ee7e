//! Operator confirmation gate ahead of publishing.
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::result::Result;

/// Yes/no decision read from the operator.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Present `prompt` and return whether the operator approved.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Line-oriented confirmation: one prompt out, one line in.
///
/// Only the exact answer `yes` (case-sensitive, trailing newline trimmed)
/// approves; anything else, including end of input, declines. The read
/// blocks indefinitely.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl LineConfirm<BufReader<Stdin>, Stdout> {
    /// Bind the prompt to the process stdio streams.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        writeln!(self.output, "\n{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        Ok(line.trim_end_matches(['\n', '\r']) == "yes")
    }
}
