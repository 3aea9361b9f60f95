//! Interactive yes/no confirmation.
//!
//! Destructive operations (removing a bookmark, removing a tag, toggling a
//! tag off a bookmark) and first-run store creation ask through
//! [`ConfirmPrompt`] before touching anything.

use std::io::{self, BufRead, Write};

/// Asks the user to confirm an action.
pub trait ConfirmPrompt {
    /// Returns `true` only on explicit consent.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt reading answers line by line from `input` and writing questions to `output`.
///
/// An answer whose first non-blank character is `y` or `Y` is consent.
/// Anything else, including end of input, is a refusal.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for LinePrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{} [Y/n] ", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim_start().chars().next(), Some('y' | 'Y')),
        }
    }
}

/// Prompt that answers every question the same way without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAnswer(pub bool);

impl ConfirmPrompt for AutoAnswer {
    fn confirm(&mut self, message: &str) -> bool {
        log::debug!("auto-answering {:?} to: {}", self.0, message);
        self.0
    }
}
