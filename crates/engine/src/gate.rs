// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmation gate between archival and deletion.

use std::io::{self, BufRead, Write};

use reap_core::RetentionPolicy;

/// Whether the deletion stage runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Dry run configured; the prompt was never shown
    DryRun,
    /// Operator answered anything but yes
    Declined,
}

/// Source of a yes/no answer from the operator
pub trait Confirm {
    /// Ask `question` once and block until answered.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Exactly `Y`. Only surrounding whitespace, including the line ending, is
/// ignored.
pub fn is_affirmative(input: &str) -> bool {
    input.trim() == "Y"
}

/// Line-based prompt: writes the question to `prompt`, reads one line from
/// `input`. End of input counts as no.
pub struct StdinConfirm<R, W> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> StdinConfirm<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }
}

impl StdinConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, answer on stdin.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for StdinConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.prompt, "{} ", question)?;
        self.prompt.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        Ok(is_affirmative(&line))
    }
}

/// Evaluate the gate once. The dry-run flag short-circuits the prompt.
pub fn decide(
    policy: &RetentionPolicy,
    confirm: &mut impl Confirm,
    question: &str,
) -> io::Result<GateDecision> {
    if policy.dry_run {
        return Ok(GateDecision::DryRun);
    }
    if confirm.confirm(question)? {
        Ok(GateDecision::Proceed)
    } else {
        Ok(GateDecision::Declined)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
