//! `prism restore [ID]`: pick a snapshot, confirm, replay it.
//!
//! ```text
//! Idle ─(no id)─> Selecting ─> Confirmed ─> Restoring ─> Complete
//!   └──(id)────────────────────┘                    └──> PartialFailure
//! ```
//! Declining the prompt or closing stdin ends in `Aborted`.

use std::io::{BufRead, Write};

use prism_common::PrismError;
use prism_platform::{RestoreEngine, RestoreOutcome, RestoreReport};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RestoreState {
    Idle(Option<String>),
    Selecting,
    Confirmed(String),
    Restoring(String),
    Complete(RestoreReport),
    PartialFailure(RestoreReport),
    Aborted,
}

impl RestoreState {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete(_) | Self::PartialFailure(_) | Self::Aborted
        )
    }
}

pub(crate) struct RestoreFlow<'a, R, W> {
    engine: &'a RestoreEngine,
    input: R,
    output: W,
    assume_yes: bool,
}

impl<'a, R: BufRead, W: Write> RestoreFlow<'a, R, W> {
    pub fn new(engine: &'a RestoreEngine, input: R, output: W, assume_yes: bool) -> Self {
        Self {
            engine,
            input,
            output,
            assume_yes,
        }
    }

    /// Drive the flow to a terminal state. A partial failure is an error.
    pub fn run(&mut self, id: Option<String>) -> Result<(), PrismError> {
        match self.drive(id)? {
            RestoreState::Complete(report) => {
                self.say(format_args!(
                    "Restored {} file(s) from {}",
                    report.restored.len(),
                    report.snapshot_id
                ));
                Ok(())
            }
            RestoreState::PartialFailure(report) => {
                self.say(format_args!(
                    "Restored {} file(s) from {}; {} failed",
                    report.restored.len(),
                    report.snapshot_id,
                    report.failed.len()
                ));
                report.into_result()?;
                Ok(())
            }
            _ => {
                self.say("Restore cancelled.");
                Ok(())
            }
        }
    }

    pub(crate) fn drive(&mut self, id: Option<String>) -> Result<RestoreState, PrismError> {
        let mut state = RestoreState::Idle(id);
        while !state.is_terminal() {
            debug!(?state, "restore step");
            state = self.step(state)?;
        }
        Ok(state)
    }

    fn step(&mut self, state: RestoreState) -> Result<RestoreState, PrismError> {
        Ok(match state {
            RestoreState::Idle(None) => RestoreState::Selecting,
            RestoreState::Idle(Some(id)) => {
                // Unknown ids fail here, before any prompt.
                self.engine.backups().get(&id)?;
                self.confirm(id)?
            }
            RestoreState::Selecting => match self.select()? {
                Some(id) => self.confirm(id)?,
                None => RestoreState::Aborted,
            },
            RestoreState::Confirmed(id) => RestoreState::Restoring(id),
            RestoreState::Restoring(id) => {
                let report = self.engine.restore(&id)?;
                for path in &report.escalated {
                    self.say(format_args!("  {} (via sudo)", path.display()));
                }
                for path in &report.failed {
                    self.say(format_args!("  FAILED {}", path.display()));
                }
                match report.outcome() {
                    RestoreOutcome::Complete => RestoreState::Complete(report),
                    RestoreOutcome::PartialFailure => RestoreState::PartialFailure(report),
                }
            }
            terminal => terminal,
        })
    }

    fn select(&mut self) -> Result<Option<String>, PrismError> {
        let ids = self.engine.backups().list()?;
        if ids.is_empty() {
            self.say("No backups found.");
            return Ok(None);
        }

        self.say("Available backups (newest first):");
        for (i, id) in ids.iter().enumerate() {
            self.say(format_args!("  {:>2}) {id}", i + 1));
        }

        loop {
            let Some(line) = self.prompt(&format!("Select a backup [1-{}]: ", ids.len()))? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n) if (1..=ids.len()).contains(&n) => return Ok(Some(ids[n - 1].clone())),
                _ => self.say(format_args!("Invalid choice: {line:?}")),
            }
        }
    }

    fn confirm(&mut self, id: String) -> Result<RestoreState, PrismError> {
        if self.assume_yes {
            return Ok(RestoreState::Confirmed(id));
        }
        let answer = self.prompt(&format!("Restore backup {id}? [y/N]: "))?;
        Ok(match answer.as_deref() {
            Some("y" | "Y" | "yes") => RestoreState::Confirmed(id),
            _ => RestoreState::Aborted,
        })
    }

    /// One trimmed line of input, or `None` at end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>, PrismError> {
        let _ = write!(self.output, "{question}");
        let _ = self.output.flush();
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl std::fmt::Display) {
        super::emit(&mut self.output, text);
    }
}
