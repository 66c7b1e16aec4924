//! Terminal capabilities injected into discovery.
//!
//! Discovery never talks to stdin/stdout directly: progress echo and the
//! blocking version prompt both go through the [`Terminal`] trait so that
//! callers (the CLI, tests, embedders) decide how user interaction happens.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt::{Debug, Formatter},
};

use anyhow::{Result, anyhow};
use inquire::Text;

/// Reporting and prompting capability used during discovery.
///
/// `echo` reports a line of progress; `prompt` blocks until the user supplies
/// a string. The whole run blocks on `prompt` when a project's version is
/// unresolved; there is no timeout or cancellation.
pub trait Terminal {
    /// Report one line of discovery progress.
    fn echo(&self, line: &str);

    /// Ask the user for a value, blocking until one is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error when no answer can be obtained (e.g. the input
    /// stream is closed or the prompt is interrupted).
    fn prompt(&self, message: &str) -> Result<String>;
}

/// Interactive terminal backed by the console.
///
/// Progress lines are written to stderr so that stdout stays reserved for
/// the serialized output dictionary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleTerminal;

impl ConsoleTerminal {
    /// Create a new console terminal.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Terminal for ConsoleTerminal {
    fn echo(&self, line: &str) {
        eprintln!("{line}");
    }

    fn prompt(&self, message: &str) -> Result<String> {
        Ok(Text::new(message).prompt()?)
    }
}

/// Non-interactive terminal that replays canned prompt answers.
///
/// Used by tests and by embedders that already know every version. Echoed
/// lines are recorded and can be inspected afterwards.
#[derive(Default)]
pub struct ScriptedTerminal {
    answers: RefCell<VecDeque<String>>,
    echoed: RefCell<Vec<String>>,
}

impl ScriptedTerminal {
    /// Create a scripted terminal that answers prompts in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            echoed: RefCell::new(Vec::new()),
        }
    }

    /// Lines echoed so far, in order.
    #[must_use]
    pub fn echoed(&self) -> Vec<String> {
        self.echoed.borrow().clone()
    }
}

impl Debug for ScriptedTerminal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTerminal")
            .field("remaining_answers", &self.answers.borrow().len())
            .field("echoed", &self.echoed.borrow().len())
            .finish()
    }
}

impl Terminal for ScriptedTerminal {
    fn echo(&self, line: &str) {
        self.echoed.borrow_mut().push(line.to_string());
    }

    fn prompt(&self, message: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for prompt: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_terminal_replays_answers_in_order() {
        let terminal = ScriptedTerminal::new(["20.0.0", "3.12.0"]);

        assert_eq!(terminal.prompt("first").unwrap(), "20.0.0");
        assert_eq!(terminal.prompt("second").unwrap(), "3.12.0");
    }

    #[test]
    fn test_scripted_terminal_fails_when_exhausted() {
        let terminal = ScriptedTerminal::new(Vec::<String>::new());

        let err = terminal.prompt("Enter 'nodejs' version").unwrap_err();
        assert!(err.to_string().contains("nodejs"));
    }

    #[test]
    fn test_scripted_terminal_records_echoes() {
        let terminal = ScriptedTerminal::new(Vec::<String>::new());

        terminal.echo("first line");
        terminal.echo("second line");

        assert_eq!(terminal.echoed(), vec!["first line", "second line"]);
    }
}
