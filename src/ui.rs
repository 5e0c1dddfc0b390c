// src/ui.rs

//! Operator-facing output
//!
//! Everything the operator is meant to read (notes, warnings, hints,
//! rendered descriptions) goes through a [`Ui`] value created once per
//! invocation. Diagnostics for developers go through `tracing` instead.
//!
//! A `Ui` can capture its output instead of writing to the terminal,
//! which is how tests observe notes and warnings.

use std::cell::RefCell;
use std::collections::HashSet;

/// Output written by a capturing [`Ui`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

pub struct Ui {
    verbose: bool,
    hints: bool,
    capture: Option<RefCell<Captured>>,
    warned: RefCell<HashSet<String>>,
}

impl Ui {
    /// Create a terminal UI
    pub fn new(verbose: bool, hints: bool) -> Self {
        Self {
            verbose,
            hints,
            capture: None,
            warned: RefCell::new(HashSet::new()),
        }
    }

    /// Create a UI that records output instead of printing it
    pub fn capturing(verbose: bool) -> Self {
        Self {
            capture: Some(RefCell::new(Captured::default())),
            ..Self::new(verbose, true)
        }
    }

    /// Whether `--verbose` was requested
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Print a line to standard output
    pub fn puts(&self, message: &str) {
        match &self.capture {
            Some(captured) => {
                let mut captured = captured.borrow_mut();
                captured.stdout.push_str(message);
                captured.stdout.push('\n');
            }
            None => println!("{}", message),
        }
    }

    /// Print a line to standard error
    pub fn error(&self, message: &str) {
        match &self.capture {
            Some(captured) => {
                let mut captured = captured.borrow_mut();
                captured.stderr.push_str(message);
                captured.stderr.push('\n');
            }
            None => eprintln!("{}", message),
        }
    }

    /// Print a non-fatal warning
    pub fn warn(&self, message: &str) {
        self.error(&format!("Warning: {}", message));
    }

    /// Print a warning unless one with the same key was already printed
    ///
    /// Returns true if the warning was printed.
    pub fn warn_once(&self, key: &str, message: &str) -> bool {
        if !self.warned.borrow_mut().insert(key.to_string()) {
            return false;
        }
        self.warn(message);
        true
    }

    /// Print a hint unless hints are disabled in the configuration
    pub fn hint(&self, message: &str) {
        if self.hints {
            self.puts(&format!("Hint: {}", message));
        }
    }

    /// Everything written so far (empty for terminal UIs)
    pub fn captured(&self) -> Captured {
        self.capture
            .as_ref()
            .map(|c| c.borrow().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_separates_streams() {
        let ui = Ui::capturing(false);
        ui.puts("hello");
        ui.error("oops");

        let captured = ui.captured();
        assert_eq!(captured.stdout, "hello\n");
        assert_eq!(captured.stderr, "oops\n");
    }

    #[test]
    fn test_warn_once() {
        let ui = Ui::capturing(false);
        assert!(ui.warn_once("alias", "deprecated"));
        assert!(!ui.warn_once("alias", "deprecated"));
        assert!(ui.warn_once("other", "something else"));

        let stderr = ui.captured().stderr;
        assert_eq!(stderr.matches("deprecated").count(), 1);
        assert!(stderr.contains("Warning: something else"));
    }

    #[test]
    fn test_hints_can_be_disabled() {
        let ui = Ui {
            hints: false,
            ..Ui::capturing(false)
        };
        ui.hint("run show");
        assert!(ui.captured().stdout.is_empty());
    }
}
