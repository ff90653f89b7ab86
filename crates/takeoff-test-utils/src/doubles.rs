//! Recording test doubles

use std::cell::RefCell;

use takeoff_core::{CommandRunner, Reporter};

/// [`Reporter`] that keeps every message in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Info messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

/// [`CommandRunner`] that records command lines instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command_line: &str) {
        self.commands.borrow_mut().push(command_line.to_string());
    }
}
