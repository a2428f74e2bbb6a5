//! Progress and diagnostic reporting.
//!
//! The conversion never logs on its own. Callers hand in a [`Reporter`]
//! and decide where messages end up.

use std::fmt;

pub trait Reporter {
    /// User-facing progress message
    fn info(&mut self, args: fmt::Arguments<'_>);

    /// Detail only worth showing when asked for
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        let _ = args;
    }

    /// Called once per emitted line of the pixel payload
    fn column_done(&mut self, column: u32, width: u32) {
        let _ = (column, width);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Collects messages in memory
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
    pub columns: Vec<u32>,
}

#[cfg(any(test, feature = "testing"))]
impl Reporter for RecordingReporter {
    fn info(&mut self, args: fmt::Arguments<'_>) {
        self.messages.push(args.to_string());
    }

    fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.messages.push(args.to_string());
    }

    fn column_done(&mut self, column: u32, _width: u32) {
        self.columns.push(column);
    }
}
