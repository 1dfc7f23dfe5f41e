//! Diagnostic stream output.
//!
//! Standard output is reserved for reports and exported configuration, so
//! everything meant for the user (errors, the update advisory) goes through
//! [`Diagnostics`] to stderr.

use std::io::{self, IsTerminal, Write};

use crate::error::ToolError;

/// Level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Operation failure.
    Error,
    /// Update advisory.
    Advisory,
}

/// Writer for messages on the diagnostic stream.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    colored: bool,
}

impl Diagnostics {
    /// Create a writer, colouring output when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            colored: Self::should_use_color(),
        }
    }

    /// Returns true if stderr is a TTY and TERM is set.
    fn should_use_color() -> bool {
        io::stderr().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print `err` with its reason, if it has one.
    pub fn error(&self, err: &ToolError) {
        self.print(MessageLevel::Error, &render_error(err));
    }

    /// Print an update advisory line.
    pub fn advisory(&self, line: &str) {
        self.print(MessageLevel::Advisory, line);
    }

    fn print(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = match level {
            MessageLevel::Error => ("Error: ", "\x1b[31m"),
            MessageLevel::Advisory => ("", "\x1b[33m"),
        };

        let line = if self.colored {
            format!("{color_code}{prefix}{message}\x1b[0m\n")
        } else {
            format!("{prefix}{message}\n")
        };

        // Write failures on stderr are dropped.
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

/// Message and indented reason for `err`.
pub fn render_error(err: &ToolError) -> String {
    match err.detail() {
        Some(detail) => format!("{err}\n  Reason: {}", detail.trim_end()),
        None => err.to_string(),
    }
}
