//! The diagnostics log.
//!
//! An append-only list of `(severity, range, message)` records shared by
//! the lexer and the parser. Rendering prints the classic
//! `file:line:col: error: message` header, the offending source line and
//! a caret/tilde underline sized by the range.

use std::fmt::{self, Write};

use yansi::Paint;

use crate::source::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error: ",
            Severity::Warning => "warning: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: Range,
    pub message: String,
}

impl Diagnostic {
    /// `^` under the first byte, `~` under the rest of the range up to
    /// the end of its line.
    fn underline(&self) -> String {
        let mut line = String::new();
        for _ in 0..self.range.position.column {
            line.push(' ');
        }
        line.push('^');
        if self.range.size() > 1 {
            if let Some(src) = self.range.source() {
                let mut i = self.range.start + 1;
                while i < self.range.end && src.byte(i) != Some(b'\n') {
                    line.push('~');
                    i += 1;
                }
            }
        }
        line
    }

    fn location(&self) -> String {
        let name = self
            .range
            .source()
            .map(|src| src.name().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        format!(
            "{}:{}:{}: ",
            name,
            self.range.position.line + 1,
            self.range.position.column + 1
        )
    }

    /// Rendered with `yansi` paint; honors the global yansi enable state,
    /// so `yansi::disable()` yields plain text.
    pub fn render(&self, out: &mut String) {
        let severity = match self.severity {
            Severity::Error => self.severity.label().red().to_string(),
            Severity::Warning => self.severity.label().yellow().to_string(),
        };
        let _ = write!(
            out,
            "{}{}{}\n{}\n{}\n",
            self.location().bold(),
            severity,
            self.message.bold(),
            self.range.enclosing_line().text(),
            self.underline(),
        );
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}\n{}\n{}",
            self.location(),
            self.severity.label(),
            self.message,
            self.range.enclosing_line().text(),
            self.underline(),
        )
    }
}

/// Append-only diagnostics log.
#[derive(Debug, Default)]
pub struct Log {
    diagnostics: Vec<Diagnostic>,
}

impl Log {
    pub fn new() -> Log {
        Log::default()
    }

    pub fn error(&mut self, range: Range, message: impl Into<String>) {
        self.append(Severity::Error, range, message.into());
    }

    pub fn warning(&mut self, range: Range, message: impl Into<String>) {
        self.append(Severity::Warning, range, message.into());
    }

    fn append(&mut self, severity: Severity, range: Range, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            range,
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            diagnostic.render(&mut out);
        }
        out
    }

    /// The process exit code the driver should end with.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }
}
