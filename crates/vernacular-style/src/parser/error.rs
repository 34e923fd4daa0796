//! Recoverable problems found while parsing localized source.

use vernacular_core::logging::targets;

/// A skipped line or block, with its location.
///
/// Warnings never stop parsing; they are collected for diagnostics and each
/// one is also logged when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// What was skipped and why.
    pub message: String,
    /// Line number where the problem occurred (1-indexed).
    pub line: u32,
}

impl ParseWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Collects warnings and logs each one as it arrives.
#[derive(Debug, Default)]
pub(crate) struct Warnings {
    items: Vec<ParseWarning>,
}

impl Warnings {
    pub(crate) fn push(&mut self, line: u32, message: impl Into<String>) {
        let warning = ParseWarning::new(message, line);
        tracing::warn!(
            target: targets::PARSER,
            line = warning.line,
            "{}",
            warning.message
        );
        self.items.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<ParseWarning> {
        self.items
    }
}
