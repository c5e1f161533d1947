//! Error adapter for converting PerchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use perch::PerchError;

/// Adapter giving a [`PerchError`] a diagnostic code and, where one applies,
/// a hint on how to fix the input.
pub struct ErrorAdapter<'a>(pub &'a PerchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PerchError::Io(_) => "perch::io",
            PerchError::Parse(_) => "perch::parse",
            PerchError::DetachedElement { .. } => "perch::detached",
            PerchError::ReentrantUpdate => "perch::reentrant",
            PerchError::Config(_) => "perch::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PerchError::DetachedElement { .. } => {
                "give both the anchor and the popup a position and size"
            }
            PerchError::Config(_) => "check the [engine] and [viewport] sections of the file",
            PerchError::Io(_) | PerchError::Parse(_) | PerchError::ReentrantUpdate => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use perch::ElementRole;

    use super::*;

    #[test]
    fn test_codes() {
        let err = PerchError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "perch::config");
        assert_eq!(adapter.to_string(), "Configuration error: bad");

        let err = PerchError::DetachedElement {
            role: ElementRole::Anchor,
        };
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "perch::detached");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_parse_error_has_no_help() {
        let err: PerchError = "nowhere"
            .parse::<perch::placement::Placement>()
            .unwrap_err()
            .into();
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "perch::parse");
        assert!(adapter.help().is_none());
    }
}
