//! Errors raised while parsing Perch's textual value forms.

use thiserror::Error;

/// A value could not be parsed from its textual form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid placement `{0}`, expected a side (top, bottom, left, right) optionally suffixed with -start or -end")]
    Placement(String),

    #[error("invalid strategy `{0}`, valid values: fixed, absolute")]
    Strategy(String),

    #[error("invalid {kind} `{input}`: {reason}")]
    Geometry {
        kind: &'static str,
        input: String,
        reason: String,
    },
}
