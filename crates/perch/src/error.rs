//! Error types for Perch operations.
//!
//! This module provides the main error type [`PerchError`] which wraps
//! the error conditions the placement engine and its configuration can hit.

use std::{fmt, io};

use thiserror::Error;

use perch_core::error::ParseError;

/// Which element a failure relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// The element the popup is positioned against
    Anchor,
    /// The popup itself
    Popup,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor => f.write_str("anchor"),
            Self::Popup => f.write_str("popup"),
        }
    }
}

/// The main error type for Perch operations.
#[derive(Debug, Error)]
pub enum PerchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("the {role} element is not attached to the document")]
    DetachedElement { role: ElementRole },

    #[error("the positioning instance was updated from inside its own style hook")]
    ReentrantUpdate,

    #[error("Configuration error: {0}")]
    Config(String),
}
