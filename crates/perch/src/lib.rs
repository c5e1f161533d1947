//! Perch - popup positioning for dropdowns, tooltips and popovers.
//!
//! The [`adapter`] module places a popup below its toggle and reports the
//! computed inline style through a callback. It is written against the
//! [`engine::PositioningEngine`] capability; [`Engine`] is the native
//! implementation, measuring [`element::Element`]s inside a [`Viewport`].
//!
//! [`Dropdown`] ties the pieces together into headless dropdown state.

pub mod adapter;
pub mod config;
pub mod dropdown;
pub mod element;
pub mod engine;
pub mod viewport;

mod error;

pub use perch_core::{geometry, placement, style};

pub use dropdown::Dropdown;
pub use element::LayoutBox;
pub use engine::{Engine, Instance};
pub use error::{ElementRole, PerchError};
pub use viewport::Viewport;
