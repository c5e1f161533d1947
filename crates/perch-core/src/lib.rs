//! Perch Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Perch placement
//! engine, its adapter and its command-line interface. It includes:
//!
//! - **Geometry**: Points, sizes, rectangles and insets ([`geometry`] module)
//! - **Placement**: Sides, alignments, strategies and offsets ([`placement`] module)
//! - **Style**: Computed inline styles and their string form ([`style`] module)
//! - **Errors**: Parsing errors for the textual forms ([`error`] module)

pub mod error;
pub mod geometry;
pub mod placement;
pub mod style;
