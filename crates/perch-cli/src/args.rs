//! Command-line argument definitions for the Perch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments describe the anchor and popup geometry, override
//! placement settings from the configuration file, and control logging
//! verbosity.

use clap::Parser;

use perch_core::{
    geometry::{Bounds, Point, Size},
    placement::{Offset, Placement, Strategy},
};

/// Command-line arguments for the Perch placement tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Anchor rectangle in viewport coordinates, as `X,Y,W,H`
    #[arg(short, long, allow_hyphen_values = true)]
    pub anchor: Bounds,

    /// Popup size, as `W,H` or `WxH`
    #[arg(short, long)]
    pub popup: Size,

    /// Viewport size, as `W,H` or `WxH` (overrides the configuration)
    #[arg(long)]
    pub viewport: Option<Size>,

    /// Document scroll offset, as `X,Y`
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub scroll: Point,

    /// Preferred placement, e.g. `bottom-start` (overrides the configuration)
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Positioning strategy: fixed or absolute (overrides the configuration)
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Offset from the anchor, as `SKIDDING,DISTANCE` (overrides the configuration)
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<Offset>,

    /// Disable flipping to the opposite side
    #[arg(long)]
    pub no_flip: bool,

    /// Disable shifting the popup back into the viewport
    #[arg(long)]
    pub no_prevent_overflow: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
