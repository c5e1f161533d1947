//! Configuration types for popup placement.
//!
//! This module provides configuration structures that control how popups
//! are placed and which viewport they are placed in. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every field
//! falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining engine and viewport settings.
//! - [`EngineConfig`] - Placement, strategy, offset and modifier switches.
//! - [`ViewportConfig`] - Size and device pixel ratio of the viewport.
//!
//! # Example
//!
//! ```
//! # use perch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.engine().placement().to_string(), "bottom-start");
//! assert_eq!(config.viewport().width(), 1024.0);
//! ```

use serde::Deserialize;

use perch_core::{
    geometry::Size,
    placement::{Offset, Placement, Strategy},
};

use crate::{
    adapter::POPUP_DISTANCE,
    engine::{Modifiers, Options},
    error::PerchError,
    viewport::Viewport,
};

/// Top-level configuration combining engine and viewport settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration section.
    #[serde(default)]
    engine: EngineConfig,

    /// Viewport configuration section.
    #[serde(default)]
    viewport: ViewportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(engine: EngineConfig, viewport: ViewportConfig) -> Self {
        Self { engine, viewport }
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns the engine configuration for modification.
    pub fn engine_mut(&mut self) -> &mut EngineConfig {
        &mut self.engine
    }

    /// Returns the viewport configuration for modification.
    pub fn viewport_mut(&mut self) -> &mut ViewportConfig {
        &mut self.viewport
    }
}

/// Placement settings.
///
/// The defaults match the dropdown adapter: fixed strategy, `bottom-start`
/// placement and a 2 pixel gap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    placement: Placement,
    strategy: Strategy,
    offset: Offset,
    flip: bool,
    prevent_overflow: bool,
    gpu_acceleration: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            strategy: Strategy::Fixed,
            offset: Offset::new(0.0, POPUP_DISTANCE),
            flip: true,
            prevent_overflow: true,
            gpu_acceleration: false,
        }
    }
}

impl EngineConfig {
    /// Returns the preferred placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the positioning strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the offset from the anchor.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    pub fn set_flip(&mut self, flip: bool) {
        self.flip = flip;
    }

    pub fn set_prevent_overflow(&mut self, prevent_overflow: bool) {
        self.prevent_overflow = prevent_overflow;
    }

    /// Builds engine options from this configuration.
    pub fn to_options(&self) -> Options {
        Options::from_modifiers(Modifiers {
            strategy: self.strategy,
            placement: self.placement,
            offset: self.offset,
            flip: self.flip,
            prevent_overflow: self.prevent_overflow,
            gpu_acceleration: self.gpu_acceleration,
            ..Modifiers::default()
        })
    }
}

/// Viewport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ViewportConfig {
    /// Returns the viewport width in CSS pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the viewport height in CSS pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the device pixel ratio.
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn set_size(&mut self, size: Size) {
        self.width = size.width();
        self.height = size.height();
    }

    /// Builds a viewport from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `PerchError::Config` if a dimension or the device pixel ratio
    /// is not a positive finite number.
    pub fn to_viewport(&self) -> Result<Viewport, PerchError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("device_pixel_ratio", self.device_pixel_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PerchError::Config(format!(
                    "viewport {name} must be a positive number, got {value}"
                )));
            }
        }

        Ok(Viewport::new(Size::new(self.width, self.height))
            .with_device_pixel_ratio(self.device_pixel_ratio))
    }
}
