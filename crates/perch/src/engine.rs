//! Positioning engine capability and its native implementation.
//!
//! The adapter only depends on the [`PositioningEngine`] and
//! [`PositioningInstance`] traits. [`Engine`] implements them on top of a
//! [`Viewport`]: it measures the anchor and popup, runs the placement
//! pipeline and hands the computed styles either to an override hook or to
//! the popup element itself.
//!
//! Instances keep observing the viewport until they are destroyed, so
//! scrolling or resizing repositions every live popup.

mod compute;
mod instance;

pub use compute::Modifiers;
pub use instance::Instance;

use std::{fmt, rc::Rc};

use log::info;

use perch_core::{
    geometry::Insets,
    placement::{Offset, Placement, Strategy},
    style::StyleMap,
};

use crate::{
    element::Element,
    error::PerchError,
    viewport::{EventListeners, Viewport},
};

/// Hook replacing the engine's default style application.
pub type ApplyStylesHook = Box<dyn FnMut(&StyleMap)>;

/// Creates positioning instances for an anchor and a popup.
pub trait PositioningEngine {
    type Instance: PositioningInstance;

    /// Creates an instance and computes its first placement.
    ///
    /// # Errors
    ///
    /// Returns `PerchError::DetachedElement` if either element cannot be
    /// measured.
    fn create_instance(
        &self,
        anchor: Rc<dyn Element>,
        popup: Rc<dyn Element>,
        options: Options,
    ) -> Result<Self::Instance, PerchError>;
}

/// A live positioning instance.
pub trait PositioningInstance {
    /// Recomputes the placement immediately and applies the resulting styles.
    ///
    /// # Errors
    ///
    /// Returns `PerchError::DetachedElement` if either element cannot be
    /// measured.
    fn update(&self) -> Result<(), PerchError>;

    /// Releases every resource tied to the instance.
    fn destroy(self);
}

/// Configuration for a positioning instance.
///
/// Defaults to a fixed, bottom-start placement with flipping and overflow
/// prevention enabled, listening to both scroll and resize.
///
/// # Examples
///
/// ```
/// # use perch::engine::Options;
/// # use perch_core::placement::{Offset, Strategy};
/// let options = Options::new()
///     .with_strategy(Strategy::Absolute)
///     .with_offset(Offset::new(0.0, 8.0))
///     .with_flip(false);
/// assert_eq!(options.modifiers().strategy, Strategy::Absolute);
/// ```
#[derive(Default)]
pub struct Options {
    modifiers: Modifiers,
    event_listeners: EventListeners,
    apply_styles: Option<ApplyStylesHook>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options from a complete set of modifiers
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.modifiers.strategy = strategy;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.modifiers.placement = placement;
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.modifiers.offset = offset;
        self
    }

    pub fn with_flip(mut self, flip: bool) -> Self {
        self.modifiers.flip = flip;
        self
    }

    pub fn with_prevent_overflow(mut self, prevent_overflow: bool) -> Self {
        self.modifiers.prevent_overflow = prevent_overflow;
        self
    }

    pub fn with_gpu_acceleration(mut self, gpu_acceleration: bool) -> Self {
        self.modifiers.gpu_acceleration = gpu_acceleration;
        self
    }

    /// Sets the space kept free along the viewport edges
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.modifiers.padding = padding;
        self
    }

    pub fn with_event_listeners(mut self, event_listeners: EventListeners) -> Self {
        self.event_listeners = event_listeners;
        self
    }

    /// Replaces the default style application.
    ///
    /// The hook receives the computed popup styles every time the placement
    /// is recomputed, and the popup element is left untouched.
    pub fn with_apply_styles(mut self, hook: impl FnMut(&StyleMap) + 'static) -> Self {
        self.apply_styles = Some(Box::new(hook));
        self
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn event_listeners(&self) -> EventListeners {
        self.event_listeners
    }

    /// Returns true if a style hook replaces the default application
    pub fn has_apply_styles(&self) -> bool {
        self.apply_styles.is_some()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("modifiers", &self.modifiers)
            .field("event_listeners", &self.event_listeners)
            .field("apply_styles", &self.apply_styles.is_some())
            .finish()
    }
}

/// The native placement engine.
pub struct Engine {
    viewport: Rc<Viewport>,
}

impl Engine {
    /// Creates an engine placing popups within `viewport`
    pub fn new(viewport: Rc<Viewport>) -> Self {
        Self { viewport }
    }

    /// Returns the viewport the engine observes
    pub fn viewport(&self) -> &Rc<Viewport> {
        &self.viewport
    }
}

impl PositioningEngine for Engine {
    type Instance = Instance;

    fn create_instance(
        &self,
        anchor: Rc<dyn Element>,
        popup: Rc<dyn Element>,
        options: Options,
    ) -> Result<Instance, PerchError> {
        let Options {
            modifiers,
            event_listeners,
            apply_styles,
        } = options;

        let instance = Instance::new(
            anchor,
            popup,
            Rc::clone(&self.viewport),
            modifiers,
            apply_styles,
        );
        instance.update()?;
        let instance = instance.observe(event_listeners);

        info!(
            placement = modifiers.placement.to_string(),
            strategy = modifiers.strategy.as_css();
            "Positioning instance created"
        );
        Ok(instance)
    }
}
