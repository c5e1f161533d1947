//! Dropdown positioning adapter.
//!
//! Three functions over a [`PositioningEngine`]: [`create`], [`update`] and
//! [`destroy`]. Popups are placed with a fixed strategy, below their toggle
//! and left-aligned to it, 2 pixels away. The engine never touches the popup
//! element; instead every computed placement is serialized into an inline
//! style string and handed to the caller's callback:
//!
//! ```text
//! position: fixed; top: 22px; left: 0px;
//! ```
//!
//! Errors are whatever the engine reports. The adapter performs no
//! validation, retries or caching of its own.
//!
//! # Examples
//!
//! ```
//! # use std::{cell::RefCell, rc::Rc};
//! # use perch::{Engine, LayoutBox, Viewport, adapter};
//! # use perch_core::geometry::{Point, Size};
//! let engine = Engine::new(Rc::new(Viewport::new(Size::new(1024.0, 768.0))));
//! let toggle = Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(50.0, 20.0)));
//! let popup = Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(100.0, 40.0)));
//!
//! let style = Rc::new(RefCell::new(String::new()));
//! let instance = adapter::create(&engine, toggle, popup, {
//!     let style = Rc::clone(&style);
//!     move |popup_style| *style.borrow_mut() = popup_style
//! })?;
//! assert_eq!(*style.borrow(), "position: fixed; top: 22px; left: 0px;");
//!
//! adapter::update(&instance)?;
//! adapter::destroy(instance);
//! # Ok::<(), perch::PerchError>(())
//! ```

use std::rc::Rc;

use perch_core::placement::{Offset, Placement, Strategy};

use crate::{
    element::Element,
    engine::{Options, PositioningEngine, PositioningInstance},
    error::PerchError,
};

/// Gap between the toggle and the popup, in pixels.
pub const POPUP_DISTANCE: f32 = 2.0;

/// Engine options used by [`create`].
pub fn dropdown_options(mut on_apply_styles: impl FnMut(String) + 'static) -> Options {
    Options::new()
        .with_strategy(Strategy::Fixed)
        .with_placement(Placement::BOTTOM_START)
        .with_offset(Offset::new(0.0, POPUP_DISTANCE))
        .with_apply_styles(move |styles| on_apply_styles(styles.to_style_string()))
}

/// Starts positioning `popup` against `toggle`.
///
/// `on_apply_styles` is called synchronously with the popup's inline style
/// before this function returns, and again on every later recomputation.
///
/// # Errors
///
/// Propagates the engine's error unchanged.
pub fn create<E: PositioningEngine>(
    engine: &E,
    toggle: Rc<dyn Element>,
    popup: Rc<dyn Element>,
    on_apply_styles: impl FnMut(String) + 'static,
) -> Result<E::Instance, PerchError> {
    engine.create_instance(toggle, popup, dropdown_options(on_apply_styles))
}

/// Recomputes the placement now; the style callback runs before returning.
///
/// # Errors
///
/// Propagates the engine's error unchanged.
pub fn update<I: PositioningInstance>(instance: &I) -> Result<(), PerchError> {
    instance.update()
}

/// Releases the instance. No style callback fires afterwards.
pub fn destroy<I: PositioningInstance>(instance: I) {
    instance.destroy();
}
