//! Element references handed to the placement engine.
//!
//! The engine never owns elements. UI code keeps the anchor and popup alive
//! and shares them as `Rc<dyn Element>`; the engine only asks for their
//! current rectangle and, when no style hook is installed, writes the
//! computed style back onto the popup.
//!
//! [`LayoutBox`] is a plain in-memory element, used by the command-line
//! interface and by headless integrations that track geometry themselves.

use std::cell::{Cell, RefCell};

use perch_core::{
    geometry::{Bounds, Point, Size},
    style::StyleMap,
};

/// A reference to a laid out element.
pub trait Element {
    /// Returns the element's viewport-relative rectangle, or `None` when the
    /// element is not attached to the document.
    fn bounding_rect(&self) -> Option<Bounds>;

    /// Writes computed inline styles onto the element.
    fn set_style(&self, styles: &StyleMap);
}

/// An in-memory element with interior mutability.
///
/// # Examples
///
/// ```
/// # use perch::LayoutBox;
/// # use perch::element::Element;
/// # use perch_core::geometry::{Point, Size};
/// let anchor = LayoutBox::new(Point::new(0.0, 0.0), Size::new(50.0, 20.0));
/// anchor.move_to(Point::new(10.0, 10.0));
/// assert_eq!(anchor.bounding_rect().unwrap().min_x(), 10.0);
/// ```
#[derive(Debug, Default)]
pub struct LayoutBox {
    rect: Cell<Option<Bounds>>,
    style: RefCell<String>,
}

impl LayoutBox {
    /// Creates an attached box at `top_left` with the given size
    pub fn new(top_left: Point, size: Size) -> Self {
        Self {
            rect: Cell::new(Some(Bounds::new_from_top_left(top_left, size))),
            style: RefCell::default(),
        }
    }

    /// Creates a box that is not attached to any document
    pub fn detached() -> Self {
        Self::default()
    }

    /// Replaces the box's rectangle, attaching it if needed
    pub fn set_bounds(&self, bounds: Bounds) {
        self.rect.set(Some(bounds));
    }

    /// Moves the box, keeping its size.
    ///
    /// A detached box stays detached.
    pub fn move_to(&self, top_left: Point) {
        if let Some(rect) = self.rect.get() {
            self.rect
                .set(Some(Bounds::new_from_top_left(top_left, rect.to_size())));
        }
    }

    /// Removes the box from the document
    pub fn detach(&self) {
        self.rect.set(None);
    }

    /// Returns the last inline style written by the engine
    pub fn style(&self) -> String {
        self.style.borrow().clone()
    }
}

impl Element for LayoutBox {
    fn bounding_rect(&self) -> Option<Bounds> {
        self.rect.get()
    }

    fn set_style(&self, styles: &StyleMap) {
        *self.style.borrow_mut() = styles.to_style_string();
    }
}
