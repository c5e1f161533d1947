//! The viewport popups are placed in, and the events it emits.
//!
//! A [`Viewport`] holds the visible area's size, its scroll offset and the
//! device pixel ratio. Changing any of them notifies registered observers
//! synchronously, before the mutating call returns. Positioning instances
//! register themselves when created and unregister on destroy.
//!
//! Observers are held weakly: dropping an observer without unregistering it
//! simply stops its notifications, and the stale entry is pruned on the next
//! dispatch.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Weak,
};

use log::{debug, trace};

use perch_core::geometry::{Bounds, Point, Size};

/// Events a viewport dispatches to its observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The scroll offset changed
    Scroll,
    /// The size or the device pixel ratio changed
    Resize,
}

/// Which viewport events an observer wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventListeners {
    pub scroll: bool,
    pub resize: bool,
}

impl EventListeners {
    /// Listen to nothing
    pub const NONE: Self = Self {
        scroll: false,
        resize: false,
    };

    /// Returns true if no event is selected
    pub fn is_empty(self) -> bool {
        !self.scroll && !self.resize
    }

    fn accepts(self, event: ViewportEvent) -> bool {
        match event {
            ViewportEvent::Scroll => self.scroll,
            ViewportEvent::Resize => self.resize,
        }
    }
}

impl Default for EventListeners {
    fn default() -> Self {
        Self {
            scroll: true,
            resize: true,
        }
    }
}

/// Receives viewport events.
pub trait ViewportObserver {
    fn on_viewport_event(&self, event: ViewportEvent);
}

/// Handle returned by [`Viewport::observe`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    listeners: EventListeners,
    observer: Weak<dyn ViewportObserver>,
}

/// The visible area of the page.
pub struct Viewport {
    size: Cell<Size>,
    scroll: Cell<Point>,
    device_pixel_ratio: Cell<f32>,
    observers: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size())
            .field("scroll", &self.scroll())
            .field("device_pixel_ratio", &self.device_pixel_ratio())
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl Viewport {
    /// Creates an unscrolled viewport with a device pixel ratio of 1
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            scroll: Cell::new(Point::default()),
            device_pixel_ratio: Cell::new(1.0),
            observers: RefCell::default(),
            next_id: Cell::new(0),
        }
    }

    /// Sets the initial device pixel ratio (builder style)
    pub fn with_device_pixel_ratio(self, ratio: f32) -> Self {
        self.device_pixel_ratio.set(ratio);
        self
    }

    /// Returns the size of the visible area
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Returns the document scroll offset
    pub fn scroll(&self) -> Point {
        self.scroll.get()
    }

    /// Returns the device pixel ratio
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.get()
    }

    /// Returns the visible area in viewport coordinates, anchored at the origin
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.size())
    }

    /// Resizes the viewport and notifies resize observers
    pub fn resize(&self, size: Size) {
        self.size.set(size);
        self.dispatch(ViewportEvent::Resize);
    }

    /// Scrolls the document and notifies scroll observers
    pub fn scroll_to(&self, scroll: Point) {
        self.scroll.set(scroll);
        self.dispatch(ViewportEvent::Scroll);
    }

    /// Changes the device pixel ratio and notifies resize observers
    pub fn set_device_pixel_ratio(&self, ratio: f32) {
        self.device_pixel_ratio.set(ratio);
        self.dispatch(ViewportEvent::Resize);
    }

    /// Registers an observer for the selected events.
    pub fn observe(
        &self,
        observer: Weak<dyn ViewportObserver>,
        listeners: EventListeners,
    ) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.observers.borrow_mut().push(Registration {
            id,
            listeners,
            observer,
        });
        debug!(observer_id = id.0; "Viewport observer registered");
        id
    }

    /// Removes an observer. Unknown ids are ignored.
    pub fn unobserve(&self, id: ObserverId) {
        self.observers
            .borrow_mut()
            .retain(|registration| registration.id != id);
        debug!(observer_id = id.0; "Viewport observer removed");
    }

    /// Returns the number of observers that are still alive
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|registration| registration.observer.strong_count() > 0)
            .count()
    }

    fn dispatch(&self, event: ViewportEvent) {
        // Collect first: observers may register or unregister while handling.
        let targets: Vec<_> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|registration| registration.observer.strong_count() > 0);
            observers
                .iter()
                .filter(|registration| registration.listeners.accepts(event))
                .filter_map(|registration| registration.observer.upgrade())
                .collect()
        };

        trace!(event:?, observers = targets.len(); "Dispatching viewport event");
        for observer in targets {
            observer.on_viewport_event(event);
        }
    }
}
