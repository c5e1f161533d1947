//! Live positioning instances of the native engine.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use log::{debug, info, trace, warn};

use perch_core::{placement::Placement, style::StyleMap};

use super::{
    ApplyStylesHook, PositioningInstance,
    compute::{Measurements, Modifiers, compute},
};
use crate::{
    element::Element,
    error::{ElementRole, PerchError},
    viewport::{EventListeners, ObserverId, Viewport, ViewportEvent, ViewportObserver},
};

/// A popup positioned against an anchor.
///
/// The instance is owned by the caller and must be released with
/// [`PositioningInstance::destroy`]; until then it repositions the popup on
/// every observed viewport event.
#[must_use = "positioning instances must be released with `destroy`"]
pub struct Instance {
    state: Rc<InstanceState>,
    observer: Option<ObserverId>,
}

struct InstanceState {
    anchor: Rc<dyn Element>,
    popup: Rc<dyn Element>,
    viewport: Rc<Viewport>,
    modifiers: Modifiers,
    apply_styles: RefCell<Option<ApplyStylesHook>>,
    placement: Cell<Placement>,
}

impl Instance {
    pub(super) fn new(
        anchor: Rc<dyn Element>,
        popup: Rc<dyn Element>,
        viewport: Rc<Viewport>,
        modifiers: Modifiers,
        apply_styles: Option<ApplyStylesHook>,
    ) -> Self {
        Self {
            state: Rc::new(InstanceState {
                anchor,
                popup,
                viewport,
                modifiers,
                apply_styles: RefCell::new(apply_styles),
                placement: Cell::new(modifiers.placement),
            }),
            observer: None,
        }
    }

    /// Starts listening to the selected viewport events
    pub(super) fn observe(mut self, listeners: EventListeners) -> Self {
        if !listeners.is_empty() {
            let observer = Rc::downgrade(&self.state) as Weak<dyn ViewportObserver>;
            self.observer = Some(self.state.viewport.observe(observer, listeners));
        }
        self
    }

    /// Returns the placement in effect after the last computation.
    ///
    /// Differs from the configured placement when the popup was flipped.
    pub fn placement(&self) -> Placement {
        self.state.placement.get()
    }

    /// Returns true while the instance listens to viewport events
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("placement", &self.placement())
            .field("modifiers", &self.state.modifiers)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

impl PositioningInstance for Instance {
    fn update(&self) -> Result<(), PerchError> {
        self.state.force_update()
    }

    fn destroy(self) {
        if let Some(id) = self.observer {
            self.state.viewport.unobserve(id);
        }
        info!(placement = self.placement().to_string(); "Positioning instance destroyed");
    }
}

impl InstanceState {
    fn force_update(&self) -> Result<(), PerchError> {
        let anchor = self
            .anchor
            .bounding_rect()
            .ok_or(PerchError::DetachedElement {
                role: ElementRole::Anchor,
            })?;
        let popup = self
            .popup
            .bounding_rect()
            .ok_or(PerchError::DetachedElement {
                role: ElementRole::Popup,
            })?;

        let measurements = Measurements {
            anchor,
            popup: popup.to_size(),
            viewport: self.viewport.bounds(),
            scroll: self.viewport.scroll(),
            device_pixel_ratio: self.viewport.device_pixel_ratio(),
        };
        let computed = compute(&self.modifiers, &measurements);

        debug!(
            placement = computed.placement.to_string(),
            x = computed.position.x(),
            y = computed.position.y();
            "Placement computed"
        );
        trace!(styles = computed.styles.to_style_string(); "Computed popup styles");

        self.placement.set(computed.placement);
        self.apply(&computed.styles)
    }

    /// Hands the styles to the hook, or to the popup when there is none.
    ///
    /// Fails when called from inside the hook itself.
    fn apply(&self, styles: &StyleMap) -> Result<(), PerchError> {
        let Ok(mut hook) = self.apply_styles.try_borrow_mut() else {
            warn!("Skipping re-entrant style application");
            return Err(PerchError::ReentrantUpdate);
        };

        match hook.as_mut() {
            Some(hook) => hook(styles),
            None => self.popup.set_style(styles),
        }
        Ok(())
    }
}

impl ViewportObserver for InstanceState {
    fn on_viewport_event(&self, event: ViewportEvent) {
        if let Err(err) = self.force_update() {
            warn!(event:?, error = err.to_string(); "Failed to reposition popup");
        }
    }
}

#[cfg(test)]
mod tests {
    use perch_core::{
        geometry::{Point, Size},
        placement::Strategy,
    };

    use super::*;
    use crate::{
        element::LayoutBox,
        engine::{Engine, Options, PositioningEngine},
    };

    struct Fixture {
        engine: Engine,
        anchor: Rc<LayoutBox>,
        popup: Rc<LayoutBox>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    fn fixture() -> Fixture {
        let viewport = Rc::new(Viewport::new(Size::new(1024.0, 768.0)));
        Fixture {
            engine: Engine::new(viewport),
            anchor: Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(50.0, 20.0))),
            popup: Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(100.0, 40.0))),
            calls: Rc::default(),
        }
    }

    impl Fixture {
        fn create(&self, options: Options) -> Instance {
            let calls = Rc::clone(&self.calls);
            let options = options
                .with_apply_styles(move |styles| calls.borrow_mut().push(styles.to_string()));
            self.engine
                .create_instance(self.anchor.clone(), self.popup.clone(), options)
                .unwrap()
        }
    }

    #[test]
    fn test_viewport_events_reposition() {
        let f = fixture();
        let instance = f.create(Options::new().with_strategy(Strategy::Absolute));

        f.engine.viewport().scroll_to(Point::new(0.0, 100.0));

        let calls = f.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], "position: absolute; top: 120px; left: 0px;");
        drop(calls);
        instance.destroy();
    }

    #[test]
    fn test_destroy_stops_viewport_updates() {
        let f = fixture();
        let instance = f.create(Options::new());
        assert!(instance.is_observing());
        assert_eq!(f.engine.viewport().observer_count(), 1);

        instance.destroy();
        f.engine.viewport().scroll_to(Point::new(0.0, 100.0));
        f.engine.viewport().resize(Size::new(300.0, 300.0));

        assert_eq!(f.calls.borrow().len(), 1);
        assert_eq!(f.engine.viewport().observer_count(), 0);
    }

    #[test]
    fn test_disabled_listeners_do_not_observe() {
        let f = fixture();
        let instance = f.create(Options::new().with_event_listeners(EventListeners::NONE));
        assert!(!instance.is_observing());

        f.engine.viewport().resize(Size::new(300.0, 300.0));
        assert_eq!(f.calls.borrow().len(), 1);
        instance.destroy();
    }

    #[test]
    fn test_placement_tracks_flip() {
        let f = fixture();
        let instance = f.create(Options::new());
        assert_eq!(instance.placement(), Placement::BOTTOM_START);

        f.anchor.move_to(Point::new(0.0, 740.0));
        instance.update().unwrap();
        assert_eq!(instance.placement().to_string(), "top-start");
        instance.destroy();
    }

    #[test]
    fn test_update_fails_once_popup_detaches() {
        let f = fixture();
        let instance = f.create(Options::new());

        f.popup.detach();
        assert!(matches!(
            instance.update(),
            Err(PerchError::DetachedElement {
                role: ElementRole::Popup
            })
        ));

        // Viewport events swallow the failure.
        f.engine.viewport().resize(Size::new(300.0, 300.0));
        assert_eq!(f.calls.borrow().len(), 1);
        instance.destroy();
    }

    #[test]
    fn test_reentrant_update_is_reported() {
        let f = fixture();
        let slot: Rc<RefCell<Option<Instance>>> = Rc::default();
        let count = Rc::new(Cell::new(0));
        let inner_results: Rc<RefCell<Vec<Result<(), PerchError>>>> = Rc::default();

        let options = Options::new().with_apply_styles({
            let slot = Rc::clone(&slot);
            let count = Rc::clone(&count);
            let inner_results = Rc::clone(&inner_results);
            move |_| {
                count.set(count.get() + 1);
                let Ok(slot) = slot.try_borrow() else {
                    return;
                };
                if let Some(instance) = slot.as_ref() {
                    let calls_before = count.get();
                    let result = instance.update();
                    assert_eq!(count.get(), calls_before, "hook must not run re-entrantly");
                    inner_results.borrow_mut().push(result);
                }
            }
        });
        let instance = f
            .engine
            .create_instance(f.anchor.clone(), f.popup.clone(), options)
            .unwrap();
        *slot.borrow_mut() = Some(instance);

        // Viewport-triggered update.
        f.engine.viewport().resize(Size::new(800.0, 600.0));
        assert_eq!(count.get(), 2);

        // Caller-triggered update: the outer call succeeds.
        slot.borrow().as_ref().unwrap().update().unwrap();
        assert_eq!(count.get(), 3);

        let inner_results = inner_results.borrow();
        assert_eq!(inner_results.len(), 2);
        assert!(
            inner_results
                .iter()
                .all(|result| matches!(result, Err(PerchError::ReentrantUpdate)))
        );
        drop(inner_results);

        let instance = slot.borrow_mut().take().unwrap();
        instance.destroy();
    }

    #[test]
    fn test_debug_shows_placement() {
        let f = fixture();
        let instance = f.create(Options::new());

        let debug = format!("{instance:?}");
        assert!(debug.contains("placement: Placement"), "{debug}");
        assert!(debug.ends_with(".. }"), "{debug}");
        instance.destroy();
    }
}
