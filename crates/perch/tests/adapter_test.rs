//! Integration tests for the dropdown positioning adapter
//!
//! These tests exercise `create`, `update` and `destroy` against the native
//! engine through the public API only.

use std::{cell::RefCell, rc::Rc};

use perch::{
    Engine, LayoutBox, Viewport, adapter,
    geometry::{Point, Size},
};

struct Setup {
    engine: Engine,
    toggle: Rc<LayoutBox>,
    popup: Rc<LayoutBox>,
    calls: Rc<RefCell<Vec<String>>>,
}

fn setup() -> Setup {
    let viewport = Rc::new(Viewport::new(Size::new(1024.0, 768.0)));
    Setup {
        engine: Engine::new(viewport),
        toggle: Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(50.0, 20.0))),
        popup: Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(100.0, 40.0))),
        calls: Rc::default(),
    }
}

fn create(setup: &Setup) -> perch::Instance {
    let calls = Rc::clone(&setup.calls);
    adapter::create(
        &setup.engine,
        setup.toggle.clone(),
        setup.popup.clone(),
        move |style| calls.borrow_mut().push(style),
    )
    .expect("Failed to create instance")
}

#[test]
fn test_create_calls_back_once_with_fixed_position() {
    let setup = setup();
    let instance = create(&setup);

    let calls = setup.calls.borrow().clone();
    assert_eq!(calls.len(), 1, "create should apply styles exactly once");
    assert!(!calls[0].is_empty());
    assert!(
        calls[0].contains("position: fixed;"),
        "Unexpected style: {}",
        calls[0]
    );

    adapter::destroy(instance);
}

#[test]
fn test_update_calls_back_once_per_call() {
    let setup = setup();
    let instance = create(&setup);

    for expected in 2..=4 {
        adapter::update(&instance).expect("Failed to update");
        assert_eq!(setup.calls.borrow().len(), expected);
    }

    adapter::destroy(instance);
}

#[test]
fn test_style_string_format() {
    let setup = setup();
    let instance = create(&setup);

    let style = setup.calls.borrow()[0].clone();
    assert!(style.ends_with(';'));
    for declaration in style.split(' ').collect::<Vec<_>>().chunks(2) {
        assert_eq!(declaration.len(), 2, "Malformed style: {style}");
        assert!(declaration[0].ends_with(':'), "Malformed style: {style}");
        assert!(declaration[1].ends_with(';'), "Malformed style: {style}");
    }

    adapter::destroy(instance);
}

#[test]
fn test_popup_is_placed_below_toggle_with_gap() {
    let setup = setup();
    let instance = create(&setup);

    // Toggle at (0,0) sized 50x20: top = 20 + 2.
    assert_eq!(
        setup.calls.borrow()[0],
        "position: fixed; top: 22px; left: 0px;"
    );

    adapter::destroy(instance);
}

#[test]
fn test_update_follows_the_toggle() {
    let setup = setup();
    let instance = create(&setup);

    setup.toggle.move_to(Point::new(120.0, 300.0));
    adapter::update(&instance).expect("Failed to update");

    assert_eq!(
        setup.calls.borrow()[1],
        "position: fixed; top: 322px; left: 120px;"
    );

    adapter::destroy(instance);
}

#[test]
fn test_viewport_events_reposition_until_destroyed() {
    let setup = setup();
    let instance = create(&setup);
    let viewport = setup.engine.viewport();

    viewport.scroll_to(Point::new(0.0, 50.0));
    viewport.resize(Size::new(800.0, 600.0));
    assert_eq!(setup.calls.borrow().len(), 3);

    adapter::destroy(instance);

    viewport.scroll_to(Point::new(0.0, 100.0));
    viewport.resize(Size::new(640.0, 480.0));
    viewport.set_device_pixel_ratio(2.0);
    assert_eq!(
        setup.calls.borrow().len(),
        3,
        "No style callback may fire after destroy"
    );
}

#[test]
fn test_engine_errors_propagate_unchanged() {
    let setup = setup();
    setup.toggle.detach();

    let result = adapter::create(
        &setup.engine,
        setup.toggle.clone(),
        setup.popup.clone(),
        |_| {},
    );
    match result {
        Err(perch::PerchError::DetachedElement { role }) => {
            assert_eq!(role, perch::ElementRole::Anchor);
        }
        Err(err) => panic!("Unexpected error: {err}"),
        Ok(_) => panic!("Expected create to fail for a detached toggle"),
    }
    assert!(setup.calls.borrow().is_empty());
}

#[test]
fn test_independent_instances() {
    let setup = setup();
    let first = create(&setup);
    let second = create(&setup);
    assert_eq!(setup.calls.borrow().len(), 2);

    adapter::destroy(first);
    setup.engine.viewport().resize(Size::new(900.0, 700.0));
    assert_eq!(setup.calls.borrow().len(), 3);

    adapter::destroy(second);
}

#[test]
fn test_update_from_own_callback_is_an_error() {
    let setup = setup();
    let slot: Rc<RefCell<Option<perch::Instance>>> = Rc::default();
    let inner: Rc<RefCell<Option<(bool, usize)>>> = Rc::default();
    let calls = Rc::new(std::cell::Cell::new(0));

    let instance = adapter::create(&setup.engine, setup.toggle.clone(), setup.popup.clone(), {
        let slot = Rc::clone(&slot);
        let inner = Rc::clone(&inner);
        let calls = Rc::clone(&calls);
        move |_| {
            calls.set(calls.get() + 1);
            let Ok(slot) = slot.try_borrow() else {
                return;
            };
            if let Some(instance) = slot.as_ref() {
                let before = calls.get();
                let result = adapter::update(instance);
                let reentrant = matches!(result, Err(perch::PerchError::ReentrantUpdate));
                *inner.borrow_mut() = Some((reentrant, calls.get() - before));
            }
        }
    })
    .expect("Failed to create instance");
    *slot.borrow_mut() = Some(instance);

    adapter::update(slot.borrow().as_ref().unwrap()).expect("Outer update should succeed");

    assert_eq!(*inner.borrow(), Some((true, 0)));
    assert_eq!(calls.get(), 2);

    let instance = slot.borrow_mut().take().unwrap();
    adapter::destroy(instance);
}
