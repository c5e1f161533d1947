//! Headless dropdown state built on the positioning adapter.
//!
//! A [`Dropdown`] tracks whether its menu is expanded, positions the menu
//! lazily the first time it opens and keeps the latest inline style computed
//! for it. Rendering is left to the UI layer: it reads
//! [`Dropdown::popup_style`] and [`Dropdown::is_expanded`], and reports
//! clicks and finished renders back.
//!
//! The positioning instance lives as long as the dropdown and is destroyed
//! when the dropdown is dropped.

use std::{cell::RefCell, rc::Rc};

use log::debug;

use perch_core::geometry::Point;

use crate::{
    adapter,
    element::Element,
    engine::{PositioningEngine, PositioningInstance},
    error::PerchError,
};

/// Owns a positioning instance and destroys it on drop.
struct PopperData<I: PositioningInstance> {
    instance: Option<I>,
}

impl<I: PositioningInstance> PopperData<I> {
    fn instance(&self) -> Option<&I> {
        self.instance.as_ref()
    }
}

impl<I: PositioningInstance> Drop for PopperData<I> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            adapter::destroy(instance);
        }
    }
}

/// Expanded state and positioning of a dropdown menu.
pub struct Dropdown<E: PositioningEngine> {
    engine: Rc<E>,
    toggle: Rc<dyn Element>,
    popup: Rc<dyn Element>,
    expanded: bool,
    update_pending: bool,
    popup_style: Rc<RefCell<String>>,
    popper: Option<PopperData<E::Instance>>,
}

impl<E: PositioningEngine> Dropdown<E> {
    /// Creates a collapsed dropdown for the given toggle and menu elements
    pub fn new(engine: Rc<E>, toggle: Rc<dyn Element>, popup: Rc<dyn Element>) -> Self {
        Self {
            engine,
            toggle,
            popup,
            expanded: false,
            update_pending: false,
            popup_style: Rc::default(),
            popper: None,
        }
    }

    /// Returns true while the menu is open
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns true once the menu has been positioned at least once
    pub fn is_positioned(&self) -> bool {
        self.popper.is_some()
    }

    /// Returns the latest inline style computed for the menu
    pub fn popup_style(&self) -> String {
        self.popup_style.borrow().clone()
    }

    /// Handles a click on the toggle.
    ///
    /// Opening the menu for the first time creates the positioning instance.
    /// Every opening schedules an update for [`Dropdown::after_render`].
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the instance cannot be created.
    pub fn toggle_clicked(&mut self) -> Result<(), PerchError> {
        self.expanded = !self.expanded;
        debug!(expanded = self.expanded; "Dropdown toggled");

        if self.expanded {
            if self.popper.is_none() {
                let popup_style = Rc::clone(&self.popup_style);
                let instance = adapter::create(
                    self.engine.as_ref(),
                    Rc::clone(&self.toggle),
                    Rc::clone(&self.popup),
                    move |style| *popup_style.borrow_mut() = style,
                )
                .inspect_err(|_| self.expanded = false)?;
                self.popper = Some(PopperData {
                    instance: Some(instance),
                });
            }
            self.update_pending = true;
        }
        Ok(())
    }

    /// Runs the update scheduled by the last opening, once the menu has been
    /// rendered with its final size.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the placement cannot be recomputed.
    pub fn after_render(&mut self) -> Result<(), PerchError> {
        if !std::mem::take(&mut self.update_pending) {
            return Ok(());
        }
        match self.popper.as_ref().and_then(PopperData::instance) {
            Some(instance) => adapter::update(instance),
            None => Ok(()),
        }
    }

    /// Handles a click that may close the menu.
    ///
    /// `target` is the click position in viewport coordinates, or `None` for
    /// clicks that always close the menu, such as choosing an item. Clicks
    /// inside the toggle or the menu keep it open.
    pub fn collapse(&mut self, target: Option<Point>) {
        if !self.expanded {
            return;
        }

        let keep_open = target.is_some_and(|point| {
            [&self.toggle, &self.popup].into_iter().any(|element| {
                element
                    .bounding_rect()
                    .is_some_and(|rect| rect.contains_point(point))
            })
        });
        if !keep_open {
            self.expanded = false;
            debug!("Dropdown collapsed");
        }
    }
}
