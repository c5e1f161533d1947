//! CLI logic for the Perch placement tool.
//!
//! Places a popup of a given size against an anchor rectangle inside a
//! viewport and reports the inline style the popup would receive.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{cell::RefCell, rc::Rc};

use log::info;

use perch::{
    Engine, LayoutBox, PerchError,
    config::AppConfig,
    engine::{PositioningEngine, PositioningInstance},
    geometry::Point,
};

/// Run the Perch CLI application
///
/// Loads the configuration, applies the command-line overrides and computes
/// the popup placement once.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Returns
///
/// The popup's style string, e.g. `position: fixed; top: 22px; left: 0px;`
///
/// # Errors
///
/// Returns `PerchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - An empty viewport
pub fn run(args: &Args) -> Result<String, PerchError> {
    info!(
        anchor:? = args.anchor,
        popup:? = args.popup;
        "Computing popup placement"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let viewport = Rc::new(app_config.viewport().to_viewport()?);
    viewport.scroll_to(args.scroll);
    let engine = Engine::new(viewport);

    let anchor = Rc::new(LayoutBox::new(args.anchor.min_point(), args.anchor.to_size()));
    let popup = Rc::new(LayoutBox::new(Point::default(), args.popup));

    let style = Rc::new(RefCell::new(String::new()));
    let options = app_config.engine().to_options().with_apply_styles({
        let style = Rc::clone(&style);
        move |styles| *style.borrow_mut() = styles.to_style_string()
    });

    let instance = engine.create_instance(anchor, popup, options)?;
    info!(placement = instance.placement().to_string(); "Popup placed");
    instance.destroy();

    Ok(style.take())
}

fn apply_overrides(app_config: &mut AppConfig, args: &Args) {
    if let Some(size) = args.viewport {
        app_config.viewport_mut().set_size(size);
    }

    let engine = app_config.engine_mut();
    if let Some(placement) = args.placement {
        engine.set_placement(placement);
    }
    if let Some(strategy) = args.strategy {
        engine.set_strategy(strategy);
    }
    if let Some(offset) = args.offset {
        engine.set_offset(offset);
    }
    if args.no_flip {
        engine.set_flip(false);
    }
    if args.no_prevent_overflow {
        engine.set_prevent_overflow(false);
    }
}
