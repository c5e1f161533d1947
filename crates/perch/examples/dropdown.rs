//! Example: Driving a dropdown menu headlessly
//!
//! This example opens a dropdown, lets the viewport scroll and shrink
//! underneath it, and prints the inline style computed for the menu after
//! every step.

use std::rc::Rc;

use perch::{
    Dropdown, Engine, LayoutBox, Viewport,
    geometry::{Point, Size},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let viewport = Rc::new(Viewport::new(Size::new(1024.0, 768.0)));
    let engine = Rc::new(Engine::new(Rc::clone(&viewport)));

    // The toggle button and its menu, measured by the UI layer.
    let toggle = Rc::new(LayoutBox::new(Point::new(24.0, 16.0), Size::new(120.0, 36.0)));
    let menu = Rc::new(LayoutBox::new(Point::new(0.0, 0.0), Size::new(180.0, 240.0)));

    let mut dropdown = Dropdown::new(engine, toggle.clone(), menu);

    dropdown.toggle_clicked()?;
    dropdown.after_render()?;
    println!("opened:        {}", dropdown.popup_style());

    // The page scrolls the toggle towards the bottom of the viewport.
    toggle.move_to(Point::new(24.0, 600.0));
    viewport.scroll_to(Point::new(0.0, 584.0));
    println!("after scroll:  {}", dropdown.popup_style());

    viewport.resize(Size::new(160.0, 768.0));
    println!("after resize:  {}", dropdown.popup_style());

    dropdown.collapse(Some(Point::new(900.0, 100.0)));
    println!("expanded:      {}", dropdown.is_expanded());

    Ok(())
}
