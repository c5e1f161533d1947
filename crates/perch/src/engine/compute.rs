//! The placement pipeline.
//!
//! Pure functions turning measured geometry into popup coordinates and
//! inline styles. The pipeline runs in a fixed order: base position, offset,
//! flip, overflow prevention, strategy translation, device pixel rounding and
//! finally style computation.

use log::trace;

use perch_core::{
    geometry::{Bounds, Insets, Point, Size},
    placement::{Alignment, Axis, Offset, Placement, Side, Strategy},
    style::{StyleMap, px},
};

/// Settings steering a placement computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub strategy: Strategy,
    pub placement: Placement,
    pub offset: Offset,
    pub flip: bool,
    pub prevent_overflow: bool,
    pub gpu_acceleration: bool,
    pub padding: Insets,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            strategy: Strategy::Fixed,
            placement: Placement::BOTTOM_START,
            offset: Offset::default(),
            flip: true,
            prevent_overflow: true,
            gpu_acceleration: false,
            padding: Insets::default(),
        }
    }
}

/// Measured geometry a computation works on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Viewport-relative anchor rectangle
    pub anchor: Bounds,
    /// Popup dimensions
    pub popup: Size,
    /// Visible area the popup should stay within
    pub viewport: Bounds,
    /// Document scroll offset
    pub scroll: Point,
    pub device_pixel_ratio: f32,
}

/// Result of a placement computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPlacement {
    /// The placement used after flipping
    pub placement: Placement,
    /// Popup top-left corner in the strategy's coordinate space
    pub position: Point,
    pub styles: StyleMap,
}

/// Runs the whole pipeline.
pub fn compute(modifiers: &Modifiers, measurements: &Measurements) -> ComputedPlacement {
    let clip = measurements.viewport.shrink(modifiers.padding);

    let mut placement = modifiers.placement;
    let mut position = offset_position(placement, modifiers.offset, measurements);

    if modifiers.flip && overflows_side(placement.side(), position, measurements.popup, clip) {
        let flipped = placement.flipped();
        let flipped_position = offset_position(flipped, modifiers.offset, measurements);
        if !overflows_side(flipped.side(), flipped_position, measurements.popup, clip) {
            trace!(from = placement.to_string(), to = flipped.to_string(); "Flipping placement");
            placement = flipped;
            position = flipped_position;
        }
    }

    if modifiers.prevent_overflow {
        position = prevent_overflow(placement.side(), position, measurements, clip);
    }

    if modifiers.strategy == Strategy::Absolute {
        position = position.add_point(measurements.scroll);
    }

    let position = position.round_to_device_pixels(measurements.device_pixel_ratio);
    let styles = compute_styles(modifiers, position);

    ComputedPlacement {
        placement,
        position,
        styles,
    }
}

/// Positions the popup flush against the anchor's side.
pub fn base_position(placement: Placement, anchor: Bounds, popup: Size) -> Point {
    let align = |start: f32, anchor_len: f32, popup_len: f32| match placement.alignment() {
        Alignment::Center => start + (anchor_len - popup_len) / 2.0,
        Alignment::Start => start,
        Alignment::End => start + anchor_len - popup_len,
    };

    match placement.side() {
        Side::Bottom => Point::new(
            align(anchor.min_x(), anchor.width(), popup.width()),
            anchor.max_y(),
        ),
        Side::Top => Point::new(
            align(anchor.min_x(), anchor.width(), popup.width()),
            anchor.min_y() - popup.height(),
        ),
        Side::Right => Point::new(
            anchor.max_x(),
            align(anchor.min_y(), anchor.height(), popup.height()),
        ),
        Side::Left => Point::new(
            anchor.min_x() - popup.width(),
            align(anchor.min_y(), anchor.height(), popup.height()),
        ),
    }
}

fn offset_position(placement: Placement, offset: Offset, measurements: &Measurements) -> Point {
    base_position(placement, measurements.anchor, measurements.popup)
        .add_point(offset.to_delta(placement.side()))
}

/// Returns true if the popup crosses the clipping rectangle on `side`.
fn overflows_side(side: Side, position: Point, popup: Size, clip: Bounds) -> bool {
    let popup = Bounds::new_from_top_left(position, popup);
    match side {
        Side::Bottom => popup.max_y() > clip.max_y(),
        Side::Top => popup.min_y() < clip.min_y(),
        Side::Right => popup.max_x() > clip.max_x(),
        Side::Left => popup.min_x() < clip.min_x(),
    }
}

/// Shifts the popup along the anchor's side to keep it visible without
/// detaching it from the anchor.
fn prevent_overflow(
    side: Side,
    position: Point,
    measurements: &Measurements,
    clip: Bounds,
) -> Point {
    let anchor = measurements.anchor;
    let popup = measurements.popup;

    match side.main_axis() {
        Axis::Vertical => {
            let x = shift_within(
                position.x(),
                popup.width(),
                (clip.min_x(), clip.max_x()),
                (anchor.min_x(), anchor.max_x()),
            );
            position.with_x(x)
        }
        Axis::Horizontal => {
            let y = shift_within(
                position.y(),
                popup.height(),
                (clip.min_y(), clip.max_y()),
                (anchor.min_y(), anchor.max_y()),
            );
            position.with_y(y)
        }
    }
}

fn shift_within(
    value: f32,
    len: f32,
    (clip_min, clip_max): (f32, f32),
    (anchor_min, anchor_max): (f32, f32),
) -> f32 {
    // Prefer the start edge when the popup is larger than the clip.
    let visible = value.min(clip_max - len).max(clip_min);
    visible.min(anchor_max).max(anchor_min - len)
}

fn compute_styles(modifiers: &Modifiers, position: Point) -> StyleMap {
    let mut styles = StyleMap::new();
    styles.set("position", modifiers.strategy.as_css());

    if modifiers.gpu_acceleration {
        styles.set("top", px(0.0));
        styles.set("left", px(0.0));
        styles.set(
            "transform",
            format!("translate({}, {})", px(position.x()), px(position.y())),
        );
    } else {
        styles.set("top", px(position.y()));
        styles.set("left", px(position.x()));
    }

    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(anchor: Bounds, popup: Size) -> Measurements {
        Measurements {
            anchor,
            popup,
            viewport: Bounds::new_from_top_left(Point::default(), Size::new(1024.0, 768.0)),
            scroll: Point::default(),
            device_pixel_ratio: 1.0,
        }
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
    }

    fn dropdown_modifiers() -> Modifiers {
        Modifiers {
            offset: Offset::new(0.0, 2.0),
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_bottom_start_below_anchor_with_gap() {
        let result = compute(
            &dropdown_modifiers(),
            &measurements(rect(0.0, 0.0, 50.0, 20.0), Size::new(100.0, 40.0)),
        );

        assert_eq!(result.placement, Placement::BOTTOM_START);
        assert_eq!(result.position, Point::new(0.0, 22.0));
        assert_eq!(
            result.styles.to_style_string(),
            "position: fixed; top: 22px; left: 0px;"
        );
    }

    #[test]
    fn test_base_position_alignments() {
        let anchor = rect(100.0, 100.0, 50.0, 20.0);
        let popup = Size::new(100.0, 40.0);
        let at = |text: &str| base_position(text.parse().unwrap(), anchor, popup);

        assert_eq!(at("bottom-start"), Point::new(100.0, 120.0));
        assert_eq!(at("bottom"), Point::new(75.0, 120.0));
        assert_eq!(at("bottom-end"), Point::new(50.0, 120.0));
        assert_eq!(at("top-start"), Point::new(100.0, 60.0));
        assert_eq!(at("right-start"), Point::new(150.0, 100.0));
        assert_eq!(at("right"), Point::new(150.0, 90.0));
        assert_eq!(at("left-end"), Point::new(0.0, 80.0));
    }

    #[test]
    fn test_flips_to_top_when_bottom_overflows() {
        let result = compute(
            &dropdown_modifiers(),
            &measurements(rect(10.0, 700.0, 50.0, 20.0), Size::new(100.0, 60.0)),
        );

        assert_eq!(result.placement.to_string(), "top-start");
        assert_eq!(result.position, Point::new(10.0, 638.0));
    }

    #[test]
    fn test_keeps_preferred_side_when_neither_fits() {
        let mut m = measurements(rect(10.0, 40.0, 50.0, 20.0), Size::new(100.0, 60.0));
        m.viewport = rect(0.0, 0.0, 1024.0, 100.0);

        let result = compute(&dropdown_modifiers(), &m);
        assert_eq!(result.placement, Placement::BOTTOM_START);
    }

    #[test]
    fn test_no_flip_when_disabled() {
        let modifiers = Modifiers {
            flip: false,
            ..dropdown_modifiers()
        };
        let result = compute(
            &modifiers,
            &measurements(rect(10.0, 700.0, 50.0, 20.0), Size::new(100.0, 60.0)),
        );
        assert_eq!(result.placement, Placement::BOTTOM_START);
        assert_eq!(result.position.y(), 722.0);
    }

    #[test]
    fn test_prevent_overflow_shifts_into_view() {
        let result = compute(
            &dropdown_modifiers(),
            &measurements(rect(980.0, 0.0, 40.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(result.position, Point::new(924.0, 22.0));
    }

    #[test]
    fn test_prevent_overflow_respects_padding() {
        let modifiers = Modifiers {
            padding: Insets::uniform(8.0),
            ..dropdown_modifiers()
        };
        let result = compute(
            &modifiers,
            &measurements(rect(980.0, 0.0, 40.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(result.position.x(), 916.0);
    }

    #[test]
    fn test_tether_keeps_popup_attached() {
        // Anchor scrolled far off the left edge.
        let result = compute(
            &dropdown_modifiers(),
            &measurements(rect(-300.0, 0.0, 50.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(result.position.x(), -250.0);
    }

    #[test]
    fn test_prevent_overflow_disabled() {
        let modifiers = Modifiers {
            prevent_overflow: false,
            ..dropdown_modifiers()
        };
        let result = compute(
            &modifiers,
            &measurements(rect(980.0, 0.0, 40.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(result.position.x(), 980.0);
    }

    #[test]
    fn test_absolute_strategy_adds_scroll() {
        let modifiers = Modifiers {
            strategy: Strategy::Absolute,
            ..dropdown_modifiers()
        };
        let mut m = measurements(rect(0.0, 0.0, 50.0, 20.0), Size::new(100.0, 40.0));
        m.scroll = Point::new(0.0, 300.0);

        let result = compute(&modifiers, &m);
        assert_eq!(result.position, Point::new(0.0, 322.0));
        assert_eq!(result.styles.get("position"), Some("absolute"));
    }

    #[test]
    fn test_fixed_strategy_ignores_scroll() {
        let mut m = measurements(rect(0.0, 0.0, 50.0, 20.0), Size::new(100.0, 40.0));
        m.scroll = Point::new(0.0, 300.0);

        let result = compute(&dropdown_modifiers(), &m);
        assert_eq!(result.position, Point::new(0.0, 22.0));
    }

    #[test]
    fn test_gpu_acceleration_uses_transform() {
        let modifiers = Modifiers {
            gpu_acceleration: true,
            ..dropdown_modifiers()
        };
        let result = compute(
            &modifiers,
            &measurements(rect(10.0, 0.0, 50.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(
            result.styles.to_style_string(),
            "position: fixed; top: 0px; left: 0px; transform: translate(10px, 22px);"
        );
    }

    #[test]
    fn test_rounds_by_device_pixel_ratio() {
        let mut m = measurements(rect(10.3, 0.0, 50.0, 20.25), Size::new(100.0, 40.0));
        m.device_pixel_ratio = 2.0;

        let result = compute(&dropdown_modifiers(), &m);
        assert_eq!(result.position, Point::new(10.5, 22.5));
    }

    #[test]
    fn test_offset_skidding_and_distance_on_left() {
        let modifiers = Modifiers {
            placement: "left-start".parse().unwrap(),
            offset: Offset::new(5.0, 10.0),
            ..Modifiers::default()
        };
        let result = compute(
            &modifiers,
            &measurements(rect(300.0, 100.0, 50.0, 20.0), Size::new(100.0, 40.0)),
        );
        assert_eq!(result.position, Point::new(190.0, 105.0));
    }
}
