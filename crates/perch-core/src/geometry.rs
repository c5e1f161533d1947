//! Geometric primitives for popup placement.
//!
//! This module provides the geometric types the placement engine works with
//! when measuring anchors, popups and the viewport.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in viewport space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Perch uses the CSS viewport coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the viewport at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! All values are CSS pixels.

use std::str::FromStr;

use crate::error::ParseError;

/// A 2D point in viewport coordinate space.
///
/// # Examples
///
/// ```
/// # use perch_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a new point with the x-coordinate replaced
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Returns a new point with the y-coordinate replaced
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Rounds both coordinates to the closest device pixel.
    ///
    /// With a ratio of `2.0` values snap to half pixels.
    pub fn round_to_device_pixels(self, device_pixel_ratio: f32) -> Self {
        let ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            x: (self.x * ratio).round() / ratio,
            y: (self.y * ratio).round() / ratio,
        }
    }
}

impl FromStr for Point {
    type Err = ParseError;

    /// Parses `"X,Y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_numbers::<2>(s, "point")?;
        Ok(Self::new(x, y))
    }
}

/// The dimensions of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

impl FromStr for Size {
    type Err = ParseError;

    /// Parses `"W,H"` or `"WxH"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace(['x', 'X'], ",");
        let [width, height] = parse_numbers::<2>(&normalized, "size")?;
        if width < 0.0 || height < 0.0 {
            return Err(ParseError::Geometry {
                kind: "size",
                input: s.to_string(),
                reason: "dimensions must not be negative".to_string(),
            });
        }
        Ok(Self::new(width, height))
    }
}

/// An axis-aligned rectangle defined by its minimum and maximum coordinates.
///
/// Element rectangles reported to the engine are always viewport-relative,
/// the same values a `getBoundingClientRect` call would return.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Shrinks the bounds by the given insets.
    ///
    /// Used to carve the usable area out of a clipping rectangle.
    pub fn shrink(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left(),
            min_y: self.min_y + insets.top(),
            max_x: self.max_x - insets.right(),
            max_y: self.max_y - insets.bottom(),
        }
    }

    /// Returns true if the point lies inside the bounds, edges included
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

impl FromStr for Bounds {
    type Err = ParseError;

    /// Parses `"X,Y,W,H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y, width, height] = parse_numbers::<4>(s, "bounds")?;
        if width < 0.0 || height < 0.0 {
            return Err(ParseError::Geometry {
                kind: "bounds",
                input: s.to_string(),
                reason: "dimensions must not be negative".to_string(),
            });
        }
        Ok(Self::new_from_top_left(
            Point::new(x, y),
            Size::new(width, height),
        ))
    }
}

/// Spacing kept free on each side of a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}

fn parse_numbers<const N: usize>(s: &str, kind: &'static str) -> Result<[f32; N], ParseError> {
    let invalid = |reason: String| ParseError::Geometry {
        kind,
        input: s.to_string(),
        reason,
    };

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(invalid(format!(
            "expected {N} comma-separated numbers, found {}",
            parts.len()
        )));
    }

    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse::<f32>()
            .map_err(|err| invalid(format!("`{part}`: {err}")))?;
        if !value.is_finite() {
            return Err(invalid(format!("`{part}` is not a finite number")));
        }
    }
    Ok(values)
}
