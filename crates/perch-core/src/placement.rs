//! Placement vocabulary shared by the engine, the adapter and configuration.
//!
//! A [`Placement`] names the side of the anchor the popup sits on and how it
//! is aligned along that side. The textual form follows the usual popup
//! library keywords:
//!
//! | Placement | Meaning |
//! |-----------|---------|
//! | `bottom` | Below the anchor, horizontally centered |
//! | `bottom-start` | Below the anchor, left edges aligned |
//! | `bottom-end` | Below the anchor, right edges aligned |
//! | `right-start` | Right of the anchor, top edges aligned |
//!
//! and so on for the other sides.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{error::ParseError, geometry::Point};

// =============================================================================
// Type Definitions
// =============================================================================

/// The side of the anchor a popup is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Alignment of the popup along the anchor's side.
///
/// `Start` aligns the popup's minimum edge with the anchor's minimum edge on
/// the cross axis (left edges for top/bottom, top edges for left/right).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Center,
    Start,
    End,
}

/// The axis a side lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Preferred position of a popup relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Placement {
    side: Side,
    alignment: Alignment,
}

/// How popup coordinates relate to the page.
///
/// `Fixed` coordinates are viewport-relative and therefore unaffected by the
/// scroll position of any ancestor. `Absolute` coordinates are document
/// relative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Strategy {
    #[default]
    Fixed,
    Absolute,
}

/// Offset applied to a placement: `skidding` along the anchor's side and
/// `distance` away from it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "[f32; 2]")]
pub struct Offset {
    skidding: f32,
    distance: f32,
}

// =============================================================================
// Side / Alignment
// =============================================================================

impl Side {
    /// Returns the side on the other end of the same axis
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the axis along which the popup is displaced from the anchor.
    ///
    /// `Top` and `Bottom` move the popup vertically.
    pub fn main_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl Alignment {
    fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Center => None,
            Self::Start => Some("start"),
            Self::End => Some("end"),
        }
    }
}

// =============================================================================
// Placement
// =============================================================================

impl Placement {
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Alignment::Start);

    pub const fn new(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }

    /// Returns the side of the anchor this placement targets
    pub fn side(self) -> Side {
        self.side
    }

    /// Returns the alignment along the side
    pub fn alignment(self) -> Alignment {
        self.alignment
    }

    /// Returns the same alignment on the opposite side.
    ///
    /// # Examples
    ///
    /// ```
    /// # use perch_core::placement::Placement;
    /// let flipped = Placement::BOTTOM_START.flipped();
    /// assert_eq!(flipped.to_string(), "top-start");
    /// ```
    pub fn flipped(self) -> Self {
        Self {
            side: self.side.opposite(),
            alignment: self.alignment,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM_START
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alignment.suffix() {
            Some(suffix) => write!(f, "{}-{suffix}", self.side.as_str()),
            None => f.write_str(self.side.as_str()),
        }
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, alignment) = match s.split_once('-') {
            Some((side, alignment)) => (side, Some(alignment)),
            None => (s, None),
        };

        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParseError::Placement(s.to_string())),
        };
        let alignment = match alignment {
            None => Alignment::Center,
            Some("start") => Alignment::Start,
            Some("end") => Alignment::End,
            Some(_) => return Err(ParseError::Placement(s.to_string())),
        };

        Ok(Self { side, alignment })
    }
}

impl TryFrom<String> for Placement {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Strategy
// =============================================================================

impl Strategy {
    /// Returns the CSS `position` value for this strategy
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Absolute => "absolute",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "absolute" => Ok(Self::Absolute),
            _ => Err(ParseError::Strategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Offset
// =============================================================================

impl Offset {
    pub const fn new(skidding: f32, distance: f32) -> Self {
        Self { skidding, distance }
    }

    /// Converts the offset to a viewport-space delta for the given side.
    ///
    /// Distance always points away from the anchor, so it is negated for
    /// `Top` and `Left`. Skidding is never negated.
    pub fn to_delta(self, side: Side) -> Point {
        let distance = match side {
            Side::Top | Side::Left => -self.distance,
            Side::Bottom | Side::Right => self.distance,
        };
        match side.main_axis() {
            Axis::Vertical => Point::new(self.skidding, distance),
            Axis::Horizontal => Point::new(distance, self.skidding),
        }
    }
}

impl TryFrom<[f32; 2]> for Offset {
    type Error = ParseError;

    fn try_from([skidding, distance]: [f32; 2]) -> Result<Self, Self::Error> {
        if !skidding.is_finite() || !distance.is_finite() {
            return Err(ParseError::Geometry {
                kind: "offset",
                input: format!("[{skidding}, {distance}]"),
                reason: "values must be finite numbers".to_string(),
            });
        }
        Ok(Self::new(skidding, distance))
    }
}

impl FromStr for Offset {
    type Err = ParseError;

    /// Parses `"SKIDDING,DISTANCE"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let point: Point = s.parse().map_err(|_| ParseError::Geometry {
            kind: "offset",
            input: s.to_string(),
            reason: "expected `SKIDDING,DISTANCE`".to_string(),
        })?;
        Ok(Self::new(point.x(), point.y()))
    }
}
