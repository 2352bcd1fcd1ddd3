// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: sides, alignments, strategies, and solver input geometry.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

/// Side of the reference element the floating element is placed against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the reference.
    Top,
    /// Right of the reference.
    Right,
    /// Below the reference.
    Bottom,
    /// Left of the reference.
    Left,
}

impl Side {
    /// The side across the reference from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Axis along which the floating element moves when it changes to the opposite side.
    ///
    /// `Top`/`Bottom` live on the `Y` axis; `Left`/`Right` on `X`.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Alignment of the floating element along the side of the reference.
///
/// The absence of an alignment (see [`Placement::alignment`]) means centered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Align the leading edges.
    Start,
    /// Align the trailing edges.
    End,
}

/// A 2D axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Requested side and alignment of the floating element, e.g. `bottom-start`.
///
/// The twelve combinations use the familiar `side[-alignment]` names, parsed with
/// [`FromStr`] and printed with [`Display`](fmt::Display):
///
/// ```
/// use understory_placement::{Alignment, Placement, Side};
///
/// let p: Placement = "top-end".parse().unwrap();
/// assert_eq!(p, Placement::new(Side::Top, Some(Alignment::End)));
/// assert_eq!(p.to_string(), "top-end");
/// assert_eq!(Placement::default(), Placement::BOTTOM_START);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Placement {
    /// Side of the reference.
    pub side: Side,
    /// Alignment along that side; `None` centers the floating element.
    pub alignment: Option<Alignment>,
}

impl Placement {
    /// `top`
    pub const TOP: Self = Self::new(Side::Top, None);
    /// `top-start`
    pub const TOP_START: Self = Self::new(Side::Top, Some(Alignment::Start));
    /// `top-end`
    pub const TOP_END: Self = Self::new(Side::Top, Some(Alignment::End));
    /// `right`
    pub const RIGHT: Self = Self::new(Side::Right, None);
    /// `right-start`
    pub const RIGHT_START: Self = Self::new(Side::Right, Some(Alignment::Start));
    /// `right-end`
    pub const RIGHT_END: Self = Self::new(Side::Right, Some(Alignment::End));
    /// `bottom`
    pub const BOTTOM: Self = Self::new(Side::Bottom, None);
    /// `bottom-start`
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Some(Alignment::Start));
    /// `bottom-end`
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Some(Alignment::End));
    /// `left`
    pub const LEFT: Self = Self::new(Side::Left, None);
    /// `left-start`
    pub const LEFT_START: Self = Self::new(Side::Left, Some(Alignment::Start));
    /// `left-end`
    pub const LEFT_END: Self = Self::new(Side::Left, Some(Alignment::End));

    /// Create a placement from a side and optional alignment.
    pub const fn new(side: Side, alignment: Option<Alignment>) -> Self {
        Self { side, alignment }
    }

    /// The same alignment on the opposite side.
    pub const fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.alignment)
    }

    /// Naive anchored origin of a floating element of `floating` size against `reference`.
    ///
    /// No collision handling is applied; that is the job of the middleware pipeline.
    pub fn anchor(self, reference: Rect, floating: Size) -> Point {
        let center_x = reference.x0 + reference.width() / 2.0 - floating.width / 2.0;
        let center_y = reference.y0 + reference.height() / 2.0 - floating.height / 2.0;
        match self.side.axis() {
            Axis::Y => {
                let y = match self.side {
                    Side::Top => reference.y0 - floating.height,
                    _ => reference.y1,
                };
                let x = match self.alignment {
                    Some(Alignment::Start) => reference.x0,
                    Some(Alignment::End) => reference.x1 - floating.width,
                    None => center_x,
                };
                Point::new(x, y)
            }
            Axis::X => {
                let x = match self.side {
                    Side::Left => reference.x0 - floating.width,
                    _ => reference.x1,
                };
                let y = match self.alignment {
                    Some(Alignment::Start) => reference.y0,
                    Some(Alignment::End) => reference.y1 - floating.height,
                    None => center_y,
                };
                Point::new(x, y)
            }
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
        f.write_str(self.side.as_str())?;
        match self.alignment {
            Some(Alignment::Start) => f.write_str("-start"),
            Some(Alignment::End) => f.write_str("-end"),
            None => Ok(()),
        }
    }
}

/// Error returned when parsing an unknown placement or strategy name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognized {kind} name")]
pub struct ParseError {
    kind: &'static str,
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = ParseError { kind: "placement" };
        let (side, alignment) = match s.split_once('-') {
            Some((side, "start")) => (side, Some(Alignment::Start)),
            Some((side, "end")) => (side, Some(Alignment::End)),
            Some(_) => return Err(err),
            None => (s, None),
        };
        let side = match side {
            "top" => Side::Top,
            "right" => Side::Right,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            _ => return Err(err),
        };
        Ok(Self::new(side, alignment))
    }
}

/// Coordinate origin for the solved position.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Relative to the floating element's offset parent (scroll ancestor).
    #[default]
    Absolute,
    /// Relative to the viewport.
    Fixed,
}

impl Strategy {
    /// Style class name for this strategy; hosts apply it verbatim.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ParseError { kind: "strategy" }),
        }
    }
}

/// Everything the solver knows about the world.
///
/// `reference`, `floating` and `viewport` are in viewport coordinates.
/// `offset_parent` is the viewport-space origin of the floating element's
/// containing block, subtracted from results under [`Strategy::Absolute`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Current bounding rect of the reference element.
    pub reference: Rect,
    /// Current bounding rect of the floating element. Only its size is used.
    pub floating: Rect,
    /// Visible area used for overflow detection.
    pub viewport: Rect,
    /// Origin of the offset parent for absolute positioning.
    pub offset_parent: Point,
}

impl Geometry {
    /// Geometry with the offset parent at the viewport origin.
    pub fn new(reference: Rect, floating: Rect, viewport: Rect) -> Self {
        Self {
            reference,
            floating,
            viewport,
            offset_parent: Point::ZERO,
        }
    }

    /// Set the offset parent origin.
    pub fn with_offset_parent(mut self, origin: Point) -> Self {
        self.offset_parent = origin;
        self
    }
}
