// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The position solver.

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::middleware::{MiddlewareState, Pipeline};
use crate::types::{Geometry, Placement, Strategy};

/// Upper bound on pipeline restarts requested by middleware resets.
pub const MAX_RESETS: usize = 50;

/// Which element a [`PlacementError`] is about.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Element {
    /// The reference element.
    Reference,
    /// The floating element.
    Floating,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reference => "reference",
            Self::Floating => "floating",
        })
    }
}

/// Errors returned by [`solve`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// An element has no usable layout yet (empty or non-finite rect).
    ///
    /// Callers retry on the next layout tick.
    #[error("{0} element is not laid out yet")]
    NotReady(Element),
}

/// Placement, strategy, and middleware for one solve.
#[derive(Debug, Default)]
pub struct PlacementRequest {
    /// Requested side and alignment.
    pub placement: Placement,
    /// Coordinate origin of the result.
    pub strategy: Strategy,
    /// Middleware applied in order.
    pub middleware: Pipeline,
}

impl PlacementRequest {
    /// A request with the default pipeline.
    pub fn new(placement: Placement, strategy: Strategy) -> Self {
        Self {
            placement,
            strategy,
            middleware: Pipeline::default(),
        }
    }

    /// Replace the pipeline.
    pub fn with_middleware(mut self, middleware: Pipeline) -> Self {
        self.middleware = middleware;
        self
    }
}

/// Result of a successful [`solve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solved {
    /// Left edge, relative to the strategy origin.
    pub x: f64,
    /// Top edge, relative to the strategy origin.
    pub y: f64,
    /// Placement in effect after middleware (differs from the request after a flip).
    pub placement: Placement,
    /// Strategy the coordinates are expressed in.
    pub strategy: Strategy,
    /// Final floating size; hosts write the width when middleware changed it.
    pub floating: Size,
}

impl Solved {
    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

fn is_laid_out(rect: Rect) -> bool {
    let (w, h) = (rect.width(), rect.height());
    w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 && rect.x0.is_finite() && rect.y0.is_finite()
}

/// Compute the floating element's position.
///
/// Anchors the floating element for `request.placement`, then runs the middleware in
/// order. A resize re-anchors for the new size; a reset switches placement and restarts
/// the pipeline (bounded by [`MAX_RESETS`]). Non-finite values returned by middleware
/// are dropped and the previous value is kept.
///
/// ```
/// use kurbo::Rect;
/// use understory_placement::{solve, Geometry, Placement, PlacementRequest, Strategy};
///
/// let geometry = Geometry::new(
///     Rect::new(0.0, 0.0, 100.0, 40.0),
///     Rect::new(0.0, 0.0, 80.0, 30.0),
///     Rect::new(-200.0, -200.0, 800.0, 600.0),
/// );
/// let solved = solve(&geometry, &PlacementRequest::new(Placement::BOTTOM_START, Strategy::Absolute)).unwrap();
/// assert_eq!((solved.x, solved.y), (0.0, 40.0));
/// assert_eq!(solved.floating.width, 100.0);
/// ```
pub fn solve(geometry: &Geometry, request: &PlacementRequest) -> Result<Solved, PlacementError> {
    if !is_laid_out(geometry.reference) {
        return Err(PlacementError::NotReady(Element::Reference));
    }
    if !is_laid_out(geometry.floating) {
        return Err(PlacementError::NotReady(Element::Floating));
    }

    let reference = geometry.reference;
    let mut floating = geometry.floating.size();
    let mut placement = request.placement;
    let mut at = placement.anchor(reference, floating);
    let mut resets = 0;

    let steps = request.middleware.steps();
    let mut i = 0;
    while let Some(step) = steps.get(i) {
        let adjustment = step.apply(&MiddlewareState {
            x: at.x,
            y: at.y,
            placement,
            initial_placement: request.placement,
            strategy: request.strategy,
            reference,
            floating,
            viewport: geometry.viewport,
        });

        if let Some(size) = adjustment.floating {
            if size.width.is_finite() && size.height.is_finite() {
                floating = size;
                if adjustment.x.is_none() && adjustment.y.is_none() {
                    at = placement.anchor(reference, floating);
                }
            } else {
                tracing::warn!(
                    target: "understory_placement::solve",
                    middleware = step.name(),
                    "discarding non-finite floating size"
                );
            }
        }
        if let Some(x) = adjustment.x {
            if x.is_finite() {
                at.x = x;
            } else {
                tracing::warn!(target: "understory_placement::solve", middleware = step.name(), "discarding non-finite x");
            }
        }
        if let Some(y) = adjustment.y {
            if y.is_finite() {
                at.y = y;
            } else {
                tracing::warn!(target: "understory_placement::solve", middleware = step.name(), "discarding non-finite y");
            }
        }

        if let Some(next) = adjustment.reset {
            if resets < MAX_RESETS {
                resets += 1;
                tracing::trace!(
                    target: "understory_placement::solve",
                    middleware = step.name(),
                    from = %placement,
                    to = %next,
                    "placement reset"
                );
                placement = next;
                at = placement.anchor(reference, floating);
                i = 0;
                continue;
            }
            tracing::debug!(target: "understory_placement::solve", middleware = step.name(), "reset limit reached");
        }
        i += 1;
    }

    let origin = match request.strategy {
        Strategy::Absolute => geometry.offset_parent,
        Strategy::Fixed => Point::ZERO,
    };
    Ok(Solved {
        x: at.x - origin.x,
        y: at.y - origin.y,
        placement,
        strategy: request.strategy,
        floating,
    })
}
