// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Middleware: ordered geometry adjustments applied to a candidate position.
//!
//! ## Overview
//!
//! The solver computes a naive anchored position for the requested [`Placement`] and then
//! threads it through a [`Pipeline`] of [`Middleware`] steps, in order. Each step sees the
//! current [`MiddlewareState`] and returns an [`Adjustment`]:
//!
//! - a new `x`/`y` (shift, offset),
//! - a new floating size (match-width), after which the solver re-anchors for the new size,
//! - or a reset to another placement (flip), after which the pipeline restarts from the top.
//!
//! Middleware must be pure. Ordering is caller-controlled; [`Pipeline::default`] is
//! `[MatchWidth, Flip, Shift { padding: 10 }]`.
//!
//! Closures can be used directly through [`FnMiddleware`]:
//!
//! ```
//! use understory_placement::{Adjustment, FnMiddleware, Pipeline};
//!
//! let nudge = FnMiddleware::new("nudge", |state| Adjustment::moved(state.x + 4.0, state.y));
//! let pipeline = Pipeline::empty().with(nudge);
//! assert_eq!(pipeline.names().collect::<Vec<_>>(), ["nudge"]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::types::{Alignment, Axis, Placement, Side, Strategy};

/// Padding used by the default [`Shift`] step.
pub const DEFAULT_SHIFT_PADDING: f64 = 10.0;

/// Snapshot of the solve in progress, handed to each middleware.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MiddlewareState {
    /// Candidate x in viewport coordinates.
    pub x: f64,
    /// Candidate y in viewport coordinates.
    pub y: f64,
    /// Placement currently in effect (may differ from the request after a flip).
    pub placement: Placement,
    /// Placement originally requested.
    pub initial_placement: Placement,
    /// Strategy the result will be expressed in.
    pub strategy: Strategy,
    /// Reference rect.
    pub reference: Rect,
    /// Floating size, including adjustments made by earlier steps.
    pub floating: Size,
    /// Visible area used for overflow detection.
    pub viewport: Rect,
}

impl MiddlewareState {
    /// Candidate floating rect.
    pub fn floating_rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), self.floating)
    }

    /// Overflow of the candidate floating rect past the viewport inset by `padding`.
    pub fn overflow(&self, padding: f64) -> Overflow {
        Overflow::of(self.floating_rect(), self.viewport, padding)
    }
}

/// Per-side overflow of a rect past a boundary. Positive values overflow.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Overflow {
    /// Amount past the top edge.
    pub top: f64,
    /// Amount past the right edge.
    pub right: f64,
    /// Amount past the bottom edge.
    pub bottom: f64,
    /// Amount past the left edge.
    pub left: f64,
}

impl Overflow {
    /// Overflow of `rect` past `boundary` inset by `padding` on every side.
    pub fn of(rect: Rect, boundary: Rect, padding: f64) -> Self {
        Self {
            top: boundary.y0 + padding - rect.y0,
            right: rect.x1 - (boundary.x1 - padding),
            bottom: rect.y1 - (boundary.y1 - padding),
            left: boundary.x0 + padding - rect.x0,
        }
    }

    /// Overflow on a single side.
    pub fn side(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

/// What a middleware step wants changed. `None` fields are left alone.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Adjustment {
    /// New candidate x.
    pub x: Option<f64>,
    /// New candidate y.
    pub y: Option<f64>,
    /// New floating size; the solver re-anchors unless `x`/`y` are also given.
    pub floating: Option<Size>,
    /// Restart the pipeline with this placement.
    pub reset: Option<Placement>,
}

impl Adjustment {
    /// No change.
    pub const NONE: Self = Self {
        x: None,
        y: None,
        floating: None,
        reset: None,
    };

    /// Move the candidate to `(x, y)`.
    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::NONE
        }
    }

    /// Resize the floating element.
    pub fn resized(floating: Size) -> Self {
        Self {
            floating: Some(floating),
            ..Self::NONE
        }
    }

    /// Restart the pipeline with `placement`.
    pub fn reset_to(placement: Placement) -> Self {
        Self {
            reset: Some(placement),
            ..Self::NONE
        }
    }
}

/// A pure geometry adjustment step.
pub trait Middleware {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Compute the adjustment for `state`.
    fn apply(&self, state: &MiddlewareState) -> Adjustment;
}

/// Force the floating width to the reference width.
///
/// Put it first so later steps see the final width.
#[derive(Copy, Clone, Debug, Default)]
pub struct MatchWidth;

impl Middleware for MatchWidth {
    fn name(&self) -> &'static str {
        "match-width"
    }

    fn apply(&self, state: &MiddlewareState) -> Adjustment {
        let width = state.reference.width();
        if width == state.floating.width {
            return Adjustment::NONE;
        }
        Adjustment::resized(Size::new(width, state.floating.height))
    }
}

/// Move the floating element to the opposite side when it overflows the viewport.
///
/// The initial placement is tried first, then its [flipped](Placement::flipped) twin.
/// The first that fits on its side wins; when neither fits, the one that overflows
/// least. The outward gap of the current candidate (e.g. from [`Offset`]) is carried
/// over to the alternative.
#[derive(Copy, Clone, Debug, Default)]
pub struct Flip {
    /// Extra room required between the floating element and the viewport edge.
    pub padding: f64,
}

impl Middleware for Flip {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn apply(&self, state: &MiddlewareState) -> Adjustment {
        let current_anchor = state.placement.anchor(state.reference, state.floating);
        let gap = outward(state.placement.side, current_anchor, Point::new(state.x, state.y));
        let cross = match state.placement.side.axis() {
            Axis::Y => state.x - current_anchor.x,
            Axis::X => state.y - current_anchor.y,
        };

        let mut best: Option<(Placement, f64)> = None;
        for candidate in [state.initial_placement, state.initial_placement.flipped()] {
            let anchor = candidate.anchor(state.reference, state.floating);
            let origin = displaced(candidate.side, anchor, gap, cross);
            let rect = Rect::from_origin_size(origin, state.floating);
            let overflow = Overflow::of(rect, state.viewport, self.padding).side(candidate.side);
            if overflow <= 0.0 {
                best = Some((candidate, overflow));
                break;
            }
            if best.is_none_or(|(_, least)| overflow < least) {
                best = Some((candidate, overflow));
            }
        }

        match best {
            Some((chosen, _)) if chosen != state.placement => Adjustment::reset_to(chosen),
            _ => Adjustment::NONE,
        }
    }
}

/// Distance `at` sits away from `anchor`, measured outward from `side`.
fn outward(side: Side, anchor: Point, at: Point) -> f64 {
    match side {
        Side::Top => anchor.y - at.y,
        Side::Bottom => at.y - anchor.y,
        Side::Left => anchor.x - at.x,
        Side::Right => at.x - anchor.x,
    }
}

fn displaced(side: Side, anchor: Point, gap: f64, cross: f64) -> Point {
    match side {
        Side::Top => Point::new(anchor.x + cross, anchor.y - gap),
        Side::Bottom => Point::new(anchor.x + cross, anchor.y + gap),
        Side::Left => Point::new(anchor.x - gap, anchor.y + cross),
        Side::Right => Point::new(anchor.x + gap, anchor.y + cross),
    }
}

/// Translate the floating element back inside the viewport.
///
/// The main axis runs along the reference side (x for `top`/`bottom`); the cross axis
/// is off by default. When the floating element is larger than the padded viewport the
/// leading edge wins.
#[derive(Copy, Clone, Debug)]
pub struct Shift {
    /// Minimum distance kept from the viewport edges.
    pub padding: f64,
    /// Clamp along the alignment axis.
    pub main_axis: bool,
    /// Clamp along the side axis.
    pub cross_axis: bool,
}

impl Shift {
    /// Main-axis shift with the given padding.
    pub fn padded(padding: f64) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self {
            padding: 0.0,
            main_axis: true,
            cross_axis: false,
        }
    }
}

impl Middleware for Shift {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn apply(&self, state: &MiddlewareState) -> Adjustment {
        let clamp_x = |x: f64| {
            let min = state.viewport.x0 + self.padding;
            let max = state.viewport.x1 - self.padding - state.floating.width;
            x.min(max).max(min)
        };
        let clamp_y = |y: f64| {
            let min = state.viewport.y0 + self.padding;
            let max = state.viewport.y1 - self.padding - state.floating.height;
            y.min(max).max(min)
        };

        let main = state.placement.side.axis().other();
        let (mut x, mut y) = (state.x, state.y);
        for (axis, enabled) in [(main, self.main_axis), (main.other(), self.cross_axis)] {
            if !enabled {
                continue;
            }
            match axis {
                Axis::X => x = clamp_x(x),
                Axis::Y => y = clamp_y(y),
            }
        }

        if x == state.x && y == state.y {
            return Adjustment::NONE;
        }
        Adjustment::moved(x, y)
    }
}

/// Push the floating element away from the reference.
///
/// `main_axis` is the gap along the side; `cross_axis` slides along the alignment axis
/// (toward the trailing edge, mirrored for `-end` alignments).
#[derive(Copy, Clone, Debug, Default)]
pub struct Offset {
    /// Gap between reference and floating element.
    pub main_axis: f64,
    /// Slide along the reference side.
    pub cross_axis: f64,
}

impl Middleware for Offset {
    fn name(&self) -> &'static str {
        "offset"
    }

    fn apply(&self, state: &MiddlewareState) -> Adjustment {
        let cross = match state.placement.alignment {
            Some(Alignment::End) => -self.cross_axis,
            _ => self.cross_axis,
        };
        let at = displaced(
            state.placement.side,
            Point::new(state.x, state.y),
            self.main_axis,
            cross,
        );
        Adjustment::moved(at.x, at.y)
    }
}

/// Adapts a closure into a named [`Middleware`].
pub struct FnMiddleware<F> {
    name: &'static str,
    f: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&MiddlewareState) -> Adjustment,
{
    /// Wrap `f` under `name`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMiddleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&MiddlewareState) -> Adjustment,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, state: &MiddlewareState) -> Adjustment {
        (self.f)(state)
    }
}

/// An ordered list of middleware steps.
pub struct Pipeline {
    steps: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    /// A pipeline with no steps; the solver returns the naive anchored position.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn push(&mut self, step: impl Middleware + 'static) {
        self.steps.push(Box::new(step));
    }

    /// Append a step, builder style.
    pub fn with(mut self, step: impl Middleware + 'static) -> Self {
        self.push(step);
        self
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[Box<dyn Middleware>] {
        &self.steps
    }

    /// Step names in application order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// `[MatchWidth, Flip, Shift { padding: 10 }]`.
impl Default for Pipeline {
    fn default() -> Self {
        Self::empty()
            .with(MatchWidth)
            .with(Flip::default())
            .with(Shift::padded(DEFAULT_SHIFT_PADDING))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Box<dyn Middleware>> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Box<dyn Middleware>>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn state(placement: Placement, x: f64, y: f64, viewport: Rect) -> MiddlewareState {
        MiddlewareState {
            x,
            y,
            placement,
            initial_placement: placement,
            strategy: Strategy::Absolute,
            reference: Rect::new(0.0, 0.0, 100.0, 40.0),
            floating: Size::new(100.0, 30.0),
            viewport,
        }
    }

    #[test]
    fn default_pipeline_order() {
        let names: Vec<_> = Pipeline::default().names().collect();
        assert_eq!(names, vec!["match-width", "flip", "shift"]);
    }

    #[test]
    fn match_width_resizes_only_when_needed() {
        let mut s = state(Placement::BOTTOM_START, 0.0, 40.0, Rect::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(MatchWidth.apply(&s), Adjustment::NONE);
        s.floating = Size::new(80.0, 30.0);
        assert_eq!(
            MatchWidth.apply(&s),
            Adjustment::resized(Size::new(100.0, 30.0))
        );
    }

    #[test]
    fn flip_keeps_fitting_placement() {
        let s = state(Placement::BOTTOM_START, 0.0, 40.0, Rect::new(-50.0, -50.0, 500.0, 500.0));
        assert_eq!(Flip::default().apply(&s), Adjustment::NONE);
    }

    #[test]
    fn flip_moves_to_opposite_side_on_overflow() {
        // Only 20px below the reference.
        let s = state(Placement::BOTTOM_START, 0.0, 40.0, Rect::new(-50.0, -50.0, 500.0, 60.0));
        assert_eq!(
            Flip::default().apply(&s),
            Adjustment::reset_to(Placement::TOP_START)
        );
    }

    #[test]
    fn flip_picks_least_overflow_when_nothing_fits() {
        // 20px below, 5px above: bottom overflows by 10, top by 25.
        let s = state(Placement::BOTTOM, 0.0, 40.0, Rect::new(-50.0, -5.0, 500.0, 60.0));
        assert_eq!(Flip::default().apply(&s), Adjustment::NONE);
    }

    #[test]
    fn flip_is_stable_after_reset() {
        let mut s = state(Placement::TOP_START, 0.0, -30.0, Rect::new(-50.0, -50.0, 500.0, 60.0));
        s.initial_placement = Placement::BOTTOM_START;
        assert_eq!(Flip::default().apply(&s), Adjustment::NONE);
    }

    #[test]
    fn flip_accounts_for_offset_gap() {
        // 35px below fits a 30px element, but not once it is pushed 8px away.
        let mut s = state(Placement::BOTTOM_START, 0.0, 48.0, Rect::new(-50.0, -50.0, 500.0, 75.0));
        assert_eq!(
            Flip::default().apply(&s),
            Adjustment::reset_to(Placement::TOP_START)
        );
        s.y = 40.0;
        assert_eq!(Flip::default().apply(&s), Adjustment::NONE);
    }

    #[test]
    fn shift_clamps_main_axis_with_padding() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let shift = Shift::padded(10.0);

        let s = state(Placement::BOTTOM_START, -20.0, 40.0, viewport);
        assert_eq!(shift.apply(&s), Adjustment::moved(10.0, 40.0));

        let s = state(Placement::BOTTOM_START, 250.0, 40.0, viewport);
        assert_eq!(shift.apply(&s), Adjustment::moved(190.0, 40.0));

        let s = state(Placement::BOTTOM_START, 50.0, 40.0, viewport);
        assert_eq!(shift.apply(&s), Adjustment::NONE);
    }

    #[test]
    fn shift_cross_axis_is_opt_in() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 60.0);
        let s = state(Placement::BOTTOM_START, 50.0, 40.0, viewport);
        assert_eq!(Shift::default().apply(&s), Adjustment::NONE);

        let both = Shift {
            cross_axis: true,
            ..Shift::default()
        };
        assert_eq!(both.apply(&s), Adjustment::moved(50.0, 30.0));
    }

    #[test]
    fn shift_prefers_leading_edge_when_too_large() {
        let viewport = Rect::new(0.0, 0.0, 50.0, 300.0);
        let s = state(Placement::BOTTOM_START, 20.0, 40.0, viewport);
        assert_eq!(Shift::default().apply(&s), Adjustment::moved(0.0, 40.0));
    }

    #[test]
    fn offset_moves_away_from_side() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let off = Offset {
            main_axis: 6.0,
            cross_axis: 2.0,
        };
        let s = state(Placement::BOTTOM_START, 0.0, 40.0, viewport);
        assert_eq!(off.apply(&s), Adjustment::moved(2.0, 46.0));
        let s = state(Placement::TOP_END, 0.0, -30.0, viewport);
        assert_eq!(off.apply(&s), Adjustment::moved(-2.0, -36.0));
        let s = state(Placement::LEFT, -100.0, 5.0, viewport);
        assert_eq!(off.apply(&s), Adjustment::moved(-106.0, 7.0));
    }

    #[test]
    fn overflow_sides() {
        let o = Overflow::of(
            Rect::new(-5.0, 10.0, 105.0, 70.0),
            Rect::new(0.0, 0.0, 100.0, 60.0),
            0.0,
        );
        assert_eq!(o.left, 5.0);
        assert_eq!(o.right, 5.0);
        assert_eq!(o.top, -10.0);
        assert_eq!(o.side(Side::Bottom), 10.0);
    }
}
