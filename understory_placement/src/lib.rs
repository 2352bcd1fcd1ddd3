// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: Kurbo-native positioning for floating elements.
//!
//! Understory Placement answers one question: given a reference rect, a floating element's
//! size, and a viewport, where should the floating element go?
//!
//! - [`Placement`] names the requested side and alignment (`bottom-start`, `top`, …).
//! - [`Strategy`] picks the coordinate origin of the answer: the offset parent
//!   ([`Strategy::Absolute`]) or the viewport ([`Strategy::Fixed`]).
//! - A [`Pipeline`] of [`Middleware`] steps adjusts the naive anchored position:
//!   [`MatchWidth`], [`Flip`], [`Shift`], and [`Offset`] are built in.
//! - [`solve`] is a pure function; call it as often as geometry changes.
//!
//! ## Not an observer
//!
//! This crate never looks at a live tree. Upstream code measures the reference, the floating
//! element and the viewport, calls [`solve`], and writes the result back. Tracking *when* to
//! do that is the job of `understory_overlay`.
//!
//! ## Readiness
//!
//! Elements that have not been laid out yet report empty rects. [`solve`] returns
//! [`PlacementError::NotReady`] for those instead of a meaningless position; retry on the
//! next layout tick.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_placement::{solve, Geometry, Placement, PlacementRequest, Strategy};
//!
//! // A 100×40 button with only 20px of room below it.
//! let geometry = Geometry::new(
//!     Rect::new(0.0, 0.0, 100.0, 40.0),
//!     Rect::new(0.0, 0.0, 80.0, 30.0),
//!     Rect::new(-100.0, -100.0, 500.0, 60.0),
//! );
//!
//! // The default pipeline matches the width, flips above, and keeps the menu on screen.
//! let request = PlacementRequest::new(Placement::BOTTOM_START, Strategy::Absolute);
//! let solved = solve(&geometry, &request).unwrap();
//! assert_eq!(solved.placement, Placement::TOP_START);
//! assert_eq!((solved.x, solved.y), (0.0, -30.0));
//! assert_eq!(solved.floating.width, 100.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod middleware;
mod solve;
mod types;

pub use middleware::{
    Adjustment, DEFAULT_SHIFT_PADDING, Flip, FnMiddleware, MatchWidth, Middleware,
    MiddlewareState, Offset, Overflow, Pipeline, Shift,
};
pub use solve::{Element, MAX_RESETS, PlacementError, PlacementRequest, Solved, solve};
pub use types::{Alignment, Axis, Geometry, ParseError, Placement, Side, Strategy};
