// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host runtime capabilities the controller consumes.
//!
//! The controller never touches a live tree directly. Everything it needs (element
//! geometry, portal mounting, listeners, the auto-update watch, and next-tick scheduling)
//! goes through [`OverlayHost`]. Events produced by what it registered come back through
//! [`OverlayController::handle`](crate::OverlayController::handle).

use kurbo::{Point, Rect};
use understory_placement::Strategy;

use crate::types::{ListenerId, PointerKind, SubscriptionId};

/// What to mount into the portal target.
#[derive(Debug)]
pub struct MountRequest<'a, C> {
    /// Portal target identifier, e.g. `"body"`.
    pub target: &'a str,
    /// Opaque content payload.
    pub content: &'a C,
    /// Component class for the floating root.
    pub class_name: &'a str,
    /// Positioning strategy; hosts apply [`Strategy::class_name`] unchanged.
    pub strategy: Strategy,
    /// Transition name for the host's own enter/exit animation, if any.
    pub transition: Option<&'a str>,
}

/// Placement style written to the floating element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingStyle {
    /// `left`, relative to the strategy origin.
    pub left: f64,
    /// `top`, relative to the strategy origin.
    pub top: f64,
    /// `width`, when middleware changed it.
    pub width: Option<f64>,
    /// Positioning strategy.
    pub strategy: Strategy,
}

/// Host runtime capabilities.
pub trait OverlayHost {
    /// Element handle.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Opaque floating content payload.
    type Content;

    /// Parent container of `node`; used to resolve the reference element.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    /// Current bounding rect in viewport coordinates, `None` if not laid out.
    fn rect_of(&self, node: Self::Node) -> Option<Rect>;

    /// Visible viewport rect.
    fn viewport(&self) -> Rect;

    /// Viewport-space origin of `floating`'s offset parent.
    fn offset_parent(&self, floating: Self::Node) -> Point {
        let _ = floating;
        Point::ZERO
    }

    /// Mount content into the portal target, returning the floating root.
    fn mount(&mut self, request: MountRequest<'_, Self::Content>) -> Self::Node;

    /// Remove the floating root from the portal target.
    fn unmount(&mut self, target: &str, floating: Self::Node);

    /// Write placement style to the floating root.
    fn apply_style(&mut self, floating: Self::Node, style: FloatingStyle);

    /// Register a pointer listener on `node`.
    fn listen(&mut self, node: Self::Node, kind: PointerKind) -> ListenerId;

    /// Register an outside-click listener: fires on pointer interactions outside `node`
    /// and outside every element in `ignore`.
    fn on_click_outside(&mut self, node: Self::Node, ignore: &[Self::Node]) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// Watch the relative geometry of `reference` and `floating` (resize, scroll, mutation).
    fn auto_update(&mut self, reference: Self::Node, floating: Self::Node) -> SubscriptionId;

    /// Cancel an auto-update watch. Unknown ids are ignored.
    fn cancel_auto_update(&mut self, id: SubscriptionId);

    /// Ask for an [`OverlayEvent::Tick`](crate::OverlayEvent::Tick) once the tree has settled.
    fn request_tick(&mut self);
}
