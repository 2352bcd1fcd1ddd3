// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: track which overlay regions hold the pointer.
//!
//! The reference and the floating element are siblings, not a path, so the state is a
//! [`Regions`] set rather than a root→target path. Each enter/leave notification updates
//! the set and yields the minimal transitions.
//!
//! ## Usage
//!
//! 1) Feed `mouseenter` as [`HoverState::enter`].
//! 2) Feed `mouseleave` as [`HoverState::leave`], passing the region the pointer moved
//!    into (the DOM `relatedTarget`), if any.
//! 3) The overlay is hovered while [`HoverState::is_hovered`] holds.
//!
//! ## Minimal example
//!
//! ```
//! use understory_overlay::hover::{HoverEvent, HoverState};
//! use understory_overlay::Regions;
//!
//! let mut h = HoverState::new();
//! assert_eq!(h.enter(Regions::REFERENCE), vec![HoverEvent::Enter(Regions::REFERENCE)]);
//! // Moving straight from the reference into the floating element.
//! assert_eq!(
//!     h.leave(Regions::REFERENCE, Regions::FLOATING),
//!     vec![HoverEvent::Leave(Regions::REFERENCE), HoverEvent::Enter(Regions::FLOATING)]
//! );
//! assert!(h.is_hovered());
//! ```

use alloc::vec::Vec;

use crate::types::Regions;

/// Hovered-region state machine.
///
/// Ordering semantics match a pointer crossing a boundary: leave events are emitted
/// before enter events, reference before floating.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Regions,
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer enters the region.
    Enter(Regions),
    /// Pointer leaves the region.
    Leave(Regions),
}

impl HoverState {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Regions::empty(),
        }
    }

    /// Regions currently holding the pointer.
    pub fn current(&self) -> Regions {
        self.current
    }

    /// Whether any region holds the pointer.
    pub fn is_hovered(&self) -> bool {
        !self.current.is_empty()
    }

    /// Clear the state, returning leave events for every hovered region.
    pub fn clear(&mut self) -> Vec<HoverEvent> {
        self.update(Regions::empty())
    }

    /// Pointer entered `region`.
    pub fn enter(&mut self, region: Regions) -> Vec<HoverEvent> {
        self.update(self.current | region)
    }

    /// Pointer left `region` for `related` (empty when it left both).
    pub fn leave(&mut self, region: Regions, related: Regions) -> Vec<HoverEvent> {
        self.update((self.current - region) | related)
    }

    /// Forget `region` without it being left, e.g. when its element is unmounted.
    pub fn forget(&mut self, region: Regions) -> Vec<HoverEvent> {
        self.update(self.current - region)
    }

    /// Replace the hovered set and return the transitions from the previous set.
    pub fn update(&mut self, next: Regions) -> Vec<HoverEvent> {
        let mut out = Vec::new();
        for region in (self.current - next).iter() {
            out.push(HoverEvent::Leave(region));
        }
        for region in (next - self.current).iter() {
            out.push(HoverEvent::Enter(region));
        }
        self.current = next;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const R: Regions = Regions::REFERENCE;
    const F: Regions = Regions::FLOATING;

    // Fresh enter: one enter event.
    #[test]
    fn hover_enter_on_fresh_state() {
        let mut h = HoverState::new();
        assert_eq!(h.enter(R), vec![HoverEvent::Enter(R)]);
        assert_eq!(h.current(), R);
    }

    // Clearing: leaves for everything, reference first.
    #[test]
    fn hover_clear_leaves_all() {
        let mut h = HoverState::new();
        let _ = h.update(R | F);
        assert_eq!(h.clear(), vec![HoverEvent::Leave(R), HoverEvent::Leave(F)]);
        assert!(!h.is_hovered());
    }

    // Reference → floating hand-off keeps the state hovered throughout.
    #[test]
    fn hover_hand_off_between_regions() {
        let mut h = HoverState::new();
        let _ = h.enter(R);
        let ev = h.leave(R, F);
        assert_eq!(ev, vec![HoverEvent::Leave(R), HoverEvent::Enter(F)]);
        assert!(h.is_hovered());
        let ev = h.leave(F, Regions::empty());
        assert_eq!(ev, vec![HoverEvent::Leave(F)]);
        assert!(!h.is_hovered());
    }

    // Enter of the other region before the leave arrives is also fine.
    #[test]
    fn hover_enter_before_leave() {
        let mut h = HoverState::new();
        let _ = h.enter(R);
        assert_eq!(h.enter(F), vec![HoverEvent::Enter(F)]);
        assert_eq!(h.leave(R, Regions::empty()), vec![HoverEvent::Leave(R)]);
        assert!(h.is_hovered());
    }

    // Same set repeated: no transitions.
    #[test]
    fn hover_same_state_no_events() {
        let mut h = HoverState::new();
        let _ = h.enter(F);
        assert!(h.enter(F).is_empty());
        assert!(h.leave(R, Regions::empty()).is_empty());
    }

    #[test]
    fn hover_forget_drops_region() {
        let mut h = HoverState::new();
        let _ = h.update(R | F);
        assert_eq!(h.forget(F), vec![HoverEvent::Leave(F)]);
        assert_eq!(h.current(), R);
    }
}
