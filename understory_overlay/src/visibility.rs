// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility state machine.
//!
//! [`Visibility`] owns the internal open/closed state and the optional external override.
//! `effective = override ?? internal`. While the override is set every trigger method is a
//! no-op; only [`Visibility::set_override`] changes what is shown.
//!
//! Every transition method returns `Some(new_state)` when the effective state changed.
//!
//! ```
//! use understory_overlay::visibility::Visibility;
//! use understory_overlay::{PersistMode, Regions, TriggerMode, VisibilityState};
//!
//! let mut v = Visibility::new(TriggerMode::Click, PersistMode::PersistContentClicks, None);
//! assert_eq!(v.reference_click(), Some(VisibilityState::Open));
//! // Clicks on the content are not "outside" in this mode.
//! assert_eq!(v.outside_click(Regions::FLOATING), None);
//! assert_eq!(v.outside_click(Regions::empty()), Some(VisibilityState::Closed));
//! ```

use alloc::vec::Vec;

use crate::hover::{HoverEvent, HoverState};
use crate::types::{Governor, PersistMode, Regions, TriggerMode, VisibilityState};

/// Open/closed state with trigger-driven transitions and an optional override.
#[derive(Clone, Debug)]
pub struct Visibility {
    trigger: TriggerMode,
    persist: PersistMode,
    internal: VisibilityState,
    override_value: Option<bool>,
    hover: HoverState,
}

impl Visibility {
    /// Create the machine. Starts open only if `override_value` is `Some(true)`.
    pub fn new(trigger: TriggerMode, persist: PersistMode, override_value: Option<bool>) -> Self {
        Self {
            trigger,
            persist,
            internal: VisibilityState::from_open(override_value.unwrap_or(false)),
            override_value,
            hover: HoverState::new(),
        }
    }

    /// Trigger mode.
    pub fn trigger(&self) -> TriggerMode {
        self.trigger
    }

    /// Persist mode.
    pub fn persist(&self) -> PersistMode {
        self.persist
    }

    /// Current override.
    pub fn override_value(&self) -> Option<bool> {
        self.override_value
    }

    /// Which source governs transitions right now.
    pub fn governor(&self) -> Governor {
        if self.override_value.is_some() {
            Governor::Override
        } else {
            Governor::Triggers
        }
    }

    /// `override ?? internal`.
    pub fn effective(&self) -> VisibilityState {
        match self.override_value {
            Some(open) => VisibilityState::from_open(open),
            None => self.internal,
        }
    }

    /// Hovered regions (hover mode only).
    pub fn hovered(&self) -> Regions {
        self.hover.current()
    }

    /// Set or clear the override.
    ///
    /// Clearing it hands control back to triggers, starting from the last override value.
    pub fn set_override(&mut self, value: Option<bool>) -> Option<VisibilityState> {
        let before = self.effective();
        if let (Some(open), None) = (self.override_value, value) {
            self.internal = VisibilityState::from_open(open);
            trace_hover(self.hover.clear());
        }
        self.override_value = value;
        self.changed(before)
    }

    /// Click on the reference (click mode): toggle.
    pub fn reference_click(&mut self) -> Option<VisibilityState> {
        if !self.accepts(TriggerMode::Click) {
            return None;
        }
        self.set_internal(self.internal.toggled())
    }

    /// Pointer entered `region` (hover mode).
    pub fn pointer_enter(&mut self, region: Regions) -> Option<VisibilityState> {
        if !self.accepts(TriggerMode::Hover) {
            return None;
        }
        trace_hover(self.hover.enter(region));
        self.set_internal(VisibilityState::from_open(self.hover.is_hovered()))
    }

    /// Pointer left `region` for `related` (hover mode). Closes only once nothing is hovered.
    pub fn pointer_leave(&mut self, region: Regions, related: Regions) -> Option<VisibilityState> {
        if !self.accepts(TriggerMode::Hover) {
            return None;
        }
        trace_hover(self.hover.leave(region, related));
        self.set_internal(VisibilityState::from_open(self.hover.is_hovered()))
    }

    /// A pointer interaction landed on `target` while outside detection was armed.
    ///
    /// Targets in the reference never close; targets in the floating element close unless
    /// [`PersistMode::PersistContentClicks`].
    pub fn outside_click(&mut self, target: Regions) -> Option<VisibilityState> {
        if self.governor() == Governor::Override || !self.internal.is_open() {
            return None;
        }
        let excluded = match self.persist {
            PersistMode::PersistAll => return None,
            PersistMode::PersistContentClicks => Regions::REFERENCE | Regions::FLOATING,
            PersistMode::None => Regions::REFERENCE,
        };
        if target.intersects(excluded) {
            return None;
        }
        self.set_internal(VisibilityState::Closed)
    }

    /// The floating element went away; it can no longer hold the pointer.
    pub fn floating_unmounted(&mut self) {
        trace_hover(self.hover.forget(Regions::FLOATING));
    }

    /// Imperatively set the internal state. Ignored while the override is set.
    pub fn set_open(&mut self, open: bool) -> Option<VisibilityState> {
        if self.governor() == Governor::Override {
            return None;
        }
        self.set_internal(VisibilityState::from_open(open))
    }

    /// Imperatively toggle the internal state. Ignored while the override is set.
    pub fn toggle(&mut self) -> Option<VisibilityState> {
        self.set_open(!self.internal.is_open())
    }

    fn accepts(&self, mode: TriggerMode) -> bool {
        self.trigger == mode && self.governor() == Governor::Triggers
    }

    fn set_internal(&mut self, next: VisibilityState) -> Option<VisibilityState> {
        let before = self.effective();
        self.internal = next;
        self.changed(before)
    }

    fn changed(&self, before: VisibilityState) -> Option<VisibilityState> {
        let after = self.effective();
        (after != before).then_some(after)
    }
}

fn trace_hover(events: Vec<HoverEvent>) {
    for event in events {
        tracing::trace!(target: "understory_overlay::visibility", ?event, "hover transition");
    }
}
