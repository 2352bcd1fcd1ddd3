// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the overlay: modes, visibility, host handles, events, and effects.
//!
//! ## Overview
//!
//! These types describe the contract between an [`OverlayController`](crate::OverlayController)
//! and its host. Handles are issued by the host; events are delivered back through
//! [`OverlayController::handle`](crate::OverlayController::handle).

use core::str::FromStr;

/// Which pointer interactions drive the overlay. Fixed for the controller's lifetime.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TriggerMode {
    /// Clicking the reference toggles the overlay.
    #[default]
    Click,
    /// Hovering the reference or the overlay opens it; leaving both closes it.
    Hover,
}

/// Whether outside clicks close the overlay.
///
/// Converts from the `boolean | "content"` form used by component props:
///
/// ```
/// use understory_overlay::PersistMode;
///
/// assert_eq!(PersistMode::from(false), PersistMode::None);
/// assert_eq!(PersistMode::from(true), PersistMode::PersistAll);
/// assert_eq!("content".parse(), Ok(PersistMode::PersistContentClicks));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PersistMode {
    /// Any click outside the reference closes the overlay, including clicks on its content.
    #[default]
    None,
    /// Outside clicks never close the overlay.
    PersistAll,
    /// Clicks inside the overlay content do not count as outside.
    PersistContentClicks,
}

impl From<bool> for PersistMode {
    fn from(persist: bool) -> Self {
        if persist { Self::PersistAll } else { Self::None }
    }
}

/// Error returned when parsing an unknown [`PersistMode`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("persist must be `true`, `false`, or `content`")]
pub struct ParsePersistError;

impl FromStr for PersistMode {
    type Err = ParsePersistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "false" => Ok(Self::None),
            "true" => Ok(Self::PersistAll),
            "content" => Ok(Self::PersistContentClicks),
            _ => Err(ParsePersistError),
        }
    }
}

/// Open/closed state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum VisibilityState {
    /// Not shown.
    #[default]
    Closed,
    /// Shown.
    Open,
}

impl VisibilityState {
    /// `Open` for `true`.
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// Whether this is [`Open`](Self::Open).
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// The other state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// Which source governs visibility transitions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Governor {
    /// Pointer triggers and imperative show/hide.
    Triggers,
    /// The externally supplied model value.
    Override,
}

/// Handle to a listener registered with the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(pub u64);

/// Handle to an auto-update subscription registered with the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SubscriptionId(pub u64);

/// Pointer event kinds the controller listens for on an element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// `click`
    Click,
    /// `mouseenter`
    Enter,
    /// `mouseleave`
    Leave,
}

bitflags::bitflags! {
    /// Set of overlay regions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Regions: u8 {
        /// The reference element (and its descendants).
        const REFERENCE = 0b0000_0001;
        /// The floating element (and its descendants).
        const FLOATING  = 0b0000_0010;
    }
}

/// An event delivered by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OverlayEvent<K> {
    /// A listener registered through the host fired.
    Listener {
        /// Which listener.
        id: ListenerId,
        /// Event target element, when the host has one.
        target: Option<K>,
        /// `relatedTarget` for enter/leave events: the element the pointer moved to or from.
        related: Option<K>,
    },
    /// An auto-update subscription reported that geometry may have changed.
    GeometryChanged(SubscriptionId),
    /// The tick requested with [`OverlayHost::request_tick`](crate::OverlayHost::request_tick) arrived.
    Tick,
}

impl<K> OverlayEvent<K> {
    /// A listener event without target information.
    pub const fn fired(id: ListenerId) -> Self {
        Self::Listener {
            id,
            target: None,
            related: None,
        }
    }
}

bitflags::bitflags! {
    /// What an operation changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Effects: u8 {
        /// Visibility went from closed to open.
        const OPENED       = 0b0000_0001;
        /// Visibility went from open to closed.
        const CLOSED       = 0b0000_0010;
        /// The floating element was mounted.
        const MOUNTED      = 0b0000_0100;
        /// The floating element was unmounted.
        const UNMOUNTED    = 0b0000_1000;
        /// A new position was written to the floating element.
        const REPOSITIONED = 0b0001_0000;
    }
}
