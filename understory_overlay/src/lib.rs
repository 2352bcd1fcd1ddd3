// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: an event-driven controller for floating overlays.
//!
//! An overlay is a menu, popover, or tooltip anchored to a *reference* element. This crate
//! decides when it is shown, keeps its floating element mounted only while it is shown, and
//! keeps it positioned next to the reference as things move.
//!
//! - [`OverlayController`] is the entry point. It is driven by [`OverlayEvent`]s and
//!   reports what changed as [`Effects`].
//! - [`OverlayHost`] is the seam to the UI runtime: geometry queries, portal mounting,
//!   listeners, the auto-update watch, and next-tick scheduling.
//! - [`visibility::Visibility`] is the open/closed state machine on its own: click or hover
//!   triggers, persist modes, and the external override.
//! - [`lifecycle::Observers`] owns every listener and watch the controller registers, so a
//!   close or a teardown always releases exactly what was installed.
//! - Positions come from [`understory_placement`].
//!
//! ## Visibility
//!
//! `effective = model_value ?? internal`. While `model_value` is set, triggers are not even
//! registered; clearing it hands control back to the triggers starting from the last value.
//!
//! | Trigger | Opens on | Closes on |
//! |---------|----------|-----------|
//! | [`TriggerMode::Click`] | click on the reference | click on the reference, or an outside click per [`PersistMode`] |
//! | [`TriggerMode::Hover`] | pointer enters the reference | pointer has left both reference and floating element |
//!
//! ## Lifecycle
//!
//! `attach` resolves the reference as the component's parent container, `activate` starts
//! listening, and `teardown` releases everything. Events from listeners that were already
//! released are dropped, so hosts may deliver late events safely.
//!
//! See [`controller`] for a complete host walk-through.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
pub mod controller;
mod error;
mod host;
pub mod hover;
pub mod lifecycle;
pub mod portal;
mod types;
pub mod visibility;

#[cfg(test)]
mod test_host;

pub use config::{
    DEFAULT_CLASS_NAME, DEFAULT_PORTAL_TARGET, DEFAULT_TRANSITION, MiddlewareFactory,
    OverlayConfig,
};
pub use controller::{OverlayController, Phase};
pub use error::OverlayError;
pub use host::{FloatingStyle, MountRequest, OverlayHost};
pub use types::{
    Effects, Governor, ListenerId, OverlayEvent, ParsePersistError, PersistMode, PointerKind,
    Regions, SubscriptionId, TriggerMode, VisibilityState,
};

pub use understory_placement::{Placement, Strategy};
