// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer lifecycle: which listeners and watches exist, and for how long.
//!
//! ## Scopes
//!
//! - *Reference* listeners (click, or enter/leave in hover mode) exist from activation to
//!   teardown while triggers govern visibility. They are what opens a closed overlay.
//! - *Floating* observers exist exactly while the floating element is mounted: the
//!   auto-update watch, enter/leave on the floating element, and the outside-click
//!   listener (whose ignore list may name the floating element).
//!
//! Events whose listener or subscription is not owned here are stale and must be dropped;
//! [`Observers::role_of`] and [`Observers::owns_subscription`] answer that.
//!
//! Release methods are idempotent and total: after they return, nothing they covered is
//! registered with the host, regardless of what state installation reached.

use alloc::vec::Vec;

use crate::host::OverlayHost;
use crate::types::{ListenerId, PersistMode, PointerKind, SubscriptionId, TriggerMode};

/// What a registered listener means to the controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerRole {
    /// `click` on the reference.
    ReferenceClick,
    /// `mouseenter` on the reference.
    ReferenceEnter,
    /// `mouseleave` on the reference.
    ReferenceLeave,
    /// `mouseenter` on the floating element.
    FloatingEnter,
    /// `mouseleave` on the floating element.
    FloatingLeave,
    /// Pointer interaction outside the reference (and ignored elements).
    OutsideClick,
}

impl ListenerRole {
    /// Whether the listener lives only while the floating element is mounted.
    pub const fn is_floating_scoped(self) -> bool {
        matches!(
            self,
            Self::FloatingEnter | Self::FloatingLeave | Self::OutsideClick
        )
    }
}

/// Registry of everything the controller has registered with its host.
#[derive(Clone, Debug, Default)]
pub struct Observers {
    listeners: Vec<(ListenerId, ListenerRole)>,
    auto_update: Option<SubscriptionId>,
}

impl Observers {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Role of a listener, if it is still registered.
    pub fn role_of(&self, id: ListenerId) -> Option<ListenerRole> {
        self.listeners
            .iter()
            .find_map(|&(l, role)| (l == id).then_some(role))
    }

    /// Whether `id` is the live auto-update watch.
    pub fn owns_subscription(&self, id: SubscriptionId) -> bool {
        self.auto_update == Some(id)
    }

    /// Whether the auto-update watch is running.
    pub fn is_auto_updating(&self) -> bool {
        self.auto_update.is_some()
    }

    /// Whether any reference-scoped listener is registered.
    pub fn has_reference_triggers(&self) -> bool {
        self.listeners.iter().any(|(_, r)| !r.is_floating_scoped())
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Register reference listeners for `mode`. No-op if already registered.
    pub fn install_reference_triggers<H: OverlayHost>(
        &mut self,
        host: &mut H,
        reference: H::Node,
        mode: TriggerMode,
    ) {
        if self.has_reference_triggers() {
            return;
        }
        match mode {
            TriggerMode::Click => {
                let id = host.listen(reference, PointerKind::Click);
                self.listeners.push((id, ListenerRole::ReferenceClick));
            }
            TriggerMode::Hover => {
                let id = host.listen(reference, PointerKind::Enter);
                self.listeners.push((id, ListenerRole::ReferenceEnter));
                let id = host.listen(reference, PointerKind::Leave);
                self.listeners.push((id, ListenerRole::ReferenceLeave));
            }
        }
    }

    /// Register floating-scoped trigger listeners for `mode`. No-op if already registered.
    ///
    /// Click mode arms outside-click detection unless `persist` is
    /// [`PersistMode::PersistAll`]; with [`PersistMode::PersistContentClicks`] the floating
    /// element is on the host's ignore list.
    pub fn install_floating_triggers<H: OverlayHost>(
        &mut self,
        host: &mut H,
        reference: H::Node,
        floating: H::Node,
        mode: TriggerMode,
        persist: PersistMode,
    ) {
        if self.listeners.iter().any(|(_, r)| r.is_floating_scoped()) {
            return;
        }
        match mode {
            TriggerMode::Hover => {
                let id = host.listen(floating, PointerKind::Enter);
                self.listeners.push((id, ListenerRole::FloatingEnter));
                let id = host.listen(floating, PointerKind::Leave);
                self.listeners.push((id, ListenerRole::FloatingLeave));
            }
            TriggerMode::Click => {
                let content = [floating];
                let ignore: &[H::Node] = match persist {
                    PersistMode::PersistAll => return,
                    PersistMode::PersistContentClicks => &content,
                    PersistMode::None => &[],
                };
                let id = host.on_click_outside(reference, ignore);
                self.listeners.push((id, ListenerRole::OutsideClick));
            }
        }
    }

    /// Start the auto-update watch. No-op if it is already running.
    pub fn start_auto_update<H: OverlayHost>(
        &mut self,
        host: &mut H,
        reference: H::Node,
        floating: H::Node,
    ) {
        if self.auto_update.is_none() {
            self.auto_update = Some(host.auto_update(reference, floating));
        }
    }

    /// Remove every trigger listener, both scopes. The auto-update watch is kept.
    pub fn release_triggers<H: OverlayHost>(&mut self, host: &mut H) {
        self.release_where(host, |_| true);
    }

    /// Remove everything tied to the floating element: its listeners and the watch.
    pub fn release_floating<H: OverlayHost>(&mut self, host: &mut H) {
        if let Some(id) = self.auto_update.take() {
            host.cancel_auto_update(id);
        }
        self.release_where(host, ListenerRole::is_floating_scoped);
    }

    /// Remove everything.
    pub fn release_all<H: OverlayHost>(&mut self, host: &mut H) {
        self.release_floating(host);
        self.release_triggers(host);
    }

    fn release_where<H: OverlayHost>(
        &mut self,
        host: &mut H,
        mut pred: impl FnMut(ListenerRole) -> bool,
    ) {
        self.listeners.retain(|&(id, role)| {
            if pred(role) {
                host.remove_listener(id);
                false
            } else {
                true
            }
        });
    }
}
