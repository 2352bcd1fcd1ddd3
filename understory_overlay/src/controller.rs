// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay controller.
//!
//! [`OverlayController`] ties the pieces together: it resolves the reference element,
//! drives [`Visibility`] from host events, mounts and unmounts the floating content through
//! a [`MountBoundary`], keeps [`Observers`] in step with what is mounted, and writes solved
//! positions back to the host.
//!
//! ## Phases
//!
//! `Detached → Attached → Active → TornDown`, with `Disabled` as the terminal state of a
//! failed [`attach`](OverlayController::attach). Only an `Active` controller reacts to
//! events or opens. [`teardown`](OverlayController::teardown) is valid from any phase.
//!
//! ## Driving it
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_overlay::{
//!     Effects, FloatingStyle, ListenerId, MountRequest, OverlayConfig, OverlayController,
//!     OverlayEvent, OverlayHost, PointerKind, SubscriptionId,
//! };
//!
//! // A host with a button (1) holding the component (0).
//! #[derive(Default)]
//! struct Page {
//!     next: u64,
//!     floating: Option<Rect>,
//!     click: Option<ListenerId>,
//! }
//!
//! impl OverlayHost for Page {
//!     type Node = u32;
//!     type Content = ();
//!     fn parent_of(&self, node: u32) -> Option<u32> { (node == 0).then_some(1) }
//!     fn contains(&self, ancestor: u32, node: u32) -> bool { ancestor == node }
//!     fn rect_of(&self, node: u32) -> Option<Rect> {
//!         match node {
//!             1 => Some(Rect::new(0.0, 0.0, 100.0, 40.0)),
//!             _ => self.floating,
//!         }
//!     }
//!     fn viewport(&self) -> Rect { Rect::new(-50.0, -50.0, 800.0, 600.0) }
//!     fn mount(&mut self, _: MountRequest<'_, ()>) -> u32 {
//!         self.floating = Some(Rect::new(0.0, 0.0, 60.0, 20.0));
//!         2
//!     }
//!     fn unmount(&mut self, _: &str, _: u32) { self.floating = None; }
//!     fn apply_style(&mut self, _: u32, style: FloatingStyle) {
//!         let width = style.width.unwrap_or(60.0);
//!         self.floating = Some(Rect::new(style.left, style.top, style.left + width, style.top + 20.0));
//!     }
//!     fn listen(&mut self, _: u32, _: PointerKind) -> ListenerId {
//!         self.next += 1;
//!         let id = ListenerId(self.next);
//!         self.click.get_or_insert(id);
//!         id
//!     }
//!     fn on_click_outside(&mut self, _: u32, _: &[u32]) -> ListenerId {
//!         self.next += 1;
//!         ListenerId(self.next)
//!     }
//!     fn remove_listener(&mut self, _: ListenerId) {}
//!     fn auto_update(&mut self, _: u32, _: u32) -> SubscriptionId { SubscriptionId(99) }
//!     fn cancel_auto_update(&mut self, _: SubscriptionId) {}
//!     fn request_tick(&mut self) {}
//! }
//!
//! let mut page = Page::default();
//! let mut menu = OverlayController::new(OverlayConfig::default(), ());
//! menu.attach(&page, 0).unwrap();
//! menu.activate(&mut page).unwrap();
//!
//! let click = page.click.unwrap();
//! let effects = menu.handle(&mut page, OverlayEvent::fired(click));
//! assert_eq!(effects, Effects::OPENED | Effects::MOUNTED);
//!
//! // The host delivers the tick it was asked for; the menu lands below the button.
//! assert!(menu.handle(&mut page, OverlayEvent::Tick).contains(Effects::REPOSITIONED));
//! assert_eq!(menu.solved().map(|s| s.origin()), Some(Point::new(0.0, 40.0)));
//! assert_eq!(page.floating.map(|r| r.width()), Some(100.0));
//! ```

use core::fmt::Debug;

use understory_placement::{Geometry, Placement, PlacementRequest, Solved, Strategy, solve};

use crate::config::{MiddlewareFactory, OverlayConfig};
use crate::error::OverlayError;
use crate::host::{FloatingStyle, OverlayHost};
use crate::lifecycle::{ListenerRole, Observers};
use crate::portal::MountBoundary;
use crate::types::{Effects, Governor, OverlayEvent, Regions, VisibilityState};
use crate::visibility::Visibility;

/// Where a controller is in its lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Created, reference not yet resolved.
    Detached,
    /// Reference resolved, nothing registered.
    Attached,
    /// Listening and able to open.
    Active,
    /// The reference could not be resolved; the overlay never opens.
    Disabled,
    /// Torn down; every operation is a no-op.
    TornDown,
}

/// Floating overlay controller for one reference element.
///
/// `K` is the host's element handle and `C` the floating content payload.
pub struct OverlayController<K, C> {
    config: OverlayConfig<K>,
    content: C,
    phase: Phase,
    reference: Option<K>,
    visibility: Visibility,
    boundary: MountBoundary<K>,
    observers: Observers,
    pending_position: bool,
    solved: Option<Solved>,
}

impl<K, C> OverlayController<K, C>
where
    K: Copy + Eq + Debug,
{
    /// Create a detached controller.
    pub fn new(config: OverlayConfig<K>, content: C) -> Self {
        let visibility = Visibility::new(config.trigger, config.persist, config.model_value);
        Self {
            config,
            content,
            phase: Phase::Detached,
            reference: None,
            visibility,
            boundary: MountBoundary::new(),
            observers: Observers::new(),
            pending_position: false,
            solved: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configuration in effect.
    pub fn config(&self) -> &OverlayConfig<K> {
        &self.config
    }

    /// The floating content payload.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// The resolved reference element.
    pub fn reference(&self) -> Option<K> {
        self.reference
    }

    /// The mounted floating root.
    pub fn floating(&self) -> Option<K> {
        self.boundary.floating()
    }

    /// Whether the floating content is mounted.
    pub fn is_mounted(&self) -> bool {
        self.boundary.is_mounted()
    }

    /// `override ?? internal`, regardless of phase.
    pub fn visibility(&self) -> VisibilityState {
        self.visibility.effective()
    }

    /// Whether the overlay is shown right now.
    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Active && self.visibility.effective().is_open()
    }

    /// Which source governs visibility.
    pub fn governor(&self) -> Governor {
        self.visibility.governor()
    }

    /// Last position written to the floating element.
    pub fn solved(&self) -> Option<&Solved> {
        self.solved.as_ref()
    }

    /// Listener and watch registry.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Resolve the reference element as `component`'s parent container.
    ///
    /// On failure the controller is disabled and logs a warning; the overlay stays closed
    /// for the rest of its life. Attaching again after success returns the same reference.
    pub fn attach<H>(&mut self, host: &H, component: K) -> Result<K, OverlayError>
    where
        H: OverlayHost<Node = K>,
    {
        match self.phase {
            Phase::Detached => {}
            Phase::Attached | Phase::Active => {
                if let Some(reference) = self.reference {
                    return Ok(reference);
                }
            }
            Phase::Disabled => return Err(OverlayError::ReferenceUnresolved),
            Phase::TornDown => return Err(OverlayError::TornDown),
        }
        let Some(reference) = host.parent_of(component) else {
            tracing::warn!(
                target: "understory_overlay::controller",
                ?component,
                "overlay component has no parent container; overlay disabled"
            );
            self.phase = Phase::Disabled;
            return Err(OverlayError::ReferenceUnresolved);
        };
        tracing::debug!(target: "understory_overlay::controller", ?reference, "attached");
        self.reference = Some(reference);
        self.phase = Phase::Attached;
        Ok(reference)
    }

    /// Start listening. Mounts immediately if the overlay starts open.
    pub fn activate<H>(&mut self, host: &mut H) -> Result<Effects, OverlayError>
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        match self.phase {
            Phase::Attached => {}
            Phase::Active => return Ok(Effects::empty()),
            Phase::Detached => return Err(OverlayError::NotAttached),
            Phase::Disabled => return Err(OverlayError::ReferenceUnresolved),
            Phase::TornDown => return Err(OverlayError::TornDown),
        }
        let Some(reference) = self.reference else {
            return Err(OverlayError::NotAttached);
        };
        self.phase = Phase::Active;
        if self.visibility.governor() == Governor::Triggers {
            self.observers
                .install_reference_triggers(host, reference, self.config.trigger);
        }
        tracing::debug!(
            target: "understory_overlay::controller",
            ?reference,
            trigger = ?self.config.trigger,
            governor = ?self.visibility.governor(),
            "activated"
        );
        Ok(self.sync_mount(host))
    }

    /// Deliver a host event.
    ///
    /// Events from listeners or watches this controller no longer owns are dropped.
    pub fn handle<H>(&mut self, host: &mut H, event: OverlayEvent<K>) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase != Phase::Active {
            tracing::trace!(target: "understory_overlay::controller", phase = ?self.phase, ?event, "ignoring event");
            return Effects::empty();
        }
        match event {
            OverlayEvent::Tick => self.on_tick(host),
            OverlayEvent::GeometryChanged(id) => {
                if !self.observers.owns_subscription(id) {
                    tracing::trace!(target: "understory_overlay::controller", ?id, "stale auto-update notification");
                    return Effects::empty();
                }
                self.reposition(host)
            }
            OverlayEvent::Listener {
                id,
                target,
                related,
            } => {
                let Some(role) = self.observers.role_of(id) else {
                    tracing::trace!(target: "understory_overlay::controller", ?id, "stale listener event");
                    return Effects::empty();
                };
                let change = match role {
                    ListenerRole::ReferenceClick => self.visibility.reference_click(),
                    ListenerRole::ReferenceEnter => {
                        self.visibility.pointer_enter(Regions::REFERENCE)
                    }
                    ListenerRole::ReferenceLeave => {
                        let related = self.regions_of(host, related);
                        self.visibility.pointer_leave(Regions::REFERENCE, related)
                    }
                    ListenerRole::FloatingEnter => self.visibility.pointer_enter(Regions::FLOATING),
                    ListenerRole::FloatingLeave => {
                        let related = self.regions_of(host, related);
                        self.visibility.pointer_leave(Regions::FLOATING, related)
                    }
                    ListenerRole::OutsideClick => {
                        let target = self.regions_of(host, target);
                        self.visibility.outside_click(target)
                    }
                };
                self.after_transition(host, change)
            }
        }
    }

    /// Open imperatively. Ignored while the override governs.
    pub fn show<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase != Phase::Active {
            return Effects::empty();
        }
        let change = self.visibility.set_open(true);
        self.after_transition(host, change)
    }

    /// Close imperatively. Ignored while the override governs.
    pub fn hide<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase != Phase::Active {
            return Effects::empty();
        }
        let change = self.visibility.set_open(false);
        self.after_transition(host, change)
    }

    /// Toggle imperatively. Ignored while the override governs.
    pub fn toggle<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase != Phase::Active {
            return Effects::empty();
        }
        let change = self.visibility.toggle();
        self.after_transition(host, change)
    }

    /// Set or clear the external override.
    ///
    /// Switching between set and unset moves control between the override and the triggers;
    /// trigger listeners are removed or installed to match.
    pub fn set_model_value<H>(&mut self, host: &mut H, value: Option<bool>) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        match self.phase {
            Phase::TornDown => return Effects::empty(),
            Phase::Disabled => {
                self.config.model_value = value;
                return Effects::empty();
            }
            Phase::Detached | Phase::Attached | Phase::Active => {}
        }
        self.config.model_value = value;
        let before = self.visibility.governor();
        let change = self.visibility.set_override(value);
        let after = self.visibility.governor();
        if self.phase == Phase::Active && before != after {
            tracing::debug!(target: "understory_overlay::controller", governor = ?after, "governor changed");
            match after {
                Governor::Override => self.observers.release_triggers(host),
                Governor::Triggers => {
                    if let Some(reference) = self.reference {
                        self.observers
                            .install_reference_triggers(host, reference, self.config.trigger);
                        if let Some(floating) = self.boundary.floating() {
                            self.observers.install_floating_triggers(
                                host,
                                reference,
                                floating,
                                self.config.trigger,
                                self.config.persist,
                            );
                        }
                    }
                }
            }
        }
        self.after_transition(host, change)
    }

    /// Change the placement; recomputes at once if a position is live.
    pub fn set_placement<H>(&mut self, host: &mut H, placement: Placement) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.config.placement == placement {
            return Effects::empty();
        }
        self.config.placement = placement;
        self.refresh(host)
    }

    /// Change the strategy; recomputes at once if a position is live.
    pub fn set_strategy<H>(&mut self, host: &mut H, strategy: Strategy) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.config.strategy == strategy {
            return Effects::empty();
        }
        self.config.strategy = strategy;
        self.refresh(host)
    }

    /// Replace the middleware factory (`None` restores the default pipeline).
    pub fn set_middleware<H>(
        &mut self,
        host: &mut H,
        factory: Option<MiddlewareFactory<K>>,
    ) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        self.config.middleware = factory;
        self.refresh(host)
    }

    /// Release everything and unmount. Idempotent; the controller is inert afterwards.
    pub fn teardown<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase == Phase::TornDown {
            return Effects::empty();
        }
        self.phase = Phase::TornDown;
        self.pending_position = false;
        self.observers.release_all(host);
        let mut effects = Effects::empty();
        if self
            .boundary
            .unmount(host, &self.config.portal_target)
            .is_some()
        {
            self.visibility.floating_unmounted();
            effects |= Effects::UNMOUNTED;
        }
        tracing::debug!(target: "understory_overlay::controller", reference = ?self.reference, "torn down");
        effects
    }

    fn after_transition<H>(&mut self, host: &mut H, change: Option<VisibilityState>) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase != Phase::Active {
            return Effects::empty();
        }
        let effects = match change {
            Some(VisibilityState::Open) => Effects::OPENED,
            Some(VisibilityState::Closed) => Effects::CLOSED,
            None => return Effects::empty(),
        };
        tracing::debug!(target: "understory_overlay::controller", state = ?change, "visibility changed");
        effects | self.sync_mount(host)
    }

    /// Mount while open and active, unmount otherwise.
    fn sync_mount<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        let Some(reference) = self.reference else {
            return Effects::empty();
        };
        let want = self.is_visible();
        match (want, self.boundary.floating()) {
            (true, None) => {
                let (floating, _) = self.boundary.mount(
                    host,
                    &self.config.portal_target,
                    &self.content,
                    &self.config.class_name,
                    self.config.strategy,
                    self.config.transition.as_deref(),
                );
                if self.visibility.governor() == Governor::Triggers {
                    self.observers.install_floating_triggers(
                        host,
                        reference,
                        floating,
                        self.config.trigger,
                        self.config.persist,
                    );
                }
                self.pending_position = true;
                host.request_tick();
                Effects::MOUNTED
            }
            (false, Some(_)) => {
                self.observers.release_floating(host);
                let _ = self.boundary.unmount(host, &self.config.portal_target);
                self.visibility.floating_unmounted();
                self.pending_position = false;
                Effects::UNMOUNTED
            }
            _ => Effects::empty(),
        }
    }

    /// First tick after mounting: start watching geometry and place the element.
    fn on_tick<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if !self.pending_position {
            return Effects::empty();
        }
        let (Some(reference), Some(floating)) = (self.reference, self.boundary.floating()) else {
            return Effects::empty();
        };
        self.observers.start_auto_update(host, reference, floating);
        self.reposition(host)
    }

    fn refresh<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        if self.phase == Phase::Active && self.observers.is_auto_updating() {
            self.reposition(host)
        } else {
            Effects::empty()
        }
    }

    fn reposition<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        let (Some(reference), Some(floating)) = (self.reference, self.boundary.floating()) else {
            return Effects::empty();
        };
        let (Some(reference_rect), Some(floating_rect)) =
            (host.rect_of(reference), host.rect_of(floating))
        else {
            return self.retry(host);
        };
        let geometry = Geometry::new(reference_rect, floating_rect, host.viewport())
            .with_offset_parent(host.offset_parent(floating));
        let request = PlacementRequest::new(self.config.placement, self.config.strategy)
            .with_middleware(self.config.pipeline(reference, floating));
        let solved = match solve(&geometry, &request) {
            Ok(solved) => solved,
            Err(err) => {
                tracing::trace!(target: "understory_overlay::controller", %err, "position not ready");
                return self.retry(host);
            }
        };
        if !(solved.x.is_finite() && solved.y.is_finite() && solved.floating.width.is_finite()) {
            tracing::warn!(
                target: "understory_overlay::controller",
                x = solved.x,
                y = solved.y,
                "non-finite position; keeping the previous one"
            );
            self.pending_position = false;
            return Effects::empty();
        }
        let width = (solved.floating.width != floating_rect.width()).then_some(solved.floating.width);
        host.apply_style(
            floating,
            FloatingStyle {
                left: solved.x,
                top: solved.y,
                width,
                strategy: solved.strategy,
            },
        );
        tracing::trace!(
            target: "understory_overlay::controller",
            x = solved.x,
            y = solved.y,
            placement = %solved.placement,
            "repositioned"
        );
        self.solved = Some(solved);
        self.pending_position = false;
        Effects::REPOSITIONED
    }

    fn retry<H>(&mut self, host: &mut H) -> Effects
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        self.pending_position = true;
        host.request_tick();
        Effects::empty()
    }

    fn regions_of<H>(&self, host: &H, node: Option<K>) -> Regions
    where
        H: OverlayHost<Node = K, Content = C>,
    {
        let Some(node) = node else {
            return Regions::empty();
        };
        let mut regions = Regions::empty();
        if self.reference.is_some_and(|r| host.contains(r, node)) {
            regions |= Regions::REFERENCE;
        }
        if self.boundary.floating().is_some_and(|f| host.contains(f, node)) {
            regions |= Regions::FLOATING;
        }
        regions
    }
}

impl<K, C: Debug> Debug for OverlayController<K, C>
where
    K: Copy + Eq + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayController")
            .field("phase", &self.phase)
            .field("reference", &self.reference)
            .field("floating", &self.boundary.floating())
            .field("visibility", &self.visibility.effective())
            .field("governor", &self.visibility.governor())
            .field("config", &self.config)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
