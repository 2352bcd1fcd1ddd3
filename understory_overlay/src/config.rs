// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use understory_placement::{Pipeline, Placement, Strategy};

use crate::types::{PersistMode, TriggerMode};

/// Builds a middleware pipeline from the reference and floating handles.
///
/// Called once per solve. When configured it replaces the default pipeline entirely.
pub type MiddlewareFactory<K> = Box<dyn Fn(K, K) -> Pipeline>;

/// Default transition name handed to the host.
pub const DEFAULT_TRANSITION: &str = "slide-up";

/// Default portal target.
pub const DEFAULT_PORTAL_TARGET: &str = "body";

/// Default class of the floating root.
pub const DEFAULT_CLASS_NAME: &str = "a-menu";

/// Overlay configuration.
///
/// ```
/// use understory_overlay::{OverlayConfig, PersistMode, TriggerMode};
/// use understory_placement::{Placement, Strategy};
///
/// let config: OverlayConfig<u32> = OverlayConfig::default()
///     .with_trigger(TriggerMode::Hover)
///     .with_persist(PersistMode::PersistContentClicks)
///     .with_placement(Placement::TOP)
///     .with_strategy(Strategy::Fixed);
/// assert_eq!(config.model_value, None);
/// assert_eq!(config.portal_target, "body");
/// ```
pub struct OverlayConfig<K> {
    /// External override; `Some(_)` disables trigger-driven transitions.
    pub model_value: Option<bool>,
    /// Outside-click behavior.
    pub persist: PersistMode,
    /// Interaction mode.
    pub trigger: TriggerMode,
    /// Requested placement.
    pub placement: Placement,
    /// Positioning strategy.
    pub strategy: Strategy,
    /// Custom pipeline factory; `None` uses `[match-width, flip, shift(10)]`.
    pub middleware: Option<MiddlewareFactory<K>>,
    /// Transition name passed to the host on mount; `None` for none.
    pub transition: Option<Cow<'static, str>>,
    /// Portal target identifier.
    pub portal_target: Cow<'static, str>,
    /// Class of the floating root.
    pub class_name: Cow<'static, str>,
}

impl<K> OverlayConfig<K> {
    /// Set the external override.
    pub fn with_model_value(mut self, model_value: Option<bool>) -> Self {
        self.model_value = model_value;
        self
    }

    /// Set the persist mode.
    pub fn with_persist(mut self, persist: impl Into<PersistMode>) -> Self {
        self.persist = persist.into();
        self
    }

    /// Set the trigger mode.
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the default pipeline.
    pub fn with_middleware(mut self, factory: impl Fn(K, K) -> Pipeline + 'static) -> Self {
        self.middleware = Some(Box::new(factory));
        self
    }

    /// Set the transition name.
    pub fn with_transition(mut self, transition: Option<impl Into<Cow<'static, str>>>) -> Self {
        self.transition = transition.map(Into::into);
        self
    }

    /// Set the portal target.
    pub fn with_portal_target(mut self, target: impl Into<Cow<'static, str>>) -> Self {
        self.portal_target = target.into();
        self
    }

    /// Set the class of the floating root.
    pub fn with_class_name(mut self, class_name: impl Into<Cow<'static, str>>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Pipeline for one solve.
    pub fn pipeline(&self, reference: K, floating: K) -> Pipeline {
        match &self.middleware {
            Some(factory) => factory(reference, floating),
            None => Pipeline::default(),
        }
    }
}

impl<K> Default for OverlayConfig<K> {
    fn default() -> Self {
        Self {
            model_value: None,
            persist: PersistMode::None,
            trigger: TriggerMode::Click,
            placement: Placement::BOTTOM_START,
            strategy: Strategy::Absolute,
            middleware: None,
            transition: Some(Cow::Borrowed(DEFAULT_TRANSITION)),
            portal_target: Cow::Borrowed(DEFAULT_PORTAL_TARGET),
            class_name: Cow::Borrowed(DEFAULT_CLASS_NAME),
        }
    }
}

impl<K> fmt::Debug for OverlayConfig<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayConfig")
            .field("model_value", &self.model_value)
            .field("persist", &self.persist)
            .field("trigger", &self.trigger)
            .field("placement", &self.placement)
            .field("strategy", &self.strategy)
            .field("middleware", &self.middleware.as_ref().map(|_| "custom"))
            .field("transition", &self.transition)
            .field("portal_target", &self.portal_target)
            .field("class_name", &self.class_name)
            .finish()
    }
}
