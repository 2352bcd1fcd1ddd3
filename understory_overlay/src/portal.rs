// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay mount boundary: the floating element lives in a portal target, outside the
//! caller's stacking and clipping context, and only while it is shown.

use crate::host::{MountRequest, OverlayHost};
use understory_placement::Strategy;

/// Owns the floating handle for as long as the floating content is mounted.
#[derive(Clone, Debug)]
pub struct MountBoundary<K> {
    floating: Option<K>,
}

impl<K: Copy + Eq + core::fmt::Debug> MountBoundary<K> {
    /// Nothing mounted.
    pub fn new() -> Self {
        Self { floating: None }
    }

    /// The live floating handle, if mounted.
    pub fn floating(&self) -> Option<K> {
        self.floating
    }

    /// Whether the floating content is mounted.
    pub fn is_mounted(&self) -> bool {
        self.floating.is_some()
    }

    /// Mount `content` into `target` unless already mounted. Returns the floating handle
    /// and whether this call mounted it.
    pub fn mount<H>(
        &mut self,
        host: &mut H,
        target: &str,
        content: &H::Content,
        class_name: &str,
        strategy: Strategy,
        transition: Option<&str>,
    ) -> (K, bool)
    where
        H: OverlayHost<Node = K>,
    {
        if let Some(floating) = self.floating {
            return (floating, false);
        }
        let floating = host.mount(MountRequest {
            target,
            content,
            class_name,
            strategy,
            transition,
        });
        tracing::debug!(target: "understory_overlay::portal", ?floating, portal = target, "mounted floating content");
        self.floating = Some(floating);
        (floating, true)
    }

    /// Unmount from `target`, returning the handle that was live.
    pub fn unmount<H>(&mut self, host: &mut H, target: &str) -> Option<K>
    where
        H: OverlayHost<Node = K>,
    {
        let floating = self.floating.take()?;
        host.unmount(target, floating);
        tracing::debug!(target: "understory_overlay::portal", ?floating, portal = target, "unmounted floating content");
        Some(floating)
    }
}

impl<K: Copy + Eq + core::fmt::Debug> Default for MountBoundary<K> {
    fn default() -> Self {
        Self::new()
    }
}
