// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the overlay controller.
//!
//! Only problems that decide whether the overlay can ever open are reported. Positioning
//! trouble (elements not laid out, bad middleware output) is handled internally and at
//! most logged.

/// Configuration and lifecycle errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OverlayError {
    /// The component has no parent container to anchor to. The overlay stays closed.
    #[error("overlay component has no parent container to anchor to")]
    ReferenceUnresolved,
    /// [`activate`](crate::OverlayController::activate) was called before a successful
    /// [`attach`](crate::OverlayController::attach).
    #[error("overlay controller must be attached before it is activated")]
    NotAttached,
    /// The controller was torn down.
    #[error("overlay controller was torn down")]
    TornDown,
}
