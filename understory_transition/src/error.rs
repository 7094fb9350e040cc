// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Error returned when a transition request cannot be honored.
///
/// Rejected requests leave the controller untouched; the overlay simply does
/// not render.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TransitionError {
    /// No origin rectangle was supplied while the overlay was asked to show.
    #[error("no origin rectangle was supplied")]
    MissingOrigin,
    /// The origin has zero area or non-finite coordinates.
    #[error("origin rectangle {0:?} is empty or not finite")]
    InvalidOrigin(Rect),
}
