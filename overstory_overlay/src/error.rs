// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use understory_placement::PlacementError;
use understory_transition::TransitionError;

/// Why an overlay declined to show.
///
/// Either way nothing is rendered and no animation starts; callers may retry
/// with fresh measurements on a later frame.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OverlayError {
    /// The origin or anchor rectangle was missing or degenerate.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The popover could not be placed.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The sheet's viewport has a non-positive or non-finite extent.
    #[error("viewport {0:?} must have a positive, finite size")]
    InvalidViewport(Size),
}
