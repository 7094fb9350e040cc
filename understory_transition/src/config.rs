// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::easing::Easing;

/// Tunables for a [`TransitionController`](crate::TransitionController) and
/// its [`DragDismiss`](crate::DragDismiss) handler.
///
/// The defaults reproduce the contextual sheet's feel. None of the values are
/// load-bearing for correctness; hosts may change any of them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransitionConfig {
    /// Time to go from fully closed to fully open. Default: 420 ms.
    pub open_duration: Duration,
    /// Time to go from fully open to fully closed. Default: 320 ms.
    pub close_duration: Duration,
    /// Curve used for both directions of the progress animation.
    pub easing: Easing,
    /// Vertical drag distance (logical units) past which a release dismisses.
    /// Default: `120.0`.
    pub dismiss_threshold: f64,
    /// Time for the drag offset to settle back to zero after a cancelled drag.
    /// Default: 240 ms.
    pub spring_back: Duration,
    /// Corner radius while the overlay sits on its origin. Default: `16.0`.
    pub origin_radius: f64,
    /// Corner radius once the overlay covers its target. Default: `0.0`.
    pub target_radius: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            open_duration: Duration::from_millis(420),
            close_duration: Duration::from_millis(320),
            easing: Easing::CubicInOut,
            dismiss_threshold: 120.0,
            spring_back: Duration::from_millis(240),
            origin_radius: 16.0,
            target_radius: 0.0,
        }
    }
}

impl TransitionConfig {
    /// Sets the open and close durations.
    #[must_use]
    pub fn with_durations(mut self, open: Duration, close: Duration) -> Self {
        self.open_duration = open;
        self.close_duration = close;
        self
    }

    /// Sets the progress easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the drag distance past which a release dismisses.
    #[must_use]
    pub fn with_dismiss_threshold(mut self, threshold: f64) -> Self {
        self.dismiss_threshold = threshold;
        self
    }

    /// Sets the settle time for a cancelled drag.
    #[must_use]
    pub fn with_spring_back(mut self, spring_back: Duration) -> Self {
        self.spring_back = spring_back;
        self
    }

    /// Sets the corner radius schedule from origin to target.
    #[must_use]
    pub fn with_radii(mut self, origin: f64, target: f64) -> Self {
        self.origin_radius = origin;
        self.target_radius = target;
        self
    }
}
