// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Lifecycle of an overlay transition.
///
/// `Closed` and `Open` are resting states; `Opening` and `Closing` last only
/// while the progress animation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Not rendered; progress rests at `0.0`.
    #[default]
    Closed,
    /// Progress is animating toward `1.0`.
    Opening,
    /// Fully presented; progress rests at `1.0`.
    Open,
    /// Progress is animating toward `0.0`.
    Closing,
}

impl Phase {
    /// Returns `true` for `Opening` and `Closing`.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Returns `true` whenever something should be drawn.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self != Self::Closed
    }
}

/// Notification produced when a transition settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    /// The opening animation completed; the phase is now [`Phase::Open`].
    Opened,
    /// The closing animation completed; the phase is now [`Phase::Closed`].
    ///
    /// Emitted exactly once per completed close. Hosts forward it to their
    /// close callback.
    Closed,
}
