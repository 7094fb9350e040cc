// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition controller: owns progress and phase for one overlay.
//!
//! ## Usage
//!
//! 1) Call [`TransitionController::open`] with the trigger's on-screen rect.
//! 2) Call [`TransitionController::tick`] every frame and forward
//!    [`TransitionEvent::Closed`] to the close callback.
//! 3) Render with [`TransitionController::geometry`] against the target rect.
//! 4) Call [`TransitionController::request_close`] to dismiss.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_transition::{Phase, TransitionConfig, TransitionController, TransitionEvent};
//!
//! let mut transition = TransitionController::new(TransitionConfig::default());
//! let origin = Rect::new(40.0, 700.0, 120.0, 740.0);
//!
//! transition.open(Some(origin), Duration::ZERO).unwrap();
//! assert_eq!(transition.phase(), Phase::Opening);
//! assert_eq!(transition.tick(Duration::from_millis(420)), Some(TransitionEvent::Opened));
//!
//! assert!(transition.request_close(Duration::from_millis(500)));
//! assert_eq!(transition.tick(Duration::from_millis(820)), Some(TransitionEvent::Closed));
//! assert_eq!(transition.phase(), Phase::Closed);
//! ```

use core::time::Duration;

use kurbo::Rect;
use tracing::{debug, warn};

use crate::config::TransitionConfig;
use crate::error::TransitionError;
use crate::geometry::{interpolate_radius, interpolate_rect, is_renderable};
use crate::phase::{Phase, TransitionEvent};
use crate::tween::{AnimatedScalar, Tween};

/// Interpolated geometry for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionGeometry {
    /// Rectangle between the origin (progress `0`) and the target (progress `1`).
    pub rect: Rect,
    /// Corner radius from the configured radius schedule.
    pub corner_radius: f64,
    /// Progress the geometry was computed at, in `[0, 1]`.
    pub progress: f64,
}

/// Drives a single scalar progress through the overlay [`Phase`] machine.
///
/// The controller is the only writer of its progress scalar: every request
/// supersedes the in-flight animation and restarts from the current value, so
/// reversing mid-flight never jumps.
#[derive(Debug)]
pub struct TransitionController<A = Tween> {
    progress: A,
    phase: Phase,
    origin: Option<Rect>,
    config: TransitionConfig,
}

impl TransitionController<Tween> {
    /// Creates a closed controller backed by a [`Tween`].
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self::with_scalar(Tween::new(0.0), config)
    }
}

impl Default for TransitionController<Tween> {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

impl<A: AnimatedScalar> TransitionController<A> {
    /// Creates a closed controller driving the given scalar.
    ///
    /// The scalar is snapped to `0.0`.
    pub fn with_scalar(mut progress: A, config: TransitionConfig) -> Self {
        progress.snap_to(0.0);
        Self {
            progress,
            phase: Phase::Closed,
            origin: None,
            config,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress.current().clamp(0.0, 1.0)
    }

    /// The origin captured for the current cycle, if any.
    #[must_use]
    pub fn origin(&self) -> Option<Rect> {
        self.origin
    }

    /// The tunables in effect.
    #[must_use]
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Read-only access to the progress scalar.
    #[must_use]
    pub fn scalar(&self) -> &A {
        &self.progress
    }

    /// Returns `true` while the progress animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.progress.is_animating()
    }

    /// Returns `true` only while fully open.
    ///
    /// Dismiss affordances must be disabled otherwise, so a close cannot race
    /// an in-flight transition.
    #[must_use]
    pub fn can_dismiss(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Starts opening from `origin`.
    ///
    /// - From `Closed`, progress restarts at `0.0`.
    /// - From `Closing`, the close is superseded: progress reverses from its
    ///   current value and no [`TransitionEvent::Closed`] is produced for it.
    /// - From `Opening` or `Open` this is a no-op.
    ///
    /// A missing, empty, or non-finite origin is rejected and nothing changes.
    pub fn open(&mut self, origin: Option<Rect>, now: Duration) -> Result<(), TransitionError> {
        if matches!(self.phase, Phase::Opening | Phase::Open) {
            return Ok(());
        }
        let origin = validate_origin(origin)?;
        if self.phase == Phase::Closed {
            self.progress.snap_to(0.0);
        }
        self.origin = Some(origin);
        let remaining = 1.0 - self.progress();
        let duration = scaled(self.config.open_duration, remaining);
        self.progress.animate_to(1.0, duration, self.config.easing, now);
        debug!(from = ?self.phase, progress = self.progress(), "transition opening");
        self.phase = Phase::Opening;
        Ok(())
    }

    /// Starts closing toward the origin.
    ///
    /// Valid from `Open` and `Opening`; an in-flight open reverses from its
    /// current progress. Returns `false` (and does nothing) otherwise, which
    /// makes repeated close requests idempotent.
    pub fn request_close(&mut self, now: Duration) -> bool {
        if !matches!(self.phase, Phase::Open | Phase::Opening) {
            return false;
        }
        let duration = scaled(self.config.close_duration, self.progress());
        self.progress.animate_to(0.0, duration, self.config.easing, now);
        debug!(from = ?self.phase, progress = self.progress(), "transition closing");
        self.phase = Phase::Closing;
        true
    }

    /// Advances the progress animation to `now`.
    ///
    /// Returns an event when a transient phase settles. `Closed` is returned
    /// only after progress has reached `0.0`, once per completed close. The
    /// origin is released at that point; the next open needs a fresh one.
    pub fn tick(&mut self, now: Duration) -> Option<TransitionEvent> {
        if !self.progress.tick(now) {
            return None;
        }
        match self.phase {
            Phase::Opening => {
                self.phase = Phase::Open;
                debug!("transition open");
                Some(TransitionEvent::Opened)
            }
            Phase::Closing => {
                self.phase = Phase::Closed;
                self.origin = None;
                debug!("transition closed");
                Some(TransitionEvent::Closed)
            }
            Phase::Open | Phase::Closed => None,
        }
    }

    /// Geometry for the current frame, morphing the origin into `target`.
    ///
    /// Returns `None` while closed, which means "render nothing".
    #[must_use]
    pub fn geometry(&self, target: Rect) -> Option<TransitionGeometry> {
        if !self.phase.is_visible() {
            return None;
        }
        let origin = self.origin?;
        let progress = self.progress();
        Some(TransitionGeometry {
            rect: interpolate_rect(origin, target, progress),
            corner_radius: interpolate_radius(
                self.config.origin_radius,
                self.config.target_radius,
                progress,
            ),
            progress,
        })
    }
}

fn validate_origin(origin: Option<Rect>) -> Result<Rect, TransitionError> {
    let Some(origin) = origin else {
        warn!("transition requested without an origin");
        return Err(TransitionError::MissingOrigin);
    };
    if !is_renderable(origin) {
        warn!(?origin, "transition origin is not renderable");
        return Err(TransitionError::InvalidOrigin(origin));
    }
    Ok(origin)
}

/// Scales `duration` by the fraction of the full distance left to travel.
fn scaled(duration: Duration, fraction: f64) -> Duration {
    duration.mul_f64(fraction.clamp(0.0, 1.0))
}
