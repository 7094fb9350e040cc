// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-dismiss: vertical drag tracking that can interrupt an open overlay.
//!
//! ## Usage
//!
//! 1) Call [`DragDismiss::begin`] on pointer down; it only arms while the
//!    transition is [`Phase::Open`].
//! 2) Call [`DragDismiss::update`] on each move; the offset follows the
//!    pointer 1:1.
//! 3) Call [`DragDismiss::release`] on pointer up. Past the threshold the
//!    controller is asked to close; otherwise the offset springs back.
//! 4) Every frame, call [`DragDismiss::sync`] with the controller's phase and
//!    then [`DragDismiss::tick`].
//!
//! The offset is a separate value from the transition geometry. Renderers add
//! it as a translation on top of the interpolated rect.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_transition::{
//!     DragDismiss, Phase, ReleaseDecision, TransitionConfig, TransitionController,
//! };
//!
//! let config = TransitionConfig::default();
//! let mut transition = TransitionController::new(config);
//! let mut drag = DragDismiss::new(&config);
//!
//! transition.open(Some(Rect::new(0.0, 600.0, 100.0, 660.0)), Duration::ZERO).unwrap();
//! transition.tick(Duration::from_millis(420));
//! drag.sync(transition.phase(), Duration::from_millis(420));
//!
//! assert!(drag.begin(Point::new(200.0, 100.0), transition.phase()));
//! assert_eq!(drag.update(Point::new(200.0, 260.0)), Some(160.0));
//!
//! let decision = drag.release(&mut transition, Duration::from_millis(500));
//! assert_eq!(decision, Some(ReleaseDecision::Dismiss));
//! assert_eq!(transition.phase(), Phase::Closing);
//! ```

use core::time::Duration;

use kurbo::Point;
use tracing::{debug, trace};

use crate::config::TransitionConfig;
use crate::controller::TransitionController;
use crate::easing::Easing;
use crate::phase::Phase;
use crate::tween::{AnimatedScalar, Tween};

/// State of the drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No gesture; the offset rests at zero.
    #[default]
    Idle,
    /// A pointer is down and the offset tracks it.
    Dragging,
    /// Released past the threshold; the overlay is closing while the offset
    /// settles.
    Committing,
    /// Released short of the threshold; the offset springs back to zero.
    Resetting,
}

/// Outcome of releasing a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseDecision {
    /// The drag went far enough: close the overlay.
    Dismiss,
    /// The drag fell short: return to rest.
    SpringBack,
}

/// Decides what a release at `delta` means.
///
/// Only a delta strictly greater than `threshold` dismisses.
#[must_use]
pub fn dismiss_decision(delta: f64, threshold: f64) -> ReleaseDecision {
    if delta > threshold {
        ReleaseDecision::Dismiss
    } else {
        ReleaseDecision::SpringBack
    }
}

/// Tracks a vertical drag over an open overlay and turns releases into
/// dismissals.
#[derive(Debug)]
pub struct DragDismiss<A = Tween> {
    phase: GesturePhase,
    start: Option<Point>,
    offset: A,
    threshold: f64,
    spring_back: Duration,
    settle: Duration,
    last_transition: Phase,
}

impl DragDismiss<Tween> {
    /// Creates an idle handler using the threshold and timings in `config`.
    #[must_use]
    pub fn new(config: &TransitionConfig) -> Self {
        Self::with_scalar(Tween::new(0.0), config)
    }
}

impl<A: AnimatedScalar> DragDismiss<A> {
    /// Creates an idle handler driving the given offset scalar.
    pub fn with_scalar(mut offset: A, config: &TransitionConfig) -> Self {
        offset.snap_to(0.0);
        Self {
            phase: GesturePhase::Idle,
            start: None,
            offset,
            threshold: config.dismiss_threshold,
            spring_back: config.spring_back,
            settle: config.close_duration,
            last_transition: Phase::Closed,
        }
    }

    /// Current gesture state.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Vertical translation to add on top of the transition geometry.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.current()
    }

    /// Returns `true` while a pointer is down.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Distance past which a release dismisses.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Starts tracking at `pos`.
    ///
    /// Ignored (returning `false`) unless `transition` is [`Phase::Open`].
    /// A drag started while the offset is still settling takes over from the
    /// settling value.
    pub fn begin(&mut self, pos: Point, transition: Phase) -> bool {
        if transition != Phase::Open {
            return false;
        }
        if self.phase == GesturePhase::Committing {
            return false;
        }
        self.offset.cancel();
        let resting = self.offset.current();
        self.start = Some(Point::new(pos.x, pos.y - resting));
        self.phase = GesturePhase::Dragging;
        trace!(y = pos.y, "drag began");
        true
    }

    /// Moves the tracked pointer to `pos`, returning the new offset.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<f64> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        let start = self.start?;
        let delta = pos.y - start.y;
        self.offset.snap_to(delta);
        trace!(delta, "drag moved");
        Some(delta)
    }

    /// Ends the drag and applies the [`dismiss_decision`].
    ///
    /// On [`ReleaseDecision::Dismiss`] the controller is asked to close and the
    /// offset settles to zero alongside it. If the controller refuses (it left
    /// `Open` in the meantime) the release degrades to a spring-back.
    ///
    /// Returns `None` when no drag is active.
    pub fn release<B: AnimatedScalar>(
        &mut self,
        transition: &mut TransitionController<B>,
        now: Duration,
    ) -> Option<ReleaseDecision> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.start = None;
        let delta = self.offset.current();
        let decision = dismiss_decision(delta, self.threshold);
        match decision {
            ReleaseDecision::Dismiss if transition.request_close(now) => {
                self.phase = GesturePhase::Committing;
                self.offset.animate_to(0.0, self.settle, Easing::CubicInOut, now);
                debug!(delta, "drag released past threshold");
                Some(ReleaseDecision::Dismiss)
            }
            _ => {
                self.spring(now);
                debug!(delta, "drag released short of threshold");
                Some(ReleaseDecision::SpringBack)
            }
        }
    }

    /// Abandons an active drag without deciding anything.
    ///
    /// Use for pointer-cancel events. The offset springs back to zero.
    pub fn cancel(&mut self, now: Duration) {
        if self.phase == GesturePhase::Dragging {
            self.start = None;
            self.spring(now);
            debug!("drag cancelled");
        }
    }

    /// Observes the controller's phase.
    ///
    /// - On every entry into [`Phase::Open`] the offset is reset to zero.
    /// - If the controller leaves `Open` while a drag is active (for example,
    ///   a programmatic close), the drag is abandoned without requesting a
    ///   second close.
    pub fn sync(&mut self, transition: Phase, now: Duration) {
        let previous = core::mem::replace(&mut self.last_transition, transition);
        if transition == Phase::Open && previous != Phase::Open {
            self.reset();
            return;
        }
        if transition != Phase::Open && self.phase == GesturePhase::Dragging {
            debug!(?transition, "drag abandoned: overlay left open");
            self.start = None;
            self.spring(now);
        }
    }

    /// Advances the offset animation. Returns to [`GesturePhase::Idle`] once
    /// the offset has settled.
    pub fn tick(&mut self, now: Duration) {
        if self.offset.tick(now)
            && matches!(self.phase, GesturePhase::Committing | GesturePhase::Resetting)
        {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Drops any gesture and snaps the offset to zero.
    pub fn reset(&mut self) {
        self.start = None;
        self.offset.snap_to(0.0);
        self.phase = GesturePhase::Idle;
    }

    fn spring(&mut self, now: Duration) {
        self.phase = GesturePhase::Resetting;
        self.offset.animate_to(0.0, self.spring_back, Easing::CubicOut, now);
    }
}
