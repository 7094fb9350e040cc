// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cancellable, observable scalar driven by a host frame clock.
//!
//! ## Usage
//!
//! 1) Request motion with [`AnimatedScalar::animate_to`], passing the current frame time.
//! 2) Call [`AnimatedScalar::tick`] once per frame with the new frame time.
//! 3) Read [`AnimatedScalar::current`] when rendering.
//!
//! A new request always supersedes the in-flight one and starts from the value
//! the scalar holds at that instant, so two animations never write the same
//! scalar.
//!
//! ```
//! use core::time::Duration;
//! use understory_transition::{AnimatedScalar, Easing, Tween};
//!
//! let mut value = Tween::new(0.0);
//! value.animate_to(1.0, Duration::from_millis(100), Easing::Linear, Duration::ZERO);
//!
//! assert!(!value.tick(Duration::from_millis(50)));
//! assert_eq!(value.current(), 0.5);
//!
//! // Finishing is reported exactly once.
//! assert!(value.tick(Duration::from_millis(100)));
//! assert!(!value.tick(Duration::from_millis(116)));
//! assert_eq!(value.current(), 1.0);
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;

use crate::easing::Easing;

/// Callback invoked with the new value whenever an animated scalar changes.
pub type ChangeListener = Box<dyn FnMut(f64)>;

/// A monotonically advancing, cancellable, observable scalar.
///
/// Time is always supplied by the caller as a monotonic timestamp (`now`);
/// implementations never read a clock on their own.
pub trait AnimatedScalar {
    /// The value at the most recent tick.
    fn current(&self) -> f64;

    /// The value the scalar is heading to (or resting at).
    fn target(&self) -> f64;

    /// Returns `true` while an animation is in flight.
    fn is_animating(&self) -> bool;

    /// Starts animating from the current value toward `target`.
    ///
    /// Any in-flight animation is superseded.
    fn animate_to(&mut self, target: f64, duration: Duration, easing: Easing, now: Duration);

    /// Jumps to `value` immediately, cancelling any animation.
    fn snap_to(&mut self, value: f64);

    /// Stops the in-flight animation, leaving the value where it is.
    fn cancel(&mut self);

    /// Advances the animation to `now`.
    ///
    /// Returns `true` exactly once per animation: on the tick that reaches its
    /// target.
    fn tick(&mut self, now: Duration) -> bool;

    /// Registers a listener that observes every value change.
    fn on_change(&mut self, listener: ChangeListener);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

/// Stock [`AnimatedScalar`] implementation: an eased tween between two values.
pub struct Tween {
    value: f64,
    segment: Option<Segment>,
    generation: u64,
    listeners: SmallVec<[ChangeListener; 2]>,
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("value", &self.value)
            .field("segment", &self.segment)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Tween {
    /// Creates a resting scalar holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            segment: None,
            generation: 0,
            listeners: SmallVec::new(),
        }
    }

    /// Number of animations currently driving this scalar: `0` or `1`.
    #[must_use]
    pub fn active_animations(&self) -> usize {
        usize::from(self.segment.is_some())
    }

    /// Counter bumped by every `animate_to`, `snap_to`, and `cancel`.
    ///
    /// Hosts that hand out completion tokens can compare generations to tell a
    /// superseded animation from the current one.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn set_value(&mut self, value: f64) {
        if self.value == value {
            return;
        }
        self.value = value;
        for listener in &mut self.listeners {
            listener(value);
        }
    }
}

impl AnimatedScalar for Tween {
    fn current(&self) -> f64 {
        self.value
    }

    fn target(&self) -> f64 {
        self.segment.map_or(self.value, |segment| segment.to)
    }

    fn is_animating(&self) -> bool {
        self.segment.is_some()
    }

    fn animate_to(&mut self, target: f64, duration: Duration, easing: Easing, now: Duration) {
        debug_assert!(!target.is_nan(), "animation target must not be NaN");
        self.generation = self.generation.wrapping_add(1);
        let duration = if self.value == target {
            Duration::ZERO
        } else {
            duration
        };
        self.segment = Some(Segment {
            from: self.value,
            to: target,
            start: now,
            duration,
            easing,
        });
    }

    fn snap_to(&mut self, value: f64) {
        self.generation = self.generation.wrapping_add(1);
        self.segment = None;
        self.set_value(value);
    }

    fn cancel(&mut self) {
        if self.segment.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    fn tick(&mut self, now: Duration) -> bool {
        let Some(segment) = self.segment else {
            return false;
        };
        let elapsed = now.saturating_sub(segment.start);
        if elapsed >= segment.duration {
            self.segment = None;
            self.set_value(segment.to);
            return true;
        }
        let t = elapsed.as_nanos() as f64 / segment.duration.as_nanos() as f64;
        let eased = segment.easing.apply(t);
        self.set_value(segment.from + (segment.to - segment.from) * eased);
        false
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
