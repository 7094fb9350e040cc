// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry interpolation between an origin and a target rectangle.
//!
//! Both maps are plain linear interpolations that return their endpoints
//! exactly at `progress == 0.0` and `progress == 1.0`, so a resting overlay
//! never shows a seam against the trigger or the viewport.
//!
//! ```
//! use kurbo::Rect;
//! use understory_transition::{interpolate_radius, interpolate_rect};
//!
//! let origin = Rect::new(20.0, 600.0, 120.0, 680.0);
//! let target = Rect::new(0.0, 0.0, 400.0, 800.0);
//!
//! assert_eq!(interpolate_rect(origin, target, 0.0), origin);
//! assert_eq!(interpolate_rect(origin, target, 1.0), target);
//! assert_eq!(interpolate_radius(16.0, 0.0, 0.5), 8.0);
//! ```

use kurbo::Rect;

/// Returns `true` if `rect` can anchor a transition.
///
/// The rectangle must have finite coordinates and a strictly positive width
/// and height. Zero-area rectangles come from elements that were not laid out
/// yet and are treated as "nothing to animate from".
#[must_use]
pub fn is_renderable(rect: Rect) -> bool {
    rect.is_finite() && rect.width() > 0.0 && rect.height() > 0.0
}

/// Linearly interpolates each edge of `origin` toward `target`.
///
/// `progress` is expected in `[0, 1]`; it is not clamped. At the endpoints the
/// inputs are returned unchanged.
#[must_use]
pub fn interpolate_rect(origin: Rect, target: Rect, progress: f64) -> Rect {
    debug_assert!(!progress.is_nan(), "progress must not be NaN");
    if progress == 0.0 {
        return origin;
    }
    if progress == 1.0 {
        return target;
    }
    let rect = Rect::new(
        lerp(origin.x0, target.x0, progress),
        lerp(origin.y0, target.y0, progress),
        lerp(origin.x1, target.x1, progress),
        lerp(origin.y1, target.y1, progress),
    );
    debug_assert!(
        rect.width() >= 0.0 && rect.height() >= 0.0,
        "interpolated rect has negative extent: {rect:?}"
    );
    rect
}

/// Linearly interpolates a corner radius from `r0` to `r1`.
#[must_use]
pub fn interpolate_radius(r0: f64, r1: f64, progress: f64) -> f64 {
    debug_assert!(
        !r0.is_nan() && !r1.is_nan() && !progress.is_nan(),
        "radius interpolation inputs must not be NaN"
    );
    if progress == 0.0 {
        return r0;
    }
    if progress == 1.0 {
        return r1;
    }
    lerp(r0, r1, progress)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{interpolate_radius, interpolate_rect, is_renderable};

    #[test]
    fn endpoints_are_exact() {
        let pairs = [
            (
                Rect::new(0.1, 0.2, 0.3, 0.7),
                Rect::new(0.0, 0.0, 390.0, 844.0),
            ),
            (
                Rect::new(13.37, 711.1, 97.9, 733.3),
                Rect::new(-0.0, 1e-9, 1e9, 1e9 + 0.1),
            ),
            (
                Rect::new(200.0, 200.0, 201.0, 201.0),
                Rect::new(200.0, 200.0, 201.0, 201.0),
            ),
        ];
        for (origin, target) in pairs {
            let at_zero = interpolate_rect(origin, target, 0.0);
            let at_one = interpolate_rect(origin, target, 1.0);
            assert_eq!(at_zero.x0.to_bits(), origin.x0.to_bits());
            assert_eq!(at_zero.y1.to_bits(), origin.y1.to_bits());
            assert_eq!(at_one.x0.to_bits(), target.x0.to_bits());
            assert_eq!(at_one.y1.to_bits(), target.y1.to_bits());
            assert_eq!(at_zero, origin);
            assert_eq!(at_one, target);
        }
    }

    #[test]
    fn midpoint_is_halfway() {
        let origin = Rect::new(100.0, 100.0, 200.0, 150.0);
        let target = Rect::new(0.0, 0.0, 400.0, 800.0);
        let mid = interpolate_rect(origin, target, 0.5);
        assert_eq!(mid, Rect::new(50.0, 50.0, 300.0, 475.0));
        assert_eq!(mid.width(), 250.0);
        assert_eq!(mid.height(), 425.0);
    }

    #[test]
    fn radius_follows_progress() {
        assert_eq!(interpolate_radius(16.0, 0.0, 0.0), 16.0);
        assert_eq!(interpolate_radius(16.0, 0.0, 1.0), 0.0);
        assert_eq!(interpolate_radius(16.0, 0.0, 0.25), 12.0);
        assert_eq!(interpolate_radius(14.0, 14.0, 0.5), 14.0);
    }

    #[test]
    fn renderable_rejects_degenerate_input() {
        assert!(is_renderable(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!is_renderable(Rect::new(5.0, 5.0, 5.0, 20.0)));
        assert!(!is_renderable(Rect::new(5.0, 5.0, 20.0, 5.0)));
        assert!(!is_renderable(Rect::new(10.0, 0.0, 0.0, 10.0)));
        assert!(!is_renderable(Rect::new(f64::NAN, 0.0, 10.0, 10.0)));
        assert!(!is_renderable(Rect::new(0.0, 0.0, f64::INFINITY, 10.0)));
    }
}
