// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to the normalized time of an animation.
///
/// Every curve maps `0.0` to exactly `0.0` and `1.0` to exactly `1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow settle.
    #[default]
    CubicInOut,
    /// Cubic ease-out: fast start that decelerates into the target.
    ///
    /// Used for spring-back motions that should feel released rather than
    /// pushed.
    CubicOut,
}

impl Easing {
    /// Maps linear time `t` to eased progress. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicInOut, Easing::CubicOut];

    #[test]
    fn boundaries_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for step in 1..=100 {
                let value = easing.apply(f64::from(step) / 100.0);
                assert!(value >= last, "{easing:?} decreased at step {step}");
                last = value;
            }
        }
    }

    #[test]
    fn input_outside_unit_range_is_clamped() {
        assert_eq!(Easing::CubicInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::CubicOut.apply(7.5), 1.0);
    }

    #[test]
    fn cubic_in_out_is_symmetric_at_midpoint() {
        assert_eq!(Easing::CubicInOut.apply(0.5), 0.5);
    }
}
