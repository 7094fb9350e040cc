// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Scrim drawn behind an overlay.
///
/// Opacity is a pure function of the transition progress; the backdrop has no
/// animation of its own, so it can never drift out of step with the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    /// Scrim color at full opacity. Its own alpha is multiplied in.
    pub color: Color,
    /// Opacity reached at progress `1.0`.
    pub max_opacity: f64,
}

impl Backdrop {
    /// Dimming used behind full-screen sheets.
    pub const SHEET: Self = Self {
        color: Color::BLACK,
        max_opacity: 0.5,
    };

    /// Lighter dimming used behind anchored popovers.
    pub const POPOVER: Self = Self {
        color: Color::BLACK,
        max_opacity: 0.22,
    };

    /// Creates a black backdrop reaching `max_opacity` when fully open.
    #[must_use]
    pub fn new(max_opacity: f64) -> Self {
        Self {
            color: Color::BLACK,
            max_opacity,
        }
    }

    /// Opacity at `progress`: exactly `progress * max_opacity`.
    #[must_use]
    pub fn opacity(&self, progress: f64) -> f64 {
        progress * self.max_opacity
    }

    /// The scrim color to paint at `progress`.
    #[must_use]
    pub fn scrim_color(&self, progress: f64) -> Color {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Opacity lives in [0, 1]; f32 precision is plenty for a color channel"
        )]
        let opacity = self.opacity(progress) as f32;
        let base_alpha = self.color.components[3];
        self.color.with_alpha(base_alpha * opacity)
    }

    /// Returns `true` while the scrim is visible and must swallow pointer
    /// events aimed at content underneath.
    #[must_use]
    pub fn blocks_pointer(&self, progress: f64) -> bool {
        self.opacity(progress) > 0.0
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::SHEET
    }
}
