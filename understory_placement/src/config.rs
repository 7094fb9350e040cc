// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Metrics and margins used by [`place`](crate::place).
///
/// All values are in logical units, in the same space as the anchor and the
/// viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Height of the fixed header row. Default: `48.0`.
    pub header_height: f64,
    /// Height contributed by each content item. Default: `56.0`.
    pub item_height: f64,
    /// Padding above and below the content. Counted twice. Default: `12.0`.
    pub padding: f64,
    /// Fraction of the viewport height the popover may grow to. Default: `0.5`.
    pub max_height_fraction: f64,
    /// Minimum horizontal distance from either viewport edge. Default: `12.0`.
    pub margin: f64,
    /// Minimum distance from the top of the viewport. Default: `48.0`.
    pub top_margin: f64,
    /// Gap between the popover's bottom edge and the anchor's top edge.
    /// Default: `8.0`.
    pub gap: f64,
    /// Half the width of the arrow indicator. Default: `8.0`.
    pub arrow_half_width: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            header_height: 48.0,
            item_height: 56.0,
            padding: 12.0,
            max_height_fraction: 0.5,
            margin: 12.0,
            top_margin: 48.0,
            gap: 8.0,
            arrow_half_width: 8.0,
        }
    }
}

impl PlacementConfig {
    /// Sets the header, per-item, and padding metrics.
    #[must_use]
    pub fn with_metrics(mut self, header_height: f64, item_height: f64, padding: f64) -> Self {
        self.header_height = header_height;
        self.item_height = item_height;
        self.padding = padding;
        self
    }

    /// Sets the height ceiling as a fraction of the viewport height.
    #[must_use]
    pub fn with_max_height_fraction(mut self, fraction: f64) -> Self {
        self.max_height_fraction = fraction;
        self
    }

    /// Sets the horizontal and top margins.
    #[must_use]
    pub fn with_margins(mut self, margin: f64, top_margin: f64) -> Self {
        self.margin = margin;
        self.top_margin = top_margin;
        self
    }

    /// Sets the anchor gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the arrow half width.
    #[must_use]
    pub fn with_arrow_half_width(mut self, half_width: f64) -> Self {
        self.arrow_half_width = half_width;
        self
    }
}
