// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use tracing::trace;

use crate::config::PlacementConfig;

/// Error returned when placement inputs violate their preconditions.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// The viewport has a non-positive or non-finite extent.
    #[error("viewport {0:?} must have a positive, finite size")]
    InvalidViewport(Size),
    /// The anchor has zero area or non-finite coordinates.
    #[error("anchor rectangle {0:?} is empty or not finite")]
    InvalidAnchor(Rect),
    /// The requested content width is non-positive or non-finite.
    #[error("content width {0} must be positive and finite")]
    InvalidContentWidth(f64),
}

/// Solved popover geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementResult {
    /// Popover rectangle in viewport coordinates.
    pub rect: Rect,
    /// Distance from the popover's left edge to the arrow's left edge.
    ///
    /// Always within `[0, rect.width() - 2 * arrow_half_width]`.
    pub arrow_offset_x: f64,
    /// `true` when the top margin forced the popover down over its anchor.
    pub overlaps_anchor: bool,
}

impl PlacementResult {
    /// Left edge.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.rect.x0
    }

    /// Top edge.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.rect.y0
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }
}

/// Estimates the popover height for `item_count` rows.
///
/// The estimate grows with the content and is capped at
/// `max_height_fraction * viewport_height`, but never below the header alone.
#[must_use]
pub fn estimate_height(item_count: usize, viewport_height: f64, config: &PlacementConfig) -> f64 {
    let items = item_count as f64;
    let content = config.header_height + items * config.item_height + 2.0 * config.padding;
    let ceiling = (config.max_height_fraction * viewport_height).max(config.header_height);
    content.min(ceiling).max(0.0)
}

/// Places a popover of `content_width` above `anchor`, inside `viewport`.
///
/// - Horizontally the popover is centered on the anchor, then clamped so both
///   edges keep `margin` from the viewport edges. It hugs an edge rather than
///   flipping.
/// - Vertically its bottom edge sits `gap` above the anchor. If that pushes
///   the top past `top_margin`, the top is clamped and the popover overlaps
///   the anchor instead of leaving the screen.
/// - The arrow stays under the anchor's midpoint regardless of the
///   horizontal clamp, limited to the popover's own width.
///
/// Content wider than the space between the margins is narrowed to fit.
pub fn place(
    anchor: Rect,
    content_width: f64,
    item_count: usize,
    viewport: Size,
    config: &PlacementConfig,
) -> Result<PlacementResult, PlacementError> {
    if !(viewport.is_finite() && viewport.width > 0.0 && viewport.height > 0.0) {
        return Err(PlacementError::InvalidViewport(viewport));
    }
    if !(anchor.is_finite() && anchor.width() > 0.0 && anchor.height() > 0.0) {
        return Err(PlacementError::InvalidAnchor(anchor));
    }
    if !(content_width.is_finite() && content_width > 0.0) {
        return Err(PlacementError::InvalidContentWidth(content_width));
    }

    let margin = config.margin.clamp(0.0, viewport.width / 2.0);
    let width = content_width.min(viewport.width - 2.0 * margin);
    let height = estimate_height(item_count, viewport.height, config);

    let anchor_mid_x = anchor.center().x;
    let min_x = margin;
    let max_x = viewport.width - margin - width;
    let x = (anchor_mid_x - width / 2.0).max(min_x).min(max_x);

    let mut y = anchor.y0 - config.gap - height;
    let mut overlaps_anchor = false;
    if y < config.top_margin {
        y = config.top_margin;
        overlaps_anchor = y + height > anchor.y0;
    }

    let arrow_max = (width - 2.0 * config.arrow_half_width).max(0.0);
    let arrow_offset_x = (anchor_mid_x - x - config.arrow_half_width).clamp(0.0, arrow_max);

    let rect = Rect::new(x, y, x + width, y + height);
    trace!(?anchor, ?rect, arrow_offset_x, item_count, "popover placed");
    Ok(PlacementResult {
        rect,
        arrow_offset_x,
        overlaps_anchor,
    })
}
