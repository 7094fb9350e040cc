// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};
use peniko::Color;

/// Which composed component produced a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// A [`ContextualSheet`](crate::ContextualSheet).
    Sheet,
    /// An [`AnchoredPopover`](crate::AnchoredPopover).
    Popover,
}

/// Arrow indicator of a popover frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowFrame {
    /// Offset of the arrow's left edge from the popover's left edge, as solved
    /// for the fully open placement.
    pub offset_x: f64,
    /// Arrow opacity; follows progress.
    pub opacity: f64,
    /// `true` when the popover was pushed down over its anchor. Hosts usually
    /// hide the arrow in that case.
    pub overlaps_anchor: bool,
}

/// Everything a renderer needs to draw one overlay for the current frame.
///
/// The interpolated [`rect`](Self::rect) and the [`drag_offset`](Self::drag_offset)
/// are kept apart; [`presented_rect`](Self::presented_rect) composes them.
#[derive(Debug)]
pub struct OverlayFrame<'a, C> {
    /// Component kind.
    pub kind: OverlayKind,
    /// Panel rectangle interpolated between origin and target.
    pub rect: Rect,
    /// Vertical drag translation applied on top of `rect`.
    pub drag_offset: f64,
    /// Corner radius for the panel.
    pub corner_radius: f64,
    /// Transition progress in `[0, 1]`.
    pub progress: f64,
    /// Backdrop opacity, locked to `progress`.
    pub backdrop_opacity: f64,
    /// Backdrop color with its opacity applied.
    pub scrim: Color,
    /// Whether the backdrop must swallow pointer events.
    pub blocks_pointer: bool,
    /// Opacity of the panel content.
    pub content_opacity: f64,
    /// Whether close affordances (back button, scrim tap) may be used.
    pub dismiss_enabled: bool,
    /// Arrow indicator, for popovers.
    pub arrow: Option<ArrowFrame>,
    /// The caller's content.
    pub content: &'a C,
}

impl<C> OverlayFrame<'_, C> {
    /// Where the panel is actually drawn: `rect` translated by `drag_offset`.
    #[must_use]
    pub fn presented_rect(&self) -> Rect {
        self.rect + Vec2::new(0.0, self.drag_offset)
    }
}
