// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;

use kurbo::{Rect, Size};
use tracing::{debug, warn};
use understory_placement::{PlacementConfig, PlacementResult, place};
use understory_transition::{
    Backdrop, Phase, TransitionConfig, TransitionController, TransitionError, TransitionEvent,
};

use crate::error::OverlayError;
use crate::frame::{ArrowFrame, OverlayFrame, OverlayKind};
use crate::sheet::CloseCallback;

/// Corner radius of a popover card. It does not change during the transition.
const POPOVER_RADIUS: f64 = 14.0;

/// A card that grows out of its anchor and floats above it.
///
/// The popover's size depends on how many rows it shows. Its placement is
/// re-solved whenever the anchor, the row count, or the viewport changes, and
/// is never reused across open/close cycles.
pub struct AnchoredPopover<C> {
    transition: TransitionController,
    backdrop: Backdrop,
    placement_config: PlacementConfig,
    viewport: Size,
    content_width: f64,
    item_count: usize,
    anchor: Option<Rect>,
    placement: Option<PlacementResult>,
    visible: bool,
    content: C,
    on_close: Option<CloseCallback>,
}

impl<C: fmt::Debug> fmt::Debug for AnchoredPopover<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchoredPopover")
            .field("transition", &self.transition)
            .field("backdrop", &self.backdrop)
            .field("placement_config", &self.placement_config)
            .field("viewport", &self.viewport)
            .field("content_width", &self.content_width)
            .field("item_count", &self.item_count)
            .field("anchor", &self.anchor)
            .field("placement", &self.placement)
            .field("visible", &self.visible)
            .field("content", &self.content)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

impl<C> AnchoredPopover<C> {
    /// Creates a closed popover `content_width` wide with default tunables.
    pub fn new(content: C, content_width: f64, viewport: Size) -> Self {
        let transition = TransitionConfig::default().with_radii(POPOVER_RADIUS, POPOVER_RADIUS);
        Self::with_config(
            content,
            content_width,
            viewport,
            transition,
            PlacementConfig::default(),
        )
    }

    /// Creates a closed popover with explicit tunables.
    pub fn with_config(
        content: C,
        content_width: f64,
        viewport: Size,
        transition: TransitionConfig,
        placement: PlacementConfig,
    ) -> Self {
        Self {
            transition: TransitionController::new(transition),
            backdrop: Backdrop::POPOVER,
            placement_config: placement,
            viewport,
            content_width,
            item_count: 0,
            anchor: None,
            placement: None,
            visible: false,
            content,
            on_close: None,
        }
    }

    /// Replaces the backdrop.
    #[must_use]
    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Sets the callback run once per completed close.
    #[must_use]
    pub fn on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    /// Sets the initial row count used for sizing.
    #[must_use]
    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    /// Applies the host's visibility flag.
    ///
    /// Opening solves the placement for `anchor` first; if the anchor is
    /// missing or degenerate, or the viewport is unusable, nothing renders and
    /// the flag is not recorded. A close the popover finished on its own
    /// clears the recorded flag.
    pub fn set_visible(
        &mut self,
        visible: bool,
        anchor: Option<Rect>,
        now: Duration,
    ) -> Result<(), OverlayError> {
        if visible == self.visible {
            return Ok(());
        }
        if visible {
            let anchor = anchor.ok_or(TransitionError::MissingOrigin)?;
            let placement = self.solve(anchor)?;
            self.transition.open(Some(anchor), now)?;
            self.anchor = Some(anchor);
            self.placement = Some(placement);
        } else {
            self.transition.request_close(now);
        }
        self.visible = visible;
        Ok(())
    }

    /// Re-measured anchor (for example after a scroll). Re-solves the
    /// placement while visible; does nothing while closed.
    ///
    /// On error the previous anchor and placement are kept.
    pub fn set_anchor(&mut self, anchor: Rect) -> Result<(), OverlayError> {
        if self.anchor.is_none() {
            return Ok(());
        }
        match self.solve(anchor) {
            Ok(placement) => {
                self.anchor = Some(anchor);
                self.placement = Some(placement);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "keeping previous popover anchor");
                Err(err)
            }
        }
    }

    /// Updates the row count and re-solves the placement while visible.
    pub fn set_item_count(&mut self, item_count: usize) -> Result<(), OverlayError> {
        self.item_count = item_count;
        self.resolve()
    }

    /// Updates the viewport and re-solves the placement while visible.
    ///
    /// If the new viewport cannot hold the popover, the previous viewport and
    /// placement are kept.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), OverlayError> {
        let previous = core::mem::replace(&mut self.viewport, viewport);
        let result = self.resolve();
        if result.is_err() {
            self.viewport = previous;
        }
        result
    }

    /// Closes from an in-popover affordance or a scrim tap.
    ///
    /// Ignored unless the popover is fully open.
    pub fn dismiss(&mut self, now: Duration) -> bool {
        if !self.transition.can_dismiss() {
            return false;
        }
        debug!("popover dismissed");
        self.transition.request_close(now)
    }

    /// Advances the transition to `now` and runs the close callback when a
    /// close completes.
    pub fn tick(&mut self, now: Duration) -> Option<TransitionEvent> {
        let event = self.transition.tick(now);
        if event == Some(TransitionEvent::Closed) {
            self.visible = false;
            self.anchor = None;
            self.placement = None;
            if let Some(on_close) = self.on_close.as_mut() {
                on_close();
            }
        }
        event
    }

    /// The viewport the popover is placed in.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current row count.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// The placement solved for the current cycle, if any.
    pub fn placement(&self) -> Option<PlacementResult> {
        self.placement
    }

    /// Current transition phase.
    pub fn phase(&self) -> Phase {
        self.transition.phase()
    }

    /// Current transition progress.
    pub fn progress(&self) -> f64 {
        self.transition.progress()
    }

    /// The underlying transition controller.
    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }

    /// The hosted content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// The hosted content, mutably.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// What to draw this frame, or `None` when nothing should render.
    pub fn frame(&self) -> Option<OverlayFrame<'_, C>> {
        let placement = self.placement?;
        let geometry = self.transition.geometry(placement.rect)?;
        let progress = geometry.progress;
        Some(OverlayFrame {
            kind: OverlayKind::Popover,
            rect: geometry.rect,
            drag_offset: 0.0,
            corner_radius: geometry.corner_radius,
            progress,
            backdrop_opacity: self.backdrop.opacity(progress),
            scrim: self.backdrop.scrim_color(progress),
            blocks_pointer: self.backdrop.blocks_pointer(progress),
            content_opacity: progress,
            dismiss_enabled: self.transition.can_dismiss(),
            arrow: Some(ArrowFrame {
                offset_x: placement.arrow_offset_x,
                opacity: progress,
                overlaps_anchor: placement.overlaps_anchor,
            }),
            content: &self.content,
        })
    }

    fn solve(&self, anchor: Rect) -> Result<PlacementResult, OverlayError> {
        Ok(place(
            anchor,
            self.content_width,
            self.item_count,
            self.viewport,
            &self.placement_config,
        )?)
    }

    fn resolve(&mut self) -> Result<(), OverlayError> {
        let Some(anchor) = self.anchor else {
            return Ok(());
        };
        match self.solve(anchor) {
            Ok(placement) => {
                self.placement = Some(placement);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "keeping previous popover placement");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::time::Duration;
    use std::rc::Rc;

    use kurbo::{Rect, Size};
    use understory_placement::PlacementError;
    use understory_transition::{Phase, TransitionError, TransitionEvent};

    use super::AnchoredPopover;
    use crate::error::OverlayError;

    const VIEWPORT: Size = Size::new(400.0, 800.0);
    const AVATAR: Rect = Rect::new(340.0, 720.0, 380.0, 760.0);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn friends(count: usize) -> AnchoredPopover<Vec<&'static str>> {
        let names = ["ada", "grace", "edsger", "barbara", "ken"];
        AnchoredPopover::new(names[..count].to_vec(), 300.0, VIEWPORT).with_item_count(count)
    }

    #[test]
    fn open_morphs_anchor_into_placement() {
        let mut popover = friends(3);
        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();

        let start = popover.frame().unwrap();
        assert_eq!(start.rect, AVATAR);
        assert_eq!(start.corner_radius, 14.0);
        assert_eq!(start.arrow.unwrap().opacity, 0.0);

        popover.tick(ms(420));
        let placement = popover.placement().unwrap();
        let open = popover.frame().unwrap();
        assert_eq!(open.rect, placement.rect);
        assert_eq!(open.backdrop_opacity, 0.22);
        // Hugs the right margin while the arrow stays under the avatar.
        assert_eq!(placement.rect.x1, VIEWPORT.width - 12.0);
        assert_eq!(
            placement.x() + placement.arrow_offset_x + 8.0,
            AVATAR.center().x
        );
    }

    #[test]
    fn item_count_changes_resize_the_card() {
        let mut popover = friends(1);
        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();
        let small = popover.placement().unwrap().height();

        popover.set_item_count(5).unwrap();
        let large = popover.placement().unwrap().height();
        assert!(large > small);
        assert_eq!(popover.placement().unwrap().rect.y1, AVATAR.y0 - 8.0);

        popover.set_item_count(100).unwrap();
        assert_eq!(popover.placement().unwrap().height(), 400.0);
    }

    #[test]
    fn degenerate_anchor_renders_nothing() {
        let mut popover = friends(2);
        assert_eq!(
            popover.set_visible(true, None, ms(0)),
            Err(OverlayError::Transition(TransitionError::MissingOrigin))
        );
        let flat = Rect::new(10.0, 10.0, 10.0, 40.0);
        assert_eq!(
            popover.set_visible(true, Some(flat), ms(0)),
            Err(OverlayError::Placement(PlacementError::InvalidAnchor(flat)))
        );
        assert_eq!(popover.phase(), Phase::Closed);
        assert!(popover.frame().is_none());
    }

    #[test]
    fn bad_viewport_keeps_previous_placement() {
        let mut popover = friends(2);
        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();
        let before = popover.placement();
        assert!(popover.set_viewport(Size::new(0.0, 0.0)).is_err());
        assert_eq!(popover.placement(), before);
        assert_eq!(popover.viewport(), VIEWPORT);
    }

    #[test]
    fn close_releases_placement_and_calls_back_once() {
        let closes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&closes);
        let mut popover = friends(2).on_close(move || sink.set(sink.get() + 1));

        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();
        popover.tick(ms(420));
        assert!(popover.dismiss(ms(500)));
        popover.set_visible(false, None, ms(510)).unwrap();
        assert_eq!(popover.tick(ms(820)), Some(TransitionEvent::Closed));
        assert_eq!(popover.tick(ms(900)), None);

        assert_eq!(closes.get(), 1);
        assert!(popover.placement().is_none());
        assert!(popover.frame().is_none());
    }

    #[test]
    fn moving_the_anchor_re_solves_placement() {
        let mut popover = friends(3);
        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();
        let before = popover.placement().unwrap();

        let centered = Rect::new(180.0, 500.0, 220.0, 540.0);
        popover.set_anchor(centered).unwrap();
        let moved = popover.placement().unwrap();
        assert_ne!(moved, before);
        assert_eq!(moved.rect, Rect::new(50.0, 252.0, 350.0, 492.0));
        assert_eq!(moved.x() + moved.arrow_offset_x + 8.0, centered.center().x);

        popover.tick(ms(420));
        assert_eq!(popover.frame().unwrap().rect, moved.rect);

        let flat = Rect::new(200.0, 500.0, 200.0, 540.0);
        assert_eq!(
            popover.set_anchor(flat),
            Err(OverlayError::Placement(PlacementError::InvalidAnchor(flat)))
        );
        assert_eq!(popover.placement(), Some(moved));
    }

    #[test]
    fn set_anchor_while_closed_does_nothing() {
        let mut popover = friends(2);
        popover.set_anchor(AVATAR).unwrap();
        assert!(popover.placement().is_none());
        assert!(popover.frame().is_none());
        assert_eq!(popover.phase(), Phase::Closed);
    }

    #[test]
    fn self_started_close_clears_the_recorded_flag() {
        let mut popover = friends(2);
        popover.set_visible(true, Some(AVATAR), ms(0)).unwrap();
        popover.tick(ms(420));
        assert!(popover.dismiss(ms(500)));
        assert_eq!(popover.tick(ms(820)), Some(TransitionEvent::Closed));

        // The host never passed `false`; a fresh `true` still reopens.
        popover.set_visible(true, Some(AVATAR), ms(836)).unwrap();
        assert_eq!(popover.phase(), Phase::Opening);
        assert!(popover.placement().is_some());
    }
}
