// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use tracing::{debug, warn};
use understory_transition::{
    Backdrop, DragDismiss, Phase, ReleaseDecision, TransitionConfig, TransitionController,
    TransitionEvent,
};

use crate::error::OverlayError;
use crate::frame::{OverlayFrame, OverlayKind};

/// Close notification supplied by the host screen.
pub type CloseCallback = Box<dyn FnMut()>;

/// A panel that grows out of its trigger to cover the whole viewport.
///
/// The sheet is driven the way a declarative screen drives it: pass the
/// `visible` flag and the trigger's rectangle on every frame through
/// [`set_visible`](Self::set_visible), call [`tick`](Self::tick), and draw
/// [`frame`](Self::frame). Only changes of the flag start transitions.
///
/// When the sheet finishes closing, whether from the flag, the dismiss button,
/// or a drag, the close callback runs exactly once. The host is expected to
/// flip its flag to `false` in response.
pub struct ContextualSheet<C> {
    transition: TransitionController,
    drag: DragDismiss,
    backdrop: Backdrop,
    viewport: Size,
    visible: bool,
    content: C,
    on_close: Option<CloseCallback>,
}

impl<C: fmt::Debug> fmt::Debug for ContextualSheet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextualSheet")
            .field("transition", &self.transition)
            .field("drag", &self.drag)
            .field("backdrop", &self.backdrop)
            .field("viewport", &self.viewport)
            .field("visible", &self.visible)
            .field("content", &self.content)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

impl<C> ContextualSheet<C> {
    /// Creates a closed sheet with default tunables.
    pub fn new(content: C, viewport: Size) -> Self {
        Self::with_config(content, viewport, TransitionConfig::default())
    }

    /// Creates a closed sheet with the given tunables.
    pub fn with_config(content: C, viewport: Size, config: TransitionConfig) -> Self {
        Self {
            transition: TransitionController::new(config),
            drag: DragDismiss::new(&config),
            backdrop: Backdrop::SHEET,
            viewport,
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

    /// Applies the host's visibility flag.
    ///
    /// A `false -> true` change opens from `origin`; `true -> false` closes.
    /// Flipping back to `true` while still closing reverses the close without
    /// running the callback for it.
    ///
    /// If the origin is missing or degenerate, or the viewport is unusable,
    /// the request is rejected, nothing renders, and the flag is not recorded,
    /// so the host can retry with a fresh measurement next frame.
    ///
    /// A close the sheet finished on its own (dismiss button or drag) clears
    /// the recorded flag, so the next `true` opens again even if the host never
    /// passed `false` in between.
    pub fn set_visible(
        &mut self,
        visible: bool,
        origin: Option<Rect>,
        now: Duration,
    ) -> Result<(), OverlayError> {
        if visible == self.visible {
            return Ok(());
        }
        if visible {
            if !is_usable(self.viewport) {
                return Err(OverlayError::InvalidViewport(self.viewport));
            }
            self.transition.open(origin, now)?;
        } else {
            self.transition.request_close(now);
        }
        self.visible = visible;
        Ok(())
    }

    /// Closes from an in-sheet affordance such as a back button.
    ///
    /// Ignored unless the sheet is fully open.
    pub fn dismiss(&mut self, now: Duration) -> bool {
        if !self.transition.can_dismiss() {
            return false;
        }
        debug!("sheet dismissed");
        self.transition.request_close(now)
    }

    /// Pointer pressed on the sheet. Returns `true` if a drag started.
    pub fn pointer_down(&mut self, pos: Point) -> bool {
        self.drag.begin(pos, self.transition.phase())
    }

    /// Pointer moved. Returns the new drag offset while dragging.
    pub fn pointer_move(&mut self, pos: Point) -> Option<f64> {
        self.drag.update(pos)
    }

    /// Pointer released. Returns what the release decided, if a drag was
    /// active.
    pub fn pointer_up(&mut self, now: Duration) -> Option<ReleaseDecision> {
        self.drag.release(&mut self.transition, now)
    }

    /// Pointer interaction cancelled by the platform.
    pub fn pointer_cancel(&mut self, now: Duration) {
        self.drag.cancel(now);
    }

    /// Advances all animations to `now` and runs the close callback when a
    /// close completes.
    pub fn tick(&mut self, now: Duration) -> Option<TransitionEvent> {
        let event = self.transition.tick(now);
        self.drag.sync(self.transition.phase(), now);
        self.drag.tick(now);
        if event == Some(TransitionEvent::Closed) {
            self.visible = false;
            if let Some(on_close) = self.on_close.as_mut() {
                on_close();
            }
        }
        event
    }

    /// Updates the viewport the sheet expands into.
    ///
    /// A non-finite or empty viewport is rejected and the previous one kept.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), OverlayError> {
        if !is_usable(viewport) {
            warn!(?viewport, "keeping previous sheet viewport");
            return Err(OverlayError::InvalidViewport(viewport));
        }
        self.viewport = viewport;
        Ok(())
    }

    /// The viewport the sheet expands into.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current transition phase.
    pub fn phase(&self) -> Phase {
        self.transition.phase()
    }

    /// Current transition progress.
    pub fn progress(&self) -> f64 {
        self.transition.progress()
    }

    /// Current drag offset.
    pub fn drag_offset(&self) -> f64 {
        self.drag.offset()
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
        if !is_usable(self.viewport) {
            return None;
        }
        let target = Rect::from_origin_size(Point::ORIGIN, self.viewport);
        let geometry = self.transition.geometry(target)?;
        let progress = geometry.progress;
        Some(OverlayFrame {
            kind: OverlayKind::Sheet,
            rect: geometry.rect,
            drag_offset: self.drag.offset(),
            corner_radius: geometry.corner_radius,
            progress,
            backdrop_opacity: self.backdrop.opacity(progress),
            scrim: self.backdrop.scrim_color(progress),
            blocks_pointer: self.backdrop.blocks_pointer(progress),
            content_opacity: progress,
            dismiss_enabled: self.transition.can_dismiss(),
            arrow: None,
            content: &self.content,
        })
    }
}

fn is_usable(viewport: Size) -> bool {
    viewport.is_finite() && viewport.width > 0.0 && viewport.height > 0.0
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::time::Duration;
    use std::rc::Rc;

    use kurbo::{Point, Rect, Size};
    use understory_transition::{Phase, TransitionError, TransitionEvent};

    use super::ContextualSheet;
    use crate::error::OverlayError;

    const VIEWPORT: Size = Size::new(400.0, 800.0);
    const CARD: Rect = Rect::new(16.0, 520.0, 196.0, 640.0);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn counting_sheet() -> (ContextualSheet<&'static str>, Rc<Cell<u32>>) {
        let closes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&closes);
        let sheet =
            ContextualSheet::new("recipe", VIEWPORT).on_close(move || sink.set(sink.get() + 1));
        (sheet, closes)
    }

    #[test]
    fn closed_sheet_renders_nothing() {
        let (sheet, _) = counting_sheet();
        assert!(sheet.frame().is_none());
    }

    #[test]
    fn missing_origin_renders_nothing_and_can_retry() {
        let (mut sheet, _) = counting_sheet();
        assert_eq!(
            sheet.set_visible(true, None, ms(0)),
            Err(OverlayError::Transition(TransitionError::MissingOrigin))
        );
        assert!(sheet.frame().is_none());

        sheet.set_visible(true, Some(CARD), ms(16)).unwrap();
        assert_eq!(sheet.phase(), Phase::Opening);
        assert_eq!(sheet.frame().unwrap().rect, CARD);
    }

    #[test]
    fn flag_driven_cycle_calls_back_once() {
        let (mut sheet, closes) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        // Declarative hosts pass the same flag every frame.
        for frame in 0..40 {
            let now = ms(frame * 16);
            sheet.set_visible(true, Some(CARD), now).unwrap();
            sheet.tick(now);
        }
        assert_eq!(sheet.phase(), Phase::Open);
        let open = sheet.frame().unwrap();
        assert_eq!(open.rect, Rect::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(open.backdrop_opacity, 0.5);
        assert!(open.dismiss_enabled);

        sheet.set_visible(false, None, ms(700)).unwrap();
        for frame in 0..40 {
            sheet.tick(ms(700 + frame * 16));
        }
        assert_eq!(closes.get(), 1);
        assert!(sheet.frame().is_none());
    }

    #[test]
    fn dismiss_button_waits_for_open() {
        let (mut sheet, closes) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        assert!(!sheet.dismiss(ms(100)));
        assert!(!sheet.frame().unwrap().dismiss_enabled);

        assert_eq!(sheet.tick(ms(420)), Some(TransitionEvent::Opened));
        assert!(sheet.dismiss(ms(500)));
        assert!(!sheet.dismiss(ms(510)));
        assert_eq!(sheet.tick(ms(820)), Some(TransitionEvent::Closed));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn drag_offset_is_composed_at_render_time() {
        let (mut sheet, _) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        sheet.tick(ms(420));

        assert!(sheet.pointer_down(Point::new(200.0, 100.0)));
        sheet.pointer_move(Point::new(200.0, 160.0));
        let frame = sheet.frame().unwrap();
        assert_eq!(frame.rect, Rect::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(frame.drag_offset, 60.0);
        assert_eq!(frame.presented_rect(), Rect::new(0.0, 60.0, 400.0, 860.0));
    }

    #[test]
    fn drag_dismiss_then_host_resets_flag() {
        let (mut sheet, closes) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        sheet.tick(ms(420));

        sheet.pointer_down(Point::new(200.0, 100.0));
        sheet.pointer_move(Point::new(200.0, 300.0));
        sheet.pointer_up(ms(500));
        assert_eq!(sheet.phase(), Phase::Closing);

        for frame in 0..30 {
            let now = ms(500 + frame * 16);
            // The host keeps passing `true` until its callback runs.
            let visible = closes.get() == 0;
            sheet.set_visible(visible, Some(CARD), now).unwrap();
            sheet.tick(now);
        }
        assert_eq!(closes.get(), 1);
        assert_eq!(sheet.phase(), Phase::Closed);

        // A fresh open works after the host flipped its flag.
        sheet.set_visible(true, Some(CARD), ms(2000)).unwrap();
        assert_eq!(sheet.phase(), Phase::Opening);
        assert_eq!(sheet.drag_offset(), 0.0);
    }

    #[test]
    fn unusable_viewport_is_rejected() {
        let (mut sheet, _) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        sheet.tick(ms(420));

        for bad in [
            Size::new(f64::NAN, 800.0),
            Size::new(-400.0, 800.0),
            Size::new(0.0, 0.0),
        ] {
            assert!(matches!(
                sheet.set_viewport(bad),
                Err(OverlayError::InvalidViewport(_))
            ));
            assert_eq!(sheet.viewport(), VIEWPORT);
            assert_eq!(sheet.frame().unwrap().rect, Rect::new(0.0, 0.0, 400.0, 800.0));
        }
    }

    #[test]
    fn sheet_built_with_unusable_viewport_renders_nothing() {
        let mut sheet = ContextualSheet::new("recipe", Size::new(0.0, 800.0));
        assert_eq!(
            sheet.set_visible(true, Some(CARD), ms(0)),
            Err(OverlayError::InvalidViewport(Size::new(0.0, 800.0)))
        );
        assert_eq!(sheet.phase(), Phase::Closed);
        assert!(sheet.frame().is_none());

        sheet.set_viewport(VIEWPORT).unwrap();
        sheet.set_visible(true, Some(CARD), ms(16)).unwrap();
        assert_eq!(sheet.frame().unwrap().rect, CARD);
    }

    #[test]
    fn self_started_close_clears_the_recorded_flag() {
        let (mut sheet, closes) = counting_sheet();
        sheet.set_visible(true, Some(CARD), ms(0)).unwrap();
        sheet.tick(ms(420));
        assert!(sheet.dismiss(ms(500)));
        assert_eq!(sheet.tick(ms(820)), Some(TransitionEvent::Closed));
        assert_eq!(closes.get(), 1);

        // The host flipped false and back to true within one frame, so it only
        // ever passes `true`.
        sheet.set_visible(true, Some(CARD), ms(836)).unwrap();
        assert_eq!(sheet.phase(), Phase::Opening);
        assert_eq!(sheet.tick(ms(1256)), Some(TransitionEvent::Opened));
    }
}
