// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::Size;
use tracing::{debug, warn};
use understory_transition::TransitionEvent;

use crate::frame::OverlayFrame;
use crate::popover::AnchoredPopover;
use crate::sheet::ContextualSheet;

/// Stable handle to an overlay registered with an [`OverlayHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

impl OverlayId {
    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One overlay managed by a host.
#[derive(Debug)]
pub enum Overlay<C> {
    /// A full-viewport contextual sheet.
    Sheet(ContextualSheet<C>),
    /// An anchored popover.
    Popover(AnchoredPopover<C>),
}

impl<C> Overlay<C> {
    fn tick(&mut self, now: Duration) -> Option<TransitionEvent> {
        match self {
            Self::Sheet(sheet) => sheet.tick(now),
            Self::Popover(popover) => popover.tick(now),
        }
    }

    fn frame(&self) -> Option<OverlayFrame<'_, C>> {
        match self {
            Self::Sheet(sheet) => sheet.frame(),
            Self::Popover(popover) => popover.frame(),
        }
    }

    fn dismiss(&mut self, now: Duration) -> bool {
        match self {
            Self::Sheet(sheet) => sheet.dismiss(now),
            Self::Popover(popover) => popover.dismiss(now),
        }
    }

    fn can_dismiss(&self) -> bool {
        match self {
            Self::Sheet(sheet) => sheet.transition().can_dismiss(),
            Self::Popover(popover) => popover.transition().can_dismiss(),
        }
    }

    fn set_viewport(&mut self, viewport: Size) {
        let result = match self {
            Self::Sheet(sheet) => sheet.set_viewport(viewport),
            Self::Popover(popover) => popover.set_viewport(viewport),
        };
        // Each overlay keeps its previous geometry on error.
        if let Err(err) = result {
            warn!(%err, "overlay could not follow viewport change");
        }
    }
}

impl<C> From<ContextualSheet<C>> for Overlay<C> {
    fn from(sheet: ContextualSheet<C>) -> Self {
        Self::Sheet(sheet)
    }
}

impl<C> From<AnchoredPopover<C>> for Overlay<C> {
    fn from(popover: AnchoredPopover<C>) -> Self {
        Self::Popover(popover)
    }
}

/// Owns the overlays of a screen and composes them above the base content.
///
/// Overlays are kept in z-order, back to front. Registering an overlay does
/// not show it; callers drive each overlay's visibility flag through
/// [`sheet_mut`](Self::sheet_mut) or [`popover_mut`](Self::popover_mut), then
/// call [`tick`](Self::tick) and draw [`frames`](Self::frames) once per frame.
#[derive(Debug)]
pub struct OverlayHost<C> {
    layers: Vec<(OverlayId, Overlay<C>)>,
    next_id: u32,
    viewport: Size,
}

impl<C> OverlayHost<C> {
    /// Creates an empty host covering `viewport`.
    pub fn new(viewport: Size) -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
            viewport,
        }
    }

    /// Registers an overlay on top of the existing ones.
    pub fn insert(&mut self, overlay: impl Into<Overlay<C>>) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let mut overlay = overlay.into();
        overlay.set_viewport(self.viewport);
        debug!(id = id.0, layers = self.layers.len() + 1, "overlay registered");
        self.layers.push((id, overlay));
        id
    }

    /// Unregisters an overlay and returns it.
    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay<C>> {
        let index = self.index_of(id)?;
        Some(self.layers.remove(index).1)
    }

    /// Moves an overlay above all others. Returns `false` for unknown ids.
    pub fn bring_to_front(&mut self, id: OverlayId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let layer = self.layers.remove(index);
        self.layers.push(layer);
        true
    }

    /// Looks up an overlay.
    pub fn get(&self, id: OverlayId) -> Option<&Overlay<C>> {
        self.layers
            .iter()
            .find(|(layer, _)| *layer == id)
            .map(|(_, overlay)| overlay)
    }

    /// Looks up an overlay mutably.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay<C>> {
        self.layers
            .iter_mut()
            .find(|(layer, _)| *layer == id)
            .map(|(_, overlay)| overlay)
    }

    /// Looks up a sheet.
    pub fn sheet_mut(&mut self, id: OverlayId) -> Option<&mut ContextualSheet<C>> {
        match self.get_mut(id)? {
            Overlay::Sheet(sheet) => Some(sheet),
            Overlay::Popover(_) => None,
        }
    }

    /// Looks up a popover.
    pub fn popover_mut(&mut self, id: OverlayId) -> Option<&mut AnchoredPopover<C>> {
        match self.get_mut(id)? {
            Overlay::Popover(popover) => Some(popover),
            Overlay::Sheet(_) => None,
        }
    }

    /// Resizes the host and every overlay in it.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        for (_, overlay) in &mut self.layers {
            overlay.set_viewport(viewport);
        }
    }

    /// The host viewport.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Advances every overlay to `now` and returns the lifecycle events that
    /// fired, back to front.
    pub fn tick(&mut self, now: Duration) -> Vec<(OverlayId, TransitionEvent)> {
        self.layers
            .iter_mut()
            .filter_map(|(id, overlay)| overlay.tick(now).map(|event| (*id, event)))
            .collect()
    }

    /// Frames of the overlays that render this frame, back to front.
    pub fn frames(&self) -> impl Iterator<Item = (OverlayId, OverlayFrame<'_, C>)> + '_ {
        self.layers
            .iter()
            .filter_map(|(id, overlay)| overlay.frame().map(|frame| (*id, frame)))
    }

    /// Whether any visible backdrop swallows pointer input to the base
    /// content.
    pub fn blocks_pointer(&self) -> bool {
        self.frames().any(|(_, frame)| frame.blocks_pointer)
    }

    /// The front-most overlay that currently accepts a dismissal.
    pub fn topmost_dismissable(&self) -> Option<OverlayId> {
        self.layers
            .iter()
            .rev()
            .find(|(_, overlay)| overlay.can_dismiss())
            .map(|(id, _)| *id)
    }

    /// Dismisses the front-most open overlay, as a system back gesture or a
    /// scrim tap would.
    pub fn dismiss_topmost(&mut self, now: Duration) -> Option<OverlayId> {
        let id = self.topmost_dismissable()?;
        let overlay = self.get_mut(id)?;
        overlay.dismiss(now).then_some(id)
    }

    /// Number of registered overlays.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no overlays are registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn index_of(&self, id: OverlayId) -> Option<usize> {
        self.layers.iter().position(|(layer, _)| *layer == id)
    }
}
