// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_overlay --heading-base-level=0

//! Overstory Overlay: contextual sheets and anchored popovers.
//!
//! This crate composes the headless kernels from `understory_transition` and
//! `understory_placement` into the two overlay components a screen usually
//! needs:
//! - [`ContextualSheet`]: a panel that grows out of a tapped card to cover the
//!   viewport, with drag-to-dismiss and a dimming backdrop.
//! - [`AnchoredPopover`]: a card that grows out of a small anchor (an avatar,
//!   a button) into a placement that stays inside the viewport margins.
//!
//! Both are driven declaratively. Every frame the host passes its visibility
//! flag together with a fresh measurement of the trigger element, advances
//! time with `tick`, and draws the returned [`OverlayFrame`]. When a close
//! completes, however it was started, the component runs its close callback
//! exactly once so the host can reset its flag.
//!
//! [`OverlayHost`] keeps several overlays in z-order and forwards ticks,
//! viewport changes, and back-gesture dismissals to them.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Rect, Size};
//! use overstory_overlay::{ContextualSheet, OverlayHost};
//!
//! let viewport = Size::new(400.0, 800.0);
//! let card = Rect::new(16.0, 520.0, 196.0, 640.0);
//!
//! let mut host = OverlayHost::new(viewport);
//! let recipe = host.insert(ContextualSheet::new("pancakes", viewport));
//!
//! let sheet = host.sheet_mut(recipe).unwrap();
//! sheet.set_visible(true, Some(card), Duration::ZERO).unwrap();
//!
//! host.tick(Duration::from_millis(420));
//! let (_, frame) = host.frames().next().unwrap();
//! assert_eq!(frame.rect, Rect::new(0.0, 0.0, 400.0, 800.0));
//! assert_eq!(*frame.content, "pancakes");
//! assert!(frame.dismiss_enabled);
//! ```
//!
//! This crate requires `std`.

mod error;
mod frame;
mod host;
mod popover;
mod sheet;

pub use error::OverlayError;
pub use frame::{ArrowFrame, OverlayFrame, OverlayKind};
pub use host::{Overlay, OverlayHost, OverlayId};
pub use popover::AnchoredPopover;
pub use sheet::{CloseCallback, ContextualSheet};
