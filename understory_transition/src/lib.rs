// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transition --heading-base-level=0

//! Understory Transition: headless origin-anchored overlay transitions.
//!
//! This crate models the motion of an overlay that grows out of the element
//! that triggered it (a card expanding into a sheet, a button expanding into a
//! popover) and shrinks back into it on dismissal. It focuses on:
//! - Pure geometry: [`interpolate_rect`] and [`interpolate_radius`] morph an
//!   origin rectangle into a target rectangle.
//! - A single progress scalar per overlay, driven by the [`AnimatedScalar`]
//!   interface and its stock [`Tween`] implementation.
//! - The [`Phase`] machine in [`TransitionController`], which guarantees one
//!   animation at a time and exactly one [`TransitionEvent::Closed`] per close.
//! - Drag-to-dismiss in [`DragDismiss`], kept as a separate offset that
//!   renderers add on top of the interpolated geometry.
//! - A [`Backdrop`] whose opacity is a direct function of progress.
//!
//! It does **not** render anything or read a clock. Callers are expected to:
//! - Measure the trigger element and pass its rectangle in viewport space.
//! - Call `tick` with a monotonic frame timestamp once per frame.
//! - Apply the resulting geometry, offset, and opacity in their renderer.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_transition::{Backdrop, TransitionController, TransitionEvent};
//!
//! let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
//! let card = Rect::new(20.0, 500.0, 180.0, 620.0);
//!
//! let mut sheet = TransitionController::default();
//! sheet.open(Some(card), Duration::ZERO).unwrap();
//!
//! // Halfway through the frame loop.
//! sheet.tick(Duration::from_millis(210));
//! let frame = sheet.geometry(viewport).unwrap();
//! assert!(frame.rect.width() > card.width());
//! let scrim = Backdrop::SHEET.opacity(frame.progress);
//! assert!(scrim > 0.0 && scrim < 0.5);
//!
//! assert_eq!(sheet.tick(Duration::from_millis(420)), Some(TransitionEvent::Opened));
//! assert_eq!(sheet.geometry(viewport).unwrap().rect, viewport);
//! ```
//!
//! ## Design notes
//!
//! - All timestamps are `core::time::Duration` values from a host clock.
//! - Reversing a transition mid-flight retargets from the current progress and
//!   scales the duration by the remaining distance.
//! - Invalid input geometry is rejected with [`TransitionError`] and renders
//!   nothing; it never panics in release builds.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to `kurbo`, `peniko`, and `tracing`.
//! - `libm`: `no_std` float support for `kurbo` and `peniko`.
//! - `serde`: `Serialize`/`Deserialize` for [`TransitionConfig`] and [`Easing`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backdrop;
mod config;
mod controller;
mod easing;
mod error;
mod geometry;
mod gesture;
mod phase;
mod tween;

pub use backdrop::Backdrop;
pub use config::TransitionConfig;
pub use controller::{TransitionController, TransitionGeometry};
pub use easing::Easing;
pub use error::TransitionError;
pub use geometry::{interpolate_radius, interpolate_rect, is_renderable};
pub use gesture::{DragDismiss, GesturePhase, ReleaseDecision, dismiss_decision};
pub use phase::{Phase, TransitionEvent};
pub use tween::{AnimatedScalar, ChangeListener, Tween};
