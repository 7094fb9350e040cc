// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: collision-free geometry for anchored popovers.
//!
//! Given the rectangle of the element a popover belongs to (the *anchor*), the
//! popover's content width, and the number of rows it will show, [`place`]
//! computes where the popover goes and where its arrow points:
//! - The height grows with the row count up to a fraction of the viewport
//!   ([`estimate_height`]).
//! - The popover opens upward, a small gap above the anchor.
//! - It is centered on the anchor and clamped into the viewport margins with a
//!   plain min/max clamp. It never flips to another side.
//! - The arrow offset keeps the indicator under the anchor's midpoint however
//!   far the popover itself was pushed sideways.
//!
//! The solver is a pure function. It keeps no state and should be re-run
//! whenever the anchor, the row count, or the viewport changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{PlacementConfig, place};
//!
//! let viewport = Size::new(400.0, 800.0);
//! // An avatar button hugging the left edge of the screen.
//! let anchor = Rect::new(4.0, 720.0, 44.0, 760.0);
//!
//! let config = PlacementConfig::default();
//! let placed = place(anchor, 300.0, 5, viewport, &config).unwrap();
//!
//! // The popover hugs the left margin...
//! assert_eq!(placed.x(), config.margin);
//! // ...while the arrow still points at the avatar.
//! let arrow_center = placed.x() + placed.arrow_offset_x + config.arrow_half_width;
//! assert_eq!(arrow_center, anchor.center().x);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod solve;

pub use config::PlacementConfig;
pub use solve::{PlacementError, PlacementResult, estimate_height, place};
