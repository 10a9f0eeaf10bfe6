// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom_metrics --heading-base-level=0

//! Understory DOM Metrics: stateless geometry probes for DOM-like hosts.
//!
//! - [`hit_test`]: half-open point-in-rectangle test used for drop target
//!   discovery. Left and top edges are inside, right and bottom edges are
//!   outside, so two abutting regions never both claim a boundary pixel.
//! - [`box_sizing`]: border and padding widths read from a computed style.
//! - [`size_limits`]: min/max width and height read from a computed style.
//!
//! Style access goes through the [`ComputedStyle`] trait so the readers work on
//! any host that can answer `getPropertyValue`-style queries. Nothing is cached:
//! each call re-reads the style.
//!
//! ```
//! use kurbo::Rect;
//! use understory_dom_metrics::hit_test;
//!
//! let r = Rect::new(0.0, 0.0, 100.0, 100.0);
//! assert!(hit_test(r, 0.0, 99.0));
//! assert!(!hit_test(r, 100.0, 0.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod style;

pub use style::{BoxSizing, ComputedStyle, SizeLimits, box_sizing, parse_css_int, size_limits};

use kurbo::{Point, Rect};

/// Test whether `(x, y)` lies inside `rect`.
///
/// The interval is half-open on both axes: `x` in `[x0, x1)` and `y` in
/// `[y0, y1)`.
#[inline]
pub fn hit_test(rect: Rect, x: f64, y: f64) -> bool {
    x >= rect.x0 && x < rect.x1 && y >= rect.y0 && y < rect.y1
}

/// [`hit_test`] for a [`Point`].
#[inline]
pub fn hit_test_point(rect: Rect, point: Point) -> bool {
    hit_test(rect, point.x, point.y)
}
