// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed-style readers: box sizing and size limits.

use alloc::string::String;
use kurbo::Size;

/// Read access to a node's computed style.
///
/// Mirrors `CSSStyleDeclaration.getPropertyValue`: properties are named in
/// kebab case and a missing property yields an empty string.
pub trait ComputedStyle {
    /// Return the computed value of `name`, or an empty string.
    fn property_value(&self, name: &str) -> String;
}

/// Parse the leading integer of a CSS value such as `"12px"` or `" -3.5em"`.
///
/// Leading whitespace and an optional sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit is found. Values outside the
/// `i32` range saturate.
pub fn parse_css_int(value: &str) -> Option<i32> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut out: i32 = 0;
    let mut any = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        any = true;
        let d = i32::from(b - b'0');
        out = out.saturating_mul(10);
        out = if negative {
            out.saturating_sub(d)
        } else {
            out.saturating_add(d)
        };
    }
    any.then_some(out)
}

fn read_or(style: &impl ComputedStyle, name: &str, fallback: f64) -> f64 {
    parse_css_int(&style.property_value(name)).map_or(fallback, f64::from)
}

/// Border and padding widths of a node, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxSizing {
    /// Top border width.
    pub border_top: f64,
    /// Left border width.
    pub border_left: f64,
    /// Right border width.
    pub border_right: f64,
    /// Bottom border width.
    pub border_bottom: f64,
    /// Top padding.
    pub padding_top: f64,
    /// Left padding.
    pub padding_left: f64,
    /// Right padding.
    pub padding_right: f64,
    /// Bottom padding.
    pub padding_bottom: f64,
}

impl BoxSizing {
    /// Left and right borders plus left and right padding.
    pub fn horizontal_sum(&self) -> f64 {
        self.border_left + self.border_right + self.padding_left + self.padding_right
    }

    /// Top and bottom borders plus top and bottom padding.
    pub fn vertical_sum(&self) -> f64 {
        self.border_top + self.border_bottom + self.padding_top + self.padding_bottom
    }
}

/// Read border and padding widths. Unparsable values read as `0`.
pub fn box_sizing(style: &impl ComputedStyle) -> BoxSizing {
    BoxSizing {
        border_top: read_or(style, "border-top-width", 0.0),
        border_left: read_or(style, "border-left-width", 0.0),
        border_right: read_or(style, "border-right-width", 0.0),
        border_bottom: read_or(style, "border-bottom-width", 0.0),
        padding_top: read_or(style, "padding-top", 0.0),
        padding_left: read_or(style, "padding-left", 0.0),
        padding_right: read_or(style, "padding-right", 0.0),
        padding_bottom: read_or(style, "padding-bottom", 0.0),
    }
}

/// Minimum and maximum dimensions of a node, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeLimits {
    /// Minimum width; `0` when unconstrained.
    pub min_width: f64,
    /// Minimum height; `0` when unconstrained.
    pub min_height: f64,
    /// Maximum width; infinite when unconstrained.
    pub max_width: f64,
    /// Maximum height; infinite when unconstrained.
    pub max_height: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
        }
    }
}

impl SizeLimits {
    /// Clamp `size` into these limits.
    ///
    /// When a minimum exceeds the matching maximum, the minimum wins, as in
    /// CSS.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width.min(self.max_width).max(self.min_width),
            size.height.min(self.max_height).max(self.min_height),
        )
    }
}

/// Read min/max dimensions.
///
/// Unparsable minimums read as `0`; unparsable maximums (including `none`)
/// read as infinity.
pub fn size_limits(style: &impl ComputedStyle) -> SizeLimits {
    SizeLimits {
        min_width: read_or(style, "min-width", 0.0),
        min_height: read_or(style, "min-height", 0.0),
        max_width: read_or(style, "max-width", f64::INFINITY),
        max_height: read_or(style, "max-height", f64::INFINITY),
    }
}
