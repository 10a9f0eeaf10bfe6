// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input fed into drag sessions by the host.

use kurbo::Point;

/// Button index of the primary (usually left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A press, move, or release notification in client coordinates.
///
/// Hosts translate their native mouse events into this shape and call
/// [`DragSession::pointer_down`](crate::DragSession::pointer_down),
/// [`pointer_move`](crate::DragSession::pointer_move) or
/// [`pointer_up`](crate::DragSession::pointer_up).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client pixels.
    pub position: Point,
    /// Button index, as in `MouseEvent.button`.
    pub button: i16,
}

impl PointerEvent {
    /// Create an event for `button` at `position`.
    pub const fn new(position: Point, button: i16) -> Self {
        Self { position, button }
    }

    /// Create a primary-button event at `(x, y)`.
    pub const fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PRIMARY_BUTTON)
    }

    /// Returns `true` if this event concerns the primary button.
    pub const fn is_primary(&self) -> bool {
        self.button == PRIMARY_BUTTON
    }
}
