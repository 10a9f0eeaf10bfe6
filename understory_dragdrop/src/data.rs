// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The payload and feedback state carried through one drag gesture.
//!
//! A [`DragData`] is created by the [`DragSession`](crate::DragSession) when a
//! gesture becomes active and is dropped when it ends. Drag sources fill the
//! MIME payload (usually from `on_drag_start`); drop targets read it and set the
//! [`DropAction`], which drives the document cursor.
//!
//! ```
//! use kurbo::Point;
//! use understory_cursor::CursorOverrides;
//! use understory_dragdrop::{DragData, DropAction};
//!
//! let cursors = CursorOverrides::new(|_: Option<&str>| {});
//! let mut data = DragData::new((), Point::new(4.0, 2.0), cursors.clone());
//!
//! data.set_data("text/plain", String::from("hello"));
//! assert_eq!(data.get::<String>("text/plain").map(String::as_str), Some("hello"));
//!
//! data.set_drop_action(DropAction::Copy);
//! assert_eq!(cursors.active_cursor().as_deref(), Some("copy"));
//!
//! // Unknown names are ignored.
//! assert!(!data.set_drop_action_name("foo"));
//! assert_eq!(data.drop_action(), DropAction::Copy);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use kurbo::Point;
use understory_cursor::{CursorOverride, CursorOverrides};

use crate::DropAction;

/// Drag payload and feedback state for one active gesture.
///
/// `G` is the host's ghost handle (see [`DragHost::Ghost`](crate::DragHost::Ghost)).
pub struct DragData<G> {
    ghost: G,
    start: Point,
    drop_action: DropAction,
    cursors: CursorOverrides,
    cursor: Option<CursorOverride>,
    payload: Vec<(String, Box<dyn Any>)>,
}

impl<G: fmt::Debug> fmt::Debug for DragData<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragData")
            .field("ghost", &self.ghost)
            .field("start", &self.start)
            .field("drop_action", &self.drop_action)
            .field("cursor", &self.cursor)
            .field("types", &self.types().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<G> DragData<G> {
    /// Create drag data for a gesture that started at `start`.
    ///
    /// The drop action starts as [`DropAction::None`] without a cursor
    /// override; `cursors` is used for every later action change.
    pub fn new(ghost: G, start: Point, cursors: CursorOverrides) -> Self {
        Self {
            ghost,
            start,
            drop_action: DropAction::None,
            cursors,
            cursor: None,
            payload: Vec::new(),
        }
    }

    /// The ghost that follows the pointer.
    pub fn ghost(&self) -> &G {
        &self.ghost
    }

    /// Pointer position at the start of the gesture.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The current drop action.
    pub fn drop_action(&self) -> DropAction {
        self.drop_action
    }

    /// Set the drop action and update the cursor override.
    ///
    /// Setting the current value again does nothing; in particular no new
    /// override is created.
    pub fn set_drop_action(&mut self, action: DropAction) {
        if action == self.drop_action {
            return;
        }
        let next = self.cursors.override_cursor(action.cursor());
        if let Some(mut previous) = self.cursor.replace(next) {
            previous.dispose();
        }
        tracing::trace!(from = %self.drop_action, to = %action, "drop action changed");
        self.drop_action = action;
    }

    /// Set the drop action from its name (`"none"`, `"copy"`, `"link"`, `"move"`).
    ///
    /// Unknown names are rejected silently: the action and cursor are left as
    /// they were and `false` is returned.
    pub fn set_drop_action_name(&mut self, name: &str) -> bool {
        match DropAction::parse(name) {
            Some(action) => {
                self.set_drop_action(action);
                true
            }
            None => false,
        }
    }

    /// Store `value` under `mime`.
    ///
    /// Replacing an existing entry keeps its original position in [`types`](Self::types).
    pub fn set_data(&mut self, mime: impl Into<String>, value: impl Any) {
        let mime = mime.into();
        let value: Box<dyn Any> = Box::new(value);
        match self.payload.iter_mut().find(|(k, _)| *k == mime) {
            Some(entry) => entry.1 = value,
            None => self.payload.push((mime, value)),
        }
    }

    /// The value stored under `mime`, if any.
    pub fn get_data(&self, mime: &str) -> Option<&dyn Any> {
        self.payload
            .iter()
            .find(|(k, _)| k == mime)
            .map(|(_, v)| v.as_ref())
    }

    /// The value stored under `mime`, if present and of type `T`.
    pub fn get<T: Any>(&self, mime: &str) -> Option<&T> {
        self.get_data(mime)?.downcast_ref()
    }

    /// Returns `true` if a value is stored under `mime`.
    pub fn has_data(&self, mime: &str) -> bool {
        self.payload.iter().any(|(k, _)| k == mime)
    }

    /// Remove the value stored under `mime`. Returns `true` if one was removed.
    pub fn clear_data(&mut self, mime: &str) -> bool {
        let before = self.payload.len();
        self.payload.retain(|(k, _)| k != mime);
        self.payload.len() != before
    }

    /// Remove every payload entry.
    pub fn clear(&mut self) {
        self.payload.clear();
    }

    /// MIME types currently stored, in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.payload.iter().map(|(k, _)| k.as_str())
    }

    /// Release the cursor override and hand back the ghost for removal.
    pub(crate) fn finish(mut self) -> G {
        if let Some(mut cursor) = self.cursor.take() {
            cursor.dispose();
        }
        self.ghost
    }
}
