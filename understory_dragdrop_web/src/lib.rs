// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dragdrop_web --heading-base-level=0

//! Browser bindings for Understory drag and drop.
//!
//! This crate connects [`understory_dragdrop`] to the DOM through `web_sys`
//! when targeting `wasm32`:
//!
//! - `DragSource` binds a `DragSession` to an element's `mousedown` and, while
//!   a press is in progress, to document-level capturing `mousemove`/`mouseup`
//!   listeners.
//! - `WebDragHost` clones the source element into a fixed-position ghost that
//!   follows the pointer.
//! - `DomNode` gives drop handlers an element's client bounding rectangle.
//! - `DocumentCursorSink` applies cursor overrides to `document.body` and marks
//!   the root element with [`understory_cursor::OVERRIDE_CURSOR_CLASS`].
//! - `ElementStyle` reads computed style for [`understory_dom_metrics`].
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn bind(
//!     source: web_sys::Element,
//!     bin: web_sys::Element,
//! ) -> Result<understory_dragdrop_web::DragSource<()>, wasm_bindgen::JsValue> {
//!     use understory_dragdrop::{DropAction, DropRegistry};
//!     use understory_dragdrop_web::{DocumentCursorSink, DomNode, DragSource, WebDropHandler};
//!
//!     let document = source.owner_document().ok_or("detached element")?;
//!     let cursors = understory_cursor::CursorOverrides::new(DocumentCursorSink::new(document));
//!     let registry = DropRegistry::shared();
//!
//!     let mut handler = WebDropHandler::new(DomNode(bin), ());
//!     handler.set_on_drag_enter(|_, _, data| data.set_drop_action(DropAction::Move));
//!     handler.set_on_drop(|_, _, _| {});
//!     registry.borrow_mut().register(handler);
//!
//!     let source = DragSource::attach(source, (), registry, cursors)?;
//!     source
//!         .session()
//!         .borrow_mut()
//!         .set_on_drag_start(|_, _, data| data.set_data("text/plain", "hello"));
//!     Ok(source)
//! }
//! ```
//!
//! On other targets only the target-independent helpers are compiled.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;

use kurbo::Point;
use understory_dragdrop::PRIMARY_BUTTON;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod source;

#[cfg(target_arch = "wasm32")]
pub use dom::{DocumentCursorSink, DomNode, ElementStyle, element_box_sizing, element_size_limits};
#[cfg(target_arch = "wasm32")]
pub use source::{DragSource, WebDragHost, WebDropHandler, WebDropRegistry, WebGhost};

/// Stacking order given to drag ghosts.
pub const GHOST_Z_INDEX: &str = "2147483647";

/// Class added to every drag ghost element.
pub const GHOST_CLASS: &str = "understory-drag-ghost";

/// Mouse listeners a drag source installs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseListenerKind {
    /// `mousedown` on the source element, bubbling phase.
    Press,
    /// Document-level `mousemove`, capture phase, while a press is in progress.
    Move,
    /// Document-level `mouseup`, capture phase, while a press is in progress.
    Release,
}

impl MouseListenerKind {
    /// DOM event type the listener is registered for.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Press => "mousedown",
            Self::Move => "mousemove",
            Self::Release => "mouseup",
        }
    }

    /// Whether the listener runs in the capture phase and stops propagation.
    pub fn is_captured(self) -> bool {
        !matches!(self, Self::Press)
    }

    /// Whether the browser's default action is cancelled for `button`.
    ///
    /// A primary press is cancelled so the browser starts neither a text
    /// selection nor a native drag, both of which would swallow the captured
    /// move and release events. Captured events are always cancelled.
    pub fn cancels_default(self, button: i16) -> bool {
        match self {
            Self::Press => button == PRIMARY_BUTTON,
            Self::Move | Self::Release => true,
        }
    }
}

/// CSS `left` and `top` values that place a ghost's corner at `position`.
pub fn ghost_offsets(position: Point) -> (String, String) {
    (format!("{}px", position.x), format!("{}px", position.y))
}
