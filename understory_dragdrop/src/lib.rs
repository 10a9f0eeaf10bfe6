// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dragdrop --heading-base-level=0

//! Understory Drag and Drop: a pointer-driven drag and drop gesture engine.
//!
//! This crate turns raw press/move/release input into a drag lifecycle
//! (start, move, enter, over, leave, drop, end) with rectangle-based drop target
//! discovery and cursor feedback. It has no DOM dependency: hosts feed it
//! [`PointerEvent`]s and provide ghost and capture services through
//! [`DragHost`]. The `understory_dragdrop_web` crate binds it to `web_sys`.
//!
//! ## Pieces
//!
//! - [`DragSession`]: one per draggable node. Idle → Pending → Active state
//!   machine with threshold detection, ghost lifecycle and the
//!   `on_drag_start` / `on_drag` / `on_drag_end` callbacks.
//! - [`DropRegistry`]: one per document, shared between sessions as a
//!   [`SharedDropRegistry`]. Holds [`DropTarget`]s and runs the per-tick
//!   leave → enter → over (or drop) passes.
//! - [`DropHandler`]: a [`DropTarget`] built from optional callbacks bound to a
//!   node with a [`BoundingRect`].
//! - [`DragData`]: the payload (MIME type → value) and [`DropAction`] of the
//!   active gesture. Changing the action updates the document cursor through
//!   [`understory_cursor::CursorOverrides`].
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_cursor::CursorOverrides;
//! use understory_dragdrop::{
//!     DragData, DragHost, DragSession, DropAction, DropHandler, DropRegistry, PointerEvent,
//! };
//!
//! // A host without a screen: ghosts are just their last position.
//! struct Headless;
//!
//! impl DragHost for Headless {
//!     type Ghost = Cell<Point>;
//!     fn capture_pointer(&mut self) {}
//!     fn release_pointer(&mut self) {}
//!     fn create_ghost(&mut self, at: Point) -> Cell<Point> {
//!         Cell::new(at)
//!     }
//!     fn move_ghost(&mut self, ghost: &Cell<Point>, at: Point) {
//!         ghost.set(at);
//!     }
//!     fn remove_ghost(&mut self, _: Cell<Point>) {}
//! }
//!
//! let registry = DropRegistry::shared();
//! let cursors = CursorOverrides::new(|_: Option<&str>| {});
//!
//! let dropped = Rc::new(Cell::new(false));
//! let mut bin = DropHandler::new(Rect::new(100.0, 0.0, 200.0, 100.0), dropped.clone());
//! bin.set_on_drag_enter(|_, _, data: &mut DragData<Cell<Point>>| {
//!     data.set_drop_action(DropAction::Move);
//! });
//! bin.set_on_drop(|dropped: &mut Rc<Cell<bool>>, _, data: &mut DragData<Cell<Point>>| {
//!     dropped.set(data.get::<&str>("text/plain") == Some(&"file.txt"));
//! });
//! registry.borrow_mut().register(bin);
//!
//! let mut session = DragSession::new(Headless, (), registry.clone(), cursors.clone());
//! session.set_on_drag_start(|_, _, data| data.set_data("text/plain", "file.txt"));
//!
//! session.pointer_down(&PointerEvent::at(10.0, 10.0));
//! session.pointer_move(&PointerEvent::at(20.0, 10.0));
//! assert!(session.is_dragging());
//! session.pointer_move(&PointerEvent::at(150.0, 50.0));
//! assert_eq!(cursors.active_cursor().as_deref(), Some("move"));
//! session.pointer_up(&PointerEvent::at(150.0, 50.0));
//!
//! assert!(dropped.get());
//! assert!(!session.is_dragging());
//! assert_eq!(cursors.active_cursor(), None);
//! ```
//!
//! ## Threading
//!
//! Everything here runs on one UI thread. Sessions, the registry and cursor
//! slots are `Rc`-based and are not `Send`. Callbacks run to completion and
//! must not re-enter the registry that is dispatching to them.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: `no_std` float support for Kurbo.
//! - `serde`: `Serialize`/`Deserialize` for [`DragConfig`] and [`DropAction`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod data;
mod event;
mod handler;
mod registry;
mod session;

pub use action::{DropAction, UnknownDropAction};
pub use data::DragData;
pub use event::{PRIMARY_BUTTON, PointerEvent};
pub use handler::{DropCallback, DropHandler};
pub use registry::{BoundingRect, DropRegistry, DropTarget, DropTargetId, SharedDropRegistry};
pub use session::{DragCallback, DragConfig, DragHost, DragPhase, DragSession, PendingCallback};
