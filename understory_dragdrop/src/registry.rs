// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop target registry: per-tick enter/over/leave/drop dispatch.
//!
//! The registry owns one record per registered [`DropTarget`]. Each record
//! caches the target's bounding rectangle for the duration of a gesture and
//! tracks whether the pointer is currently inside it.
//!
//! ## Dispatch order
//!
//! [`DropRegistry::dispatch_drag`] runs two passes over the records, in
//! registration order:
//!
//! 1. Every entered record whose rectangle no longer contains the pointer is
//!    left: `entered` is cleared, the drop action is reset to
//!    [`DropAction::None`] and [`DropTarget::drag_leave`] runs.
//! 2. Every record whose rectangle contains the pointer gets
//!    [`DropTarget::drag_enter`] if it was not entered yet, and then
//!    [`DropTarget::drag_over`] on every tick.
//!
//! So moving from one target straight into an abutting one is always observed
//! as leave-then-enter. [`DropRegistry::dispatch_drop`] does the same leave
//! pass, then enters (if needed) and drops on every containing record.
//!
//! Overlapping targets all receive the dispatch; there is no notion of a
//! topmost target.
//!
//! ## Rect cache
//!
//! Rectangles are read lazily, once per gesture, and kept until
//! [`DropRegistry::invalidate`]. Targets are assumed not to move while a drag
//! is in flight.
//!
//! ## Re-entrancy
//!
//! Callbacks must not register or deregister targets on the registry that is
//! dispatching to them. Defer such changes until the dispatch returns.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_cursor::CursorOverrides;
//! use understory_dragdrop::{DragData, DropAction, DropRegistry, DropTarget, PointerEvent};
//!
//! struct Bin;
//!
//! impl DropTarget<()> for Bin {
//!     fn bounding_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 10.0, 10.0)
//!     }
//!     fn drag_enter(&mut self, _: &PointerEvent, data: &mut DragData<()>) {
//!         data.set_drop_action(DropAction::Move);
//!     }
//! }
//!
//! let mut registry = DropRegistry::new();
//! let id = registry.register(Bin);
//! let mut data = DragData::new((), Point::ZERO, CursorOverrides::new(|_: Option<&str>| {}));
//!
//! registry.dispatch_drag(&PointerEvent::at(5.0, 5.0), &mut data);
//! assert!(registry.is_entered(id));
//! assert_eq!(data.drop_action(), DropAction::Move);
//!
//! registry.dispatch_drag(&PointerEvent::at(10.0, 5.0), &mut data);
//! assert!(!registry.is_entered(id));
//! assert_eq!(data.drop_action(), DropAction::None);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Rect};
use understory_dom_metrics::hit_test_point;

use crate::{DragData, DropAction, PointerEvent};

/// Registry handle shared between the drag sessions of one document.
pub type SharedDropRegistry<G> = Rc<RefCell<DropRegistry<G>>>;

/// Something with a client-space bounding rectangle.
pub trait BoundingRect {
    /// The current bounding rectangle, in client pixels.
    fn bounding_rect(&self) -> Rect;
}

impl BoundingRect for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

impl BoundingRect for Cell<Rect> {
    fn bounding_rect(&self) -> Rect {
        self.get()
    }
}

impl<T: BoundingRect + ?Sized> BoundingRect for Rc<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }
}

/// A drop target: a region plus the notifications it wants during a drag.
///
/// All notification methods default to doing nothing. `G` is the host's ghost
/// handle type.
pub trait DropTarget<G> {
    /// The target's bounding rectangle, in client pixels.
    ///
    /// Read at most once per gesture.
    fn bounding_rect(&self) -> Rect;

    /// The pointer entered this target.
    fn drag_enter(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        let _ = (event, data);
    }

    /// The pointer moved while inside this target.
    fn drag_over(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        let _ = (event, data);
    }

    /// The pointer left this target.
    fn drag_leave(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        let _ = (event, data);
    }

    /// The pointer was released inside this target.
    ///
    /// Return `false` if this target has no drop handling; the registry then
    /// forces the drop action to [`DropAction::None`].
    fn handle_drop(&mut self, event: &PointerEvent, data: &mut DragData<G>) -> bool {
        let _ = (event, data);
        false
    }
}

/// Identifier of a registered drop target.
///
/// Identifiers are never reused within one registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DropTargetId(u64);

struct DropRecord<G> {
    id: DropTargetId,
    target: Box<dyn DropTarget<G>>,
    entered: bool,
    rect: Option<Rect>,
}

impl<G> DropRecord<G> {
    fn contains(&self, point: Point) -> bool {
        self.rect.is_some_and(|r| hit_test_point(r, point))
    }
}

/// Registry of drop targets for one document.
pub struct DropRegistry<G> {
    records: Vec<DropRecord<G>>,
    next_id: u64,
}

impl<G> fmt::Debug for DropRegistry<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.records.iter().map(|r| (r.id, r.entered, r.rect)))
            .finish()
    }
}

impl<G> Default for DropRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> DropRegistry<G> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 0,
        }
    }

    /// Create an empty registry behind a shareable handle.
    pub fn shared() -> SharedDropRegistry<G> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Register a drop target. It starts not entered and without a cached rect.
    pub fn register(&mut self, target: impl DropTarget<G> + 'static) -> DropTargetId {
        self.register_boxed(Box::new(target))
    }

    /// Register an already boxed drop target.
    pub fn register_boxed(&mut self, target: Box<dyn DropTarget<G>>) -> DropTargetId {
        self.next_id += 1;
        let id = DropTargetId(self.next_id);
        self.records.push(DropRecord {
            id,
            target,
            entered: false,
            rect: None,
        });
        tracing::debug!(?id, "drop target registered");
        id
    }

    /// Remove a drop target and hand it back. Unknown ids return `None`.
    pub fn deregister(&mut self, id: DropTargetId) -> Option<Box<dyn DropTarget<G>>> {
        let index = self.records.iter().position(|r| r.id == id)?;
        tracing::debug!(?id, "drop target deregistered");
        Some(self.records.remove(index).target)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: DropTargetId) -> bool {
        self.record(id).is_some()
    }

    /// Returns `true` if the pointer is currently inside target `id`.
    pub fn is_entered(&self, id: DropTargetId) -> bool {
        self.record(id).is_some_and(|r| r.entered)
    }

    /// The rect cached for `id` during the current gesture, if read yet.
    pub fn cached_rect(&self, id: DropTargetId) -> Option<Rect> {
        self.record(id)?.rect
    }

    /// Borrow a registered target.
    pub fn target(&self, id: DropTargetId) -> Option<&dyn DropTarget<G>> {
        self.record(id).map(|r| r.target.as_ref())
    }

    /// Mutably borrow a registered target.
    pub fn target_mut(&mut self, id: DropTargetId) -> Option<&mut (dyn DropTarget<G> + 'static)> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| r.target.as_mut())
    }

    /// Drop every cached rect and clear every `entered` flag.
    pub fn invalidate(&mut self) {
        for record in &mut self.records {
            record.rect = None;
            record.entered = false;
        }
    }

    /// Run the leave/enter/over passes for one pointer move.
    pub fn dispatch_drag(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        self.cache_rects();
        self.leave_pass(event, data);

        let point = event.position;
        for record in &mut self.records {
            if !record.contains(point) {
                continue;
            }
            if !record.entered {
                record.entered = true;
                tracing::trace!(id = ?record.id, "drag enter");
                record.target.drag_enter(event, data);
            }
            record.target.drag_over(event, data);
        }
    }

    /// Run the leave pass and deliver the drop for a pointer release.
    ///
    /// A containing target without drop handling forces the drop action to
    /// [`DropAction::None`].
    pub fn dispatch_drop(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        self.cache_rects();
        self.leave_pass(event, data);

        let point = event.position;
        for record in &mut self.records {
            if !record.contains(point) {
                continue;
            }
            if !record.entered {
                record.entered = true;
                tracing::trace!(id = ?record.id, "drag enter");
                record.target.drag_enter(event, data);
            }
            tracing::debug!(id = ?record.id, "drop");
            if !record.target.handle_drop(event, data) {
                data.set_drop_action(DropAction::None);
            }
        }
    }

    fn record(&self, id: DropTargetId) -> Option<&DropRecord<G>> {
        self.records.iter().find(|r| r.id == id)
    }

    fn cache_rects(&mut self) {
        for record in &mut self.records {
            if record.rect.is_none() {
                record.rect = Some(record.target.bounding_rect());
            }
        }
    }

    fn leave_pass(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        let point = event.position;
        for record in &mut self.records {
            if !record.entered || record.contains(point) {
                continue;
            }
            record.entered = false;
            data.set_drop_action(DropAction::None);
            tracing::trace!(id = ?record.id, "drag leave");
            record.target.drag_leave(event, data);
        }
    }
}
