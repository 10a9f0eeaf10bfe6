// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callback-based drop target bound to a node.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Rect;

use crate::registry::BoundingRect;
use crate::{DragData, DropTarget, PointerEvent};

/// Callback invoked on a drop target, with the handler's context passed explicitly.
pub type DropCallback<C, G> = Box<dyn FnMut(&mut C, &PointerEvent, &mut DragData<G>)>;

/// A [`DropTarget`] built from optional callbacks.
///
/// The handler is bound to a node `N` (for its bounding rectangle) and owns a
/// context value `C` that every callback receives as its first argument.
/// Unassigned callbacks are skipped; an unassigned `on_drop` makes the
/// registry force the drop action to [`DropAction::None`](crate::DropAction::None)
/// on release.
///
/// ```
/// use kurbo::Rect;
/// use understory_dragdrop::{DropAction, DropHandler, DropRegistry};
///
/// let mut handler = DropHandler::new(Rect::new(0.0, 0.0, 20.0, 20.0), 0_u32);
/// handler.set_on_drag_enter(|entered: &mut u32, _, data: &mut understory_dragdrop::DragData<()>| {
///     *entered += 1;
///     data.set_drop_action(DropAction::Copy);
/// });
///
/// let mut registry = DropRegistry::new();
/// registry.register(handler);
/// ```
pub struct DropHandler<N, C, G> {
    node: N,
    context: C,
    on_drag_enter: Option<DropCallback<C, G>>,
    on_drag_over: Option<DropCallback<C, G>>,
    on_drag_leave: Option<DropCallback<C, G>>,
    on_drop: Option<DropCallback<C, G>>,
}

impl<N: fmt::Debug, C: fmt::Debug, G> fmt::Debug for DropHandler<N, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropHandler")
            .field("node", &self.node)
            .field("context", &self.context)
            .field("on_drag_enter", &self.on_drag_enter.is_some())
            .field("on_drag_over", &self.on_drag_over.is_some())
            .field("on_drag_leave", &self.on_drag_leave.is_some())
            .field("on_drop", &self.on_drop.is_some())
            .finish()
    }
}

impl<N, C, G> DropHandler<N, C, G> {
    /// Create a handler for `node` with no callbacks assigned.
    pub fn new(node: N, context: C) -> Self {
        Self {
            node,
            context,
            on_drag_enter: None,
            on_drag_over: None,
            on_drag_leave: None,
            on_drop: None,
        }
    }

    /// The bound node.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// The context passed to callbacks.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context passed to callbacks.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Called when the pointer enters the node.
    pub fn set_on_drag_enter(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<G>) + 'static,
    ) {
        self.on_drag_enter = Some(Box::new(f));
    }

    /// Called on every move while the pointer is inside the node.
    pub fn set_on_drag_over(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<G>) + 'static,
    ) {
        self.on_drag_over = Some(Box::new(f));
    }

    /// Called when the pointer leaves the node.
    pub fn set_on_drag_leave(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<G>) + 'static,
    ) {
        self.on_drag_leave = Some(Box::new(f));
    }

    /// Called when the pointer is released inside the node.
    pub fn set_on_drop(&mut self, f: impl FnMut(&mut C, &PointerEvent, &mut DragData<G>) + 'static) {
        self.on_drop = Some(Box::new(f));
    }

    /// Unassign every callback.
    pub fn clear_callbacks(&mut self) {
        self.on_drag_enter = None;
        self.on_drag_over = None;
        self.on_drag_leave = None;
        self.on_drop = None;
    }
}

fn call<C, G>(
    slot: &mut Option<DropCallback<C, G>>,
    context: &mut C,
    event: &PointerEvent,
    data: &mut DragData<G>,
) -> bool {
    match slot {
        Some(f) => {
            f(context, event, data);
            true
        }
        None => false,
    }
}

impl<N: BoundingRect, C, G> DropTarget<G> for DropHandler<N, C, G> {
    fn bounding_rect(&self) -> Rect {
        self.node.bounding_rect()
    }

    fn drag_enter(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        call(&mut self.on_drag_enter, &mut self.context, event, data);
    }

    fn drag_over(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        call(&mut self.on_drag_over, &mut self.context, event, data);
    }

    fn drag_leave(&mut self, event: &PointerEvent, data: &mut DragData<G>) {
        call(&mut self.on_drag_leave, &mut self.context, event, data);
    }

    fn handle_drop(&mut self, event: &PointerEvent, data: &mut DragData<G>) -> bool {
        call(&mut self.on_drop, &mut self.context, event, data)
    }
}
