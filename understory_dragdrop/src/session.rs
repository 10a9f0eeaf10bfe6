// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: turn press/move/release input into a drag lifecycle.
//!
//! ## States
//!
//! ```text
//! Idle --primary press--> Pending --threshold or start()--> Active --primary release--> Idle
//!   \___________________________ dispose() from any state ____________________________/--> Disposed
//! ```
//!
//! - **Idle**: nothing pressed. A primary-button press records the press point,
//!   asks the host to capture document-level move/release input and enters
//!   Pending. Other buttons are ignored.
//! - **Pending**: with `autostart`, a move whose offset from the press point
//!   reaches `drag_threshold` on either axis starts the drag. Without
//!   `autostart`, only [`DragSession::start`] (or an `on_pending_move` callback
//!   returning `true`) does.
//! - **Active**: every move repositions the ghost, runs the registry drag pass
//!   and then `on_drag`. A primary release runs the registry drop pass, then
//!   `on_drag_end`, then tears the gesture down.
//!
//! Starting a drag creates the [`DragData`] and ghost, invalidates the
//! registry's cached geometry and calls `on_drag_start`. The move that starts a
//! drag is also delivered as its first active move.
//!
//! ## Usage
//!
//! 1) Implement [`DragHost`] for your environment (ghost creation and pointer
//!    capture).
//! 2) Create a [`DragSession`] with the shared registry and cursor slot.
//! 3) Forward press/move/release input to [`DragSession::pointer_down`],
//!    [`DragSession::pointer_move`] and [`DragSession::pointer_up`].

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use kurbo::{Point, Vec2};
use understory_cursor::CursorOverrides;

use crate::{DragData, PointerEvent, SharedDropRegistry};

/// Environment services a drag session needs.
pub trait DragHost {
    /// Handle to the ghost that follows the pointer.
    type Ghost;

    /// Start delivering document-level move and release input to the session,
    /// ahead of any other listener.
    fn capture_pointer(&mut self);

    /// Stop the delivery started by [`capture_pointer`](Self::capture_pointer).
    fn release_pointer(&mut self);

    /// Create the ghost and attach it at `position`.
    fn create_ghost(&mut self, position: Point) -> Self::Ghost;

    /// Move the ghost to `position`.
    fn move_ghost(&mut self, ghost: &Self::Ghost, position: Point);

    /// Detach and discard the ghost.
    fn remove_ghost(&mut self, ghost: Self::Ghost);
}

/// Drag start policy.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Start automatically once the pointer travels `drag_threshold`.
    pub autostart: bool,
    /// Distance in pixels, measured per axis, before a press becomes a drag.
    pub drag_threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            drag_threshold: 5.0,
        }
    }
}

impl DragConfig {
    /// Returns `true` if `offset` reaches the threshold on either axis.
    pub fn exceeds_threshold(&self, offset: Vec2) -> bool {
        let t = self.drag_threshold;
        offset.x >= t || -offset.x >= t || offset.y >= t || -offset.y >= t
    }
}

/// Observable state of a [`DragSession`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No press in progress.
    Idle,
    /// Pressed, not yet dragging.
    Pending,
    /// Dragging.
    Active,
    /// Disposed; all input is ignored.
    Disposed,
}

/// Drag source callback, with the session context passed explicitly.
pub type DragCallback<C, G> = Box<dyn FnMut(&mut C, &PointerEvent, &mut DragData<G>)>;

/// Called on pending moves when `autostart` is off; return `true` to start.
pub type PendingCallback<C> = Box<dyn FnMut(&mut C, &PointerEvent) -> bool>;

enum State<G> {
    Idle,
    Pending { press: Point },
    Active { data: DragData<G> },
    Disposed,
}

/// Per-source drag state machine.
///
/// One session is bound to one draggable node. It owns the host `H`, the
/// context `C` handed to callbacks, and at most one live [`DragData`].
pub struct DragSession<H: DragHost, C> {
    host: H,
    context: C,
    registry: SharedDropRegistry<H::Ghost>,
    cursors: CursorOverrides,
    config: DragConfig,
    state: State<H::Ghost>,
    on_drag_start: Option<DragCallback<C, H::Ghost>>,
    on_drag: Option<DragCallback<C, H::Ghost>>,
    on_drag_end: Option<DragCallback<C, H::Ghost>>,
    on_pending_move: Option<PendingCallback<C>>,
}

impl<H: DragHost, C> fmt::Debug for DragSession<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("phase", &self.phase())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: DragHost, C> DragSession<H, C> {
    /// Create an idle session with the default [`DragConfig`].
    pub fn new(
        host: H,
        context: C,
        registry: SharedDropRegistry<H::Ghost>,
        cursors: CursorOverrides,
    ) -> Self {
        Self {
            host,
            context,
            registry,
            cursors,
            config: DragConfig::default(),
            state: State::Idle,
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
            on_pending_move: None,
        }
    }

    /// Replace the configuration (builder style).
    pub fn with_config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> DragConfig {
        self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    /// Whether drags start automatically at the threshold.
    pub fn autostart(&self) -> bool {
        self.config.autostart
    }

    /// Enable or disable automatic start.
    pub fn set_autostart(&mut self, autostart: bool) {
        self.config.autostart = autostart;
    }

    /// Per-axis distance before a press becomes a drag.
    pub fn drag_threshold(&self) -> f64 {
        self.config.drag_threshold
    }

    /// Set the per-axis start distance.
    pub fn set_drag_threshold(&mut self, threshold: f64) {
        self.config.drag_threshold = threshold;
    }

    /// Called once when a drag starts; fill the payload here.
    pub fn set_on_drag_start(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<H::Ghost>) + 'static,
    ) {
        if !self.is_disposed() {
            self.on_drag_start = Some(Box::new(f));
        }
    }

    /// Called after every active move, once drop targets have been notified.
    pub fn set_on_drag(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<H::Ghost>) + 'static,
    ) {
        if !self.is_disposed() {
            self.on_drag = Some(Box::new(f));
        }
    }

    /// Called on release, after the drop pass and before teardown.
    pub fn set_on_drag_end(
        &mut self,
        f: impl FnMut(&mut C, &PointerEvent, &mut DragData<H::Ghost>) + 'static,
    ) {
        if !self.is_disposed() {
            self.on_drag_end = Some(Box::new(f));
        }
    }

    /// Called on pending moves while `autostart` is off.
    ///
    /// Returning `true` starts the drag at that move.
    pub fn set_on_pending_move(&mut self, f: impl FnMut(&mut C, &PointerEvent) -> bool + 'static) {
        if !self.is_disposed() {
            self.on_pending_move = Some(Box::new(f));
        }
    }

    /// The current phase.
    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Pending { .. } => DragPhase::Pending,
            State::Active { .. } => DragPhase::Active,
            State::Disposed => DragPhase::Disposed,
        }
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        matches!(self.state, State::Disposed)
    }

    /// Data of the active drag, if any.
    pub fn drag_data(&self) -> Option<&DragData<H::Ghost>> {
        match &self.state {
            State::Active { data } => Some(data),
            _ => None,
        }
    }

    /// Mutable data of the active drag, if any.
    pub fn drag_data_mut(&mut self) -> Option<&mut DragData<H::Ghost>> {
        match &mut self.state {
            State::Active { data } => Some(data),
            _ => None,
        }
    }

    /// The context passed to callbacks.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context passed to callbacks.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle a press on the bound node.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if !event.is_primary() || !matches!(self.state, State::Idle) {
            return;
        }
        tracing::debug!(x = event.position.x, y = event.position.y, "drag press");
        self.state = State::Pending {
            press: event.position,
        };
        self.host.capture_pointer();
    }

    /// Handle a captured document-level move.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        match self.state {
            State::Pending { press } => {
                let start = if self.config.autostart {
                    self.config.exceeds_threshold(event.position - press)
                } else {
                    self.on_pending_move
                        .as_mut()
                        .is_some_and(|f| f(&mut self.context, event))
                };
                if start {
                    self.begin(event);
                    self.tick(event);
                }
            }
            State::Active { .. } => self.tick(event),
            State::Idle | State::Disposed => {}
        }
    }

    /// Handle a captured document-level release.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        if !event.is_primary() {
            return;
        }
        match mem::replace(&mut self.state, State::Idle) {
            State::Pending { .. } => {
                tracing::debug!("press released without drag");
                self.host.release_pointer();
            }
            State::Active { mut data } => {
                match self.registry.try_borrow_mut() {
                    Ok(mut registry) => registry.dispatch_drop(event, &mut data),
                    Err(_) => tracing::warn!("drop registry busy; drop pass skipped"),
                }
                if let Some(f) = self.on_drag_end.as_mut() {
                    f(&mut self.context, event, &mut data);
                }
                tracing::debug!(action = %data.drop_action(), "drag ended");
                self.teardown(data);
            }
            other => self.state = other,
        }
    }

    /// Start the drag now, at `event`'s position, ignoring the threshold.
    ///
    /// Only a pending session can start. Returns `true` if this call started
    /// a drag; calling it again while active is a no-op.
    pub fn start(&mut self, event: &PointerEvent) -> bool {
        if !matches!(self.state, State::Pending { .. }) {
            return false;
        }
        self.begin(event);
        self.tick(event);
        true
    }

    /// Abort any gesture and permanently disable the session. Idempotent.
    ///
    /// An in-flight drag removes its ghost and releases its cursor override
    /// without notifying drop targets or `on_drag_end`.
    pub fn dispose(&mut self) {
        match mem::replace(&mut self.state, State::Disposed) {
            State::Disposed => return,
            State::Idle => {}
            State::Pending { .. } => self.host.release_pointer(),
            State::Active { data } => self.teardown(data),
        }
        self.on_drag_start = None;
        self.on_drag = None;
        self.on_drag_end = None;
        self.on_pending_move = None;
        tracing::debug!("drag session disposed");
    }

    fn begin(&mut self, event: &PointerEvent) {
        let position = event.position;
        let ghost = self.host.create_ghost(position);
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.invalidate(),
            Err(_) => tracing::warn!("drop registry busy; geometry not invalidated"),
        }
        let mut data = DragData::new(ghost, position, self.cursors.clone());
        tracing::debug!(x = position.x, y = position.y, "drag started");
        if let Some(f) = self.on_drag_start.as_mut() {
            f(&mut self.context, event, &mut data);
        }
        self.state = State::Active { data };
    }

    fn tick(&mut self, event: &PointerEvent) {
        let State::Active { data } = &mut self.state else {
            return;
        };
        self.host.move_ghost(data.ghost(), event.position);
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.dispatch_drag(event, data),
            Err(_) => tracing::warn!("drop registry busy; drag pass skipped"),
        }
        if let Some(f) = self.on_drag.as_mut() {
            f(&mut self.context, event, data);
        }
    }

    fn teardown(&mut self, data: DragData<H::Ghost>) {
        let ghost = data.finish();
        self.host.remove_ghost(ghost);
        self.host.release_pointer();
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.invalidate();
        }
    }
}

impl<H: DragHost, C> Drop for DragSession<H, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}
