// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed drag host and the `mousedown` binding that drives a session.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use kurbo::Point;
use understory_cursor::CursorOverrides;
use understory_dragdrop::{DragHost, DragSession, DropHandler, PointerEvent, SharedDropRegistry};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::{DomNode, GHOST_CLASS, GHOST_Z_INDEX, MouseListenerKind, ghost_offsets};

/// Ghost handle used by [`WebDragHost`]; `None` if the clone could not be made.
pub type WebGhost = Option<HtmlElement>;

/// Drop registry shared by the browser drag sources of one document.
pub type WebDropRegistry = SharedDropRegistry<WebGhost>;

/// Drop handler bound to a DOM element.
pub type WebDropHandler<C> = DropHandler<DomNode, C, WebGhost>;

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

type SharedSession<C> = Rc<RefCell<DragSession<WebDragHost, C>>>;

struct CaptureListeners {
    on_move: MouseListener,
    on_up: MouseListener,
}

/// [`DragHost`] for one source element in a browser document.
///
/// Ghosts are deep clones of the source element with `position: fixed` and
/// `pointer-events: none`, appended to `document.body`. Pointer capture adds
/// the listeners given to [`set_capture_listeners`](Self::set_capture_listeners)
/// to the document in the capture phase.
pub struct WebDragHost {
    source: Element,
    document: Document,
    listeners: Option<CaptureListeners>,
    capturing: bool,
}

impl fmt::Debug for WebDragHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDragHost")
            .field("capturing", &self.capturing)
            .finish_non_exhaustive()
    }
}

impl WebDragHost {
    /// Create a host that ghosts `source` inside `document`.
    pub fn new(source: Element, document: Document) -> Self {
        Self {
            source,
            document,
            listeners: None,
            capturing: false,
        }
    }

    /// The element ghosts are cloned from.
    pub fn source(&self) -> &Element {
        &self.source
    }

    /// Install the document-level move and release listeners.
    ///
    /// The closures stay owned by the host for its whole life; capture only
    /// adds and removes them.
    pub fn set_capture_listeners(&mut self, on_move: MouseListener, on_up: MouseListener) {
        if self.capturing {
            self.release_pointer();
        }
        self.listeners = Some(CaptureListeners { on_move, on_up });
    }

    fn try_create_ghost(&self, position: Point) -> Result<HtmlElement, JsValue> {
        let ghost: HtmlElement = self.source.clone_node_with_deep(true)?.dyn_into()?;
        let style = ghost.style();
        let (left, top) = ghost_offsets(position);
        style.set_property("position", "fixed")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("margin", "0")?;
        style.set_property("z-index", GHOST_Z_INDEX)?;
        style.set_property("left", &left)?;
        style.set_property("top", &top)?;
        ghost.class_list().add_1(GHOST_CLASS)?;
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&ghost)?;
        Ok(ghost)
    }
}

impl DragHost for WebDragHost {
    type Ghost = WebGhost;

    fn capture_pointer(&mut self) {
        let Some(listeners) = &self.listeners else {
            return;
        };
        if self.capturing {
            return;
        }
        let result = self
            .document
            .add_event_listener_with_callback_and_bool(
                MouseListenerKind::Move.event_type(),
                listeners.on_move.as_ref().unchecked_ref(),
                true,
            )
            .and_then(|()| {
                self.document.add_event_listener_with_callback_and_bool(
                    MouseListenerKind::Release.event_type(),
                    listeners.on_up.as_ref().unchecked_ref(),
                    true,
                )
            });
        match result {
            Ok(()) => self.capturing = true,
            Err(err) => tracing::warn!(?err, "failed to capture pointer"),
        }
    }

    fn release_pointer(&mut self) {
        let Some(listeners) = &self.listeners else {
            return;
        };
        if !self.capturing {
            return;
        }
        self.capturing = false;
        let result = self
            .document
            .remove_event_listener_with_callback_and_bool(
                MouseListenerKind::Move.event_type(),
                listeners.on_move.as_ref().unchecked_ref(),
                true,
            )
            .and_then(|()| {
                self.document.remove_event_listener_with_callback_and_bool(
                    MouseListenerKind::Release.event_type(),
                    listeners.on_up.as_ref().unchecked_ref(),
                    true,
                )
            });
        if let Err(err) = result {
            tracing::warn!(?err, "failed to release pointer");
        }
    }

    fn create_ghost(&mut self, position: Point) -> WebGhost {
        self.try_create_ghost(position)
            .map_err(|err| tracing::warn!(?err, "failed to create drag ghost"))
            .ok()
    }

    fn move_ghost(&mut self, ghost: &WebGhost, position: Point) {
        let Some(ghost) = ghost else {
            return;
        };
        let (left, top) = ghost_offsets(position);
        let style = ghost.style();
        if let Err(err) = style
            .set_property("left", &left)
            .and_then(|()| style.set_property("top", &top))
        {
            tracing::warn!(?err, "failed to move drag ghost");
        }
    }

    fn remove_ghost(&mut self, ghost: WebGhost) {
        if let Some(ghost) = ghost {
            ghost.remove();
        }
    }
}

fn pointer_event(event: &MouseEvent) -> PointerEvent {
    PointerEvent::new(
        Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        event.button(),
    )
}

fn listener<C: 'static>(
    session: Weak<RefCell<DragSession<WebDragHost, C>>>,
    kind: MouseListenerKind,
    mut f: impl FnMut(&mut DragSession<WebDragHost, C>, &PointerEvent) + 'static,
) -> MouseListener {
    Closure::new(move |event: MouseEvent| {
        let Some(shared) = session.upgrade() else {
            return;
        };
        let Ok(mut session) = shared.try_borrow_mut() else {
            tracing::warn!(kind = %event.type_(), "drag session busy; event dropped");
            return;
        };
        if kind.cancels_default(event.button()) {
            event.prevent_default();
        }
        if kind.is_captured() {
            event.stop_propagation();
        }
        f(&mut session, &pointer_event(&event));
    })
}

/// A draggable element.
///
/// Owns a [`DragSession`] fed by the element's `mousedown` and, while a press
/// is in progress, by capturing document-level `mousemove` and `mouseup`
/// listeners that stop those events from reaching anything else. Primary
/// presses and captured events have their default action cancelled, so the
/// browser starts no text selection or native drag of its own.
///
/// Dropping the source disposes it. Do not dispose or drop a source from
/// inside one of its own session callbacks.
pub struct DragSource<C: 'static> {
    node: Element,
    session: SharedSession<C>,
    on_mouse_down: Option<MouseListener>,
}

impl<C: 'static> fmt::Debug for DragSource<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSource")
            .field("attached", &self.on_mouse_down.is_some())
            .finish_non_exhaustive()
    }
}

impl<C: 'static> DragSource<C> {
    /// Make `node` draggable.
    ///
    /// Fails if `node` is not in a document or the `mousedown` listener cannot
    /// be added.
    pub fn attach(
        node: Element,
        context: C,
        registry: WebDropRegistry,
        cursors: CursorOverrides,
    ) -> Result<Self, JsValue> {
        let document = node
            .owner_document()
            .ok_or_else(|| JsValue::from_str("element is not in a document"))?;
        let host = WebDragHost::new(node.clone(), document);
        let session = Rc::new(RefCell::new(DragSession::new(
            host, context, registry, cursors,
        )));

        let on_move = listener(Rc::downgrade(&session), MouseListenerKind::Move, |s, e| {
            s.pointer_move(e);
        });
        let on_up = listener(Rc::downgrade(&session), MouseListenerKind::Release, |s, e| {
            s.pointer_up(e);
        });
        session
            .borrow_mut()
            .host_mut()
            .set_capture_listeners(on_move, on_up);

        let on_mouse_down = listener(Rc::downgrade(&session), MouseListenerKind::Press, |s, e| {
            s.pointer_down(e);
        });
        node.add_event_listener_with_callback_and_bool(
            MouseListenerKind::Press.event_type(),
            on_mouse_down.as_ref().unchecked_ref(),
            false,
        )?;
        tracing::debug!("drag source attached");

        Ok(Self {
            node,
            session,
            on_mouse_down: Some(on_mouse_down),
        })
    }

    /// The draggable element.
    pub fn node(&self) -> &Element {
        &self.node
    }

    /// The session, for configuration and callbacks.
    pub fn session(&self) -> &SharedSession<C> {
        &self.session
    }

    /// Remove every listener and dispose the session. Idempotent.
    pub fn dispose(&mut self) {
        let Some(on_mouse_down) = self.on_mouse_down.take() else {
            return;
        };
        if let Err(err) = self.node.remove_event_listener_with_callback_and_bool(
            MouseListenerKind::Press.event_type(),
            on_mouse_down.as_ref().unchecked_ref(),
            false,
        ) {
            tracing::warn!(?err, "failed to remove mousedown listener");
        }
        match self.session.try_borrow_mut() {
            Ok(mut session) => session.dispose(),
            Err(_) => tracing::warn!("drag session busy; dispose deferred to drop"),
        }
    }
}

impl<C: 'static> Drop for DragSource<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}
