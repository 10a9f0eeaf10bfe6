// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cursor --heading-base-level=0

//! Understory Cursor: document-wide cursor overrides.
//!
//! A UI often needs to force the pointer cursor for the whole document while an
//! interaction is in flight (for example, a `move` cursor during a drag), no
//! matter which element the pointer happens to be over. This crate models that
//! as a single override slot shared by everyone who asks for one:
//!
//! - [`CursorOverrides::override_cursor`] applies a cursor and returns a
//!   [`CursorOverride`] guard.
//! - Only the most recently created, not yet disposed guard is *active*.
//! - Disposing the active guard clears the override. Disposing any older guard
//!   does nothing, so it can never clobber a newer override.
//!
//! The side effect itself is delegated to a [`CursorSink`]. A browser host sets
//! `document.body.style.cursor` and adds [`OVERRIDE_CURSOR_CLASS`] to the root
//! element; tests can record the calls instead.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_cursor::CursorOverrides;
//!
//! let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
//! let log = seen.clone();
//! let cursors = CursorOverrides::new(move |cursor: Option<&str>| {
//!     log.borrow_mut().push(cursor.map(String::from));
//! });
//!
//! let mut a = cursors.override_cursor("move");
//! let mut b = cursors.override_cursor("copy");
//! assert_eq!(cursors.active_cursor().as_deref(), Some("copy"));
//!
//! // `a` is no longer the newest override: disposing it changes nothing.
//! a.dispose();
//! assert_eq!(cursors.active_cursor().as_deref(), Some("copy"));
//!
//! b.dispose();
//! assert_eq!(cursors.active_cursor(), None);
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![Some("move".into()), Some("copy".into()), None]
//! );
//! ```
//!
//! ## Threading
//!
//! Overrides are meant for a single UI thread. [`CursorOverrides`] is a cheap
//! `Rc` handle and is neither `Send` nor `Sync`; hosts that dispatch from
//! several threads must funnel cursor requests through one owner.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

/// Class added to the document root element while an override is active.
pub const OVERRIDE_CURSOR_CLASS: &str = "understory-mod-override-cursor";

/// Host side effect for cursor overrides.
///
/// `Some(cursor)` must set the document-wide cursor and mark the root element
/// with [`OVERRIDE_CURSOR_CLASS`]; `None` must clear both.
///
/// The slot's state is already updated when the sink runs, so a sink may read
/// it through [`CursorOverrides::active_cursor`]. A sink must not create or
/// dispose overrides itself; such nested updates change the slot but are not
/// forwarded to the sink.
pub trait CursorSink {
    /// Apply (or clear, with `None`) the document-wide cursor.
    fn set_cursor(&mut self, cursor: Option<&str>);
}

impl<F: FnMut(Option<&str>)> CursorSink for F {
    fn set_cursor(&mut self, cursor: Option<&str>) {
        self(cursor);
    }
}

struct State {
    /// Last minted token; tokens start at 1.
    current: u64,
    active: Option<String>,
}

struct Slot {
    state: RefCell<State>,
    sink: RefCell<Box<dyn CursorSink>>,
}

impl Slot {
    fn apply(&self, cursor: Option<&str>) {
        match self.sink.try_borrow_mut() {
            Ok(mut sink) => sink.set_cursor(cursor),
            Err(_) => tracing::warn!(?cursor, "cursor sink re-entered; update not applied"),
        }
    }
}

/// Shared owner of the document cursor override slot.
///
/// Clones share the same slot. Create one per document and hand clones to
/// whatever needs to override the cursor.
#[derive(Clone)]
pub struct CursorOverrides {
    slot: Rc<Slot>,
}

impl fmt::Debug for CursorOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.state.borrow();
        f.debug_struct("CursorOverrides")
            .field("current", &slot.current)
            .field("active", &slot.active)
            .finish_non_exhaustive()
    }
}

impl CursorOverrides {
    /// Create an override slot that applies cursors through `sink`.
    pub fn new(sink: impl CursorSink + 'static) -> Self {
        Self {
            slot: Rc::new(Slot {
                state: RefCell::new(State {
                    current: 0,
                    active: None,
                }),
                sink: RefCell::new(Box::new(sink)),
            }),
        }
    }

    /// Override the document cursor until the returned guard is disposed.
    ///
    /// The new override supersedes any existing one.
    pub fn override_cursor(&self, cursor: &str) -> CursorOverride {
        let token = {
            let mut state = self.slot.state.borrow_mut();
            state.current += 1;
            state.active = Some(String::from(cursor));
            state.current
        };
        self.slot.apply(Some(cursor));
        tracing::trace!(token, cursor, "cursor override applied");
        CursorOverride {
            slot: Some(self.slot.clone()),
            token,
            cursor: String::from(cursor),
        }
    }

    /// The cursor currently forced on the document, if any.
    pub fn active_cursor(&self) -> Option<String> {
        self.slot.state.borrow().active.clone()
    }

    /// Returns `true` while some override is active.
    pub fn is_overridden(&self) -> bool {
        self.slot.state.borrow().active.is_some()
    }
}

/// Guard for one cursor override.
///
/// Disposing (or dropping) the guard clears the document cursor only if this
/// is still the newest override.
pub struct CursorOverride {
    slot: Option<Rc<Slot>>,
    token: u64,
    cursor: String,
}

impl fmt::Debug for CursorOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorOverride")
            .field("token", &self.token)
            .field("cursor", &self.cursor)
            .field("disposed", &self.slot.is_none())
            .finish()
    }
}

impl CursorOverride {
    /// The cursor name this override applied.
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Returns `true` if this override is the one currently in effect.
    pub fn is_active(&self) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|slot| slot.state.borrow().current == self.token)
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.slot.is_none()
    }

    /// Release this override. Idempotent.
    pub fn dispose(&mut self) {
        let Some(slot) = self.slot.take() else {
            return;
        };
        {
            let mut state = slot.state.borrow_mut();
            if state.current != self.token {
                return;
            }
            state.active = None;
        }
        slot.apply(None);
        tracing::trace!(token = self.token, "cursor override cleared");
    }
}

impl Drop for CursorOverride {
    fn drop(&mut self) {
        self.dispose();
    }
}
