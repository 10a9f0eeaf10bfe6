// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fakes for drag session tests.

#![allow(dead_code, reason = "Not every test file uses every helper.")]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_cursor::CursorOverrides;
use understory_dragdrop::{DragHost, DragSession, DropRegistry, SharedDropRegistry};

/// Everything observable that happened during a test, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    Capture,
    Release,
    GhostCreated(u32, Point),
    GhostMoved(u32, Point),
    GhostRemoved(u32),
    Cursor(Option<String>),
    Callback(&'static str),
    Enter(&'static str),
    Leave(&'static str),
}

pub type Log = Rc<RefCell<Vec<Trace>>>;

pub struct RecordingHost {
    log: Log,
    next_ghost: u32,
    pub captured: bool,
    pub live_ghosts: Vec<u32>,
}

impl DragHost for RecordingHost {
    type Ghost = u32;

    fn capture_pointer(&mut self) {
        self.captured = true;
        self.log.borrow_mut().push(Trace::Capture);
    }

    fn release_pointer(&mut self) {
        self.captured = false;
        self.log.borrow_mut().push(Trace::Release);
    }

    fn create_ghost(&mut self, position: Point) -> u32 {
        self.next_ghost += 1;
        self.live_ghosts.push(self.next_ghost);
        self.log
            .borrow_mut()
            .push(Trace::GhostCreated(self.next_ghost, position));
        self.next_ghost
    }

    fn move_ghost(&mut self, ghost: &u32, position: Point) {
        self.log.borrow_mut().push(Trace::GhostMoved(*ghost, position));
    }

    fn remove_ghost(&mut self, ghost: u32) {
        self.live_ghosts.retain(|g| *g != ghost);
        self.log.borrow_mut().push(Trace::GhostRemoved(ghost));
    }
}

pub struct Fixture {
    pub log: Log,
    pub registry: SharedDropRegistry<u32>,
    pub cursors: CursorOverrides,
}

impl Fixture {
    pub fn new() -> Self {
        let log: Log = Rc::default();
        let sink = log.clone();
        let cursors = CursorOverrides::new(move |c: Option<&str>| {
            sink.borrow_mut().push(Trace::Cursor(c.map(String::from)));
        });
        Self {
            log,
            registry: DropRegistry::shared(),
            cursors,
        }
    }

    pub fn session<C>(&self, context: C) -> DragSession<RecordingHost, C> {
        let host = RecordingHost {
            log: self.log.clone(),
            next_ghost: 0,
            captured: false,
            live_ghosts: Vec::new(),
        };
        DragSession::new(host, context, self.registry.clone(), self.cursors.clone())
    }

    pub fn count(&self, trace: &Trace) -> usize {
        self.log.borrow().iter().filter(|t| *t == trace).count()
    }

    pub fn take(&self) -> Vec<Trace> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}
