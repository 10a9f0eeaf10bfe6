// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session lifecycle against a recording host.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{Fixture, Log, RecordingHost, Trace};
use kurbo::{Point, Rect};
use understory_dragdrop::{
    DragConfig, DragData, DragPhase, DragSession, DropAction, DropHandler, PointerEvent,
};

fn secondary(x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), 1)
}

fn counted_session(fx: &Fixture) -> DragSession<RecordingHost, Log> {
    let mut session = fx.session(fx.log.clone());
    session.set_on_drag_start(|log: &mut Log, _, _| log.borrow_mut().push(Trace::Callback("start")));
    session.set_on_drag(|log: &mut Log, _, _| log.borrow_mut().push(Trace::Callback("drag")));
    session.set_on_drag_end(|log: &mut Log, _, _| log.borrow_mut().push(Trace::Callback("end")));
    session
}

fn target(fx: &Fixture, rect: Rect, name: &'static str) -> DropHandler<Rect, Log, u32> {
    let mut handler = DropHandler::new(rect, fx.log.clone());
    handler.set_on_drag_enter(move |log: &mut Log, _, _| log.borrow_mut().push(Trace::Enter(name)));
    handler.set_on_drag_leave(move |log: &mut Log, _, _| log.borrow_mut().push(Trace::Leave(name)));
    handler
}

const START: Trace = Trace::Callback("start");

#[test]
fn press_below_threshold_does_not_start() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.set_drag_threshold(5.0);

    session.pointer_down(&PointerEvent::at(10.0, 10.0));
    assert_eq!(session.phase(), DragPhase::Pending);
    session.pointer_move(&PointerEvent::at(14.0, 10.0));
    session.pointer_move(&PointerEvent::at(10.0, 6.0));
    session.pointer_move(&PointerEvent::at(14.0, 14.0));
    assert_eq!(fx.count(&START), 0);
    assert_eq!(session.phase(), DragPhase::Pending);
}

#[test]
fn reaching_threshold_starts_exactly_once() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.set_drag_threshold(5.0);

    session.pointer_down(&PointerEvent::at(10.0, 10.0));
    session.pointer_move(&PointerEvent::at(15.0, 10.0));
    assert_eq!(fx.count(&START), 1);
    assert!(session.is_dragging());

    session.pointer_move(&PointerEvent::at(40.0, 40.0));
    session.pointer_move(&PointerEvent::at(80.0, 10.0));
    assert_eq!(fx.count(&START), 1);
    assert_eq!(session.drag_data().map(DragData::start), Some(Point::new(15.0, 10.0)));
}

#[test]
fn secondary_press_never_starts() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);

    session.pointer_down(&secondary(0.0, 0.0));
    assert_eq!(session.phase(), DragPhase::Idle);
    session.pointer_move(&secondary(50.0, 50.0));
    assert_eq!(fx.count(&START), 0);
    assert!(fx.take().is_empty());
}

#[test]
fn secondary_release_does_not_end_drag() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(10.0, 0.0));
    session.pointer_up(&secondary(10.0, 0.0));
    assert!(session.is_dragging());
    assert_eq!(fx.count(&Trace::Callback("end")), 0);

    session.pointer_up(&PointerEvent::at(10.0, 0.0));
    assert_eq!(session.phase(), DragPhase::Idle);
    assert_eq!(fx.count(&Trace::Callback("end")), 1);
}

#[test]
fn secondary_release_keeps_pending_press() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_up(&secondary(0.0, 0.0));
    assert_eq!(session.phase(), DragPhase::Pending);
    session.pointer_up(&PointerEvent::at(0.0, 0.0));
    assert_eq!(session.phase(), DragPhase::Idle);
    assert_eq!(fx.take(), vec![Trace::Capture, Trace::Release]);
}

#[test]
fn press_and_release_without_drag_only_toggles_capture() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);

    session.pointer_down(&PointerEvent::at(3.0, 3.0));
    assert!(session.host().captured);
    session.pointer_move(&PointerEvent::at(4.0, 4.0));
    session.pointer_up(&PointerEvent::at(4.0, 4.0));
    assert!(!session.host().captured);
    assert_eq!(fx.take(), vec![Trace::Capture, Trace::Release]);
}

#[test]
fn lifecycle_order_start_move_end() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(5.0, 0.0));
    session.pointer_move(&PointerEvent::at(6.0, 0.0));
    session.pointer_up(&PointerEvent::at(6.0, 0.0));

    assert_eq!(
        fx.take(),
        vec![
            Trace::Capture,
            Trace::GhostCreated(1, Point::new(5.0, 0.0)),
            START,
            Trace::GhostMoved(1, Point::new(5.0, 0.0)),
            Trace::Callback("drag"),
            Trace::GhostMoved(1, Point::new(6.0, 0.0)),
            Trace::Callback("drag"),
            Trace::Callback("end"),
            Trace::GhostRemoved(1),
            Trace::Release,
        ]
    );
    assert!(session.host().live_ghosts.is_empty());
}

#[test]
fn end_to_end_enter_once_and_drop_once() {
    let fx = Fixture::new();
    let drops = Rc::new(Cell::new(0_u32));
    let enters = Rc::new(Cell::new(0_u32));

    // Drag source N occupies (0, 0)-(100, 100); drop target M (150, 150)-(250, 250).
    let mut m = DropHandler::new(Rect::new(150.0, 150.0, 250.0, 250.0), ());
    let e = enters.clone();
    m.set_on_drag_enter(move |_, _, _: &mut DragData<u32>| e.set(e.get() + 1));
    let d = drops.clone();
    m.set_on_drop(move |_, _, data: &mut DragData<u32>| {
        d.set(d.get() + 1);
        data.set_drop_action(DropAction::Copy);
    });
    fx.registry.borrow_mut().register(m);

    let action_at_end = Rc::new(Cell::new(None));
    let mut session = fx.session(());
    let a = action_at_end.clone();
    session.set_on_drag_end(move |_, _, data| a.set(Some(data.drop_action())));
    let threshold = session.drag_threshold();

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(threshold, 0.0));
    assert!(session.is_dragging());
    assert_eq!(enters.get(), 0);

    session.pointer_move(&PointerEvent::at(150.0, 150.0));
    assert_eq!(enters.get(), 1);
    session.pointer_move(&PointerEvent::at(151.0, 151.0));
    assert_eq!(enters.get(), 1);

    session.pointer_up(&PointerEvent::at(151.0, 151.0));
    assert_eq!(drops.get(), 1);
    assert_eq!(action_at_end.get(), Some(DropAction::Copy));
}

#[test]
fn end_to_end_without_drop_callback_ends_with_none() {
    let fx = Fixture::new();
    let mut m = DropHandler::new(Rect::new(150.0, 150.0, 250.0, 250.0), ());
    m.set_on_drag_enter(|_, _, data: &mut DragData<u32>| data.set_drop_action(DropAction::Move));
    let id = fx.registry.borrow_mut().register(m);

    let action_at_end = Rc::new(Cell::new(None));
    let mut session = fx.session(());
    let a = action_at_end.clone();
    session.set_on_drag_end(move |_, _, data| a.set(Some(data.drop_action())));

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(5.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 150.0));
    assert_eq!(
        session.drag_data().map(DragData::drop_action),
        Some(DropAction::Move)
    );
    session.pointer_up(&PointerEvent::at(151.0, 151.0));

    assert_eq!(action_at_end.get(), Some(DropAction::None));
    assert!(!fx.registry.borrow().is_entered(id));
    assert_eq!(fx.cursors.active_cursor(), None);
}

#[test]
fn moving_between_abutting_targets_leaves_before_entering() {
    let fx = Fixture::new();
    {
        let mut registry = fx.registry.borrow_mut();
        registry.register(target(&fx, Rect::new(100.0, 0.0, 200.0, 100.0), "a"));
        registry.register(target(&fx, Rect::new(200.0, 0.0, 300.0, 100.0), "b"));
    }
    let mut session = fx.session(());

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 50.0));
    fx.take();
    session.pointer_move(&PointerEvent::at(200.0, 50.0));

    let callbacks: Vec<_> = fx
        .take()
        .into_iter()
        .filter(|t| matches!(t, Trace::Enter(_) | Trace::Leave(_)))
        .collect();
    assert_eq!(callbacks, vec![Trace::Leave("a"), Trace::Enter("b")]);
}

#[test]
fn manual_start_ignores_threshold() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.set_config(DragConfig {
        autostart: false,
        drag_threshold: 5.0,
    });

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(50.0, 0.0));
    assert_eq!(session.phase(), DragPhase::Pending);

    assert!(session.start(&PointerEvent::at(1.0, 0.0)));
    assert!(session.is_dragging());
    assert_eq!(session.drag_data().map(DragData::start), Some(Point::new(1.0, 0.0)));

    // Idempotent while active.
    assert!(!session.start(&PointerEvent::at(2.0, 0.0)));
    assert_eq!(fx.count(&START), 1);
}

#[test]
fn manual_start_requires_a_press() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.set_autostart(false);
    assert!(!session.start(&PointerEvent::at(0.0, 0.0)));
    assert_eq!(session.phase(), DragPhase::Idle);
}

#[test]
fn pending_move_callback_can_start() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.set_autostart(false);
    session.set_on_pending_move(|_, event| event.position.y > 20.0);

    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(0.0, 10.0));
    assert_eq!(session.phase(), DragPhase::Pending);
    session.pointer_move(&PointerEvent::at(0.0, 21.0));
    assert!(session.is_dragging());
    assert_eq!(fx.count(&START), 1);
}

#[test]
fn new_gesture_does_not_reuse_stale_geometry() {
    let fx = Fixture::new();
    let node = Rc::new(Cell::new(Rect::new(100.0, 0.0, 200.0, 100.0)));
    let enters = Rc::new(Cell::new(0_u32));
    let mut handler = DropHandler::new(node.clone(), ());
    let e = enters.clone();
    handler.set_on_drag_enter(move |_, _, _: &mut DragData<u32>| e.set(e.get() + 1));
    fx.registry.borrow_mut().register(handler);

    let mut session = fx.session(());
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 50.0));
    session.pointer_up(&PointerEvent::at(150.0, 50.0));
    assert_eq!(enters.get(), 1);

    // The target moves between gestures.
    node.set(Rect::new(300.0, 0.0, 400.0, 100.0));
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 50.0));
    assert_eq!(enters.get(), 1);
    session.pointer_move(&PointerEvent::at(350.0, 50.0));
    assert_eq!(enters.get(), 2);
}

#[test]
fn dispose_mid_drag_cleans_up() {
    let fx = Fixture::new();
    let mut m = DropHandler::new(Rect::new(100.0, 0.0, 200.0, 100.0), ());
    m.set_on_drag_enter(|_, _, data: &mut DragData<u32>| data.set_drop_action(DropAction::Link));
    let id = fx.registry.borrow_mut().register(m);

    let mut session = counted_session(&fx);
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 50.0));
    assert_eq!(fx.cursors.active_cursor().as_deref(), Some("alias"));

    session.dispose();
    assert!(session.is_disposed());
    assert!(session.host().live_ghosts.is_empty());
    assert!(!session.host().captured);
    assert_eq!(fx.cursors.active_cursor(), None);
    assert!(!fx.registry.borrow().is_entered(id));
    assert_eq!(fx.count(&Trace::Callback("end")), 0);

    // Second dispose and later input are harmless no-ops.
    let before = fx.take();
    session.dispose();
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(150.0, 50.0));
    session.pointer_up(&PointerEvent::at(150.0, 50.0));
    assert!(!session.start(&PointerEvent::at(0.0, 0.0)));
    session.set_on_drag_start(|_, _, _| {});
    assert!(fx.take().is_empty());
    assert!(!before.is_empty());
}

#[test]
fn dispose_while_pending_releases_capture() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.dispose();
    assert_eq!(fx.take(), vec![Trace::Capture, Trace::Release]);
}

#[test]
fn dropping_an_active_session_tears_down() {
    let fx = Fixture::new();
    {
        let mut session = counted_session(&fx);
        session.pointer_down(&PointerEvent::at(0.0, 0.0));
        session.pointer_move(&PointerEvent::at(10.0, 0.0));
        fx.take();
    }
    assert_eq!(fx.take(), vec![Trace::GhostRemoved(1), Trace::Release]);
}

#[test]
fn second_press_while_pending_is_ignored() {
    let fx = Fixture::new();
    let mut session = counted_session(&fx);
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_down(&PointerEvent::at(50.0, 50.0));
    assert_eq!(fx.count(&Trace::Capture), 1);
    session.pointer_move(&PointerEvent::at(4.0, 0.0));
    assert!(!session.is_dragging());
}

#[test]
fn payload_set_at_start_reaches_drop_target() {
    let fx = Fixture::new();
    let received = Rc::new(Cell::new(0_u64));
    let mut m = DropHandler::new(Rect::new(100.0, 0.0, 200.0, 100.0), received.clone());
    m.set_on_drop(|got: &mut Rc<Cell<u64>>, _, data: &mut DragData<u32>| {
        if let Some(v) = data.get::<u64>("application/x-item-id") {
            got.set(*v);
        }
    });
    fx.registry.borrow_mut().register(m);

    let mut session = fx.session(7_u64);
    session.set_on_drag_start(|item: &mut u64, _, data| {
        data.set_data("application/x-item-id", *item);
    });
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(120.0, 10.0));
    session.pointer_up(&PointerEvent::at(120.0, 10.0));
    assert_eq!(received.get(), 7);
}

#[test]
fn drag_callback_runs_after_target_notifications() {
    let fx = Fixture::new();
    fx.registry
        .borrow_mut()
        .register(target(&fx, Rect::new(100.0, 0.0, 200.0, 100.0), "a"));
    let mut session = counted_session(&fx);
    session.pointer_down(&PointerEvent::at(0.0, 0.0));
    session.pointer_move(&PointerEvent::at(10.0, 0.0));
    fx.take();
    session.pointer_move(&PointerEvent::at(150.0, 0.0));
    assert_eq!(
        fx.take(),
        vec![
            Trace::GhostMoved(1, Point::new(150.0, 0.0)),
            Trace::Enter("a"),
            Trace::Callback("drag"),
        ]
    );
}
