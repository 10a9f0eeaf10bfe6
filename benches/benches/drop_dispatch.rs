// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_cursor::CursorOverrides;
use understory_dragdrop::{DragData, DropAction, DropHandler, DropRegistry, PointerEvent};

const CELL: f64 = 32.0;

/// A `side` x `side` grid of abutting drop targets.
fn build_grid(side: u32) -> DropRegistry<()> {
    let mut registry = DropRegistry::new();
    for row in 0..side {
        for col in 0..side {
            let x = f64::from(col) * CELL;
            let y = f64::from(row) * CELL;
            let mut handler = DropHandler::new(Rect::new(x, y, x + CELL, y + CELL), 0_u32);
            handler.set_on_drag_enter(|_, _, data: &mut DragData<()>| {
                data.set_drop_action(DropAction::Copy);
            });
            handler.set_on_drag_over(|hits: &mut u32, _, _| *hits += 1);
            handler.set_on_drop(|_, _, _| {});
            registry.register(handler);
        }
    }
    registry
}

/// Diagonal sweep across the grid, one event per half cell.
fn sweep(side: u32) -> Vec<PointerEvent> {
    (0..side * 2)
        .map(|i| {
            let v = (f64::from(i) + 0.5) * CELL / 2.0;
            PointerEvent::at(v, v)
        })
        .collect()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_dragdrop");
    group.sample_size(50);

    for &side in &[4_u32, 16_u32, 64_u32] {
        let events = sweep(side);

        group.bench_function(format!("drag_sweep(targets={})", side * side), |b| {
            let cursors = CursorOverrides::new(|_: Option<&str>| {});
            b.iter_batched(
                || (build_grid(side), DragData::new((), Point::ZERO, cursors.clone())),
                |(mut registry, mut data)| {
                    for event in &events {
                        registry.dispatch_drag(event, &mut data);
                    }
                    black_box(data.drop_action());
                    black_box(registry);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("drop(targets={})", side * side), |b| {
            let cursors = CursorOverrides::new(|_: Option<&str>| {});
            let drop_at = PointerEvent::at(CELL * 1.5, CELL * 1.5);
            b.iter_batched(
                || (build_grid(side), DragData::new((), Point::ZERO, cursors.clone())),
                |(mut registry, mut data)| {
                    registry.dispatch_drop(&drop_at, &mut data);
                    black_box(data.drop_action());
                    black_box(registry);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
