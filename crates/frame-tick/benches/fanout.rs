//! Fan-out cost of one frame through dispatcher and tick handler.

use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use frame_tick::prelude::*;

fn frame_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for count in [1, 50, 500, 5000] {
        group.throughput(Throughput::Elements(count));

        group.bench_with_input(BenchmarkId::new("update", count), &count, |b, &count| {
            let dispatcher = FrameDispatcher::new();
            let handler = TickHandler::new(dispatcher.clone());
            let hits = Arc::new(AtomicU64::new(0));
            for _ in 0..count {
                let h = Arc::clone(&hits);
                handler.subscribe_on_frame_update(Listener::new(move |_| {
                    h.fetch_add(1, Ordering::Relaxed);
                }));
            }

            b.iter(|| dispatcher.update(black_box(0.016)));
        });

        group.bench_with_input(
            BenchmarkId::new("late_update_once", count),
            &count,
            |b, &count| {
                let dispatcher = FrameDispatcher::new();
                let handler = TickHandler::new(dispatcher.clone());
                let listener = Listener::new(|delta| {
                    black_box(delta);
                });

                b.iter(|| {
                    for _ in 0..count {
                        handler.subscribe_on_late_update_once(listener.clone());
                    }
                    dispatcher.late_update(black_box(0.016));
                });
            },
        );
    }

    group.finish();
}

fn step_benchmarks(c: &mut Criterion) {
    c.bench_function("manual_step_all_phases", |b| {
        let dispatcher = FrameDispatcher::new();
        let handler = TickHandler::new(dispatcher.clone());
        for phase in Phase::ALL {
            handler.subscribe(
                phase,
                Listener::new(|delta| {
                    black_box(delta);
                }),
            );
        }
        let mut source = ManualTickSource::new(dispatcher);

        b.iter(|| source.step());
    });
}

criterion_group!(benches, frame_benchmarks, step_benchmarks);
criterion_main!(benches);
