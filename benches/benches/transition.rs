// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use overstory_overlay::{ContextualSheet, OverlayHost};
use understory_transition::{TransitionController, interpolate_rect};

const VIEWPORT: Size = Size::new(400.0, 800.0);
const CARD: Rect = Rect::new(16.0, 520.0, 196.0, 640.0);
const FRAME: Duration = Duration::from_millis(16);

fn bench_interpolate(c: &mut Criterion) {
    let target = Rect::from_origin_size(Point::ORIGIN, VIEWPORT);
    c.bench_function("understory_transition/interpolate_rect_1k", |b| {
        b.iter(|| {
            for step in 0..1000_u32 {
                let p = f64::from(step) / 1000.0;
                black_box(interpolate_rect(black_box(CARD), target, p));
            }
        });
    });
}

fn bench_controller(c: &mut Criterion) {
    let target = Rect::from_origin_size(Point::ORIGIN, VIEWPORT);
    c.bench_function("understory_transition/open_close_cycle", |b| {
        b.iter_batched(
            TransitionController::default,
            |mut transition| {
                let mut now = Duration::ZERO;
                transition.open(Some(CARD), now).unwrap();
                for _ in 0..30 {
                    now += FRAME;
                    transition.tick(now);
                    black_box(transition.geometry(target));
                }
                transition.request_close(now);
                for _ in 0..25 {
                    now += FRAME;
                    transition.tick(now);
                    black_box(transition.geometry(target));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_host(c: &mut Criterion) {
    let mut group = c.benchmark_group("overstory_overlay");
    for &sheets in &[1_usize, 8, 64] {
        group.bench_function(format!("host_tick_frames/{sheets}"), |b| {
            b.iter_batched(
                || {
                    let mut host = OverlayHost::new(VIEWPORT);
                    for i in 0..sheets {
                        let id = host.insert(ContextualSheet::new(i, VIEWPORT));
                        host.sheet_mut(id)
                            .unwrap()
                            .set_visible(true, Some(CARD), Duration::ZERO)
                            .unwrap();
                    }
                    host
                },
                |mut host| {
                    let mut now = Duration::ZERO;
                    for _ in 0..30 {
                        now += FRAME;
                        black_box(host.tick(now));
                        black_box(host.frames().count());
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_interpolate, bench_controller, bench_host);
criterion_main!(benches);
