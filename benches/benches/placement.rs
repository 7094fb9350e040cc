// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{PlacementConfig, place};

const VIEWPORT: Size = Size::new(400.0, 800.0);

fn bench_place(c: &mut Criterion) {
    let config = PlacementConfig::default();
    let anchors: Vec<Rect> = (0..64_u32)
        .map(|i| {
            let x = f64::from(i) * 6.0;
            let y = f64::from(i % 16) * 48.0 + 10.0;
            Rect::new(x, y, x + 40.0, y + 40.0)
        })
        .collect();

    let mut group = c.benchmark_group("understory_placement");
    for &items in &[0_usize, 5, 100] {
        group.bench_function(format!("place_64_anchors/{items}_items"), |b| {
            b.iter(|| {
                for anchor in &anchors {
                    black_box(place(*anchor, 300.0, items, VIEWPORT, &config).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place);
criterion_main!(benches);
