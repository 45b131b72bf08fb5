// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_tour::placement::{Metrics, ScrollAlign, place, scroll_target};
use understory_tour::types::Direction;

fn bench_place(c: &mut Criterion) {
    let anchor = Rect::new(100.0, 200.0, 180.0, 240.0);
    let step = Size::new(240.0, 90.0);
    let metrics = Metrics::default();
    let mut group = c.benchmark_group("placement");
    group.bench_function("place_all_sides", |b| {
        b.iter(|| {
            for direction in [
                Direction::Top,
                Direction::Bottom,
                Direction::Left,
                Direction::Right,
            ] {
                black_box(place(black_box(anchor), step, direction, metrics));
            }
        });
    });
    group.bench_function("scroll_center", |b| {
        b.iter(|| black_box(scroll_target(black_box(anchor), step, 768.0, ScrollAlign::Center)));
    });
    group.finish();
}

criterion_group!(benches, bench_place);
criterion_main!(benches);
