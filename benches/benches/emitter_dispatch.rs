// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_emitter::{Emitter, HandlerId};

fn populated(n: usize, hits: &Rc<Cell<u64>>) -> (Emitter<u64>, Vec<HandlerId>) {
    let bus = Emitter::new("bench");
    let ids = (0..n)
        .map(|_| {
            let hits = hits.clone();
            bus.on("tick", move |v: &u64| hits.set(hits.get().wrapping_add(*v)))
        })
        .collect();
    (bus, ids)
}

fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger");
    for &n in &[1usize, 16, 256] {
        let hits = Rc::new(Cell::new(0));
        let (bus, _ids) = populated(n, &hits);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("handlers_n{}", n), |b| {
            b.iter(|| {
                let delivery = bus.trigger("tick", black_box(&1));
                black_box(delivery.invoked);
            });
        });
    }
    let empty: Emitter<u64> = Emitter::new("empty");
    group.bench_function("unknown_channel", |b| {
        b.iter(|| black_box(empty.trigger("tick", &1).invoked));
    });
    group.finish();
}

fn bench_off(c: &mut Criterion) {
    let mut group = c.benchmark_group("off");
    for &n in &[16usize, 256] {
        group.bench_function(format!("middle_n{}", n), |b| {
            b.iter_batched(
                || {
                    let hits = Rc::new(Cell::new(0));
                    populated(n, &hits)
                },
                |(bus, ids)| {
                    black_box(bus.off(&ids[n / 2]));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("channel_n{}", n), |b| {
            b.iter_batched(
                || {
                    let hits = Rc::new(Cell::new(0));
                    populated(n, &hits)
                },
                |(bus, _ids)| {
                    black_box(bus.off_channel("tick"));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trigger, bench_off);
criterion_main!(benches);
