//! Benchmarks for the per-turn update and vision rebuild - the hot path
//! between receiving `go` and answering it.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use formic::{GameParams, Loc, WorldState};

/// Contest-scale parameters: 200x200 map, standard view radius.
fn contest_params() -> GameParams {
    GameParams {
        rows: 200,
        cols: 200,
        view_radius2: 77,
        ..GameParams::default()
    }
}

/// A report block with `n` of our units spread across the map.
fn unit_block(n: u16) -> String {
    let mut block = String::new();
    for i in 0..n {
        writeln!(block, "a {} {} 0", (i * 13) % 200, (i * 29) % 200).unwrap();
    }
    block
}

fn bench_update(c: &mut Criterion) {
    let block = unit_block(100);
    let mut world = WorldState::new(contest_params()).unwrap();

    c.bench_function("update_100_units", |b| {
        b.iter(|| {
            world.update(black_box(&block)).unwrap();
            black_box(world.my_units().len())
        });
    });
}

fn bench_vision_rebuild(c: &mut Criterion) {
    let block = unit_block(100);
    let mut world = WorldState::new(contest_params()).unwrap();

    c.bench_function("vision_rebuild_100_units", |b| {
        b.iter(|| {
            // each update invalidates, so the first query pays the rebuild
            world.update(black_box(&block)).unwrap();
            black_box(world.is_visible(Loc::new(0, 0)))
        });
    });
}

fn bench_vision_cached_queries(c: &mut Criterion) {
    let mut world = WorldState::new(contest_params()).unwrap();
    world.update(&unit_block(100)).unwrap();
    let _ = world.is_visible(Loc::new(0, 0));

    c.bench_function("vision_query_full_map", |b| {
        b.iter(|| {
            let mut seen = 0u32;
            for row in 0..200 {
                for col in 0..200 {
                    if world.is_visible(black_box(Loc::new(row, col))) {
                        seen += 1;
                    }
                }
            }
            black_box(seen)
        });
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_vision_rebuild,
    bench_vision_cached_queries
);
criterion_main!(benches);
