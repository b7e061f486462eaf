// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Benchmark: tree build (insert N boxes) and per-box candidate retrieval,
//! in quadtree and octree mode.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use orthtree::{Dimensions, Item, Region, SpatialTree, TreeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::time::Duration;

const WORLD: f32 = 1_000.0;

fn random_boxes(n: usize, seed: u64) -> Vec<Region> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let origin = [
                rng.gen_range(0.0..WORLD),
                rng.gen_range(0.0..WORLD),
                rng.gen_range(0.0..WORLD),
            ];
            let size = [
                rng.gen_range(0.5..10.0),
                rng.gen_range(0.5..10.0),
                rng.gen_range(0.5..10.0),
            ];
            Region::from_origin_size(origin, size).expect("finite box")
        })
        .collect()
}

fn build(dims: Dimensions, boxes: &[Region]) -> SpatialTree<usize> {
    let config = TreeConfig::default()
        .with_dimensions(dims)
        .with_capacity(8)
        .with_max_depth(8);
    let world = Region::new([0.0; 3], [WORLD; 3]).expect("world");
    let mut tree = SpatialTree::with_config(world, config).expect("config");
    tree.extend(boxes.iter().enumerate().map(|(i, b)| Item::new(*b, i)));
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_insert");
    for dims in [Dimensions::Two, Dimensions::Three] {
        for &n in &[100usize, 1_000, 10_000] {
            let boxes = random_boxes(n, 0x5eed);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{}d", u8::from(dims)), n),
                &boxes,
                |b, boxes| {
                    b.iter_batched(
                        || boxes.clone(),
                        |boxes| black_box(build(dims, &boxes)),
                        BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_retrieve_all");
    for dims in [Dimensions::Two, Dimensions::Three] {
        for &n in &[1_000usize, 10_000] {
            let boxes = random_boxes(n, 0x5eed);
            let tree = build(dims, &boxes);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{}d", u8::from(dims)), n),
                &boxes,
                |b, boxes| {
                    let mut scratch = Vec::new();
                    b.iter(|| {
                        let mut total = 0usize;
                        for q in boxes {
                            scratch.clear();
                            tree.retrieve_into(q, &mut scratch);
                            total += scratch.len();
                        }
                        black_box(total)
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = bench_insert, bench_retrieve
}
criterion_main!(benches);
