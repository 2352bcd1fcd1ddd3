// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_placement::{
    Flip, Geometry, MatchWidth, Offset, Pipeline, Placement, PlacementRequest, Shift, Strategy,
    solve,
};

/// SplitMix64 stream of unit floats; deterministic across runs.
struct Scatter(u64);

impl Scatter {
    fn unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// References scattered over an 800×600 viewport, so some placements flip and shift.
fn gen_scenes(count: usize, seed: u64) -> Vec<Geometry> {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut rng = Scatter(seed);
    (0..count)
        .map(|_| {
            let w = 40.0 + rng.unit() * 160.0;
            let h = 20.0 + rng.unit() * 30.0;
            let x0 = rng.unit() * (800.0 - w);
            let y0 = rng.unit() * (600.0 - h);
            let fw = 80.0 + rng.unit() * 200.0;
            let fh = 40.0 + rng.unit() * 240.0;
            Geometry::new(
                Rect::new(x0, y0, x0 + w, y0 + h),
                Rect::new(0.0, 0.0, fw, fh),
                viewport,
            )
        })
        .collect()
}

const PLACEMENTS: [Placement; 4] = [
    Placement::BOTTOM_START,
    Placement::TOP,
    Placement::RIGHT_END,
    Placement::LEFT,
];

fn bench_default_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_default");
    let scenes = gen_scenes(1024, 0x5eed);
    group.throughput(Throughput::Elements(scenes.len() as u64));
    for placement in PLACEMENTS {
        let request = PlacementRequest::new(placement, Strategy::Absolute);
        group.bench_function(format!("{placement}"), |b| {
            b.iter(|| {
                let mut flipped = 0_usize;
                for g in &scenes {
                    if let Ok(s) = solve(black_box(g), &request) {
                        flipped += usize::from(s.placement != placement);
                    }
                }
                black_box(flipped);
            });
        });
    }
    group.finish();
}

fn bench_pipeline_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_pipeline");
    let scenes = gen_scenes(1024, 0xfeed);
    group.throughput(Throughput::Elements(scenes.len() as u64));
    let pipelines: [(&str, fn() -> Pipeline); 3] = [
        ("empty", Pipeline::empty),
        ("default", Pipeline::default),
        ("offset_match_flip_shift", || {
            Pipeline::empty()
                .with(Offset {
                    main_axis: 4.0,
                    cross_axis: 0.0,
                })
                .with(MatchWidth)
                .with(Flip::default())
                .with(Shift::padded(8.0))
        }),
    ];
    for (name, make) in pipelines {
        let request =
            PlacementRequest::new(Placement::BOTTOM_START, Strategy::Fixed).with_middleware(make());
        group.bench_function(name, |b| {
            b.iter(|| {
                for g in &scenes {
                    let _ = black_box(solve(g, &request));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_default_pipeline, bench_pipeline_length);
criterion_main!(benches);
