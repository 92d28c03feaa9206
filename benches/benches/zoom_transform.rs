// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_zoom_transform::{
    BoundsClamper, ImageGeometry, TransformMatrix, ZoomLimits, double_tap_target,
};

const PHONE: Size = Size::new(390.0, 844.0);
const LANDSCAPE: ImageGeometry = ImageGeometry::new(4000.0, 2000.0);

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_zoom_transform");
    let clamper = BoundsClamper::new(PHONE);
    let limits = ZoomLimits::default();
    let committed = TransformMatrix::new(-120.0, 0.0, 2.5);

    group.bench_function("compose_render", |b| {
        b.iter(|| {
            TransformMatrix::IDENTITY
                .prepend_pan(black_box(Vec2::new(12.0, -3.0)))
                .prepend_pinch(black_box(1.3), Point::new(40.0, 10.0), Vec2::ZERO)
                .prepend_transform(black_box(committed))
        });
    });

    group.bench_function("pinch_update_clamped", |b| {
        // Raw factors sweep past the upper limit and back.
        let raws: Vec<f64> = (0..64).map(|i| 0.5 + f64::from(i) * 0.2).collect();
        b.iter(|| {
            let mut acc = 0.0;
            for &raw in &raws {
                let scale =
                    limits.clamp_pinch_scale(raw, committed.scale, Some(&LANDSCAPE), PHONE);
                let candidate = TransformMatrix::IDENTITY
                    .prepend_pinch(scale, Point::new(40.0, 10.0), Vec2::ZERO)
                    .prepend_transform(committed);
                acc += clamper.correction(candidate, Some(&LANDSCAPE)).x;
            }
            black_box(acc)
        });
    });

    group.bench_function("double_tap_target", |b| {
        b.iter(|| {
            double_tap_target(
                TransformMatrix::IDENTITY,
                black_box(Point::new(-80.0, 120.0)),
                Some(&LANDSCAPE),
                &clamper,
                &limits,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
