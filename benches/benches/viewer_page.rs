// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_gesture::{TouchEvent, TouchPoint, VerticalDismissSwipe};
use understory_lightbox::{
    HostCapabilities, ImageSource, PageProps, UiQueue, ViewerConfig, ViewerPage, ui_channel,
};

const PHONE: Size = Size::new(390.0, 844.0);

fn mount() -> (ViewerPage, UiQueue) {
    let (ui, queue) = ui_channel();
    let image = ImageSource::new("bench.jpg").with_natural_size(4000.0, 3000.0);
    let page = ViewerPage::new(
        PageProps::new(image),
        PHONE,
        HostCapabilities::MatrixOnly,
        &ViewerConfig::default(),
        VerticalDismissSwipe::default(),
        Arc::new(ui),
    )
    .expect("default config is valid");
    (page, queue)
}

/// A two-finger pinch-and-drift of `frames` move pairs.
fn pinch_stream(frames: u64) -> Vec<TouchEvent> {
    let at = |id, x, y, t| TouchPoint::new(id, Point::new(x, y), t);
    let mut events = vec![
        TouchEvent::Down(at(1, 150.0, 400.0, 0)),
        TouchEvent::Down(at(2, 240.0, 440.0, 4)),
    ];
    for i in 1..=frames {
        let d = i as f64 * 3.0;
        let t = i * 16;
        events.push(TouchEvent::Move(at(1, 150.0 - d, 400.0 - d * 0.5, t)));
        events.push(TouchEvent::Move(at(2, 240.0 + d, 440.0 + d * 0.5, t + 8)));
    }
    events.push(TouchEvent::Up(at(2, 240.0, 440.0, frames * 16 + 16)));
    events.push(TouchEvent::Up(at(1, 150.0, 400.0, frames * 16 + 24)));
    events
}

fn bench_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_lightbox");
    group.sample_size(50);

    for &frames in &[30_u64, 120] {
        let events = pinch_stream(frames);
        group.bench_function(format!("pinch_sequence(frames={frames})"), |b| {
            b.iter_batched(
                mount,
                |(mut page, queue)| {
                    for event in &events {
                        page.handle_touch(event);
                    }
                    queue.run_pending();
                    black_box(page.committed_transform())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("double_tap_animation", |b| {
        b.iter_batched(
            mount,
            |(mut page, _queue)| {
                for (t, down) in [(0, true), (40, false), (120, true), (160, false)] {
                    let point = TouchPoint::new(1, Point::new(195.0, 422.0), t);
                    page.handle_touch(&if down {
                        TouchEvent::Down(point)
                    } else {
                        TouchEvent::Up(point)
                    });
                }
                let mut now = 160;
                while page.is_animating() {
                    page.advance_frame(now);
                    now += 16;
                }
                black_box(page.render_affine())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_page);
criterion_main!(benches);
