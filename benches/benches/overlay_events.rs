// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_demos::{Element, Items, Page};
use understory_overlay::{OverlayConfig, OverlayController, TriggerMode};

fn scene(trigger: TriggerMode) -> (Page, OverlayController<Element, Items>, Element, Element) {
    let mut page = Page::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let button = page.add(None, "button", Some(Rect::new(100.0, 100.0, 200.0, 140.0)));
    let component = page.add(Some(button), "component", None);
    let elsewhere = page.add(None, "body", Some(Rect::new(0.0, 0.0, 1024.0, 768.0)));
    let mut menu = OverlayController::new(
        OverlayConfig::default().with_trigger(trigger),
        vec!["Cut", "Copy", "Paste", "Delete"],
    );
    let _ = menu.attach(&page, component);
    let _ = menu.activate(&mut page);
    (page, menu, button, elsewhere)
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");
    group.bench_function("click_open_place_close", |b| {
        b.iter_batched(
            || scene(TriggerMode::Click),
            |(mut page, mut menu, button, elsewhere)| {
                let events = page.click(button);
                let opened = page.pump(&mut menu, events);
                let events = page.click(elsewhere);
                let closed = page.pump(&mut menu, events);
                black_box((opened, closed));
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("hover_enter_leave", |b| {
        b.iter_batched(
            || scene(TriggerMode::Hover),
            |(mut page, mut menu, button, elsewhere)| {
                let events = page.move_pointer(Some(elsewhere), Some(button));
                let opened = page.pump(&mut menu, events);
                let events = page.move_pointer(Some(button), Some(elsewhere));
                let closed = page.pump(&mut menu, events);
                black_box((opened, closed));
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_follow_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");
    let (mut page, mut menu, button, _) = scene(TriggerMode::Click);
    let events = page.click(button);
    let _ = page.pump(&mut menu, events);
    let mut x = 0.0;
    group.bench_function("geometry_changed_reposition", |b| {
        b.iter(|| {
            x = (x + 7.0) % 800.0;
            page.set_rect(button, Rect::new(x, 100.0, x + 100.0, 140.0));
            let events = page.geometry_changed();
            black_box(page.pump(&mut menu, events));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_open_close, bench_follow_reference);
criterion_main!(benches);
