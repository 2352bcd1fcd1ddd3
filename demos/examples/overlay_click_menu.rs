// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A click-triggered menu on an in-memory page.
//!
//! Opens on a click on the button, follows it when it moves, stays open for clicks on its
//! own items (`PersistContentClicks`), and closes on a click elsewhere.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlay_click_menu`
//! - `RUST_LOG=understory_overlay=trace cargo run -p understory_demos --example overlay_click_menu`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_demos::{Element, Page};
use understory_overlay::{OverlayConfig, OverlayController, PersistMode};

fn show(page: &Page, menu: &OverlayController<Element, understory_demos::Items>, what: &str) {
    let (listeners, watches) = page.registrations();
    let placed = menu
        .floating()
        .and_then(|f| page.rect(f))
        .map(|r| format!("({}, {}) {}×{}", r.x0, r.y0, r.width(), r.height()));
    println!(
        "{what:<28} visible={:<5} floating={:<22} listeners={listeners} watches={watches}",
        menu.is_visible(),
        placed.unwrap_or_else(|| "-".into()),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut page = Page::new(Rect::new(0.0, 0.0, 480.0, 320.0));
    let toolbar = page.add(None, "toolbar", Some(Rect::new(0.0, 0.0, 480.0, 48.0)));
    let button = page.add(Some(toolbar), "File", Some(Rect::new(8.0, 4.0, 88.0, 44.0)));
    let component = page.add(Some(button), "menu component", None);
    let canvas = page.add(None, "canvas", Some(Rect::new(0.0, 48.0, 480.0, 320.0)));

    let config = OverlayConfig::default().with_persist(PersistMode::PersistContentClicks);
    let mut menu = OverlayController::new(config, vec!["New", "Open…", "Save as…", "Quit"]);
    menu.attach(&page, component).unwrap();
    menu.activate(&mut page).unwrap();
    show(&page, &menu, "activated");

    let events = page.click(button);
    let effects = page.pump(&mut menu, events);
    show(&page, &menu, &format!("click File {effects:?}"));

    let item = page.children(menu.floating().unwrap())[1];
    let events = page.click(item);
    let effects = page.pump(&mut menu, events);
    show(&page, &menu, &format!("click {:?} {effects:?}", page.label(item)));

    page.set_rect(button, Rect::new(208.0, 4.0, 288.0, 44.0));
    let events = page.geometry_changed();
    let effects = page.pump(&mut menu, events);
    show(&page, &menu, &format!("button moved {effects:?}"));

    let events = page.click(canvas);
    let effects = page.pump(&mut menu, events);
    show(&page, &menu, &format!("click canvas {effects:?}"));

    let effects = menu.teardown(&mut page);
    show(&page, &menu, &format!("teardown {effects:?}"));
}
