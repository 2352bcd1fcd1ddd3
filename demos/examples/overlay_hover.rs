// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hover-triggered tooltip menu with an external override.
//!
//! The pointer travels from the reference into the menu and back out; the menu stays open
//! until both are left. Setting the override then takes over, and clearing it hands control
//! back to hover.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlay_hover`

use kurbo::Rect;
use understory_demos::Page;
use understory_overlay::{OverlayConfig, OverlayController, Placement, TriggerMode};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // A short viewport so the menu flips above the link.
    let mut page = Page::new(Rect::new(0.0, 0.0, 640.0, 260.0));
    let link = page.add(None, "Help", Some(Rect::new(40.0, 200.0, 120.0, 224.0)));
    let component = page.add(Some(link), "hover menu", None);
    let elsewhere = page.add(None, "body", Some(Rect::new(0.0, 0.0, 640.0, 260.0)));

    let config = OverlayConfig::default()
        .with_trigger(TriggerMode::Hover)
        .with_placement(Placement::BOTTOM);
    let mut menu = OverlayController::new(config, vec!["Docs", "Shortcuts"]);
    menu.attach(&page, component).unwrap();
    menu.activate(&mut page).unwrap();

    let events = page.move_pointer(Some(elsewhere), Some(link));
    let effects = page.pump(&mut menu, events);
    let solved = menu.solved().unwrap();
    println!(
        "enter link: {effects:?}, placed {} at ({}, {})",
        solved.placement, solved.x, solved.y
    );

    let floating = menu.floating().unwrap();
    let item = page.children(floating)[0];
    let events = page.move_pointer(Some(link), Some(item));
    let effects = page.pump(&mut menu, events);
    println!("link → {:?}: {effects:?}, visible={}", page.label(item), menu.is_visible());

    let events = page.move_pointer(Some(item), Some(elsewhere));
    let effects = page.pump(&mut menu, events);
    println!("menu → body: {effects:?}, visible={}", menu.is_visible());

    let effects = menu.set_model_value(&mut page, Some(true));
    let effects = effects | page.settle(&mut menu);
    println!(
        "override on: {effects:?}, governor={:?}, listeners={:?}",
        menu.governor(),
        page.registrations()
    );

    let events = page.move_pointer(Some(elsewhere), Some(link));
    let effects = page.pump(&mut menu, events);
    println!("hover while overridden: {effects:?}");

    let effects = menu.set_model_value(&mut page, None);
    println!(
        "override cleared: {effects:?}, governor={:?}, visible={}",
        menu.governor(),
        menu.is_visible()
    );

    let _ = menu.teardown(&mut page);
}
