// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solving placements without any host.
//!
//! Shows the default pipeline (match width, flip, shift) and a custom one on a 100×40
//! button as the room below it shrinks.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_basics`

use kurbo::Rect;
use understory_placement::{
    Adjustment, FnMiddleware, Geometry, Offset, Pipeline, Placement, PlacementRequest, Shift,
    Strategy, solve,
};

fn main() {
    let button = Rect::new(20.0, 0.0, 120.0, 40.0);
    let menu = Rect::new(0.0, 0.0, 160.0, 90.0);

    println!("default pipeline, bottom-start:");
    for bottom in [600.0, 120.0, 100.0] {
        let geometry = Geometry::new(button, menu, Rect::new(0.0, -200.0, 400.0, bottom));
        let request = PlacementRequest::new(Placement::BOTTOM_START, Strategy::Absolute);
        match solve(&geometry, &request) {
            Ok(s) => println!(
                "  viewport bottom {bottom:>5}: {:<12} at ({:>6.1}, {:>6.1}) width {}",
                s.placement, s.x, s.y, s.floating.width
            ),
            Err(err) => println!("  viewport bottom {bottom:>5}: {err}"),
        }
    }

    // Placements parse from their usual names.
    let placement: Placement = "right-end".parse().unwrap();
    let pipeline = Pipeline::empty()
        .with(Offset {
            main_axis: 6.0,
            cross_axis: 0.0,
        })
        .with(Shift::padded(4.0))
        .with(FnMiddleware::new("snap", |state| {
            Adjustment::moved(state.x.round(), state.y.round())
        }));
    println!("custom pipeline {pipeline:?}:");
    let geometry = Geometry::new(button, menu, Rect::new(0.0, 0.0, 400.0, 600.0));
    let request = PlacementRequest::new(placement, Strategy::Fixed).with_middleware(pipeline);
    let s = solve(&geometry, &request).unwrap();
    println!(
        "  {} → {} at ({}, {}) [{}]",
        placement,
        s.placement,
        s.x,
        s.y,
        s.strategy.class_name()
    );

    // Nothing laid out yet: the caller retries later.
    let not_laid_out = Geometry::new(button, Rect::ZERO, Rect::new(0.0, 0.0, 400.0, 600.0));
    let err = solve(&not_laid_out, &PlacementRequest::default()).unwrap_err();
    println!("unsized floating element: {err}");
}
