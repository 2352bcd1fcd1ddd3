// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small in-memory page for the overlay demos.
//!
//! [`Page`] implements [`OverlayHost`] over a flat list of elements with parent links and
//! rects. It dispatches pointer interactions to whatever listeners are registered and
//! queues ticks until [`Page::pump`] delivers them.

use std::collections::BTreeMap;

use kurbo::{Point, Rect, Size};
use understory_overlay::{
    Effects, FloatingStyle, ListenerId, MountRequest, OverlayController, OverlayEvent,
    OverlayHost, PointerKind, SubscriptionId,
};

/// Element handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Element(pub u32);

/// Floating content: the item labels of a menu.
pub type Items = Vec<&'static str>;

const ITEM_HEIGHT: f64 = 24.0;
const CHAR_WIDTH: f64 = 8.0;

#[derive(Clone, Debug)]
enum Registration {
    Pointer(Element, PointerKind),
    Outside(Element, Vec<Element>),
}

/// In-memory page.
#[derive(Debug)]
pub struct Page {
    parents: BTreeMap<Element, Element>,
    rects: BTreeMap<Element, Rect>,
    labels: BTreeMap<Element, String>,
    viewport: Rect,
    next: u32,
    listeners: BTreeMap<ListenerId, Registration>,
    watches: BTreeMap<SubscriptionId, (Element, Element)>,
    next_id: u64,
    pending_ticks: usize,
}

impl Page {
    /// Empty page with the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            parents: BTreeMap::new(),
            rects: BTreeMap::new(),
            labels: BTreeMap::new(),
            viewport,
            next: 1,
            listeners: BTreeMap::new(),
            watches: BTreeMap::new(),
            next_id: 1,
            pending_ticks: 0,
        }
    }

    /// Add an element.
    pub fn add(&mut self, parent: Option<Element>, label: &str, rect: Option<Rect>) -> Element {
        let e = Element(self.next);
        self.next += 1;
        if let Some(p) = parent {
            self.parents.insert(e, p);
        }
        if let Some(r) = rect {
            self.rects.insert(e, r);
        }
        self.labels.insert(e, label.to_string());
        e
    }

    /// Move or resize an element.
    pub fn set_rect(&mut self, e: Element, rect: Rect) {
        self.rects.insert(e, rect);
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Label given at creation, or the item label of a floating child.
    pub fn label(&self, e: Element) -> &str {
        self.labels.get(&e).map_or("?", String::as_str)
    }

    /// Children of `e`, in creation order.
    pub fn children(&self, e: Element) -> Vec<Element> {
        self.parents
            .iter()
            .filter_map(|(&c, &p)| (p == e).then_some(c))
            .collect()
    }

    /// Events for a pointer press on `target`.
    pub fn click(&self, target: Element) -> Vec<OverlayEvent<Element>> {
        self.listeners
            .iter()
            .filter(|(_, reg)| match reg {
                Registration::Pointer(e, PointerKind::Click) => self.contains(*e, target),
                Registration::Pointer(..) => false,
                Registration::Outside(e, ignore) => {
                    !self.contains(*e, target) && !ignore.iter().any(|&i| self.contains(i, target))
                }
            })
            .map(|(&id, _)| OverlayEvent::Listener {
                id,
                target: Some(target),
                related: None,
            })
            .collect()
    }

    /// Events for the pointer moving from `from` to `to`.
    ///
    /// Every listened element that contains `from` but not `to` gets a leave; every one
    /// that contains `to` but not `from` gets an enter.
    pub fn move_pointer(
        &self,
        from: Option<Element>,
        to: Option<Element>,
    ) -> Vec<OverlayEvent<Element>> {
        let inside = |e: Element, n: Option<Element>| n.is_some_and(|n| self.contains(e, n));
        let mut leaves = Vec::new();
        let mut enters = Vec::new();
        for (&id, reg) in &self.listeners {
            match *reg {
                Registration::Pointer(e, PointerKind::Leave) if inside(e, from) && !inside(e, to) => {
                    leaves.push(OverlayEvent::Listener {
                        id,
                        target: Some(e),
                        related: to,
                    });
                }
                Registration::Pointer(e, PointerKind::Enter) if inside(e, to) && !inside(e, from) => {
                    enters.push(OverlayEvent::Listener {
                        id,
                        target: Some(e),
                        related: from,
                    });
                }
                _ => {}
            }
        }
        leaves.extend(enters);
        leaves
    }

    /// One notification per live watch.
    pub fn geometry_changed(&self) -> Vec<OverlayEvent<Element>> {
        self.watches
            .keys()
            .map(|&id| OverlayEvent::GeometryChanged(id))
            .collect()
    }

    /// Deliver `events`, then any ticks they requested.
    pub fn pump(
        &mut self,
        overlay: &mut OverlayController<Element, Items>,
        events: Vec<OverlayEvent<Element>>,
    ) -> Effects {
        let mut effects = Effects::empty();
        for event in events {
            effects |= overlay.handle(self, event);
        }
        effects | self.settle(overlay)
    }

    /// Deliver pending ticks until none are left.
    pub fn settle(&mut self, overlay: &mut OverlayController<Element, Items>) -> Effects {
        let mut effects = Effects::empty();
        // A floating element that never lays out would request ticks forever.
        let mut budget = 8;
        while self.pending_ticks > 0 && budget > 0 {
            self.pending_ticks -= 1;
            budget -= 1;
            effects |= overlay.handle(self, OverlayEvent::Tick);
        }
        effects
    }

    /// Number of live listeners and watches.
    pub fn registrations(&self) -> (usize, usize) {
        (self.listeners.len(), self.watches.len())
    }

    /// Current rect of `e`.
    pub fn rect(&self, e: Element) -> Option<Rect> {
        self.rects.get(&e).copied()
    }

    fn id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl OverlayHost for Page {
    type Node = Element;
    type Content = Items;

    fn parent_of(&self, node: Element) -> Option<Element> {
        self.parents.get(&node).copied()
    }

    fn contains(&self, ancestor: Element, node: Element) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parents.get(&n).copied();
        }
        false
    }

    fn rect_of(&self, node: Element) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn mount(&mut self, request: MountRequest<'_, Items>) -> Element {
        let widest = request.content.iter().map(|s| s.len()).max().unwrap_or(0);
        #[allow(clippy::cast_precision_loss, reason = "item labels are short")]
        let size = Size::new(
            widest as f64 * CHAR_WIDTH,
            request.content.len() as f64 * ITEM_HEIGHT,
        );
        let root = self.add(None, request.class_name, Some(Rect::from_origin_size(Point::ZERO, size)));
        for (i, item) in request.content.iter().enumerate() {
            #[allow(clippy::cast_precision_loss, reason = "menus are short")]
            let top = i as f64 * ITEM_HEIGHT;
            let _ = self.add(
                Some(root),
                item,
                Some(Rect::new(0.0, top, size.width, top + ITEM_HEIGHT)),
            );
        }
        tracing::info!(
            portal = request.target,
            class = request.class_name,
            strategy = request.strategy.class_name(),
            transition = request.transition,
            ?root,
            "mount"
        );
        root
    }

    fn unmount(&mut self, target: &str, floating: Element) {
        let children = self.children(floating);
        for e in children.into_iter().chain([floating]) {
            self.parents.remove(&e);
            self.rects.remove(&e);
            self.labels.remove(&e);
        }
        tracing::info!(portal = target, ?floating, "unmount");
    }

    fn apply_style(&mut self, floating: Element, style: FloatingStyle) {
        let Some(rect) = self.rects.get(&floating).copied() else {
            return;
        };
        let width = style.width.unwrap_or(rect.width());
        let placed = Rect::from_origin_size((style.left, style.top), (width, rect.height()));
        let dx = placed.x0 - rect.x0;
        let dy = placed.y0 - rect.y0;
        for child in self.children(floating) {
            if let Some(r) = self.rects.get_mut(&child) {
                *r = Rect::new(r.x0 + dx, r.y0 + dy, r.x0 + dx + width, r.y1 + dy);
            }
        }
        self.rects.insert(floating, placed);
    }

    fn listen(&mut self, node: Element, kind: PointerKind) -> ListenerId {
        let id = ListenerId(self.id());
        self.listeners.insert(id, Registration::Pointer(node, kind));
        id
    }

    fn on_click_outside(&mut self, node: Element, ignore: &[Element]) -> ListenerId {
        let id = ListenerId(self.id());
        self.listeners
            .insert(id, Registration::Outside(node, ignore.to_vec()));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn auto_update(&mut self, reference: Element, floating: Element) -> SubscriptionId {
        let id = SubscriptionId(self.id());
        self.watches.insert(id, (reference, floating));
        id
    }

    fn cancel_auto_update(&mut self, id: SubscriptionId) {
        self.watches.remove(&id);
    }

    fn request_tick(&mut self) {
        self.pending_ticks += 1;
    }
}
