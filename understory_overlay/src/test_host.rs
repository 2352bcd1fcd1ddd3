// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording in-memory host used by unit tests.
//!
//! The default scene is a component `Node(1)` inside a 100×40 button `Node(2)` at the origin,
//! with an icon `Node(3)` inside the button and an unrelated element `Node(50)`. Floating
//! roots are numbered from `Node(100)` in steps of ten; each gets one content child at
//! `root + 1`.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::host::{FloatingStyle, MountRequest, OverlayHost};
use crate::types::{ListenerId, OverlayEvent, PointerKind, SubscriptionId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Node(pub(crate) u32);

pub(crate) const COMPONENT: Node = Node(1);
pub(crate) const BUTTON: Node = Node(2);
pub(crate) const ICON: Node = Node(3);
pub(crate) const ELSEWHERE: Node = Node(50);

#[derive(Clone, Debug)]
pub(crate) struct MountRecord {
    pub(crate) target: String,
    pub(crate) content: &'static str,
    pub(crate) class_name: String,
    pub(crate) strategy_class: &'static str,
    pub(crate) transition: Option<String>,
}

#[derive(Clone, Debug)]
enum Registration {
    Pointer(Node, PointerKind),
    Outside(Node, Vec<Node>),
}

#[derive(Debug)]
pub(crate) struct TestHost {
    parents: BTreeMap<Node, Node>,
    rects: BTreeMap<Node, Rect>,
    pub(crate) viewport: Rect,
    pub(crate) offset_parent: Point,
    /// Size given to newly mounted floating roots; `Size::ZERO` means "not laid out".
    pub(crate) floating_size: Size,
    next_id: u64,
    next_floating: u32,
    mounted: Vec<Node>,
    mounts: Vec<MountRecord>,
    unmounts: Vec<(String, Node)>,
    styles: Vec<(Node, FloatingStyle)>,
    listeners: BTreeMap<ListenerId, Registration>,
    subscriptions: BTreeMap<SubscriptionId, (Node, Node)>,
    ticks: usize,
    calls: usize,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        let mut parents = BTreeMap::new();
        parents.insert(COMPONENT, BUTTON);
        parents.insert(ICON, BUTTON);
        let mut rects = BTreeMap::new();
        rects.insert(BUTTON, Rect::new(0.0, 0.0, 100.0, 40.0));
        rects.insert(ICON, Rect::new(4.0, 4.0, 20.0, 20.0));
        rects.insert(ELSEWHERE, Rect::new(300.0, 300.0, 340.0, 320.0));
        Self {
            parents,
            rects,
            viewport: Rect::new(-200.0, -200.0, 1000.0, 800.0),
            offset_parent: Point::ZERO,
            floating_size: Size::new(80.0, 30.0),
            next_id: 1,
            next_floating: 100,
            mounted: Vec::new(),
            mounts: Vec::new(),
            unmounts: Vec::new(),
            styles: Vec::new(),
            listeners: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
            ticks: 0,
            calls: 0,
        }
    }

    /// A component with no parent container.
    pub(crate) fn orphan() -> (Self, Node) {
        let mut host = Self::new();
        host.parents.remove(&COMPONENT);
        (host, COMPONENT)
    }

    pub(crate) fn set_rect(&mut self, node: Node, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub(crate) fn clear_rect(&mut self, node: Node) {
        self.rects.remove(&node);
    }

    pub(crate) fn content_of(floating: Node) -> Node {
        Node(floating.0 + 1)
    }

    pub(crate) fn mounted(&self) -> &[Node] {
        &self.mounted
    }

    pub(crate) fn last_mount(&self) -> Option<&MountRecord> {
        self.mounts.last()
    }

    pub(crate) fn mount_count(&self) -> usize {
        self.mounts.len()
    }

    pub(crate) fn unmounts(&self) -> &[(String, Node)] {
        &self.unmounts
    }

    pub(crate) fn last_style(&self) -> Option<FloatingStyle> {
        self.styles.last().map(|&(_, style)| style)
    }

    pub(crate) fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub(crate) fn ticks(&self) -> usize {
        self.ticks
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls
    }

    pub(crate) fn live_listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn live_subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub(crate) fn last_subscription(&self) -> Option<SubscriptionId> {
        self.subscriptions.keys().next_back().copied()
    }

    pub(crate) fn listener_on(&self, node: Node, kind: PointerKind) -> Option<ListenerId> {
        self.listeners.iter().find_map(|(&id, reg)| match reg {
            Registration::Pointer(n, k) if *n == node && *k == kind => Some(id),
            _ => None,
        })
    }

    /// Ignore-list length of the live outside-click listener, if there is one.
    pub(crate) fn outside_ignore_len(&self) -> Option<usize> {
        self.listeners.values().find_map(|reg| match reg {
            Registration::Outside(_, ignore) => Some(ignore.len()),
            Registration::Pointer(..) => None,
        })
    }

    /// Events a pointer press on `target` dispatches to live listeners.
    pub(crate) fn click(&self, target: Node) -> Vec<OverlayEvent<Node>> {
        self.listeners
            .iter()
            .filter(|(_, reg)| match reg {
                Registration::Pointer(node, PointerKind::Click) => self.contains(*node, target),
                Registration::Pointer(..) => false,
                Registration::Outside(node, ignore) => {
                    !self.contains(*node, target)
                        && !ignore.iter().any(|&i| self.contains(i, target))
                }
            })
            .map(|(&id, _)| OverlayEvent::Listener {
                id,
                target: Some(target),
                related: None,
            })
            .collect()
    }

    /// Events for the pointer entering `node` from `from`.
    pub(crate) fn enter(&self, node: Node, from: Option<Node>) -> Vec<OverlayEvent<Node>> {
        self.pointer(node, PointerKind::Enter, from)
    }

    /// Events for the pointer leaving `node` for `to`.
    pub(crate) fn leave(&self, node: Node, to: Option<Node>) -> Vec<OverlayEvent<Node>> {
        self.pointer(node, PointerKind::Leave, to)
    }

    /// One notification per live auto-update watch.
    pub(crate) fn geometry_changed(&self) -> Vec<OverlayEvent<Node>> {
        self.subscriptions
            .keys()
            .map(|&id| OverlayEvent::GeometryChanged(id))
            .collect()
    }

    fn pointer(&self, node: Node, kind: PointerKind, related: Option<Node>) -> Vec<OverlayEvent<Node>> {
        self.listeners
            .iter()
            .filter(|(_, reg)| matches!(reg, Registration::Pointer(n, k) if *n == node && *k == kind))
            .map(|(&id, _)| OverlayEvent::Listener {
                id,
                target: Some(node),
                related,
            })
            .collect()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl OverlayHost for TestHost {
    type Node = Node;
    type Content = &'static str;

    fn parent_of(&self, node: Node) -> Option<Node> {
        self.parents.get(&node).copied()
    }

    fn contains(&self, ancestor: Node, node: Node) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parents.get(&n).copied();
        }
        false
    }

    fn rect_of(&self, node: Node) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn offset_parent(&self, _floating: Node) -> Point {
        self.offset_parent
    }

    fn mount(&mut self, request: MountRequest<'_, &'static str>) -> Node {
        self.calls += 1;
        let root = Node(self.next_floating);
        self.next_floating += 10;
        self.parents.insert(Self::content_of(root), root);
        self.rects
            .insert(root, Rect::from_origin_size(Point::ZERO, self.floating_size));
        self.mounted.push(root);
        self.mounts.push(MountRecord {
            target: request.target.to_string(),
            content: *request.content,
            class_name: request.class_name.to_string(),
            strategy_class: request.strategy.class_name(),
            transition: request.transition.map(ToString::to_string),
        });
        root
    }

    fn unmount(&mut self, target: &str, floating: Node) {
        self.calls += 1;
        self.mounted.retain(|&n| n != floating);
        self.rects.remove(&floating);
        self.unmounts.push((target.to_string(), floating));
    }

    fn apply_style(&mut self, floating: Node, style: FloatingStyle) {
        self.calls += 1;
        if let Some(rect) = self.rects.get_mut(&floating) {
            let width = style.width.unwrap_or(rect.width());
            let origin = Point::new(
                style.left + self.offset_parent.x,
                style.top + self.offset_parent.y,
            );
            *rect = Rect::from_origin_size(origin, Size::new(width, rect.height()));
        }
        self.styles.push((floating, style));
    }

    fn listen(&mut self, node: Node, kind: PointerKind) -> ListenerId {
        self.calls += 1;
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, Registration::Pointer(node, kind));
        id
    }

    fn on_click_outside(&mut self, node: Node, ignore: &[Node]) -> ListenerId {
        self.calls += 1;
        let id = ListenerId(self.next_id());
        self.listeners
            .insert(id, Registration::Outside(node, ignore.to_vec()));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.calls += 1;
        self.listeners.remove(&id);
    }

    fn auto_update(&mut self, reference: Node, floating: Node) -> SubscriptionId {
        self.calls += 1;
        let id = SubscriptionId(self.next_id());
        self.subscriptions.insert(id, (reference, floating));
        id
    }

    fn cancel_auto_update(&mut self, id: SubscriptionId) {
        self.calls += 1;
        self.subscriptions.remove(&id);
    }

    fn request_tick(&mut self) {
        self.calls += 1;
        self.ticks += 1;
    }
}
