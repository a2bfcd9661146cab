//! In-memory visual surface for tests and headless hosts.
//!
//! [`FakeSurface`] keeps a node tree with classes, styles, attributes and
//! geometry, records every listener and observer registration, and can
//! dispatch pointer and resize events the way a browser would.

use crate::core::{parse_px, Rect};
use crate::surface::{
    ListenerId, ListenerTarget, NodeId, ObserverId, PointerEvent, PointerEventKind,
    PointerHandler, ResizeEntry, ResizeHandler, VisualSurface,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

pub const DEFAULT_DOCUMENT_URI: &str = "chrome://browser/content/browser.xhtml";

#[derive(Default)]
struct FakeNode {
    parent: Option<NodeId>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    rect: Rect,
    document_uri: Option<String>,
    base_uri: Option<String>,
}

struct Listener {
    id: ListenerId,
    target: ListenerTarget,
    kind: PointerEventKind,
    capture: bool,
    handler: PointerHandler,
}

struct Observer {
    id: ObserverId,
    node: NodeId,
    handler: ResizeHandler,
}

#[derive(Default)]
struct FakeTree {
    nodes: HashMap<NodeId, FakeNode>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
    active_element: Option<NodeId>,
    next_id: u64,
}

impl FakeTree {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// `node` followed by each of its ancestors.
    fn ancestry(&self, node: &NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(node).map(|_| node.clone());
        while let Some(id) = current {
            current = self.nodes.get(&id).and_then(|n| n.parent.clone());
            path.push(id);
        }
        path
    }

    fn inherited(&self, node: &NodeId, pick: impl Fn(&FakeNode) -> Option<&String>) -> Option<String> {
        self.ancestry(node)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .find_map(|n| pick(n).cloned())
    }
}

/// Shared, cloneable fake element tree.
///
/// # Example
///
/// ```rust
/// use floatdock::testing::FakeSurface;
/// use floatdock::surface::{NodeId, VisualSurface};
///
/// let surface = FakeSurface::new();
/// surface.insert("panel", None).insert("handle", Some("panel"));
///
/// assert!(surface.contains(&NodeId::new("panel"), &NodeId::new("handle")));
/// assert!(!surface.contains(&NodeId::new("handle"), &NodeId::new("panel")));
/// ```
#[derive(Clone, Default)]
pub struct FakeSurface {
    tree: Rc<RefCell<FakeTree>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or re-parent) a node.
    pub fn insert(&self, id: &str, parent: Option<&str>) -> &Self {
        let mut tree = self.tree.borrow_mut();
        let node = tree.nodes.entry(NodeId::new(id)).or_default();
        node.parent = parent.map(NodeId::new);
        self
    }

    /// Remove a node and all of its descendants.
    pub fn remove(&self, id: &str) -> &Self {
        let root = NodeId::new(id);
        let mut tree = self.tree.borrow_mut();
        let doomed: Vec<NodeId> = tree
            .nodes
            .keys()
            .filter(|candidate| tree.ancestry(candidate).contains(&root))
            .cloned()
            .collect();
        for id in doomed {
            tree.nodes.remove(&id);
        }
        self
    }

    pub fn add_class(&self, id: &str, class: &str) -> &Self {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&NodeId::new(id)) {
            node.classes.push(class.to_string());
        }
        self
    }

    pub fn set_rect(&self, id: &str, rect: Rect) -> &Self {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&NodeId::new(id)) {
            node.rect = rect;
        }
        self
    }

    pub fn set_document_uri(&self, id: &str, uri: &str) -> &Self {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&NodeId::new(id)) {
            node.document_uri = Some(uri.to_string());
        }
        self
    }

    pub fn set_base_uri(&self, id: &str, uri: &str) -> &Self {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&NodeId::new(id)) {
            node.base_uri = Some(uri.to_string());
        }
        self
    }

    pub fn set_active_element(&self, id: Option<&str>) -> &Self {
        self.tree.borrow_mut().active_element = id.map(NodeId::new);
        self
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(&NodeId::new(id))
            .and_then(|n| n.attributes.get(name).cloned())
    }

    /// Style value shortcut for assertions.
    pub fn style_of(&self, id: &str, property: &str) -> Option<String> {
        self.style(&NodeId::new(id), property)
    }

    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub fn listener_count_on(&self, target: &ListenerTarget, kind: PointerEventKind) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind && &l.target == target)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.tree.borrow().observers.len()
    }

    /// Dispatch a bubbling pointer-down at `target`.
    pub fn pointer_down(&self, target: &str) {
        self.dispatch_bubbling(PointerEvent::new(PointerEventKind::Down, target));
    }

    /// Dispatch a bubbling pointer-up at `target`.
    pub fn pointer_up(&self, target: &str) {
        self.dispatch_bubbling(PointerEvent::new(PointerEventKind::Up, target));
    }

    pub fn pointer_enter(&self, element: &str) {
        self.dispatch_direct(PointerEvent::new(PointerEventKind::Enter, element));
    }

    /// Pointer leaves `element` towards `to` (`None`: out of the window).
    pub fn pointer_leave(&self, element: &str, to: Option<&str>) {
        let event = PointerEvent::new(PointerEventKind::Leave, element);
        self.dispatch_direct(match to {
            Some(to) => event.with_related(to),
            None => event,
        });
    }

    /// Resize an element and notify its observers.
    pub fn resize(&self, id: &str, width: f64, height: f64) {
        let node = NodeId::new(id);
        let handlers: Vec<ResizeHandler> = {
            let mut tree = self.tree.borrow_mut();
            match tree.nodes.get_mut(&node) {
                Some(n) => {
                    n.rect = n.rect.with_width(width).with_height(height);
                }
                None => return,
            }
            tree.observers
                .iter()
                .filter(|o| o.node == node)
                .map(|o| Rc::clone(&o.handler))
                .collect()
        };
        let entry = ResizeEntry {
            target: node,
            width,
            height,
        };
        for handler in handlers {
            handler(&entry);
        }
    }

    // Capture listeners on the document, then element listeners from the
    // target outwards, then bubbling document listeners.
    fn dispatch_bubbling(&self, event: PointerEvent) {
        let handlers: Vec<PointerHandler> = {
            let tree = self.tree.borrow();
            let path = tree.ancestry(&event.target);
            let matching = |l: &&Listener| l.kind == event.kind;

            let mut handlers: Vec<PointerHandler> = tree
                .listeners
                .iter()
                .filter(matching)
                .filter(|l| l.target == ListenerTarget::Document && l.capture)
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for node in &path {
                handlers.extend(
                    tree.listeners
                        .iter()
                        .filter(matching)
                        .filter(|l| l.target == ListenerTarget::Element(node.clone()))
                        .map(|l| Rc::clone(&l.handler)),
                );
            }
            handlers.extend(
                tree.listeners
                    .iter()
                    .filter(matching)
                    .filter(|l| l.target == ListenerTarget::Document && !l.capture)
                    .map(|l| Rc::clone(&l.handler)),
            );
            handlers
        };
        for handler in handlers {
            handler(&event);
        }
    }

    fn dispatch_direct(&self, event: PointerEvent) {
        let target = ListenerTarget::Element(event.target.clone());
        let handlers: Vec<PointerHandler> = self
            .tree
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == event.kind && l.target == target)
            .map(|l| Rc::clone(&l.handler))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }
}

impl VisualSurface for FakeSurface {
    fn exists(&self, node: &NodeId) -> bool {
        self.tree.borrow().nodes.contains_key(node)
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .and_then(|n| n.styles.get(property).cloned())
    }

    // Width and height writes also resize the box, as layout would.
    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(node) {
            n.styles.insert(property.to_string(), value.to_string());
            match (property, parse_px(value)) {
                ("width", Some(width)) => n.rect = n.rect.with_width(width),
                ("height", Some(height)) => n.rect = n.rect.with_height(height),
                _ => {}
            }
        }
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(node) {
            n.styles.remove(property);
        }
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn bounding_box(&self, node: &NodeId) -> Option<Rect> {
        self.tree.borrow().nodes.get(node).map(|n| n.rect)
    }

    fn client_height(&self, node: &NodeId) -> Option<f64> {
        self.bounding_box(node).map(|r| r.height)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.tree.borrow().ancestry(node).contains(ancestor)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn descendants_with_class(&self, container: &NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut found: Vec<NodeId> = tree
            .nodes
            .iter()
            .filter(|(id, n)| {
                *id != container
                    && n.classes.iter().any(|c| c == class)
                    && tree.ancestry(id).contains(container)
            })
            .map(|(id, _)| id.clone())
            .collect();
        found.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        found
    }

    fn active_element(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        if tree.nodes.contains_key(node) {
            tree.active_element.clone()
        } else {
            None
        }
    }

    fn document_uri(&self, node: &NodeId) -> Option<String> {
        let tree = self.tree.borrow();
        if !tree.nodes.contains_key(node) {
            return None;
        }
        Some(
            tree.inherited(node, |n| n.document_uri.as_ref())
                .unwrap_or_else(|| DEFAULT_DOCUMENT_URI.to_string()),
        )
    }

    fn base_uri(&self, node: &NodeId) -> Option<String> {
        let tree = self.tree.borrow();
        if !tree.nodes.contains_key(node) {
            return None;
        }
        tree.inherited(node, |n| n.base_uri.as_ref().or(n.document_uri.as_ref()))
            .or_else(|| Some(DEFAULT_DOCUMENT_URI.to_string()))
    }

    fn add_pointer_listener(
        &self,
        target: ListenerTarget,
        kind: PointerEventKind,
        capture: bool,
        handler: PointerHandler,
    ) -> Option<ListenerId> {
        let mut tree = self.tree.borrow_mut();
        if let ListenerTarget::Element(node) = &target {
            if !tree.nodes.contains_key(node) {
                return None;
            }
        }
        let id = ListenerId(tree.next_id());
        tree.listeners.push(Listener {
            id,
            target,
            kind,
            capture,
            handler,
        });
        Some(id)
    }

    fn remove_pointer_listener(&self, id: ListenerId) {
        self.tree.borrow_mut().listeners.retain(|l| l.id != id);
    }

    fn observe_resize(&self, node: &NodeId, handler: ResizeHandler) -> Option<ObserverId> {
        let mut tree = self.tree.borrow_mut();
        if !tree.nodes.contains_key(node) {
            return None;
        }
        let id = ObserverId(tree.next_id());
        tree.observers.push(Observer {
            id,
            node: node.clone(),
            handler,
        });
        Some(id)
    }

    fn disconnect_observer(&self, id: ObserverId) {
        self.tree.borrow_mut().observers.retain(|o| o.id != id);
    }
}

impl fmt::Debug for FakeSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("FakeSurface")
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .field("observers", &tree.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn bubbling_reaches_ancestors_after_capture() {
        let surface = FakeSurface::new();
        surface.insert("root", None).insert("leaf", Some("root"));
        let order = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&order);
        surface.add_pointer_listener(
            ListenerTarget::Element(NodeId::new("root")),
            PointerEventKind::Down,
            false,
            Rc::new(move |_| log.borrow_mut().push("root")),
        );
        let log = Rc::clone(&order);
        surface.add_pointer_listener(
            ListenerTarget::Document,
            PointerEventKind::Down,
            true,
            Rc::new(move |_| log.borrow_mut().push("capture")),
        );

        surface.pointer_down("leaf");
        assert_eq!(*order.borrow(), vec!["capture", "root"]);
    }

    #[test]
    fn listener_on_missing_element_is_refused() {
        let surface = FakeSurface::new();
        let id = surface.add_pointer_listener(
            ListenerTarget::Element(NodeId::new("ghost")),
            PointerEventKind::Enter,
            false,
            Rc::new(|_| {}),
        );
        assert!(id.is_none());
        assert_eq!(surface.total_listeners(), 0);
    }

    #[test]
    fn handler_may_remove_itself() {
        let surface = FakeSurface::new();
        surface.insert("root", None);
        let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let inner_surface = surface.clone();
        let inner_slot = Rc::clone(&slot);
        let id = surface.add_pointer_listener(
            ListenerTarget::Document,
            PointerEventKind::Up,
            false,
            Rc::new(move |_| {
                if let Some(id) = inner_slot.take() {
                    inner_surface.remove_pointer_listener(id);
                }
            }),
        );
        slot.set(id);

        surface.pointer_up("root");
        assert_eq!(surface.listener_count(PointerEventKind::Up), 0);
    }

    #[test]
    fn resize_updates_geometry_and_notifies() {
        let surface = FakeSurface::new();
        surface.insert("browser", None);
        let seen = Rc::new(Cell::new(0.0));

        let out = Rc::clone(&seen);
        surface.observe_resize(&NodeId::new("browser"), Rc::new(move |e| out.set(e.height)));
        surface.resize("browser", 1000.0, 640.0);

        assert_eq!(seen.get(), 640.0);
        assert_eq!(surface.client_height(&NodeId::new("browser")), Some(640.0));
    }

    #[test]
    fn remove_drops_descendants() {
        let surface = FakeSurface::new();
        surface.insert("a", None).insert("b", Some("a")).insert("c", Some("b"));

        surface.remove("b");
        assert!(surface.exists(&NodeId::new("a")));
        assert!(!surface.exists(&NodeId::new("c")));
    }

    #[test]
    fn uris_inherit_from_ancestors() {
        let surface = FakeSurface::new();
        surface
            .insert("frame", None)
            .insert("inner", Some("frame"))
            .set_document_uri("frame", "chrome://browser/content/places/historySidebar.xhtml");

        assert_eq!(
            surface.document_uri(&NodeId::new("inner")).as_deref(),
            Some("chrome://browser/content/places/historySidebar.xhtml")
        );
        assert_eq!(
            surface.document_uri(&NodeId::new("nowhere")),
            None
        );
    }
}
