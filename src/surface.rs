//! Visual tree access.
//!
//! The controller never touches a real element tree. Every lookup, style
//! write, geometry read and listener registration goes through
//! [`VisualSurface`], which hosts implement over their own tree and tests
//! implement with [`FakeSurface`](crate::testing::FakeSurface).

use crate::core::Rect;
use std::fmt;
use std::rc::Rc;

/// Identifier of a node in the visual tree.
///
/// Named elements (the panel box, the selector, ...) are looked up by the id
/// configured in [`ElementIds`](crate::settings::ElementIds); event targets
/// carry whatever id the host assigns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Up,
    Enter,
    Leave,
}

/// A pointer event as delivered to a listener.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Node the event was dispatched to.
    pub target: NodeId,
    /// For enter/leave: the node the pointer moved to or came from.
    pub related_target: Option<NodeId>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, target: impl Into<NodeId>) -> Self {
        Self {
            kind,
            target: target.into(),
            related_target: None,
        }
    }

    pub fn with_related(mut self, related: impl Into<NodeId>) -> Self {
        self.related_target = Some(related.into());
        self
    }
}

/// Where a pointer listener is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerTarget {
    /// The whole document.
    Document,
    /// A single element and, for bubbling events, its descendants.
    Element(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Size change notification for an observed element.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeEntry {
    pub target: NodeId,
    pub width: f64,
    pub height: f64,
}

pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;
pub type ResizeHandler = Rc<dyn Fn(&ResizeEntry)>;

/// Narrow view of the host's element tree.
///
/// Lookups of missing nodes return `None`/`false` and writes to missing
/// nodes are ignored; absence is an expected, transient condition.
pub trait VisualSurface {
    fn exists(&self, node: &NodeId) -> bool;

    fn style(&self, node: &NodeId, property: &str) -> Option<String>;
    fn set_style(&self, node: &NodeId, property: &str, value: &str);
    fn remove_style(&self, node: &NodeId, property: &str);
    fn set_attribute(&self, node: &NodeId, name: &str, value: &str);

    fn bounding_box(&self, node: &NodeId) -> Option<Rect>;
    fn client_height(&self, node: &NodeId) -> Option<f64>;

    /// `true` when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool;
    fn has_class(&self, node: &NodeId, class: &str) -> bool;
    /// Descendants of `container` that carry `class`.
    fn descendants_with_class(&self, container: &NodeId, class: &str) -> Vec<NodeId>;

    /// Focused element of the document owning `node`.
    fn active_element(&self, node: &NodeId) -> Option<NodeId>;
    /// URI of the document owning `node`.
    fn document_uri(&self, node: &NodeId) -> Option<String>;
    fn base_uri(&self, node: &NodeId) -> Option<String>;

    /// Returns `None` when the target element does not exist.
    fn add_pointer_listener(
        &self,
        target: ListenerTarget,
        kind: PointerEventKind,
        capture: bool,
        handler: PointerHandler,
    ) -> Option<ListenerId>;
    fn remove_pointer_listener(&self, id: ListenerId);

    /// Returns `None` when the element does not exist.
    fn observe_resize(&self, node: &NodeId, handler: ResizeHandler) -> Option<ObserverId>;
    fn disconnect_observer(&self, id: ObserverId);
}
