use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::DomError;
use crate::event::{EventKind, Listener};
use crate::node::{Element, NodeId, NodeKind};

/// Loading state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Structure still being built; ready handlers are queued.
    Loading,
    /// Structure fully parsed; ready handlers have fired.
    Complete,
}

type ReadyHandler = Box<dyn FnOnce(&mut Document)>;

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attrs: Vec::new(),
            styles: Vec::new(),
        }
    }
}

/// A live, mutable element tree.
///
/// Besides the tree itself the document owns two side-tables keyed by node:
/// event listeners and typed per-node data. Both are dropped when the node
/// is removed, so their entries live exactly as long as the element does.
pub struct Document {
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
    pub(crate) listeners: HashMap<NodeId, Vec<(EventKind, Listener)>>,
    data: HashMap<(NodeId, TypeId), Box<dyn Any>>,
    ready_state: ReadyState,
    ready_handlers: Vec<ReadyHandler>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.iter().filter(|n| n.is_some()).count())
            .field("listeners", &self.listeners.len())
            .field("data", &self.data.len())
            .field("ready_state", &self.ready_state)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(NodeData::new(NodeKind::Document))],
            root: NodeId(0),
            listeners: HashMap::new(),
            data: HashMap::new(),
            ready_state: ReadyState::Loading,
            ready_handlers: Vec::new(),
        }
    }

    /// Build a document whose root holds `element`.
    pub fn from_element(element: Element) -> Self {
        let mut doc = Self::new();
        let root = doc.root;
        doc.build(element, Some(root));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a detached subtree from `element`.
    pub fn create(&mut self, element: Element) -> NodeId {
        self.build(element, None)
    }

    /// Build `element` and append it as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        self.check_container(parent)?;
        Ok(self.build(element, Some(parent)))
    }

    fn build(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut data = NodeData::new(element.kind);
        data.parent = parent;
        data.attrs = element.attrs;
        data.styles = element.styles;
        self.nodes.push(Some(data));

        if let Some(parent) = parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.push(id);
            }
        }

        for child in element.children {
            self.build(child, Some(id));
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn check_container(&self, id: NodeId) -> Result<(), DomError> {
        match self.node(id).map(|n| &n.kind) {
            None => Err(DomError::Missing(id)),
            Some(NodeKind::Text(_)) => Err(DomError::NotAContainer(id)),
            Some(_) => Ok(()),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether `id` still resolves to a node (attached or not).
    pub fn exists(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.exists(id) && (id == self.root || self.contains(self.root, id))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?
            .attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)?
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// All child nodes, text nodes included.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Element children carrying `tag`.
    pub fn children_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.tag(c).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Nearest inclusive ancestor with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if self.tag(node).is_some_and(|t| t.eq_ignore_ascii_case(tag)) {
                return Some(node);
            }
            cursor = self.parent(node);
        }
        None
    }

    /// Whether `node` is a strict descendant of `ancestor`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Strict descendants of `id` in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Rendered text of a subtree: descendant text concatenated, runs of
    /// ASCII whitespace collapsed to one space and the result trimmed.
    /// Non-breaking spaces are kept.
    pub fn text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        if let Some(NodeKind::Text(t)) = self.kind(id) {
            raw.push_str(t);
        }
        for node in self.descendants(id) {
            if let Some(NodeKind::Text(t)) = self.kind(node) {
                raw.push_str(t);
            }
        }
        raw.split(|c: char| c.is_ascii_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<(), DomError> {
        let node = self.node_mut(id).ok_or(DomError::Missing(id))?;
        let value = value.into();
        match node.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value,
            None => node.attrs.push((name.to_ascii_lowercase(), value)),
        }
        Ok(())
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let classes = match self.attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", classes)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) -> Result<(), DomError> {
        let node = self.node_mut(id).ok_or(DomError::Missing(id))?;
        let value = value.into();
        match node.styles.iter_mut().find(|(k, _)| k == property) {
            Some(slot) => slot.1 = value,
            None => node.styles.push((property.to_string(), value)),
        }
        Ok(())
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_move(child, parent)?;
        self.detach(child);
        self.attach_at(parent, child, None);
        Ok(())
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_move(child, parent)?;
        self.detach(child);
        self.attach_at(parent, child, Some(0));
        Ok(())
    }

    /// Move `node` so it directly follows `anchor` under `anchor`'s parent.
    /// The node keeps its identity, data and listeners.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> Result<(), DomError> {
        if anchor == node {
            return Ok(());
        }
        let parent = self.parent(anchor).ok_or(DomError::NoParent(anchor))?;
        self.check_move(node, parent)?;
        self.detach(node);
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == anchor)
            .map(|i| i + 1);
        self.attach_at(parent, node, position);
        Ok(())
    }

    /// Move `node` so it directly precedes `anchor` under `anchor`'s parent.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) -> Result<(), DomError> {
        if anchor == node {
            return Ok(());
        }
        let parent = self.parent(anchor).ok_or(DomError::NoParent(anchor))?;
        self.check_move(node, parent)?;
        self.detach(node);
        let position = self.children(parent).iter().position(|&c| c == anchor);
        self.attach_at(parent, node, position);
        Ok(())
    }

    /// Detach `id` and destroy its subtree, dropping listeners and data.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if !self.exists(id) {
            return Err(DomError::Missing(id));
        }
        if id == self.root {
            return Err(DomError::NoParent(id));
        }
        self.detach(id);

        let mut doomed: HashSet<NodeId> = self.descendants(id).into_iter().collect();
        doomed.insert(id);
        for node in &doomed {
            self.listeners.remove(node);
            self.nodes[node.0] = None;
        }
        self.data.retain(|(owner, _), _| !doomed.contains(owner));
        Ok(())
    }

    fn check_move(&self, node: NodeId, target: NodeId) -> Result<(), DomError> {
        if !self.exists(node) {
            return Err(DomError::Missing(node));
        }
        self.check_container(target)?;
        if node == self.root || node == target || self.contains(node, target) {
            return Err(DomError::Cycle { node, target });
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != id);
            }
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn attach_at(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        if let Some(p) = self.node_mut(parent) {
            match position {
                Some(i) if i <= p.children.len() => p.children.insert(i, child),
                _ => p.children.push(child),
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    // =========================================================================
    // Per-node data
    // =========================================================================

    /// Store `value` on `id`, replacing any previous value of the same type.
    pub fn set_data<T: Any>(&mut self, id: NodeId, value: T) -> Result<(), DomError> {
        if !self.exists(id) {
            return Err(DomError::Missing(id));
        }
        self.data.insert((id, TypeId::of::<T>()), Box::new(value));
        Ok(())
    }

    pub fn data<T: Any>(&self, id: NodeId) -> Option<&T> {
        self.data
            .get(&(id, TypeId::of::<T>()))
            .and_then(|b| b.downcast_ref::<T>())
    }

    pub fn data_mut<T: Any>(&mut self, id: NodeId) -> Option<&mut T> {
        self.data
            .get_mut(&(id, TypeId::of::<T>()))
            .and_then(|b| b.downcast_mut::<T>())
    }

    /// Get the value of type `T` on `id`, creating a default one first.
    pub fn data_or_default<T: Any + Default>(&mut self, id: NodeId) -> Result<&mut T, DomError> {
        if !self.exists(id) {
            return Err(DomError::Missing(id));
        }
        self.data
            .entry((id, TypeId::of::<T>()))
            .or_insert_with(|| Box::new(T::default()) as Box<dyn Any>)
            .downcast_mut::<T>()
            .ok_or(DomError::Missing(id))
    }

    pub fn take_data<T: Any>(&mut self, id: NodeId) -> Option<T> {
        self.data
            .remove(&(id, TypeId::of::<T>()))
            .and_then(|b| b.downcast::<T>().ok())
            .map(|b| *b)
    }

    // =========================================================================
    // Ready state
    // =========================================================================

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Run `handler` once the structure is complete; immediately if it
    /// already is.
    pub fn on_ready<F>(&mut self, handler: F)
    where
        F: FnOnce(&mut Document) + 'static,
    {
        match self.ready_state {
            ReadyState::Complete => handler(self),
            ReadyState::Loading => self.ready_handlers.push(Box::new(handler)),
        }
    }

    /// Signal that the structure is complete. Fires queued ready handlers
    /// exactly once; later calls are no-ops.
    pub fn mark_ready(&mut self) {
        if self.ready_state == ReadyState::Complete {
            return;
        }
        self.ready_state = ReadyState::Complete;
        let handlers = std::mem::take(&mut self.ready_handlers);
        log::debug!("[document] ready, running {} handler(s)", handlers.len());
        for handler in handlers {
            handler(self);
        }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// HTML serialization of `id` and its subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(t) => escape_into(t, out),
            NodeKind::Document => {
                for &child in &node.children {
                    self.write_html(child, out);
                }
            }
            NodeKind::Element { tag } => {
                out.push('<');
                out.push_str(tag);
                for (k, v) in &node.attrs {
                    out.push(' ');
                    out.push_str(k);
                    if !v.is_empty() {
                        out.push_str("=\"");
                        escape_into(v, out);
                        out.push('"');
                    }
                }
                if !node.styles.is_empty() {
                    let style = node
                        .styles
                        .iter()
                        .map(|(k, v)| format!("{k}: {v};"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    out.push_str(" style=\"");
                    escape_into(&style, out);
                    out.push('"');
                }
                out.push('>');
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
