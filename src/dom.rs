//! In-memory document tree standing in for the host page.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by [`NodeId`].
//! Detaching a node with [`Document::remove_child`] keeps it alive so it can be
//! re-attached; [`Document::clear_children`] and [`Document::set_inner_markup`]
//! discard the removed subtrees for good. Discarded slots are recycled by later
//! nodes; every slot carries a generation so handles to a discarded node keep
//! failing after its slot has been reused.

use crate::{Error, Result};
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

/// Namespace URI for SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A document shared between the host and a render entry point.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    namespace: Option<&'static str>,
    tag: String,
    attrs: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(ElementData),
    Text(String),
    /// Markup injected verbatim, never escaped
    Markup(String),
    Discarded,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    generation: u32,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Slots of discarded nodes, ready for reuse
    free: Vec<usize>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only a `<body>` element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
        };
        doc.body = doc.create_element("body");
        doc
    }

    /// Wrap a fresh document for sharing with a render entry point.
    pub fn shared() -> SharedDocument {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of slots in the arena, live or waiting for reuse.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free.pop() {
            let node = &mut self.nodes[index];
            node.data = data;
            node.parent = None;
            node.children.clear();
            return NodeId {
                index,
                generation: node.generation,
            };
        }
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            generation: 0,
        });
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        match self.nodes.get(id.index) {
            Some(node)
                if node.generation == id.generation
                    && !matches!(node.data, NodeData::Discarded) =>
            {
                Ok(node)
            }
            Some(_) => Err(Error::DocumentError(format!("node {} was discarded", id))),
            None => Err(Error::DocumentError(format!("unknown node {}", id))),
        }
    }

    fn element(&self, id: NodeId) -> Result<&ElementData> {
        match &self.node(id)?.data {
            NodeData::Element(el) => Ok(el),
            _ => Err(Error::DocumentError(format!("node {} is not an element", id))),
        }
    }

    /// Create a detached element with no namespace.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(None, tag, Vec::new())
    }

    /// Create a detached element in `namespace` carrying `attrs` in order.
    pub fn create_element_ns(
        &mut self,
        namespace: Option<&'static str>,
        tag: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        self.push(NodeData::Element(ElementData {
            namespace,
            tag: tag.to_string(),
            attrs,
        }))
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Set (or replace) an attribute on an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element(id)?;
        if let NodeData::Element(el) = &mut self.nodes[id.index].data {
            match el.attrs.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => el.attrs.push((name.to_string(), value.to_string())),
            }
        }
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .ok()?
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|el| el.tag.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    fn is_ancestor(&self, candidate: NodeId, mut of: NodeId) -> bool {
        while let Some(p) = self.nodes[of.index].parent {
            if p == candidate {
                return true;
            }
            of = p;
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::DocumentError(format!(
                "appending node {} under {} would create a cycle",
                child, parent
            )));
        }
        if let Some(old) = self.nodes[child.index].parent {
            self.nodes[old.index].children.retain(|c| *c != child);
        }
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`. The node stays usable and may be re-appended.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::DocumentError(format!(
                "node {} is not a child of {}",
                child, parent
            )));
        }
        self.nodes[parent.index].children.retain(|c| *c != child);
        self.nodes[child.index].parent = None;
        Ok(())
    }

    /// Detach `child` from `parent` and discard its whole subtree.
    pub fn discard_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.remove_child(parent, child)?;
        self.discard(vec![child]);
        Ok(())
    }

    /// Remove and discard every child subtree of `parent`. Returns how many
    /// direct children were removed.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<usize> {
        self.node(parent)?;
        let children = std::mem::take(&mut self.nodes[parent.index].children);
        let removed = children.len();
        self.discard(children);
        Ok(removed)
    }

    fn discard(&mut self, mut stack: Vec<NodeId>) {
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index];
            stack.append(&mut node.children);
            node.parent = None;
            node.data = NodeData::Discarded;
            node.generation = node.generation.wrapping_add(1);
            self.free.push(id.index);
        }
    }

    /// Replace the children of `id` with a verbatim markup fragment.
    pub fn set_inner_markup(&mut self, id: NodeId, markup: &str) -> Result<()> {
        self.element(id)?;
        self.clear_children(id)?;
        let raw = self.push(NodeData::Markup(markup.to_string()));
        self.append_child(id, raw)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else { return };
        if let NodeData::Text(t) = &node.data {
            out.push_str(t);
        }
        for c in &node.children {
            self.collect_text(*c, out);
        }
    }

    /// All descendant elements of `root` (excluding `root`) with the given tag, in document order.
    pub fn find_all(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.tag_name(id) == Some(tag) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        found
    }

    /// Serialize `id` and its subtree.
    pub fn outer_markup(&self, id: NodeId) -> Result<String> {
        self.node(id)?;
        let parent_ns = self
            .parent(id)
            .and_then(|p| self.element(p).ok())
            .and_then(|el| el.namespace);
        let mut out = String::new();
        self.write_node(id, parent_ns, &mut out);
        Ok(out)
    }

    /// Serialize the children of `id`.
    pub fn inner_markup(&self, id: NodeId) -> Result<String> {
        let ns = self.element(id)?.namespace;
        let mut out = String::new();
        for c in self.children(id) {
            self.write_node(*c, ns, &mut out);
        }
        Ok(out)
    }

    fn write_node(&self, id: NodeId, parent_ns: Option<&'static str>, out: &mut String) {
        let node = &self.nodes[id.index];
        match &node.data {
            NodeData::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                if let Some(ns) = el.namespace.filter(|ns| Some(*ns) != parent_ns) {
                    let _ = write!(out, " xmlns=\"{}\"", ns);
                }
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value, true));
                }
                out.push('>');
                for c in &node.children {
                    self.write_node(*c, el.namespace, out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
            NodeData::Text(t) => out.push_str(&escape(t, false)),
            NodeData::Markup(m) => out.push_str(m),
            NodeData::Discarded => {}
        }
    }
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
