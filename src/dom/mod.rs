//! Page snapshots: a DOM tree captured from a rendering host together with the
//! computed layout of every element.
//!
//! The browser serializes its live document into a flat [`PageCapture`]
//! (document order, each node pointing at its parent) and
//! [`PageSnapshot::from_capture`] rebuilds the tree. Extraction only ever reads
//! a snapshot, so tests can build synthetic trees with [`PageSnapshot::new`],
//! [`PageSnapshot::push_element`] and [`PageSnapshot::push_text`].

pub mod visibility;

pub use visibility::{ComputedLayout, Visibility};

use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`PageSnapshot`]
pub type NodeId = usize;

/// Computed style and box size of an element as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Computed `display` value
    pub display: String,

    /// Computed `visibility` value
    pub visibility: String,

    /// Rendered box width in CSS pixels
    pub width: f64,

    /// Rendered box height in CSS pixels
    pub height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Layout {
    /// A laid-out block of the given size
    pub fn block(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// An element removed from layout with `display: none`
    pub fn hidden() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }
}

/// Element data kept from the host DOM
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,

    /// Class list
    pub classes: Vec<String>,

    /// `role` attribute, if any
    pub role: Option<String>,

    /// Computed layout
    pub layout: Layout,
}

impl ElementData {
    /// Create element data for a tag with the given layout
    pub fn new(tag: &str, layout: Layout) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            layout,
            ..Self::default()
        }
    }

    /// Add a class name
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set the `role` attribute
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    /// Whether the class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Payload of a snapshot node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

/// A node and its links in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// A node as serialized by the capture script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CapturedNode {
    Element {
        parent: Option<NodeId>,
        tag: String,
        #[serde(default)]
        classes: Vec<String>,
        #[serde(default)]
        role: Option<String>,
        display: String,
        visibility: String,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },
    Text {
        parent: Option<NodeId>,
        text: String,
    },
}

/// Flat serialized form of a page, as returned by the capture script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    pub title: String,
    pub url: String,
    pub nodes: Vec<CapturedNode>,
}

/// DOM tree of one rendered page
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    title: String,
    url: String,
    nodes: Vec<DomNode>,
}

impl PageSnapshot {
    /// Create an empty snapshot for a page
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            nodes: Vec::new(),
        }
    }

    /// Rebuild a tree from its captured flat form
    ///
    /// Every node must point at an element that appears earlier in the list;
    /// the first node must be the root element.
    pub fn from_capture(capture: PageCapture) -> Result<Self> {
        let mut snapshot = Self::new(&capture.title, &capture.url);

        for (index, node) in capture.nodes.into_iter().enumerate() {
            match node {
                CapturedNode::Element {
                    parent,
                    tag,
                    classes,
                    role,
                    display,
                    visibility,
                    width,
                    height,
                } => {
                    snapshot.check_parent(index, parent)?;
                    let element = ElementData {
                        tag: tag.to_ascii_lowercase(),
                        classes,
                        role,
                        layout: Layout {
                            display,
                            visibility,
                            width,
                            height,
                        },
                    };
                    snapshot.push_element(parent, element);
                }
                CapturedNode::Text { parent, text } => {
                    let parent = parent.ok_or_else(|| {
                        ScrapeError::InvalidSnapshot(format!("text node {index} has no parent"))
                    })?;
                    snapshot.check_parent(index, Some(parent))?;
                    snapshot.push_text(parent, &text);
                }
            }
        }

        ::log::debug!(
            "Rebuilt snapshot of {} with {} nodes",
            snapshot.url,
            snapshot.nodes.len()
        );
        Ok(snapshot)
    }

    /// Flatten the tree back into its captured form
    pub fn to_capture(&self) -> PageCapture {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut positions = vec![0; self.nodes.len()];

        if let Some(root) = self.root() {
            for id in self.descendants(root) {
                positions[id] = nodes.len();
                let node = &self.nodes[id];
                let parent = node.parent.map(|p| positions[p]);
                nodes.push(match &node.data {
                    NodeData::Element(element) => CapturedNode::Element {
                        parent,
                        tag: element.tag.clone(),
                        classes: element.classes.clone(),
                        role: element.role.clone(),
                        display: element.layout.display.clone(),
                        visibility: element.layout.visibility.clone(),
                        width: element.layout.width,
                        height: element.layout.height,
                    },
                    NodeData::Text(text) => CapturedNode::Text {
                        parent,
                        text: text.clone(),
                    },
                });
            }
        }

        PageCapture {
            title: self.title.clone(),
            url: self.url.clone(),
            nodes,
        }
    }

    fn check_parent(&self, index: usize, parent: Option<NodeId>) -> Result<()> {
        match parent {
            None if self.nodes.is_empty() => Ok(()),
            None => Err(ScrapeError::InvalidSnapshot(format!(
                "node {index} has no parent but the root already exists"
            ))),
            Some(parent) if self.element(parent).is_some() => Ok(()),
            Some(parent) => Err(ScrapeError::InvalidSnapshot(format!(
                "node {index} points at {parent}, which is not an earlier element"
            ))),
        }
    }

    /// Append an element; `None` as parent makes it the root
    pub fn push_element(&mut self, parent: Option<NodeId>, element: ElementData) -> NodeId {
        self.push_node(parent, NodeData::Element(element))
    }

    /// Append a text node under `parent`
    pub fn push_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(Some(parent), NodeData::Text(text.to_string()))
    }

    fn push_node(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(DomNode {
            parent,
            children: Vec::new(),
            data,
        });
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    /// Document title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Page URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of nodes in the snapshot
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the snapshot has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The document element
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|_| 0)
    }

    /// The first `body` element
    pub fn body(&self) -> Option<NodeId> {
        let root = self.root()?;
        self.descendants(root)
            .find(|&id| self.element(id).is_some_and(|el| el.tag == "body"))
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    /// Element data of a node, or `None` for text nodes and unknown IDs
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    /// Text of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }

    /// Lowercase tag name of an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Nearest element ancestor of a node
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(id)?.parent?;
        self.element(parent).map(|_| parent)
    }

    /// All child nodes, elements and text
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Child elements in document order
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// The node itself followed by all its descendants in document order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if id < self.nodes.len() {
            vec![id]
        } else {
            Vec::new()
        };
        Descendants {
            snapshot: self,
            stack,
        }
    }

    /// Descendant elements (excluding `id` itself) whose tag is in `tags`
    pub fn select_tags<'a>(
        &'a self,
        id: NodeId,
        tags: &'a [&'a str],
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(id)
            .skip(1)
            .filter(move |&node| self.tag(node).is_some_and(|tag| tags.contains(&tag)))
    }

    /// Concatenated text of all descendant text nodes, hidden ones included
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.text(node))
            .collect()
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    snapshot: &'a PageSnapshot,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.snapshot.children(id).iter().rev().copied());
        Some(id)
    }
}
