//! Core data model for mind map documents.
//!
//! The scene is an arena: nodes live in a flat `Vec` in creation order
//! (which is also draw order) and refer to each other by [`NodeId`].
//! Parent → child links are stored twice, once on the nodes
//! (`parent_id` / `children`) and once as a flat [`Connection`] list used
//! at draw time. The [`Scene`] mutators keep the two in step.

use crate::document::write_number;
use crate::id::NodeId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Node size used when none is given (and by the codec for older documents).
pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 50.0;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 | 8 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                let a = if bytes.len() == 8 {
                    hex_val(bytes[6])? << 4 | hex_val(bytes[7])?
                } else {
                    255
                };
                Some(Self::rgba(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    a as f32 / 255.0,
                ))
            }
            _ => None,
        }
    }

    /// Perceived brightness in [0, 1] (0.299 R + 0.587 G + 0.114 B).
    pub fn luminance(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

// ─── Nodes & connections ─────────────────────────────────────────────────

/// A single mind map node. `x`/`y` is the center of its box in world space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(serialize_with = "write_number")]
    pub x: f64,
    #[serde(serialize_with = "write_number")]
    pub y: f64,
    pub text: String,
    /// Fill color as a hex string (e.g. `#4CAF50`).
    pub color: String,
    #[serde(serialize_with = "write_number")]
    pub width: f64,
    #[serde(serialize_with = "write_number")]
    pub height: f64,
    pub parent_id: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(id: NodeId, at: Point, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            x: at.x,
            y: at.y,
            text: text.into(),
            color: color.into(),
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            parent_id: None,
            children: SmallVec::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The node's box in world space.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position(), (self.width, self.height))
    }

    /// Point-in-box test with inclusive edges.
    pub fn contains_point(&self, p: Point) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        p.x >= self.x - half_w
            && p.x <= self.x + half_w
            && p.y >= self.y - half_h
            && p.y <= self.y + half_h
    }

    /// Bottom-center of the box, where outgoing connections start.
    pub fn bottom_center(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Top-center of the box, where incoming connections end.
    pub fn top_center(&self) -> Point {
        Point::new(self.x, self.y - self.height / 2.0)
    }
}

/// A drawn parent → child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub parent_id: NodeId,
    pub child_id: NodeId,
}

// ─── Scene store ─────────────────────────────────────────────────────────

/// The node table and connection list of one document.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    /// Index from NodeId → position in `nodes`.
    index: HashMap<NodeId, usize>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from already-decoded parts, taking them verbatim.
    ///
    /// Returns the offending id if two nodes share one.
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> Result<Self, NodeId> {
        let mut scene = Self {
            nodes,
            connections,
            index: HashMap::new(),
        };
        for (pos, node) in scene.nodes.iter().enumerate() {
            if scene.index.insert(node.id, pos).is_some() {
                return Err(node.id);
            }
        }
        Ok(scene)
    }

    /// Nodes in creation (= draw) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index.get(&id).copied().map(|pos| &mut self.nodes[pos])
    }

    /// Create a node and append it on top of the draw order.
    ///
    /// When `parent` names an existing node the new node is linked under
    /// it (connection + parent's `children`). An unknown parent leaves the
    /// new node as a root.
    pub fn create_node(
        &mut self,
        at: Point,
        text: impl Into<String>,
        color: impl Into<String>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.fresh_id();
        let mut node = Node::new(id, at, text, color);

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.get_mut(parent_id) {
                parent_node.children.push(id);
                node.parent_id = Some(parent_id);
                self.connections.push(Connection {
                    parent_id,
                    child_id: id,
                });
            } else {
                log::warn!("parent {parent_id} not found; creating {id} as a root");
            }
        }

        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Delete a node together with its whole subtree.
    ///
    /// Returns the ids removed in post-order (children before their
    /// parent). Unknown ids are a no-op.
    pub fn delete_node(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let removed = self.subtree_post_order(id);
        let gone: HashSet<NodeId> = removed.iter().copied().collect();

        // Surviving parents that still list a removed node.
        let parents: HashSet<NodeId> = removed
            .iter()
            .filter_map(|r| self.get(*r).and_then(|n| n.parent_id))
            .filter(|p| !gone.contains(p))
            .collect();
        for parent_id in parents {
            if let Some(parent) = self.get_mut(parent_id) {
                parent.children.retain(|child| !gone.contains(child));
            }
        }

        self.nodes.retain(|n| !gone.contains(&n.id));
        self.connections
            .retain(|c| !gone.contains(&c.parent_id) && !gone.contains(&c.child_id));
        self.rebuild_index();
        removed
    }

    /// Walk the subtree under `root` with an explicit stack. Children that
    /// are missing or already seen (child cycles in corrupted documents)
    /// are skipped.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.get(id) else {
                continue;
            };
            stack.push((id, true));
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .filter(|child| self.contains(**child) && !visited.contains(*child))
                    .map(|child| (*child, false)),
            );
        }
        order
    }

    /// Translate a node in world units. Returns false for unknown ids.
    pub fn move_node(&mut self, id: NodeId, dx: f64, dy: f64) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.x += dx;
                node.y += dy;
                true
            }
            None => false,
        }
    }

    /// Replace a node's label and fill color. Position and links are untouched.
    pub fn set_label(&mut self, id: NodeId, text: &str, color: &str) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.text = text.to_string();
                node.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove every node and connection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.index.clear();
    }

    /// Union of all node boxes, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::rect)
            .reduce(|acc, r| acc.union(r))
    }

    /// Connections whose parent or child is missing from the node table.
    pub fn orphan_connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(|c| !self.contains(c.parent_id) || !self.contains(c.child_id))
    }

    /// Rebuild the id index (needed after removals shift positions).
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, node) in self.nodes.iter().enumerate() {
            self.index.insert(node.id, pos);
        }
    }

    /// Next generated id that this scene does not already use.
    fn fresh_id(&self) -> NodeId {
        loop {
            let id = NodeId::next();
            if !self.contains(id) {
                return id;
            }
        }
    }
}
