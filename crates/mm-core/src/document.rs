//! JSON save/load for mind map documents.
//!
//! On-disk shape:
//!
//! ```json
//! { "nodes": [{ "id", "x", "y", "text", "color", "width", "height",
//!               "parentId", "children": [] }],
//!   "connections": [{ "parentId", "childId" }],
//!   "offsetX": 0, "offsetY": 0, "scale": 1 }
//! ```
//!
//! Loading builds a complete [`Document`] before anything else sees it, so
//! a failed load never leaves a half-applied scene behind.

use crate::id::NodeId;
use crate::model::{Connection, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, Node, Scene};
use crate::view::ViewTransform;
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// A decoded document: scene plus the view it was saved with.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub scene: Scene,
    pub view: ViewTransform,
}

// ─── Errors ──────────────────────────────────────────────────────────────

/// Why a document could not be loaded or saved.
#[derive(Debug)]
pub enum DocumentError {
    /// Malformed JSON, a missing required field, or a field of the wrong type.
    Json(serde_json::Error),
    /// Two nodes share an id.
    DuplicateId(NodeId),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid mind map document: {e}"),
            Self::DuplicateId(id) => write!(f, "duplicate node id \"{id}\""),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ─── Emit ────────────────────────────────────────────────────────────────

/// Write integral floats without a fractional part (`150`, not `150.0`),
/// matching what a browser's `JSON.stringify` produces.
pub fn write_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this not every integer is representable anyway.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    nodes: &'a [Node],
    connections: &'a [Connection],
    #[serde(serialize_with = "write_number")]
    offset_x: f64,
    #[serde(serialize_with = "write_number")]
    offset_y: f64,
    #[serde(serialize_with = "write_number")]
    scale: f64,
}

/// Serialize a scene and its view to the JSON document format.
pub fn emit_document(scene: &Scene, view: &ViewTransform) -> Result<String, DocumentError> {
    let out = DocumentOut {
        nodes: scene.nodes(),
        connections: scene.connections(),
        offset_x: view.offset_x,
        offset_y: view.offset_y,
        scale: view.scale(),
    };
    Ok(serde_json::to_string(&out)?)
}

// ─── Parse ───────────────────────────────────────────────────────────────

/// Ids may arrive as strings or (from hand-edited files) as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_id(self) -> NodeId {
        match self {
            RawId::Text(s) => NodeId::intern(&s),
            RawId::Number(n) => NodeId::intern(&n.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: RawId,
    x: f64,
    y: f64,
    text: String,
    color: String,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    parent_id: Option<RawId>,
    #[serde(default)]
    children: Option<Vec<RawId>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    parent_id: RawId,
    child_id: RawId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    nodes: Vec<RawNode>,
    #[serde(default)]
    connections: Vec<RawConnection>,
    #[serde(default)]
    offset_x: Option<f64>,
    #[serde(default)]
    offset_y: Option<f64>,
    #[serde(default)]
    scale: Option<f64>,
}

/// Absent, null and zero all mean "use the default", as older files
/// relied on that.
fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => default,
    }
}

impl RawNode {
    fn into_node(self) -> Node {
        Node {
            id: self.id.into_id(),
            x: self.x,
            y: self.y,
            text: self.text,
            color: self.color,
            width: or_default(self.width, DEFAULT_NODE_WIDTH),
            height: or_default(self.height, DEFAULT_NODE_HEIGHT),
            parent_id: self.parent_id.map(RawId::into_id),
            children: self
                .children
                .unwrap_or_default()
                .into_iter()
                .map(RawId::into_id)
                .collect::<SmallVec<_>>(),
        }
    }
}

/// Parse a JSON document into a fresh scene and view.
///
/// # Errors
/// Returns [`DocumentError`] for malformed JSON, structurally invalid
/// documents, or duplicate node ids.
pub fn parse_document(json: &str) -> Result<Document, DocumentError> {
    let raw: RawDocument = serde_json::from_str(json)?;

    let nodes: Vec<Node> = raw.nodes.into_iter().map(RawNode::into_node).collect();
    let connections: Vec<Connection> = raw
        .connections
        .into_iter()
        .map(|c| Connection {
            parent_id: c.parent_id.into_id(),
            child_id: c.child_id.into_id(),
        })
        .collect();

    let scene = Scene::from_parts(nodes, connections).map_err(DocumentError::DuplicateId)?;

    let orphans = scene.orphan_connections().count();
    if orphans > 0 {
        log::warn!("document has {orphans} connection(s) with a missing endpoint; they will not be drawn");
    }

    let view = ViewTransform::new(
        raw.offset_x.unwrap_or(0.0),
        raw.offset_y.unwrap_or(0.0),
        or_default(raw.scale, 1.0),
    );
    if raw.scale.is_some_and(|s| s != view.scale() && s != 0.0) {
        log::warn!("document scale {:?} clamped to {}", raw.scale, view.scale());
    }

    Ok(Document { scene, view })
}
