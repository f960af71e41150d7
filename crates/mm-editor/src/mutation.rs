use mm_core::NodeId;

/// A change to the editor state produced by a gesture or a command.
///
/// Every change goes through `Editor::apply_mutation`, which is the only
/// place that writes the scene, the view or the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    /// Replace the selection (`None` clears it).
    Select { id: Option<NodeId> },
    /// Translate a node by a world-space delta.
    MoveNode { id: NodeId, dx: f64, dy: f64 },
    /// Shift the view by a screen-space delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom by `factor` around the screen point `(x, y)`.
    Zoom { x: f64, y: f64, factor: f64 },
    /// Create a root node at a world point and select it.
    AddRoot { x: f64, y: f64 },
    /// Create a child under `parent` and select it.
    AddChild { parent: NodeId },
    /// Replace a node's label and fill color.
    EditNode {
        id: NodeId,
        text: String,
        color: String,
    },
    /// Delete a node and its subtree.
    DeleteNode { id: NodeId },
    /// Remove everything and reset the view.
    Clear,
}

impl SceneMutation {
    /// Whether applying this mutation changes the saved document
    /// (as opposed to selection only).
    pub fn touches_document(&self) -> bool {
        !matches!(self, Self::Select { .. })
    }
}
