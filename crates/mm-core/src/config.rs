//! Editor configuration.
//!
//! Default labels, colors and interaction constants are product choices,
//! so they live here rather than as literals in the editor. Hosts can
//! override any subset from JSON:
//!
//! ```
//! use mm_core::EditorConfig;
//!
//! let config = EditorConfig::from_json(r##"{"nodeColor": "#2196F3"}"##).unwrap();
//! assert_eq!(config.node_color, "#2196F3");
//! assert_eq!(config.root_text, "New Node");
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Label for nodes created on empty canvas. Default: **"New Node"**.
    pub root_text: String,
    /// Label for nodes created under a parent. Default: **"New Child"**.
    pub child_text: String,
    /// Label used when an edit submits empty text. Default: **"Untitled"**.
    pub untitled_text: String,
    /// Fill color for new root nodes. Default: **#4CAF50**.
    pub node_color: String,
    /// Vertical distance from a parent to a new child (world units).
    pub child_offset: f64,
    /// Scale multiplier for one wheel step towards the user.
    pub zoom_in_factor: f64,
    /// Scale multiplier for one wheel step away from the user.
    pub zoom_out_factor: f64,
    /// Space around the node bounding box in print export (world units).
    pub export_padding: f64,
    /// Suggested file name for saved documents.
    pub file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            root_text: "New Node".into(),
            child_text: "New Child".into(),
            untitled_text: "Untitled".into(),
            node_color: "#4CAF50".into(),
            child_offset: 150.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            export_padding: 50.0,
            file_name: "mindmap.json".into(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
