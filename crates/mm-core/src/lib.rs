pub mod config;
pub mod document;
pub mod id;
pub mod model;
pub mod view;

pub use config::EditorConfig;
pub use document::{Document, DocumentError, emit_document, parse_document};
pub use id::NodeId;
pub use model::*;
pub use view::{MAX_SCALE, MIN_SCALE, ViewTransform};

// Re-export kurbo geometry so downstream crates agree on one version.
pub use kurbo;
