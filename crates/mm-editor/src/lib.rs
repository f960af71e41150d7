//! Interactive editing for mind maps: input events, the pointer tool,
//! scene mutations and the [`Editor`] controller that ties them to a
//! document, a view and a selection.

pub mod editor;
pub mod host;
pub mod input;
pub mod mutation;
pub mod tools;

pub use editor::Editor;
pub use host::{Host, RecordingHost};
pub use input::InputEvent;
pub use mutation::SceneMutation;
pub use tools::{Drag, SelectTool, Tool};
