//! Surface-agnostic renderer for mind map scenes.
//!
//! [`paint`] turns a scene into drawing calls on a [`Surface`], [`hit`]
//! answers "which node is under the pointer", and [`export`] frames the
//! whole map for print. [`svg::SvgSurface`] and [`surface::DisplayList`]
//! are the two built-in backends.

pub mod export;
pub mod hit;
pub mod paint;
pub mod surface;
pub mod svg;
pub mod text;

pub use export::{ExportFrame, render_export};
pub use hit::{find_node_at, hit_test};
pub use paint::{RenderTheme, draw_scene, render_scene};
pub use surface::{DisplayList, DrawOp, Surface};
pub use svg::{SvgSurface, export_svg};
