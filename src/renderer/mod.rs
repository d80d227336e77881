//! Rendering geometry
//!
//! The host owns the actual drawing surface; this module only produces
//! colored triangle lists describing each entity.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::build_scene;
pub use vertex::{Palette, Vertex};
