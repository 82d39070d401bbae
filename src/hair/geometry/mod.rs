//! Geometry module for particle hair
//!
//! # Submodules
//! - `types` - Host mesh primitives (Vertex, Edge, HairMesh) and emitter flags

mod types;

pub use types::{
    Vertex,
    Edge,
    HairMesh,
    Color3,
    EmitterFlags,
};
