//! Particle hair exporter
//!
//! Converts decimated hair polyline meshes into a strand-aware encoding
//! (per-strand vertex counts, root-relative positions, longest strand length)
//! and emits it as scene-script functions.
//!
//! # Example
//! ```ignore
//! let set = extract_strands(&mesh.vertices, &mesh.edges)?;
//! let hair = ParticleHair::new("wisp", "Head", None, EmitterFlags::default(), set);
//! write_hair_function(&mut out, &hair, &ScriptOptions::default())?;
//! ```

pub mod config;
pub mod error;
pub mod hair;

pub use config::{ArrayStyle, ScriptOptions};
pub use error::{HairError, Result, TopologyFault};
pub use hair::export::{export_hair_systems, ExportReport, HairSystemSource, SceneDump, SystemOutcome, SystemReport};
pub use hair::geometry::{Color3, Edge, EmitterFlags, HairMesh, Vertex};
pub use hair::naming::legal_js_identifier;
pub use hair::script::{hair_function_to_string, write_hair_function, ParticleHair};
pub use hair::strands::{extract_strands, partition_strands, Strand, StrandSet};
