//! Particle hair export
//!
//! # Submodules
//! - `geometry` - Host mesh primitives and emitter flags
//! - `strands` - Strand extraction into the root-relative encoding
//! - `format` - Script literal rendering
//! - `naming` - Identifier legalization
//! - `script` - `child_<name>` function emission
//! - `export` - Scene-wide export with per-system isolation

pub mod geometry;
pub mod strands;
pub mod format;
pub mod naming;
pub mod script;
pub mod export;
