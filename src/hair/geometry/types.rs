//! Core geometry types for particle hair export
//!
//! This module contains the host-side inputs (vertices, edges, the decimated
//! polyline mesh) and the per-emitter rendering flags carried into the script.

use serde::{Deserialize, Serialize};

/// A 3D point in host coordinates (z up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex { x, y, z }
    }

    /// Coordinates reordered to the runtime convention (x, z, y)
    pub fn swapped(self) -> [f32; 3] {
        [self.x, self.z, self.y]
    }

    /// Component-wise difference `self - origin`
    pub fn offset_from(self, origin: Vertex) -> Vertex {
        Vertex {
            x: self.x - origin.x,
            y: self.y - origin.y,
            z: self.z - origin.z,
        }
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vertex { x, y, z }
    }
}

/// Directed segment `head -> tail`, head closer to the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub head: u32,
    pub tail: u32,
}

impl Edge {
    pub const fn new(head: u32, tail: u32) -> Self {
        Edge { head, tail }
    }
}

impl From<(u32, u32)> for Edge {
    fn from((head, tail): (u32, u32)) -> Self {
        Edge { head, tail }
    }
}

/// Already-decimated polyline mesh produced by converting one particle system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HairMesh {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

/// RGB color, components 0..1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const WHITE: Color3 = Color3 { r: 1.0, g: 1.0, b: 1.0 };
}

impl Default for Color3 {
    fn default() -> Self {
        Color3::WHITE
    }
}

/// Rendering flags owned by the emitter mesh, passed through to the hair verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterFlags {
    pub billboard_mode: i32,
    pub is_enabled: bool,
    pub check_collisions: bool,
    pub receive_shadows: bool,
    pub cast_shadows: bool,
}

impl Default for EmitterFlags {
    fn default() -> Self {
        EmitterFlags {
            billboard_mode: 0,
            is_enabled: true,
            check_collisions: false,
            receive_shadows: false,
            cast_shadows: false,
        }
    }
}
