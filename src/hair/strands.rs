//! Strand extraction from a decimated hair polyline mesh
//!
//! Extraction runs in two phases:
//! 1. `partition_strands` walks the edge list and splits it into strands
//!    wherever an edge's head is not the previous edge's tail.
//! 2. `StrandSet::from_strands` folds the strand records into the flat
//!    encoding consumed by the runtime: per-strand vertex counts, root-relative
//!    positions in (x, z, y) order, and the longest root-to-tail distance.
//!
//! Edge order is significant: strand order in the output matches the order in
//! which strands first appear in the edge list.

use serde::Serialize;

use crate::error::{HairError, Result, TopologyFault};
use crate::hair::geometry::{Edge, Vertex};

/// One simple open polyline, vertex indices from root to tail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strand {
    vertices: Vec<u32>,
}

impl Strand {
    pub fn root(&self) -> u32 {
        self.vertices[0]
    }

    pub fn tail(&self) -> u32 {
        self.vertices[self.vertices.len() - 1]
    }

    /// All vertex indices, root first; always at least 2
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Running state of the edge walk
struct StrandWalk {
    visited: Vec<bool>,
    current: Vec<u32>,
    strands: Vec<Strand>,
}

impl StrandWalk {
    fn new(vertex_count: usize) -> Self {
        StrandWalk {
            visited: vec![false; vertex_count],
            current: Vec::new(),
            strands: Vec::new(),
        }
    }

    fn check_index(&self, vertex: u32) -> std::result::Result<(), TopologyFault> {
        if (vertex as usize) < self.visited.len() {
            Ok(())
        } else {
            Err(TopologyFault::VertexOutOfRange {
                vertex,
                vertex_count: self.visited.len(),
            })
        }
    }

    /// Marks a vertex as used; a second use means branching or a cycle
    fn claim(&mut self, vertex: u32) -> std::result::Result<(), TopologyFault> {
        let slot = &mut self.visited[vertex as usize];
        if *slot {
            return Err(TopologyFault::RevisitedVertex { vertex });
        }
        *slot = true;
        Ok(())
    }

    fn step(&mut self, edge: Edge) -> std::result::Result<(), TopologyFault> {
        self.check_index(edge.head)?;
        self.check_index(edge.tail)?;
        if edge.head == edge.tail {
            return Err(TopologyFault::SelfLoop { vertex: edge.head });
        }

        let continues = self.current.last() == Some(&edge.head);
        if !continues {
            self.close_current();
            self.claim(edge.head)?;
            self.current.push(edge.head);
        }

        self.claim(edge.tail)?;
        self.current.push(edge.tail);
        Ok(())
    }

    fn close_current(&mut self) {
        if !self.current.is_empty() {
            let vertices = std::mem::take(&mut self.current);
            self.strands.push(Strand { vertices });
        }
    }

    fn finish(mut self) -> Vec<Strand> {
        self.close_current();
        self.strands
    }
}

/// Group a root-to-tail ordered edge list into strands
///
/// A new strand starts at every edge whose head differs from the previous
/// edge's tail. Indices are checked against `vertex_count`; any vertex used
/// twice is rejected since strands must be simple open polylines.
pub fn partition_strands(vertex_count: usize, edges: &[Edge]) -> Result<Vec<Strand>> {
    let mut walk = StrandWalk::new(vertex_count);
    for (idx, &edge) in edges.iter().enumerate() {
        walk.step(edge).map_err(|fault| HairError::topology(idx, fault))?;
    }
    Ok(walk.finish())
}

/// Flat, strand-aware encoding of one hair system
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrandSet {
    strand_vertex_counts: Vec<u32>,
    root_relative_positions: Vec<f32>,
    longest_strand_length: Option<f32>,
}

impl StrandSet {
    /// Encode strands whose indices were validated against `vertices`
    pub(crate) fn from_strands(vertices: &[Vertex], strands: &[Strand]) -> Self {
        let total: usize = strands.iter().map(Strand::vertex_count).sum();
        let empty = StrandSet {
            strand_vertex_counts: Vec::with_capacity(strands.len()),
            root_relative_positions: Vec::with_capacity(total * 3),
            longest_strand_length: None,
        };

        strands.iter().fold(empty, |mut set, strand| {
            set.push_strand(vertices, strand);
            set
        })
    }

    fn push_strand(&mut self, vertices: &[Vertex], strand: &Strand) {
        let root = vertices[strand.root() as usize];
        self.root_relative_positions.extend_from_slice(&root.swapped());
        for &idx in &strand.vertices()[1..] {
            let relative = vertices[idx as usize].offset_from(root);
            self.root_relative_positions.extend_from_slice(&relative.swapped());
        }
        self.strand_vertex_counts.push(strand.vertex_count() as u32);

        let length = norm(vertices[strand.tail() as usize].offset_from(root).swapped());
        self.longest_strand_length = Some(match self.longest_strand_length {
            Some(longest) if longest >= length => longest,
            _ => length,
        });
    }

    pub fn strand_vertex_counts(&self) -> &[u32] {
        &self.strand_vertex_counts
    }

    /// Root absolute position then root-relative offsets, per strand, (x, z, y)
    pub fn root_relative_positions(&self) -> &[f32] {
        &self.root_relative_positions
    }

    /// Longest root-to-tail distance; `None` when there are no strands
    pub fn longest_strand_length(&self) -> Option<f32> {
        self.longest_strand_length
    }

    pub fn strand_count(&self) -> usize {
        self.strand_vertex_counts.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.strand_vertex_counts.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.strand_vertex_counts.is_empty()
    }

    /// Average vertices per strand, 0 when empty
    pub fn average_strand_vertices(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.vertex_count() as f32 / self.strand_count() as f32
        }
    }

    /// Position slice of each strand, in strand order
    pub fn strand_positions(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let mut offset = 0;
        self.strand_vertex_counts.iter().map(move |&n| {
            let len = n as usize * 3;
            let slice = &self.root_relative_positions[offset..offset + len];
            offset += len;
            slice
        })
    }
}

fn norm([a, b, c]: [f32; 3]) -> f32 {
    (a * a + b * b + c * c).sqrt()
}

/// Extract the strand encoding of a decimated hair mesh
///
/// # Arguments
/// * `vertices` - Mesh vertex positions in host coordinates
/// * `edges` - Edges ordered root to tail, strands contiguous
///
/// # Returns
/// * `Result<StrandSet>` - The encoding, or `InvalidTopology` with no partial output
pub fn extract_strands(vertices: &[Vertex], edges: &[Edge]) -> Result<StrandSet> {
    let strands = partition_strands(vertices.len(), edges)?;
    let set = StrandSet::from_strands(vertices, &strands);

    tracing::debug!(
        strands = set.strand_count(),
        vertices = set.vertex_count(),
        avg_per_strand = set.average_strand_vertices(),
        "extracted hair strands"
    );
    Ok(set)
}
