//! Error taxonomy for strand extraction and script emission

use thiserror::Error;

/// Why an edge list cannot be read as a set of simple open strands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyFault {
    #[error("vertex {vertex} is out of range (mesh has {vertex_count} vertices)")]
    VertexOutOfRange { vertex: u32, vertex_count: usize },

    #[error("edge starts and ends at vertex {vertex}")]
    SelfLoop { vertex: u32 },

    /// A vertex consumed by an earlier edge shows up again (branch or cycle)
    #[error("vertex {vertex} already belongs to an earlier strand segment")]
    RevisitedVertex { vertex: u32 },
}

#[derive(Debug, Error)]
pub enum HairError {
    #[error("invalid strand topology at edge {edge}: {fault}")]
    InvalidTopology { edge: usize, fault: TopologyFault },

    #[error("failed to write hair script: {0}")]
    IoFailure(#[from] std::io::Error),

    #[error("failed to decode mesh dump: {0}")]
    Decode(String),
}

impl HairError {
    pub(crate) fn topology(edge: usize, fault: TopologyFault) -> Self {
        HairError::InvalidTopology { edge, fault }
    }

    /// True for failures caused by the input mesh rather than the destination
    pub fn is_topology(&self) -> bool {
        matches!(self, HairError::InvalidTopology { .. })
    }
}

pub type Result<T> = std::result::Result<T, HairError>;
