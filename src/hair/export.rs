//! Export of every hair system in a scene dump
//!
//! Systems are extracted in parallel, then written one at a time, in input
//! order, to the shared destination. A system whose mesh fails extraction is
//! reported and skipped; its siblings still export. A failed write aborts the
//! whole run since the destination can no longer be trusted.

use anyhow::Context;
use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::ScriptOptions;
use crate::error::{HairError, Result};
use crate::hair::geometry::{Color3, EmitterFlags, HairMesh};
use crate::hair::script::{write_hair_function, ParticleHair};

/// One particle hair system as handed over by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairSystemSource {
    pub name: String,
    /// Mesh the particle system is emitted from
    #[serde(default)]
    pub emitter_name: String,
    #[serde(default)]
    pub material_color: Option<Color3>,
    #[serde(default)]
    pub emitter: EmitterFlags,
    pub mesh: HairMesh,
}

/// All hair systems of a scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDump {
    pub hair_systems: Vec<HairSystemSource>,
}

impl SceneDump {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| HairError::Decode(e.to_string()))
    }

    pub fn from_msgpack_slice(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| HairError::Decode(e.to_string()))
    }

    /// Load a dump, MessagePack for `.msgpack`/`.mp` files and JSON otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read scene dump {}", path.display()))?;
        let is_msgpack = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("msgpack") | Some("mp")
        );
        let dump = if is_msgpack {
            Self::from_msgpack_slice(&bytes)
        } else {
            Self::from_json_slice(&bytes)
        };
        dump.with_context(|| format!("Failed to decode scene dump {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SystemOutcome {
    Exported { strands: usize, vertices: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemReport {
    pub name: String,
    pub emitter_name: String,
    pub outcome: SystemOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub systems: Vec<SystemReport>,
    /// Generated function names, in output order
    pub functions: IndexSet<String>,
}

impl ExportReport {
    pub fn exported_count(&self) -> usize {
        self.systems
            .iter()
            .filter(|s| matches!(s.outcome, SystemOutcome::Exported { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.systems.len() - self.exported_count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Extract and write every hair system
///
/// # Returns
/// * `Result<ExportReport>` - Per-system outcomes; `Err` only when writing fails
pub fn export_hair_systems<W: Write>(
    sources: &[HairSystemSource],
    options: &ScriptOptions,
    writer: &mut W,
) -> Result<ExportReport> {
    let extracted: Vec<Result<ParticleHair>> = sources
        .par_iter()
        .map(|source| {
            ParticleHair::from_mesh(
                &source.name,
                &source.emitter_name,
                source.material_color,
                source.emitter,
                &source.mesh,
            )
        })
        .collect();

    let mut report = ExportReport::default();
    for (source, hair) in sources.iter().zip(extracted) {
        let outcome = match hair {
            Ok(hair) => {
                let function = format!("child_{}", hair.legal_name);
                if report.functions.contains(&function) {
                    tracing::warn!(
                        system = %source.name,
                        emitter = %source.emitter_name,
                        %function,
                        "duplicate hair function name, skipping"
                    );
                    SystemOutcome::Failed {
                        reason: format!("function {function} already emitted"),
                    }
                } else {
                    write_hair_function(writer, &hair, options)?;
                    report.functions.insert(function);
                    SystemOutcome::Exported {
                        strands: hair.strands.strand_count(),
                        vertices: hair.strands.vertex_count(),
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    system = %source.name,
                    emitter = %source.emitter_name,
                    error = %err,
                    "particle hair export failed"
                );
                SystemOutcome::Failed { reason: err.to_string() }
            }
        };
        report.systems.push(SystemReport {
            name: source.name.clone(),
            emitter_name: source.emitter_name.clone(),
            outcome,
        });
    }

    tracing::info!(
        exported = report.exported_count(),
        failed = report.failed_count(),
        "hair export finished"
    );
    Ok(report)
}
