//! Script emission options
//!
//! Options deserialize from a JSON file with camelCase keys; any missing key
//! keeps its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How strand arrays reach the `assemble` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayStyle {
    /// Array literals passed directly as arguments
    #[default]
    Inline,
    /// Arrays bound to `strandNumVerts` / `rootRelativePositions` first
    Variables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptOptions {
    pub float_precision: usize,
    pub values_per_line: usize,
    pub indent: String,
    pub runtime_type: String,
    pub color_type: String,
    pub array_style: ArrayStyle,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        ScriptOptions {
            float_precision: 4,
            values_per_line: 32,
            indent: String::new(),
            runtime_type: "QI.Hair".to_string(),
            color_type: "Color3".to_string(),
            array_style: ArrayStyle::Inline,
        }
    }
}

impl ScriptOptions {
    /// Load options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid options file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
