//! Scene-script emission for extracted hair
//!
//! Each hair system becomes one `child_<name>(scene, parent, source)` function.
//! Geometry is baked into the function body; the runtime instantiates the hair
//! under whatever parent it is given at load time.

use std::io::Write;

use crate::config::{ArrayStyle, ScriptOptions};
use crate::error::Result;
use crate::hair::format::{format_bool, format_color, format_int, write_array, ArrayLayout, Fixed};
use crate::hair::geometry::{Color3, EmitterFlags, HairMesh};
use crate::hair::naming::legal_js_identifier;
use crate::hair::strands::{extract_strands, StrandSet};

/// Extracted hair of one particle system, ready for emission
#[derive(Debug, Clone)]
pub struct ParticleHair {
    pub name: String,
    pub legal_name: String,
    /// Name of the emitter mesh the hair is parented to
    pub parent_name: String,
    pub color: Color3,
    pub emitter: EmitterFlags,
    pub strands: StrandSet,
}

impl ParticleHair {
    /// Bundle a strand set with its naming and rendering state
    ///
    /// A missing material color resolves to white.
    pub fn new(
        name: &str,
        parent_name: &str,
        material_color: Option<Color3>,
        emitter: EmitterFlags,
        strands: StrandSet,
    ) -> Self {
        ParticleHair {
            name: name.to_string(),
            legal_name: legal_js_identifier(name),
            parent_name: parent_name.to_string(),
            color: material_color.unwrap_or(Color3::WHITE),
            emitter,
            strands,
        }
    }

    /// Extract strands from a decimated mesh and bundle the result
    pub fn from_mesh(
        name: &str,
        parent_name: &str,
        material_color: Option<Color3>,
        emitter: EmitterFlags,
        mesh: &HairMesh,
    ) -> Result<Self> {
        tracing::debug!(system = name, emitter = parent_name, edges = mesh.edges.len(), "processing particle hair");
        let strands = extract_strands(&mesh.vertices, &mesh.edges)?;
        tracing::info!(
            system = name,
            emitter = parent_name,
            strands = strands.strand_count(),
            vertices = strands.vertex_count(),
            avg_per_strand = strands.average_strand_vertices(),
            "particle hair extracted"
        );
        Ok(Self::new(name, parent_name, material_color, emitter, strands))
    }
}

/// Write the `child_<name>` function for one hair system
///
/// # Arguments
/// * `writer` - Destination stream; write failures surface as `IoFailure`
/// * `hair` - The extracted hair and its emitter state
/// * `options` - Formatting and runtime naming options
pub fn write_hair_function<W: Write>(
    writer: &mut W,
    hair: &ParticleHair,
    options: &ScriptOptions,
) -> Result<()> {
    let indent = options.indent.as_str();
    let body = format!("{indent}    ");
    let wrap = format!("{body}    ");
    let layout = ArrayLayout {
        values_per_line: options.values_per_line,
        indent: &wrap,
    };
    let precision = options.float_precision;
    let name = &hair.legal_name;
    let flags = &hair.emitter;

    write!(writer, "\n{indent}function child_{name}(scene, parent, source){{\n")?;
    writeln!(
        writer,
        "{body}var ret = new {}(parent.name + \".{name}\", scene, parent, source);",
        options.runtime_type
    )?;
    writeln!(writer, "{body}ret.id = ret.name;")?;
    writeln!(writer, "{body}ret.billboardMode = {};", format_int(flags.billboard_mode.into()))?;
    writeln!(writer, "{body}ret.isVisible = false;")?;
    writeln!(writer, "{body}ret.setEnabled({});", format_bool(flags.is_enabled))?;
    writeln!(writer, "{body}ret.checkCollisions = {};", format_bool(flags.check_collisions))?;
    writeln!(writer, "{body}ret.receiveShadows = {};", format_bool(flags.receive_shadows))?;
    writeln!(writer, "{body}ret.castShadows = {};", format_bool(flags.cast_shadows))?;
    writeln!(
        writer,
        "{body}ret.color = new {}({});",
        options.color_type,
        format_color(hair.color, precision)
    )?;

    let strands = &hair.strands;
    let counts = strands.strand_vertex_counts();
    let positions = strands
        .root_relative_positions()
        .iter()
        .map(|&value| Fixed { value, precision });
    let longest = Fixed {
        value: strands.longest_strand_length().unwrap_or(0.0),
        precision,
    };

    match options.array_style {
        ArrayStyle::Inline => {
            write!(writer, "{body}ret.assemble([")?;
            write_array(writer, counts, layout)?;
            writer.write_all(b"], [")?;
            write_array(writer, positions, layout)?;
            writeln!(writer, "], {longest});")?;
        }
        ArrayStyle::Variables => {
            write!(writer, "{body}var strandNumVerts = [")?;
            write_array(writer, counts, layout)?;
            writeln!(writer, "];")?;
            write!(writer, "{body}var rootRelativePositions = [")?;
            write_array(writer, positions, layout)?;
            writeln!(writer, "];")?;
            writeln!(writer, "{body}ret.assemble(strandNumVerts, rootRelativePositions, {longest});")?;
        }
    }

    writeln!(writer, "{body}return ret;")?;
    writeln!(writer, "{indent}}}")?;
    Ok(())
}

/// Render the function into a String
pub fn hair_function_to_string(hair: &ParticleHair, options: &ScriptOptions) -> String {
    let mut buffer = Vec::with_capacity(1024);
    write_hair_function(&mut buffer, hair, options).expect("serialization failed");
    String::from_utf8(buffer).expect("serialized script was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hair::geometry::{Edge, Vertex};

    fn wisp() -> ParticleHair {
        let mesh = HairMesh {
            vertices: vec![Vertex::new(1.0, 3.0, 2.0), Vertex::new(1.0, 4.0, 2.0)],
            edges: vec![Edge::new(0, 1)],
        };
        let emitter = EmitterFlags {
            billboard_mode: 0,
            is_enabled: true,
            check_collisions: false,
            receive_shadows: false,
            cast_shadows: false,
        };
        ParticleHair::from_mesh("wisp", "Head", None, emitter, &mesh).unwrap()
    }

    #[test]
    fn test_inline_function() {
        let hair = wisp();
        assert_eq!(hair.strands.root_relative_positions(), &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0]);
        assert_eq!(hair.parent_name, "Head");

        let script = hair_function_to_string(&hair, &ScriptOptions::default());
        assert!(script.contains("function child_wisp(scene, parent, source){"));
        assert!(script.contains("var ret = new QI.Hair(parent.name + \".wisp\", scene, parent, source);"));
        assert!(script.contains("ret.setEnabled(true);"));
        assert!(script.contains("ret.receiveShadows = false;"));
        assert!(script.contains("ret.castShadows = false;"));
        assert!(script.contains("ret.color = new Color3(1, 1, 1);"));
        assert!(script.contains("ret.assemble([2], [1, 2, 3, 0, 0, 1], 1);"));
        assert!(script.trim_end().ends_with("return ret;\n}"));
    }

    #[test]
    fn test_exact_layout() {
        let script = hair_function_to_string(&wisp(), &ScriptOptions::default());
        let expected = "\nfunction child_wisp(scene, parent, source){\n\
            \x20   var ret = new QI.Hair(parent.name + \".wisp\", scene, parent, source);\n\
            \x20   ret.id = ret.name;\n\
            \x20   ret.billboardMode = 0;\n\
            \x20   ret.isVisible = false;\n\
            \x20   ret.setEnabled(true);\n\
            \x20   ret.checkCollisions = false;\n\
            \x20   ret.receiveShadows = false;\n\
            \x20   ret.castShadows = false;\n\
            \x20   ret.color = new Color3(1, 1, 1);\n\
            \x20   ret.assemble([2], [1, 2, 3, 0, 0, 1], 1);\n\
            \x20   return ret;\n\
            }\n";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_variables_style() {
        let options = ScriptOptions {
            array_style: ArrayStyle::Variables,
            indent: "  ".to_string(),
            ..ScriptOptions::default()
        };
        let script = hair_function_to_string(&wisp(), &options);
        assert!(script.contains("\n  function child_wisp(scene, parent, source){\n"));
        assert!(script.contains("      var strandNumVerts = [2];\n"));
        assert!(script.contains("      var rootRelativePositions = [1, 2, 3, 0, 0, 1];\n"));
        assert!(script.contains("      ret.assemble(strandNumVerts, rootRelativePositions, 1);\n"));
        assert!(script.ends_with("  }\n"));
    }

    #[test]
    fn test_flags_and_color_pass_through() {
        let emitter = EmitterFlags {
            billboard_mode: 7,
            is_enabled: false,
            check_collisions: true,
            receive_shadows: true,
            cast_shadows: true,
        };
        let color = Color3 { r: 0.5, g: 0.25, b: 0.125 };
        let hair = ParticleHair::new("Hair.001", "Head", Some(color), emitter, StrandSet::default());
        let script = hair_function_to_string(&hair, &ScriptOptions::default());

        assert!(script.contains("function child_Hair_001(scene, parent, source){"));
        assert!(script.contains("ret.billboardMode = 7;"));
        assert!(script.contains("ret.setEnabled(false);"));
        assert!(script.contains("ret.checkCollisions = true;"));
        assert!(script.contains("ret.castShadows = true;"));
        assert!(script.contains("new Color3(0.5, 0.25, 0.125);"));
        // No strands: empty arrays and a zero length
        assert!(script.contains("ret.assemble([], [], 0);"));
    }

    #[test]
    fn test_long_arrays_wrap() {
        let vertices: Vec<Vertex> = (0..6).map(|i| Vertex::new(i as f32, 0.0, 0.0)).collect();
        let edges = vec![Edge::new(0, 1), Edge::new(2, 3), Edge::new(4, 5)];
        let mesh = HairMesh { vertices, edges };
        let hair = ParticleHair::from_mesh("fur", "Body", None, EmitterFlags::default(), &mesh).unwrap();
        let options = ScriptOptions { values_per_line: 6, ..ScriptOptions::default() };

        let script = hair_function_to_string(&hair, &options);
        assert!(script.contains("ret.assemble([2, 2, 2], [0, 0, 0, 1, 0, 0,\n        2, 0, 0, 1, 0, 0,\n        4, 0, 0, 1, 0, 0], 1);"));
    }
}
