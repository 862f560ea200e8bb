//! Artifact rendering.
//!
//! Renders generator output into the declaration header, the
//! implementation source and the Markdown chunk reference. Rendering is
//! pure; persisting the results is left to [`crate::output`].

use crate::config::GeneratorConfig;
use crate::directive::DocTable;
use crate::generator::{ChunkArtifact, DispatchTable, Generated};
use crate::registry::{ChunkRegistry, format_id};

/// Marker comment placed at the top of both code artifacts.
pub const GENERATED_COMMENT: &str = "// Auto-generated by p3dgen. DO NOT EDIT.";

const INDENT: &str = "    ";

/// The three rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: String,
    pub source: String,
    pub docs: String,
}

/// Render every artifact for `generated`.
pub fn render_all(
    generated: &Generated,
    config: &GeneratorConfig,
    registry: &ChunkRegistry,
) -> Rendered {
    Rendered {
        header: render_header(generated, config),
        source: render_source(generated, config),
        docs: render_docs(generated, registry),
    }
}

/// Append `text` at `depth` levels of indentation.
fn line(out: &mut String, depth: usize, text: &str) {
    if !text.is_empty() {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str(text);
    }
    out.push('\n');
}

fn preamble(out: &mut String, config: &GeneratorConfig) {
    if !config.copyright.is_empty() {
        out.push_str(&format!("// {}\n\n", config.copyright));
    }
}

/// Render the declaration header.
pub fn render_header(generated: &Generated, config: &GeneratorConfig) -> String {
    let mut out = String::new();

    preamble(&mut out, config);
    out.push_str("#pragma once\n\n");
    out.push_str(GENERATED_COMMENT);
    out.push_str("\n\n");

    for include in &config.header_includes {
        out.push_str(&format!("#include <{include}>\n"));
    }
    out.push('\n');

    out.push_str(&format!("namespace {}\n{{\n", config.namespace));

    for chunk in &generated.chunks {
        line(&mut out, 1, &format!("class {};", chunk.name));
    }

    for chunk in &generated.chunks {
        out.push('\n');
        class_block(&mut out, chunk);
    }

    out.push_str("}\n");
    out
}

fn class_block(out: &mut String, chunk: &ChunkArtifact) {
    let name = &chunk.name;

    line(out, 1, &format!("class {name}"));
    line(out, 1, "{");
    line(out, 1, "public:");
    line(out, 0, "");
    line(out, 2, &format!("{name}(const P3DChunk&);"));
    line(out, 0, "");
    line(
        out,
        2,
        &format!(
            "static std::unique_ptr<{name}> Load(const P3DChunk& chunk) {{ return std::make_unique<{name}>(chunk); }}"
        ),
    );

    let public = chunk.public_declarations();
    if !public.is_empty() {
        line(out, 0, "");
        for declaration in &public {
            line(out, 2, declaration);
        }
    }

    let private = chunk.private_declarations();
    if !private.is_empty() {
        line(out, 0, "");
        line(out, 1, "private:");
        line(out, 0, "");
        for declaration in &private {
            line(out, 2, declaration);
        }
    }

    line(out, 1, "};");
}

/// Render the implementation source.
pub fn render_source(generated: &Generated, config: &GeneratorConfig) -> String {
    let mut out = String::new();

    preamble(&mut out, config);
    out.push_str(GENERATED_COMMENT);
    out.push_str("\n\n");

    out.push_str(&format!("#include \"{}\"\n", config.header_file));
    for include in &config.source_includes {
        out.push_str(&format!("#include <{include}>\n"));
    }
    out.push('\n');

    out.push_str(&format!("namespace {}\n{{\n", config.namespace));

    for (i, chunk) in generated.chunks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        constructor(&mut out, chunk);
    }

    out.push_str("}\n");
    out
}

fn constructor(out: &mut String, chunk: &ChunkArtifact) {
    let name = &chunk.name;

    line(out, 1, &format!("{name}::{name}(const P3DChunk& chunk)"));
    line(out, 1, "{");

    // Plain value types have no chunk id to check against.
    if chunk.id.is_some() {
        line(out, 2, &format!("assert(chunk.IsType(ChunkType::{name}));"));
        line(out, 0, "");
    }

    line(out, 2, "MemoryStream stream(chunk.GetData());");
    for read in &chunk.reads {
        line(out, 2, read);
    }

    if let Some(dispatch) = &chunk.dispatch {
        line(out, 0, "");
        child_loop(out, chunk, dispatch);
    }

    if chunk.diagnostic_logging {
        line(out, 0, "");
        line(out, 2, "if (!stream.End())");
        line(out, 2, "{");
        line(
            out,
            3,
            &format!(
                "std::cout << fmt::format(\"[{name}] only read {{0}} out of {{1}} bytes!\", stream.Position(), chunk.GetDataSize()) << std::endl;"
            ),
        );
        line(out, 2, "}");
    }

    line(out, 1, "}");
}

fn child_loop(out: &mut String, chunk: &ChunkArtifact, dispatch: &DispatchTable) {
    line(out, 2, "for (auto const& child : chunk.GetChildren())");
    line(out, 2, "{");

    if dispatch.uses_data_stream() {
        line(out, 3, "MemoryStream data(child->GetData());");
        line(out, 0, "");
    }

    line(out, 3, "switch (child->GetType())");
    line(out, 3, "{");

    for arm in &dispatch.arms {
        line(out, 4, &format!("case ChunkType::{}:", arm.chunk));
        line(out, 4, "{");
        for statement in &arm.body {
            line(out, 5, statement);
        }
        line(out, 5, "break;");
        line(out, 4, "}");
    }

    line(out, 4, "default:");
    if chunk.diagnostic_logging {
        line(
            out,
            5,
            &format!(
                "std::cout << \"[{}] Unexpected Chunk: \" << child->GetType() << \"\\n\";",
                chunk.name
            ),
        );
    }
    line(out, 5, "break;");

    line(out, 3, "}");
    line(out, 2, "}");
}

/// Render the Markdown chunk reference.
///
/// Registered chunk definitions are listed by ascending id, ties keeping
/// schema order. Registered ids without a definition follow, also by
/// ascending id.
pub fn render_docs(generated: &Generated, registry: &ChunkRegistry) -> String {
    let mut documented: Vec<(u32, &ChunkArtifact)> = generated
        .chunks
        .iter()
        .filter_map(|chunk| chunk.id.map(|id| (id, chunk)))
        .collect();
    documented.sort_by_key(|(id, _)| *id);

    let undefined = registry.undefined(|name| generated.defines(name));
    let total = registry.len();

    let mut out = String::new();
    out.push_str(&format!(
        "# Chunks ({} / {total})\n\n",
        total - undefined.len()
    ));

    for (id, chunk) in documented {
        chunk_section(&mut out, id, chunk);
    }

    out.push_str(&format!(
        "# Undefined Chunks ({} / {total})\n\n",
        undefined.len()
    ));
    for entry in undefined {
        out.push_str(&format!("#### {} `{}`\n", entry.name, entry.hex_id()));
    }

    out
}

fn chunk_section(out: &mut String, id: u32, chunk: &ChunkArtifact) {
    let mut fields = String::new();
    let mut children = String::new();

    for plan in &chunk.plans {
        let (table, label) = plan.doc_row();
        let row = format!("|`{}`|`{label}`|\n", plan.field);
        match table {
            DocTable::Fields => fields.push_str(&row),
            DocTable::Children => children.push_str(&row),
        }
    }

    out.push_str(&format!("## {} `{}`\n", chunk.name, format_id(id)));
    out.push_str("|Name|Type|\n|--|--|\n");
    out.push_str(&fields);
    out.push('\n');

    if !children.is_empty() {
        out.push_str("### Children\n");
        out.push_str("|Name|Chunk|\n|--|--|\n");
        out.push_str(&children);
        out.push('\n');
    }
}
