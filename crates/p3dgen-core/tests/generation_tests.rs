//! End-to-end generation tests against the builtin chunk registry

#![allow(non_snake_case)]

use p3dgen_core::prelude::*;
use p3dgen_core::{emit, generate};
use std::fs;
use tempfile::TempDir;

const MESH_SCHEMA: &str = r#"{
    "Mesh": {
        "!log": true,
        "name": "string",
        "version": "u32",
        "numPrimGroups": "u32",
        "primGroups": "children PrimitiveGroup"
    },
    "PrimitiveGroup": {
        "version": "u32",
        "shaderName": "string",
        "primitiveType": "u32",
        "numVertices": "u32",
        "numIndices": "u32",
        "numMatrices": "u32",
        "positions": "buffer<vec3> PositionList",
        "uvs": "buffers<vec2> UVList",
        "indices": "buffer<u32> IndexList"
    },
    "Shader": {
        "name": "string",
        "version": "u32",
        "pddiShaderName": "string",
        "textures": "dictionary<string> name ShaderTextureParam"
    },
    "ShaderTextureParam": {
        "param": "string[4]",
        "value": "string"
    },
    "Vertex": {
        "position": "vec3"
    }
}"#;

fn write_schema(dir: &TempDir) -> std::path::PathBuf {
    let input = dir.path().join("p3d.json");
    fs::write(&input, MESH_SCHEMA).unwrap();
    input
}

#[test]
fn mesh_schema___generates_expected_classes() {
    let schema = Schema::from_str(MESH_SCHEMA).unwrap();
    let registry = ChunkRegistry::builtin();

    let generated = generate(&schema, registry);
    let header = emit::render_header(&generated, &GeneratorConfig::default());

    for name in ["Mesh", "PrimitiveGroup", "Shader", "ShaderTextureParam", "Vertex"] {
        assert!(header.contains(&format!("    class {name};\n")), "{name}");
    }
    assert!(header.contains(
        "const std::vector<std::unique_ptr<PrimitiveGroup>>& GetPrimGroups() const { return _primGroups; }"
    ));
    assert!(header.contains("std::map<std::string, std::unique_ptr<ShaderTextureParam>> _textures;"));
    assert!(header.contains("const std::vector<glm::vec2>& GetUvs(size_t index) const { return _uvs.at(index); }"));
}

#[test]
fn mesh_schema___source_dispatches_registered_children() {
    let schema = Schema::from_str(MESH_SCHEMA).unwrap();
    let generated = generate(&schema, ChunkRegistry::builtin());

    let source = emit::render_source(&generated, &GeneratorConfig::default());

    assert!(source.contains("assert(chunk.IsType(ChunkType::Mesh));"));
    assert!(!source.contains("assert(chunk.IsType(ChunkType::Vertex));"));
    assert!(source.contains("case ChunkType::PositionList:"));
    assert!(source.contains("case ChunkType::UVList:"));
    assert!(source.contains("_textures.insert_or_assign(value->GetName(), std::move(value));"));
    assert!(source.contains("[Mesh] Unexpected Chunk: "));
    assert!(!source.contains("[PrimitiveGroup] Unexpected Chunk: "));
}

#[test]
fn mesh_schema___docs_order_by_id() {
    let schema = Schema::from_str(MESH_SCHEMA).unwrap();
    let registry = ChunkRegistry::builtin();
    let generated = generate(&schema, registry);

    let docs = emit::render_docs(&generated, registry);

    let mesh = docs.find("## Mesh `0x10000`").unwrap();
    let group = docs.find("## PrimitiveGroup `0x10002`").unwrap();
    let shader = docs.find("## Shader `0x11000`").unwrap();
    assert!(mesh < group && group < shader);
    assert!(!docs.contains("\n## Vertex "));
    assert!(!docs.contains("|`position`|"));
    assert!(docs.contains("#### VertexShader `0x10011`"));
    assert!(docs.contains("|`param`|`string[4]`|"));
    assert!(docs.contains("|`textures`|`ShaderTextureParam[]`|"));
}

#[test]
fn run___rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write_schema(&dir);
    let output = dir.path().join("generated");
    fs::create_dir(&output).unwrap();
    let config = GeneratorConfig::default()
        .with_copyright("Copyright (c) Donut")
        .with_docs_path(dir.path().join("Chunks.md"));

    let first = p3dgen_core::run(&input, &output, &config, ChunkRegistry::builtin()).unwrap();
    let header = fs::read(output.join("P3D.generated.h")).unwrap();
    let second = p3dgen_core::run(&input, &output, &config, ChunkRegistry::builtin()).unwrap();

    assert!(first.code_changed());
    assert_eq!(second.header, WriteOutcome::Unchanged);
    assert_eq!(second.source, WriteOutcome::Unchanged);
    assert_eq!(fs::read(output.join("P3D.generated.h")).unwrap(), header);
    assert!(header.starts_with(b"// Copyright (c) Donut\n\n#pragma once\n"));
}

#[test]
fn check_report___mesh_schema() {
    let dir = TempDir::new().unwrap();
    let input = write_schema(&dir);
    let registry = ChunkRegistry::builtin();

    let generated = p3dgen_core::compile_file(&input, registry).unwrap();
    let report = CheckReport::new(&generated, registry);

    assert_eq!(report.chunks, 5);
    assert_eq!(report.unregistered, vec!["Vertex"]);
    assert_eq!(report.undefined, registry.len() - 4);
    assert!(report.is_clean());
}
