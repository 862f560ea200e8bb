#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

const FOO_SCHEMA: &str = r#"{"Foo": {"id": "u32", "name": "string"}}"#;

struct Fixture {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
    config: GeneratorConfig,
}

fn fixture(schema: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("p3d.json");
    let output = dir.path().join("out");
    fs::write(&input, schema).unwrap();
    fs::create_dir(&output).unwrap();
    let config = GeneratorConfig::default().with_docs_path(dir.path().join("Chunks.md"));

    Fixture {
        dir,
        input,
        output,
        config,
    }
}

fn registry() -> ChunkRegistry {
    ChunkRegistry::new([("Foo", 0x100), ("Bar", 0x200)])
}

#[test]
fn run___writes_all_artifacts() {
    let f = fixture(FOO_SCHEMA);

    let report = run(&f.input, &f.output, &f.config, &registry()).unwrap();

    assert_eq!(report.chunks, 1);
    assert_eq!(report.plans, 2);
    assert_eq!(report.header, WriteOutcome::Written);
    assert_eq!(report.source, WriteOutcome::Written);
    assert!(f.output.join("P3D.generated.h").is_file());
    assert!(f.output.join("P3D.generated.cpp").is_file());
    let docs = fs::read_to_string(f.dir.path().join("Chunks.md")).unwrap();
    assert!(docs.contains("## Foo `0x100`"));
}

#[test]
fn run___second_run___leaves_code_untouched() {
    let f = fixture(FOO_SCHEMA);
    run(&f.input, &f.output, &f.config, &registry()).unwrap();
    let header_path = f.output.join("P3D.generated.h");
    let before = fs::metadata(&header_path).unwrap().modified().unwrap();

    let report = run(&f.input, &f.output, &f.config, &registry()).unwrap();

    assert_eq!(report.header, WriteOutcome::Unchanged);
    assert_eq!(report.source, WriteOutcome::Unchanged);
    assert!(!report.code_changed());
    assert_eq!(
        fs::metadata(&header_path).unwrap().modified().unwrap(),
        before
    );
}

#[test]
fn run___schema_change___rewrites_code() {
    let f = fixture(FOO_SCHEMA);
    run(&f.input, &f.output, &f.config, &registry()).unwrap();
    fs::write(&f.input, r#"{"Foo": {"id": "u32"}}"#).unwrap();

    let report = run(&f.input, &f.output, &f.config, &registry()).unwrap();

    assert!(report.code_changed());
    let header = fs::read_to_string(f.output.join("P3D.generated.h")).unwrap();
    assert!(!header.contains("GetName"));
}

#[test]
fn run___missing_input___writes_nothing() {
    let f = fixture(FOO_SCHEMA);
    let missing = f.dir.path().join("missing.json");

    let result = run(&missing, &f.output, &f.config, &registry());

    assert!(matches!(result, Err(GenError::InputNotFound(_))));
    assert_eq!(fs::read_dir(&f.output).unwrap().count(), 0);
    assert!(!f.dir.path().join("Chunks.md").exists());
}

#[test]
fn run___missing_output_dir___writes_nothing() {
    let f = fixture(FOO_SCHEMA);
    let missing = f.dir.path().join("nowhere");

    let result = run(&f.input, &missing, &f.config, &registry());

    assert!(matches!(result, Err(GenError::OutputDirNotFound(_))));
    assert!(!f.dir.path().join("Chunks.md").exists());
}

#[test]
fn run___invalid_json___writes_nothing() {
    let f = fixture("{ not json");

    let result = run(&f.input, &f.output, &f.config, &registry());

    assert!(matches!(result, Err(GenError::SchemaParse(_))));
    assert_eq!(fs::read_dir(&f.output).unwrap().count(), 0);
}

#[test]
fn run___invalid_config___rejected_before_writing() {
    let f = fixture(FOO_SCHEMA);
    let config = GeneratorConfig {
        namespace: String::new(),
        ..f.config.clone()
    };

    let result = run(&f.input, &f.output, &config, &registry());

    assert!(matches!(result, Err(GenError::Config(_))));
    assert_eq!(fs::read_dir(&f.output).unwrap().count(), 0);
}

#[test]
fn run___custom_file_names() {
    let f = fixture(FOO_SCHEMA);
    let config = GeneratorConfig {
        header_file: "Chunks.h".to_string(),
        source_file: "Chunks.cpp".to_string(),
        ..f.config.clone()
    };

    run(&f.input, &f.output, &config, &registry()).unwrap();

    let source = fs::read_to_string(f.output.join("Chunks.cpp")).unwrap();
    assert!(source.contains("#include \"Chunks.h\""));
}

#[test]
fn compile_file___returns_generated_without_writing() {
    let f = fixture(FOO_SCHEMA);

    let generated = compile_file(&f.input, &registry()).unwrap();

    assert!(generated.defines("Foo"));
    assert_eq!(fs::read_dir(&f.output).unwrap().count(), 0);
}

#[test]
fn compile_file___missing_input___error() {
    let dir = TempDir::new().unwrap();

    let result = compile_file(&dir.path().join("nope.json"), &registry());

    assert!(matches!(result, Err(GenError::InputNotFound(_))));
}
