//! Schema diagnostics for the `check` command.

use crate::generator::Generated;
use crate::registry::ChunkRegistry;
use std::fmt;

/// A field whose directive compiled to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub chunk: String,
    pub field: String,
    pub directive: String,
}

/// A field that never receives data because an earlier field owns its
/// dispatch arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedField {
    pub chunk: String,
    pub field: String,
    pub child: String,
    pub winner: String,
}

/// What a schema compiles to, without rendering or writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub chunks: usize,
    pub plans: usize,
    pub skipped: Vec<SkippedField>,
    pub shadowed: Vec<ShadowedField>,
    pub unregistered: Vec<String>,
    pub undefined: usize,
    pub registered: usize,
}

impl CheckReport {
    pub fn new(generated: &Generated, registry: &ChunkRegistry) -> Self {
        let skipped = generated
            .skipped()
            .map(|(chunk, field)| SkippedField {
                chunk: chunk.to_string(),
                field: field.name.clone(),
                directive: field.directive.clone(),
            })
            .collect();

        let shadowed = generated
            .shadowed()
            .map(|(chunk, plan)| ShadowedField {
                chunk: chunk.to_string(),
                field: plan.field.clone(),
                child: plan.chunk.clone(),
                winner: plan.winner.clone(),
            })
            .collect();

        Self {
            chunks: generated.chunks.len(),
            plans: generated.plan_count(),
            skipped,
            shadowed,
            unregistered: generated.unregistered().map(String::from).collect(),
            undefined: registry.undefined(|name| generated.defines(name)).len(),
            registered: registry.len(),
        }
    }

    /// Whether the schema compiled with nothing dropped or shadowed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.shadowed.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chunk definitions: {}", self.chunks)?;
        writeln!(f, "Compiled fields:   {}", self.plans)?;
        writeln!(
            f,
            "Registry coverage: {} / {} ({} undefined)",
            self.registered - self.undefined,
            self.registered,
            self.undefined
        )?;

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped fields ({}):", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {}.{}: \"{}\"", s.chunk, s.field, s.directive)?;
            }
        }

        if !self.shadowed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Shadowed dispatch arms ({}):", self.shadowed.len())?;
            for s in &self.shadowed {
                writeln!(
                    f,
                    "  {}.{}: {} already handled by {}",
                    s.chunk, s.field, s.child, s.winner
                )?;
            }
        }

        if !self.unregistered.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Unregistered chunk definitions ({}):",
                self.unregistered.len()
            )?;
            for name in &self.unregistered {
                writeln!(f, "  {name}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::generator::generate;
    use crate::schema::{ChunkDef, Schema};

    fn registry() -> ChunkRegistry {
        ChunkRegistry::new([("Mesh", 0x10000), ("Shader", 0x11000), ("Camera", 0x2200)])
    }

    fn report(schema: Schema) -> CheckReport {
        let registry = registry();
        CheckReport::new(&generate(&schema, &registry), &registry)
    }

    #[test]
    fn new___counts_chunks_plans_and_coverage() {
        let report = report(
            [
                ChunkDef::new("Mesh").field("name", "string").field("version", "u32"),
                ChunkDef::new("Vertex").field("x", "float"),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(report.chunks, 2);
        assert_eq!(report.plans, 3);
        assert_eq!(report.registered, 3);
        assert_eq!(report.undefined, 2);
        assert_eq!(report.unregistered, vec!["Vertex"]);
        assert!(report.is_clean());
    }

    #[test]
    fn new___skipped_field___listed_with_directive() {
        let report = report(
            [ChunkDef::new("Mesh").field("odd", "frobnicate a b c d")]
                .into_iter()
                .collect(),
        );

        assert_eq!(
            report.skipped,
            vec![SkippedField {
                chunk: "Mesh".to_string(),
                field: "odd".to_string(),
                directive: "frobnicate a b c d".to_string(),
            }]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn new___shadowed_field___names_winner() {
        let report = report(
            [ChunkDef::new("Mesh")
                .field("shader", "child Shader")
                .field("shaders", "children Shader")]
            .into_iter()
            .collect(),
        );

        assert_eq!(
            report.shadowed,
            vec![ShadowedField {
                chunk: "Mesh".to_string(),
                field: "shaders".to_string(),
                child: "Shader".to_string(),
                winner: "shader".to_string(),
            }]
        );
    }

    #[test]
    fn display___includes_sections_only_when_present() {
        let clean = report([ChunkDef::new("Mesh")].into_iter().collect()).to_string();

        assert!(clean.contains("Chunk definitions: 1"));
        assert!(clean.contains("Registry coverage: 1 / 3 (2 undefined)"));
        assert!(!clean.contains("Skipped"));
        assert!(!clean.contains("Shadowed"));
        assert!(!clean.contains("Unregistered"));
    }

    #[test]
    fn display___lists_shadowed_arm() {
        let text = report(
            [ChunkDef::new("Mesh")
                .field("a", "child Shader")
                .field("b", "child Shader")]
            .into_iter()
            .collect(),
        )
        .to_string();

        assert!(text.contains("Shadowed dispatch arms (1):"));
        assert!(text.contains("  Mesh.b: Shader already handled by a"));
    }
}
