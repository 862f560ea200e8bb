//! Chunk parser generator.
//!
//! Turns the compiled field plans of each chunk definition into the
//! pieces of a C++ parse constructor:
//!
//! - sequential reads, executed against the chunk's own byte range in
//!   field declaration order;
//! - a dispatch table, executed once per child chunk, selecting the arm
//!   whose chunk type id matches the child.
//!
//! The dispatch table is built up front as an explicit key → arm mapping.
//! When two plans name the same child type, the first declared plan owns
//! the arm and the later one is recorded as shadowed: its storage is still
//! declared but never populated.

use crate::directive::{self, FieldPlan, PlanKind};
use crate::naming;
use crate::registry::ChunkRegistry;
use crate::schema::{ChunkDef, FieldDef, Schema};
use crate::types::NativeType;
use tracing::{debug, trace, warn};

/// Identity used to match a child chunk against dispatch arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchKey {
    /// Registered chunk type id.
    Id(u32),
    /// Chunk type name with no registered id.
    Name(String),
}

/// One `case` of the child dispatch switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchArm {
    pub key: DispatchKey,
    /// Child chunk type name, used as the `ChunkType::` label.
    pub chunk: String,
    /// Field populated by this arm.
    pub field: String,
    /// Statements executed for a matching child.
    pub body: Vec<String>,
    /// Whether the body reads the child's own byte range.
    pub uses_data_stream: bool,
}

/// A plan that lost its dispatch arm to an earlier plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedPlan {
    pub chunk: String,
    pub field: String,
    /// Field of the plan that owns the arm.
    pub winner: String,
}

/// Child dispatch for one chunk definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    pub arms: Vec<DispatchArm>,
    pub shadowed: Vec<ShadowedPlan>,
}

impl DispatchTable {
    /// Build the table for `plans`, or `None` if no plan needs dispatch.
    pub fn build(owner: &str, plans: &[FieldPlan], registry: &ChunkRegistry) -> Option<Self> {
        let mut table = DispatchTable::default();

        for plan in plans {
            let Some(chunk) = plan.source_chunk() else {
                continue;
            };

            let key = match registry.lookup(chunk) {
                Some(id) => DispatchKey::Id(id),
                None => DispatchKey::Name(chunk.to_string()),
            };

            let winner = table
                .arms
                .iter()
                .find(|arm| arm.key == key)
                .map(|arm| arm.field.clone());

            if let Some(winner) = winner {
                warn!(
                    chunk = owner,
                    child = chunk,
                    field = %plan.field,
                    winner = %winner,
                    "child type already dispatched by an earlier field; later field is never populated"
                );
                table.shadowed.push(ShadowedPlan {
                    chunk: chunk.to_string(),
                    field: plan.field.clone(),
                    winner,
                });
                continue;
            }

            table.arms.push(DispatchArm {
                key,
                chunk: chunk.to_string(),
                field: plan.field.clone(),
                body: dispatch_body(plan),
                uses_data_stream: plan.uses_data_stream(),
            });
        }

        if table.arms.is_empty() {
            None
        } else {
            Some(table)
        }
    }

    /// Arm selected for a child of type `chunk`.
    pub fn arm_for(&self, chunk: &str) -> Option<&DispatchArm> {
        self.arms.iter().find(|arm| arm.chunk == chunk)
    }

    /// Arm selected for a child with runtime type `id`.
    pub fn arm_for_id(&self, id: u32) -> Option<&DispatchArm> {
        self.arms.iter().find(|arm| arm.key == DispatchKey::Id(id))
    }

    /// Whether any arm reads the child's own byte range.
    pub fn uses_data_stream(&self) -> bool {
        self.arms.iter().any(|arm| arm.uses_data_stream)
    }
}

/// Everything needed to emit one chunk class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkArtifact {
    pub name: String,
    /// Registered chunk type id; `None` for plain value types.
    pub id: Option<u32>,
    pub diagnostic_logging: bool,
    /// Compiled plans in declaration order.
    pub plans: Vec<FieldPlan>,
    /// Fields whose directive produced no plan.
    pub skipped: Vec<FieldDef>,
    /// Sequential read statements in declaration order.
    pub reads: Vec<String>,
    pub dispatch: Option<DispatchTable>,
}

impl ChunkArtifact {
    /// Whether the child loop opens a stream over each child's data.
    pub fn use_data_stream(&self) -> bool {
        self.dispatch
            .as_ref()
            .is_some_and(DispatchTable::uses_data_stream)
    }

    /// Public accessor declarations, one per line.
    pub fn public_declarations(&self) -> Vec<String> {
        self.plans.iter().flat_map(accessor_declarations).collect()
    }

    /// Private storage declarations, one per line.
    pub fn private_declarations(&self) -> Vec<String> {
        self.plans
            .iter()
            .map(|plan| format!("{} {};", plan.storage_type(), plan.member()))
            .collect()
    }
}

/// Generator output for a whole schema, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub chunks: Vec<ChunkArtifact>,
}

impl Generated {
    /// Total number of compiled plans.
    pub fn plan_count(&self) -> usize {
        self.chunks.iter().map(|c| c.plans.len()).sum()
    }

    /// `(chunk, field)` pairs whose directive was ignored.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        self.chunks
            .iter()
            .flat_map(|c| c.skipped.iter().map(move |f| (c.name.as_str(), f)))
    }

    /// `(chunk, plan)` pairs whose dispatch arm was taken by an earlier field.
    pub fn shadowed(&self) -> impl Iterator<Item = (&str, &ShadowedPlan)> {
        self.chunks.iter().flat_map(|c| {
            c.dispatch
                .iter()
                .flat_map(|d| d.shadowed.iter())
                .map(move |s| (c.name.as_str(), s))
        })
    }

    /// Names of chunk definitions with no registered id.
    pub fn unregistered(&self) -> impl Iterator<Item = &str> {
        self.chunks
            .iter()
            .filter(|c| c.id.is_none())
            .map(|c| c.name.as_str())
    }

    /// Whether the schema defines a chunk named `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.chunks.iter().any(|c| c.name == name)
    }
}

/// Generate artifacts for every chunk definition, in schema order.
pub fn generate(schema: &Schema, registry: &ChunkRegistry) -> Generated {
    Generated {
        chunks: schema
            .chunks
            .iter()
            .map(|chunk| generate_chunk(chunk, registry))
            .collect(),
    }
}

/// Generate the artifact for one chunk definition.
pub fn generate_chunk(chunk: &ChunkDef, registry: &ChunkRegistry) -> ChunkArtifact {
    let mut plans = Vec::new();
    let mut skipped = Vec::new();

    for field in &chunk.fields {
        match directive::compile(&field.name, &field.directive) {
            Some(plan) => {
                trace!(
                    chunk = %chunk.name,
                    field = %plan.field,
                    kind = plan.kind.tag(),
                    "compiled field"
                );
                plans.push(plan);
            }
            None => {
                trace!(
                    chunk = %chunk.name,
                    field = %field.name,
                    directive = %field.directive,
                    "skipping field with unrecognized directive"
                );
                skipped.push(field.clone());
            }
        }
    }

    let reads = plans.iter().flat_map(sequential_reads).collect();
    let dispatch = DispatchTable::build(&chunk.name, &plans, registry);
    let id = registry.lookup(&chunk.name);

    debug!(
        chunk = %chunk.name,
        id = ?id,
        plans = plans.len(),
        skipped = skipped.len(),
        dispatch_arms = dispatch.as_ref().map_or(0, |d| d.arms.len()),
        "generated chunk"
    );

    ChunkArtifact {
        name: chunk.name.clone(),
        id,
        diagnostic_logging: chunk.diagnostic_logging,
        plans,
        skipped,
        reads,
        dispatch,
    }
}

/// Statements reading `plan` from the chunk's own stream.
fn sequential_reads(plan: &FieldPlan) -> Vec<String> {
    let member = plan.member();

    match &plan.kind {
        PlanKind::SequentialScalar { ty } => {
            vec![format!("{member} = stream.{};", ty.reader())]
        }
        PlanKind::FixedCharBuffer { len, .. } => {
            vec![format!("{member} = stream.ReadString({len});")]
        }
        PlanKind::SequentialArray { element, size } => {
            array_reads(&member, element, &size.expr("stream"), "stream")
        }
        _ => Vec::new(),
    }
}

/// Statements run when a matching child is traversed.
fn dispatch_body(plan: &FieldPlan) -> Vec<String> {
    let member = plan.member();

    match &plan.kind {
        PlanKind::ChildSingle { chunk } => {
            vec![format!("{member} = std::make_unique<{chunk}>(*child);")]
        }
        PlanKind::ChildTypedScalar { ty, .. } => {
            vec![format!("{member} = data.{};", ty.reader())]
        }
        PlanKind::ChildrenList { chunk } => {
            vec![format!("{member}.push_back(std::make_unique<{chunk}>(*child));")]
        }
        PlanKind::ChildrenTypedList { ty, .. } => {
            vec![format!("{member}.push_back(data.{});", ty.reader())]
        }
        PlanKind::DictionaryByKey {
            key_field, chunk, ..
        } => vec![
            format!("auto value = std::make_unique<{chunk}>(*child);"),
            format!(
                "{member}.insert_or_assign(value->{}(), std::move(value));",
                naming::accessor_name(key_field)
            ),
        ],
        PlanKind::ChildBuffer { element, size, .. } => {
            array_reads(&member, element, &size.expr("data"), "data")
        }
        PlanKind::MultiChannelBuffer { element, .. } => {
            let channel = format!("{member}[channel]");
            let mut body = vec![
                "uint32_t length = data.Read<uint32_t>();".to_string(),
                "uint32_t channel = data.Read<uint32_t>();".to_string(),
                format!("if ({member}.size() <= channel)"),
                "{".to_string(),
                format!("    {member}.resize(channel + 1);"),
                "}".to_string(),
            ];
            body.extend(array_reads(&channel, element, "length", "data"));
            body
        }
        PlanKind::SequentialScalar { .. }
        | PlanKind::FixedCharBuffer { .. }
        | PlanKind::SequentialArray { .. } => Vec::new(),
    }
}

/// Resize `target` to `count` elements and fill it from `stream`.
///
/// Strings are read one by one; everything else as one contiguous block.
fn array_reads(target: &str, element: &NativeType, count: &str, stream: &str) -> Vec<String> {
    let mut lines = vec![format!("{target}.resize({count});")];

    if element.is_string() {
        lines.push(format!("for (size_t i = 0; i < {target}.size(); ++i)"));
        lines.push("{".to_string());
        lines.push(format!("    {target}[i] = {stream}.ReadLPString();"));
        lines.push("}".to_string());
    } else {
        lines.push(format!(
            "{stream}.ReadBytes(reinterpret_cast<uint8_t*>({target}.data()), {target}.size() * sizeof({}));",
            element.native
        ));
    }

    lines
}

/// Public accessor lines for one plan.
fn accessor_declarations(plan: &FieldPlan) -> Vec<String> {
    let member = plan.member();
    let accessor = plan.accessor();
    let storage = plan.storage_type();
    let getter = format!("const {storage}& {accessor}() const {{ return {member}; }}");

    match &plan.kind {
        PlanKind::DictionaryByKey { key, chunk, .. } => vec![
            getter,
            format!(
                "{chunk}* {accessor}Value(const {}& key) const {{ auto it = {member}.find(key); return (it != {member}.end()) ? it->second.get() : nullptr; }}",
                key.native
            ),
        ],
        PlanKind::MultiChannelBuffer { element, .. } => vec![
            format!(
                "const std::vector<{}>& {accessor}(size_t index) const {{ return {member}.at(index); }}",
                element.native
            ),
            format!("size_t {accessor}Count() const {{ return {member}.size(); }}"),
        ],
        _ => vec![getter],
    }
}
