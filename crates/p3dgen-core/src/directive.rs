//! Field directive compiler.
//!
//! Each schema field carries a short directive describing where its bytes
//! live and how to decode them. Directives are tokenized on spaces and
//! angle brackets, then interpreted by token count and leading keyword:
//!
//! | Directive | Plan |
//! |-----------|------|
//! | `u32` | [`PlanKind::SequentialScalar`] |
//! | `string[4]` | [`PlanKind::FixedCharBuffer`] |
//! | `buffer u8`, `buffer u8[16]`, `buffer u8[count]` | [`PlanKind::SequentialArray`] |
//! | `child Mesh` | [`PlanKind::ChildSingle`] |
//! | `child<u32> Version` | [`PlanKind::ChildTypedScalar`] |
//! | `children Mesh` | [`PlanKind::ChildrenList`] |
//! | `children<string> Name` | [`PlanKind::ChildrenTypedList`] |
//! | `dictionary<string> name Shader` | [`PlanKind::DictionaryByKey`] |
//! | `buffer<vec3> PositionList` | [`PlanKind::ChildBuffer`] |
//! | `buffers<vec2> UVList` | [`PlanKind::MultiChannelBuffer`] |
//!
//! Any other shape produces no plan. Unknown directives are tolerated so
//! that schemas can evolve ahead of (or behind) the generator.

use crate::naming;
use crate::types::NativeType;

const SEPARATORS: [char; 3] = [' ', '<', '>'];

/// Split a directive into tokens, dropping empties.
pub fn tokenize(directive: &str) -> Vec<&str> {
    directive
        .split(SEPARATORS)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Element count of an array field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferSize {
    /// A `u32` count read from the stream just before the elements.
    Dynamic,
    /// A literal count from the schema.
    Fixed(u32),
    /// The value of a previously read scalar field.
    Field(String),
}

impl BufferSize {
    /// C++ expression producing the element count, reading from `stream`.
    pub fn expr(&self, stream: &str) -> String {
        match self {
            BufferSize::Dynamic => format!("{stream}.Read<uint32_t>()"),
            BufferSize::Fixed(n) => n.to_string(),
            BufferSize::Field(field) => naming::member_name(field),
        }
    }

    /// Size label used in documentation.
    pub fn label(&self) -> String {
        match self {
            BufferSize::Dynamic => "u32".to_string(),
            BufferSize::Fixed(n) => n.to_string(),
            BufferSize::Field(field) => field.clone(),
        }
    }
}

/// How a field is located and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanKind {
    /// One value read from the chunk's own stream.
    SequentialScalar { ty: NativeType },

    /// An exact-length character buffer read as one string.
    FixedCharBuffer { ty: NativeType, len: u32 },

    /// A vector read from the chunk's own stream.
    SequentialArray { element: NativeType, size: BufferSize },

    /// An optional nested chunk object.
    ChildSingle { chunk: String },

    /// A scalar read from a child chunk's stream.
    ChildTypedScalar { ty: NativeType, chunk: String },

    /// Every matching child chunk object, in encounter order.
    ChildrenList { chunk: String },

    /// One scalar per matching child chunk, in encounter order.
    ChildrenTypedList { ty: NativeType, chunk: String },

    /// Child chunk objects keyed by one of their own fields.
    DictionaryByKey {
        key: NativeType,
        key_field: String,
        chunk: String,
    },

    /// A vector read from a child chunk's stream.
    ChildBuffer {
        element: NativeType,
        size: BufferSize,
        chunk: String,
    },

    /// Sparse per-channel vectors, one channel per matching child.
    MultiChannelBuffer { element: NativeType, chunk: String },
}

impl PlanKind {
    /// Stable name of the read strategy.
    pub fn tag(&self) -> &'static str {
        match self {
            PlanKind::SequentialScalar { .. } => "SequentialScalar",
            PlanKind::FixedCharBuffer { .. } => "FixedCharBuffer",
            PlanKind::SequentialArray { .. } => "SequentialArray",
            PlanKind::ChildSingle { .. } => "ChildSingle",
            PlanKind::ChildTypedScalar { .. } => "ChildTypedScalar",
            PlanKind::ChildrenList { .. } => "ChildrenList",
            PlanKind::ChildrenTypedList { .. } => "ChildrenTypedList",
            PlanKind::DictionaryByKey { .. } => "DictionaryByKey",
            PlanKind::ChildBuffer { .. } => "ChildBuffer",
            PlanKind::MultiChannelBuffer { .. } => "MultiChannelBuffer",
        }
    }
}

/// Which documentation table a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTable {
    Fields,
    Children,
}

/// A compiled field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    /// Field name as written in the schema.
    pub field: String,
    pub kind: PlanKind,
}

impl FieldPlan {
    /// Public getter name (`GetName`).
    pub fn accessor(&self) -> String {
        naming::accessor_name(&self.field)
    }

    /// Private storage name (`_name`).
    pub fn member(&self) -> String {
        naming::member_name(&self.field)
    }

    /// C++ type of the private storage.
    pub fn storage_type(&self) -> String {
        match &self.kind {
            PlanKind::SequentialScalar { ty }
            | PlanKind::FixedCharBuffer { ty, .. }
            | PlanKind::ChildTypedScalar { ty, .. } => ty.native.clone(),
            PlanKind::SequentialArray { element, .. }
            | PlanKind::ChildBuffer { element, .. }
            | PlanKind::ChildrenTypedList { ty: element, .. } => {
                format!("std::vector<{}>", element.native)
            }
            PlanKind::ChildSingle { chunk } => format!("std::unique_ptr<{chunk}>"),
            PlanKind::ChildrenList { chunk } => {
                format!("std::vector<std::unique_ptr<{chunk}>>")
            }
            PlanKind::DictionaryByKey { key, chunk, .. } => {
                format!("std::map<{}, std::unique_ptr<{chunk}>>", key.native)
            }
            PlanKind::MultiChannelBuffer { element, .. } => {
                format!("std::vector<std::vector<{}>>", element.native)
            }
        }
    }

    /// Native type of a single stored value, where one exists.
    pub fn element_type(&self) -> Option<&NativeType> {
        match &self.kind {
            PlanKind::SequentialScalar { ty }
            | PlanKind::FixedCharBuffer { ty, .. }
            | PlanKind::ChildTypedScalar { ty, .. }
            | PlanKind::ChildrenTypedList { ty, .. } => Some(ty),
            PlanKind::SequentialArray { element, .. }
            | PlanKind::ChildBuffer { element, .. }
            | PlanKind::MultiChannelBuffer { element, .. } => Some(element),
            PlanKind::ChildSingle { .. }
            | PlanKind::ChildrenList { .. }
            | PlanKind::DictionaryByKey { .. } => None,
        }
    }

    /// Child chunk type that feeds this field through dispatch.
    pub fn source_chunk(&self) -> Option<&str> {
        match &self.kind {
            PlanKind::SequentialScalar { .. }
            | PlanKind::FixedCharBuffer { .. }
            | PlanKind::SequentialArray { .. } => None,
            PlanKind::ChildSingle { chunk }
            | PlanKind::ChildTypedScalar { chunk, .. }
            | PlanKind::ChildrenList { chunk }
            | PlanKind::ChildrenTypedList { chunk, .. }
            | PlanKind::DictionaryByKey { chunk, .. }
            | PlanKind::ChildBuffer { chunk, .. }
            | PlanKind::MultiChannelBuffer { chunk, .. } => Some(chunk),
        }
    }

    /// Whether this field is filled while traversing children.
    pub fn needs_dispatch(&self) -> bool {
        self.source_chunk().is_some()
    }

    /// Whether the dispatch arm reads the child's own byte range.
    pub fn uses_data_stream(&self) -> bool {
        matches!(
            self.kind,
            PlanKind::ChildTypedScalar { .. }
                | PlanKind::ChildrenTypedList { .. }
                | PlanKind::ChildBuffer { .. }
                | PlanKind::MultiChannelBuffer { .. }
        )
    }

    /// Documentation table and type label for this field.
    pub fn doc_row(&self) -> (DocTable, String) {
        match &self.kind {
            PlanKind::SequentialScalar { ty } => (DocTable::Fields, ty.token.clone()),
            PlanKind::FixedCharBuffer { ty, len } => {
                (DocTable::Fields, format!("{}[{len}]", ty.token))
            }
            PlanKind::SequentialArray { element, size } => (
                DocTable::Fields,
                format!("{}[{}]", element.token, size.label()),
            ),
            PlanKind::ChildSingle { chunk } => (DocTable::Children, chunk.clone()),
            PlanKind::ChildTypedScalar { ty, chunk } => {
                (DocTable::Children, format!("{chunk}<{}>", ty.token))
            }
            PlanKind::ChildrenList { chunk } | PlanKind::DictionaryByKey { chunk, .. } => {
                (DocTable::Children, format!("{chunk}[]"))
            }
            PlanKind::ChildrenTypedList { ty, chunk } => {
                (DocTable::Children, format!("{chunk}<{}>[]", ty.token))
            }
            PlanKind::ChildBuffer {
                element,
                size,
                chunk,
            } => (
                DocTable::Children,
                format!("{chunk}<{}>[{}]", element.token, size.label()),
            ),
            PlanKind::MultiChannelBuffer { element, chunk } => (
                DocTable::Children,
                format!("{chunk}<{}>[u32][u32]", element.token),
            ),
        }
    }
}

/// Split `base[inner]` into its parts.
///
/// Returns `None` for tokens without brackets and `Some(None)` for
/// bracketed tokens that do not have exactly two parts.
fn split_sized(token: &str) -> Option<Option<(&str, &str)>> {
    if !token.contains('[') {
        return None;
    }

    let parts: Vec<&str> = token
        .split(['[', ']'])
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [base, inner] => Some(Some((*base, *inner))),
        _ => Some(None),
    }
}

/// Element type and size of a `buffer` type token.
fn buffer_element(token: &str) -> Option<(NativeType, BufferSize)> {
    match split_sized(token) {
        None => Some((NativeType::resolve(token), BufferSize::Dynamic)),
        Some(None) => None,
        Some(Some((base, inner))) => {
            let size = match inner.parse::<u32>() {
                Ok(n) => BufferSize::Fixed(n),
                Err(_) => BufferSize::Field(inner.to_string()),
            };
            Some((NativeType::resolve(base), size))
        }
    }
}

/// Compile one field directive.
///
/// Returns `None` when the name or directive is blank or the directive
/// has no recognized shape.
pub fn compile(field: &str, directive: &str) -> Option<FieldPlan> {
    if field.trim().is_empty() || directive.trim().is_empty() {
        return None;
    }

    let tokens = tokenize(directive);
    let kind = match tokens.as_slice() {
        [] => return None,
        [single] => compile_single(single)?,
        [keyword, args @ ..] if args.len() <= 3 => compile_keyword(keyword, args)?,
        _ => return None,
    };

    Some(FieldPlan {
        field: field.to_string(),
        kind,
    })
}

fn compile_single(token: &str) -> Option<PlanKind> {
    match split_sized(token) {
        None => Some(PlanKind::SequentialScalar {
            ty: NativeType::resolve(token),
        }),
        Some(None) => None,
        Some(Some((base, len))) => {
            let len = len.parse::<u32>().ok()?;
            Some(PlanKind::FixedCharBuffer {
                ty: NativeType::resolve(base),
                len,
            })
        }
    }
}

fn compile_keyword(keyword: &str, args: &[&str]) -> Option<PlanKind> {
    let kind = match (keyword, args) {
        ("child", [chunk]) => PlanKind::ChildSingle {
            chunk: chunk.to_string(),
        },
        ("child", [ty, chunk]) => PlanKind::ChildTypedScalar {
            ty: NativeType::resolve(ty),
            chunk: chunk.to_string(),
        },
        ("children", [chunk]) => PlanKind::ChildrenList {
            chunk: chunk.to_string(),
        },
        ("children", [ty, chunk]) => PlanKind::ChildrenTypedList {
            ty: NativeType::resolve(ty),
            chunk: chunk.to_string(),
        },
        ("dictionary", [key, key_field, chunk]) => PlanKind::DictionaryByKey {
            key: NativeType::resolve(key),
            key_field: key_field.to_string(),
            chunk: chunk.to_string(),
        },
        ("buffer", [ty]) => {
            let (element, size) = buffer_element(ty)?;
            PlanKind::SequentialArray { element, size }
        }
        ("buffer", [ty, chunk]) => {
            let (element, size) = buffer_element(ty)?;
            PlanKind::ChildBuffer {
                element,
                size,
                chunk: chunk.to_string(),
            }
        }
        ("buffers", [ty, chunk]) => {
            if split_sized(ty).is_some() {
                return None;
            }
            let element = NativeType::resolve(ty);
            // Channels are read as raw bytes; strings cannot be.
            if element.is_string() {
                return None;
            }
            PlanKind::MultiChannelBuffer {
                element,
                chunk: chunk.to_string(),
            }
        }
        _ => return None,
    };

    Some(kind)
}
