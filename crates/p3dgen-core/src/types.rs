//! Schema type tokens and their C++ equivalents.
//!
//! # Type Mappings
//!
//! | Schema | C++ |
//! |--------|-----|
//! | `s8` `s16` `s32` `s64` | `int8_t` .. `int64_t` |
//! | `u8` `u16` `u32` `u64` | `uint8_t` .. `uint64_t` |
//! | `bool` | `bool` |
//! | `float` | `float` |
//! | `string` | `std::string` |
//! | `vec2` `vec3` `vec4` | `glm::vec2` .. `glm::vec4` |
//! | `quat` | `glm::quat` |
//! | `mat4` | `glm::mat4` |
//!
//! Any other token is passed through unchanged and names another generated
//! chunk class.

/// Type mapping from schema token to C++
struct TypeMapping {
    token: &'static str,
    native: &'static str,
}

const TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping {
        token: "s8",
        native: "int8_t",
    },
    TypeMapping {
        token: "s16",
        native: "int16_t",
    },
    TypeMapping {
        token: "s32",
        native: "int32_t",
    },
    TypeMapping {
        token: "s64",
        native: "int64_t",
    },
    TypeMapping {
        token: "u8",
        native: "uint8_t",
    },
    TypeMapping {
        token: "u16",
        native: "uint16_t",
    },
    TypeMapping {
        token: "u32",
        native: "uint32_t",
    },
    TypeMapping {
        token: "u64",
        native: "uint64_t",
    },
    TypeMapping {
        token: "bool",
        native: "bool",
    },
    TypeMapping {
        token: "float",
        native: "float",
    },
    TypeMapping {
        token: "string",
        native: "std::string",
    },
    TypeMapping {
        token: "vec2",
        native: "glm::vec2",
    },
    TypeMapping {
        token: "vec3",
        native: "glm::vec3",
    },
    TypeMapping {
        token: "vec4",
        native: "glm::vec4",
    },
    TypeMapping {
        token: "quat",
        native: "glm::quat",
    },
    TypeMapping {
        token: "mat4",
        native: "glm::mat4",
    },
];

const STRING_TOKEN: &str = "string";

/// Resolve a schema token to its C++ type name.
///
/// Unknown tokens are returned as-is.
pub fn native_type(token: &str) -> &str {
    TYPE_MAPPINGS
        .iter()
        .find(|m| m.token == token)
        .map(|m| m.native)
        .unwrap_or(token)
}

/// A resolved schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    /// The token as written in the schema (used in documentation).
    pub token: String,
    /// The C++ type name.
    pub native: String,
    /// Whether the token was found in the primitive table.
    pub is_primitive: bool,
}

impl NativeType {
    /// Resolve a schema token. Never fails.
    pub fn resolve(token: &str) -> Self {
        let mapping = TYPE_MAPPINGS.iter().find(|m| m.token == token);

        Self {
            token: token.to_string(),
            native: mapping.map_or(token, |m| m.native).to_string(),
            is_primitive: mapping.is_some(),
        }
    }

    /// Whether values of this type are length-prefixed strings.
    pub fn is_string(&self) -> bool {
        self.token == STRING_TOKEN
    }

    /// Stream reader call for a single value, without the receiver.
    ///
    /// Strings use the length-prefixed reader, everything else the
    /// generic typed reader.
    pub fn reader(&self) -> String {
        if self.is_string() {
            "ReadLPString()".to_string()
        } else {
            format!("Read<{}>()", self.native)
        }
    }
}
