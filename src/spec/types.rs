#![deny(missing_docs)]

//! # Specification Types
//!
//! Type descriptors for the declared data shapes of a service specification:
//! primitives, enums, models, and unions.
//!
//! Array and map types are never declared: they are referenced syntactically
//! by name (`[string]`, `map[long]`) and synthesized by the registry at
//! lookup time. Keeping every type reference a *name* makes self-referential
//! and mutually-recursive models representable without cyclic ownership.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// The built-in scalar and opaque types a specification may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    /// UTF-8 text. Numbers coerce to their decimal rendering.
    String,
    /// Native booleans, `1`/`0`, and a fixed set of string literals.
    Boolean,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 64-bit floating point.
    Double,
    /// Arbitrary-precision decimal (validated as a numeric literal).
    Decimal,
    /// Canonical UUID.
    Uuid,
    /// Calendar date, `year-month-day`.
    DateIso8601,
    /// Date-time with offset, or a bare date.
    DateTimeIso8601,
    /// Any JSON object, passed through unvalidated.
    Object,
    /// The absence of a value; only JSON null conforms.
    Unit,
}

impl PrimitiveKind {
    /// Looks up a primitive by its specification name (e.g. `date-iso8601`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "long" => Some(Self::Long),
            "double" => Some(Self::Double),
            "decimal" => Some(Self::Decimal),
            "uuid" => Some(Self::Uuid),
            "date-iso8601" => Some(Self::DateIso8601),
            "date-time-iso8601" => Some(Self::DateTimeIso8601),
            "object" => Some(Self::Object),
            "unit" => Some(Self::Unit),
            _ => None,
        }
    }

    /// The specification name of this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Uuid => "uuid",
            Self::DateIso8601 => "date-iso8601",
            Self::DateTimeIso8601 => "date-time-iso8601",
            Self::Object => "object",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single declared field of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its model.
    pub name: String,
    /// Declared type name (`string`, `[string]`, `map[long]`, a model name).
    #[serde(rename = "type")]
    pub typ: String,
    /// Whether the field must be present (or defaulted) in a valid payload.
    pub required: bool,
    /// Value inserted when the field is absent from a payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl Field {
    /// Creates a required field with no default.
    pub fn required(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            required: true,
            default: None,
        }
    }

    /// Creates an optional field with no default.
    pub fn optional(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            required: false,
            default: None,
        }
    }

    /// Attaches a default value, returning the updated field.
    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// A named type declared by a specification.
///
/// Members reference other types by *name*; nothing is embedded by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A closed set of string values.
    Enum {
        /// Declared type name.
        name: String,
        /// Accepted values, in declaration order.
        values: Vec<String>,
    },
    /// An object with declared fields.
    Model {
        /// Declared type name.
        name: String,
        /// Fields in declaration order.
        fields: Vec<Field>,
    },
    /// One of several member types, tagged by a discriminator field.
    Union {
        /// Declared type name.
        name: String,
        /// Field injected into normalized objects to record the member.
        discriminator: String,
        /// Member type names, tried in declaration order.
        types: Vec<String>,
    },
}

impl TypeDescriptor {
    /// The declared name of this type.
    pub fn name(&self) -> &str {
        match self {
            Self::Enum { name, .. } | Self::Model { name, .. } | Self::Union { name, .. } => name,
        }
    }
}
