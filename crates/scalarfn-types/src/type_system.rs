//! Type system
//!
//! This module defines the type descriptors used at resolution time:
//! - DataType enum representing every operand and result type
//! - StructField for named record fields
//! - Nullability-aware type comparison and merging

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a value, including the "may contain null" flags of collections.
///
/// The null flags are conservative upper bounds: a value typed
/// `array<bigint>` with `contains_null = true` may still hold no nulls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum DataType {
    /// Type of an untyped null literal
    Null,
    /// Boolean
    Boolean,
    /// 64-bit signed integer
    Long,
    /// 64-bit IEEE float
    Double,
    /// UTF-8 text
    String,
    /// Byte sequence
    Binary,
    /// Ordered sequence of elements
    Array {
        element_type: Box<DataType>,
        contains_null: bool,
    },
    /// Key-value mapping
    Map {
        key_type: Box<DataType>,
        value_type: Box<DataType>,
        value_contains_null: bool,
    },
    /// Record with ordered named fields
    Struct(Vec<StructField>),
}

impl DataType {
    // === Constructors ===

    /// Create an array type
    pub fn array(element_type: DataType, contains_null: bool) -> Self {
        Self::Array {
            element_type: Box::new(element_type),
            contains_null,
        }
    }

    /// Create a map type
    pub fn map(key_type: DataType, value_type: DataType, value_contains_null: bool) -> Self {
        Self::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
            value_contains_null,
        }
    }

    /// Create a struct type
    pub fn struct_of(fields: Vec<StructField>) -> Self {
        Self::Struct(fields)
    }

    // === Type Properties ===

    /// Check if this is the type of an untyped null literal
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Long | Self::Double)
    }

    /// Check if this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Check if this is a map type
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }

    /// Check if values of this type can be ordered.
    ///
    /// Maps are not orderable, and neither is any composite containing one.
    pub fn is_orderable(&self) -> bool {
        match self {
            Self::Map { .. } => false,
            Self::Array { element_type, .. } => element_type.is_orderable(),
            Self::Struct(fields) => fields.iter().all(|f| f.data_type.is_orderable()),
            _ => true,
        }
    }

    /// Get the element type and null flag of an array type
    pub fn array_element(&self) -> Option<(&DataType, bool)> {
        match self {
            Self::Array {
                element_type,
                contains_null,
            } => Some((element_type, *contains_null)),
            _ => None,
        }
    }

    /// Get the key type, value type and value null flag of a map type
    pub fn map_entry(&self) -> Option<(&DataType, &DataType, bool)> {
        match self {
            Self::Map {
                key_type,
                value_type,
                value_contains_null,
            } => Some((key_type, value_type, *value_contains_null)),
            _ => None,
        }
    }

    /// Get the fields of a struct type
    pub fn struct_fields(&self) -> Option<&[StructField]> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get the simple name of this type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "void",
            Self::Boolean => "boolean",
            Self::Long => "bigint",
            Self::Double => "double",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Array { .. } => "array",
            Self::Map { .. } => "map",
            Self::Struct(_) => "struct",
        }
    }

    /// Render the full SQL type string, e.g. `map<string,array<bigint>>`
    pub fn sql_name(&self) -> String {
        match self {
            Self::Array { element_type, .. } => format!("array<{}>", element_type.sql_name()),
            Self::Map {
                key_type,
                value_type,
                ..
            } => format!("map<{},{}>", key_type.sql_name(), value_type.sql_name()),
            Self::Struct(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{}:{}", f.name, f.data_type.sql_name()))
                    .collect();
                format!("struct<{}>", fields.join(","))
            }
            other => other.name().to_string(),
        }
    }

    // === Type Relationships ===

    /// Check if two types are the same once every null flag is ignored
    pub fn same_type(&self, other: &DataType) -> bool {
        match (self, other) {
            (
                Self::Array {
                    element_type: a, ..
                },
                Self::Array {
                    element_type: b, ..
                },
            ) => a.same_type(b),
            (
                Self::Map {
                    key_type: ka,
                    value_type: va,
                    ..
                },
                Self::Map {
                    key_type: kb,
                    value_type: vb,
                    ..
                },
            ) => ka.same_type(kb) && va.same_type(vb),
            (Self::Struct(a), Self::Struct(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|(fa, fb)| fa.name == fb.name && fa.data_type.same_type(&fb.data_type))
            }
            _ => self == other,
        }
    }

    /// Merge two types that are the same modulo nullability, widening every
    /// null flag to the union of both sides.
    ///
    /// An untyped null merges into any type. Returns None for unrelated types.
    pub fn merge(&self, other: &DataType) -> Option<DataType> {
        match (self, other) {
            (Self::Null, t) | (t, Self::Null) => Some(t.clone()),
            (
                Self::Array {
                    element_type: a,
                    contains_null: na,
                },
                Self::Array {
                    element_type: b,
                    contains_null: nb,
                },
            ) => Some(Self::array(a.merge(b)?, *na || *nb)),
            (
                Self::Map {
                    key_type: ka,
                    value_type: va,
                    value_contains_null: na,
                },
                Self::Map {
                    key_type: kb,
                    value_type: vb,
                    value_contains_null: nb,
                },
            ) => Some(Self::map(ka.merge(kb)?, va.merge(vb)?, *na || *nb)),
            (Self::Struct(a), Self::Struct(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                let fields = a
                    .iter()
                    .zip(b.iter())
                    .map(|(fa, fb)| {
                        if fa.name != fb.name {
                            return None;
                        }
                        Some(StructField::new(
                            fa.name.clone(),
                            fa.data_type.merge(&fb.data_type)?,
                            fa.nullable || fb.nullable,
                        ))
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(Self::Struct(fields))
            }
            (a, b) if a == b => Some(a.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}

impl Default for DataType {
    fn default() -> Self {
        Self::Null
    }
}

/// Field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    /// Field name
    pub name: String,
    /// Field type
    pub data_type: DataType,
    /// Whether the field may hold null
    pub nullable: bool,
}

impl StructField {
    /// Create a new struct field
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}
