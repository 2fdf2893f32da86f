//! Runtime values
//!
//! This module defines the ScalarValue enum and the collection payloads it
//! carries. Values are immutable once built; functions always produce fresh
//! values rather than mutating their inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DataType, StructField};

/// The runtime value passed to and returned from every function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ScalarValue {
    /// Null value (represents missing/unknown)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Long(i64),
    /// 64-bit float
    Double(f64),
    /// UTF-8 text
    String(String),
    /// Byte sequence
    Binary(Vec<u8>),
    /// Ordered sequence
    Array(ArrayValue),
    /// Key-value mapping
    Map(MapValue),
    /// Record with ordered named fields
    Struct(StructValue),
}

impl ScalarValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type of this value.
    ///
    /// A bare null has type [`DataType::Null`]; typed nulls only exist at
    /// resolution time, where the operand carries the type.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Boolean(_) => DataType::Boolean,
            Self::Long(_) => DataType::Long,
            Self::Double(_) => DataType::Double,
            Self::String(_) => DataType::String,
            Self::Binary(_) => DataType::Binary,
            Self::Array(array) => array.data_type(),
            Self::Map(map) => map.data_type(),
            Self::Struct(record) => DataType::Struct(record.fields.clone()),
        }
    }

    /// Try to get as Boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as Long
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Try to get as Double, promoting Long
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Long(l) => Some(*l as f64),
            _ => None,
        }
    }

    /// Try to get as String
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as Binary
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as Array
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as Map
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get as Struct
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an array value; the null flag is derived from the elements
    pub fn array(element_type: DataType, elements: Vec<ScalarValue>) -> Self {
        Self::Array(ArrayValue::from_elements(element_type, elements))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Long(l) => write!(f, "{}", l),
            Self::Double(d) => {
                if d.is_finite() && d.fract() == 0.0 {
                    write!(f, "{:.1}", d)
                } else {
                    write!(f, "{}", d)
                }
            }
            Self::String(s) => write!(f, "{}", s),
            Self::Binary(b) => write!(f, "X'{}'", hex::encode_upper(b)),
            Self::Array(a) => write!(f, "{}", a),
            Self::Map(m) => write!(f, "{}", m),
            Self::Struct(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Struct(a), Self::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// Collection Types
// ============================================================================

/// Ordered sequence of values
///
/// `contains_null` is the declared upper bound; it may be true for an array
/// that holds no nulls, never false for one that does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayValue {
    /// Element type
    pub element_type: DataType,
    /// Whether elements may be null
    pub contains_null: bool,
    /// Elements in order
    pub elements: Vec<ScalarValue>,
}

impl ArrayValue {
    /// Create an array with an explicit null flag.
    ///
    /// The flag is widened if the elements contain a null.
    pub fn new(element_type: DataType, contains_null: bool, elements: Vec<ScalarValue>) -> Self {
        let contains_null = contains_null || elements.iter().any(ScalarValue::is_null);
        Self {
            element_type,
            contains_null,
            elements,
        }
    }

    /// Create an array whose null flag is derived from its elements
    pub fn from_elements(element_type: DataType, elements: Vec<ScalarValue>) -> Self {
        Self::new(element_type, false, elements)
    }

    /// Create an empty array
    pub fn empty(element_type: DataType) -> Self {
        Self::new(element_type, false, Vec::new())
    }

    /// Type of this array
    pub fn data_type(&self) -> DataType {
        DataType::array(self.element_type.clone(), self.contains_null)
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Get an element by index (0-based)
    pub fn get(&self, index: usize) -> Option<&ScalarValue> {
        self.elements.get(index)
    }

    /// Check whether any element is actually null
    pub fn has_null(&self) -> bool {
        self.elements.iter().any(ScalarValue::is_null)
    }

    /// Iterate over elements
    pub fn iter(&self) -> std::slice::Iter<'_, ScalarValue> {
        self.elements.iter()
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, elem) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, "]")
    }
}

/// Key-value mapping
///
/// Keys are pairwise distinct and never null. Entry order is the iteration
/// order observed by `map_keys`, `map_values` and `map_entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapValue {
    /// Key type
    pub key_type: DataType,
    /// Value type
    pub value_type: DataType,
    /// Whether values may be null
    pub value_contains_null: bool,
    /// Entries in iteration order
    pub entries: Vec<(ScalarValue, ScalarValue)>,
}

impl MapValue {
    /// Create a map from entries whose keys are already distinct
    pub fn new(
        key_type: DataType,
        value_type: DataType,
        value_contains_null: bool,
        entries: Vec<(ScalarValue, ScalarValue)>,
    ) -> Self {
        let value_contains_null = value_contains_null || entries.iter().any(|(_, v)| v.is_null());
        Self {
            key_type,
            value_type,
            value_contains_null,
            entries,
        }
    }

    /// Create an empty map
    pub fn empty(key_type: DataType, value_type: DataType) -> Self {
        Self::new(key_type, value_type, false, Vec::new())
    }

    /// Type of this map
    pub fn data_type(&self) -> DataType {
        DataType::map(
            self.key_type.clone(),
            self.value_type.clone(),
            self.value_contains_null,
        )
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &ScalarValue> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over values in iteration order
    pub fn values(&self) -> impl Iterator<Item = &ScalarValue> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Record with ordered named fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructValue {
    /// Field definitions, fixed at resolution time
    pub fields: Vec<StructField>,
    /// One value per field, in field order
    pub values: Vec<ScalarValue>,
}

impl StructValue {
    /// Create a record; `values` must line up with `fields`
    pub fn new(fields: Vec<StructField>, values: Vec<ScalarValue>) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        Self { fields, values }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (field, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&StructField, &ScalarValue)> {
        self.fields.iter().zip(self.values.iter())
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.name == b.name)
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, value)?;
        }
        write!(f, "}}")
    }
}
