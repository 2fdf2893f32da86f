//! Map functions
//!
//! Implements: element_at (maps), map_from_arrays, map_from_entries,
//! map_entries, map_keys and map_values.

use super::{array_arg, map_arg, mismatch};
use crate::config::MapKeyDedupPolicy;
use crate::error::{FnResult, FunctionError};
use crate::ordering::values_equal;
use scalarfn_types::{ArrayValue, DataType, MapValue, ScalarValue, StructField, StructValue};

/// Builds a map while enforcing non-null, distinct keys
#[derive(Debug)]
pub struct MapBuilder {
    function: &'static str,
    key_type: DataType,
    value_type: DataType,
    value_contains_null: bool,
    policy: MapKeyDedupPolicy,
    entries: Vec<(ScalarValue, ScalarValue)>,
}

impl MapBuilder {
    /// Create a builder for a map of the given type
    pub fn new(
        function: &'static str,
        key_type: DataType,
        value_type: DataType,
        value_contains_null: bool,
        policy: MapKeyDedupPolicy,
    ) -> Self {
        Self {
            function,
            key_type,
            value_type,
            value_contains_null,
            policy,
            entries: Vec::new(),
        }
    }

    /// Add an entry.
    ///
    /// A repeated key keeps its first position; its value follows the
    /// dedup policy.
    pub fn put(&mut self, key: ScalarValue, value: ScalarValue) -> FnResult<()> {
        if key.is_null() {
            return Err(FunctionError::NullMapKey {
                function: self.function.to_string(),
            });
        }
        match self.entries.iter_mut().find(|(k, _)| values_equal(k, &key)) {
            Some(slot) => match self.policy {
                MapKeyDedupPolicy::LastWin => slot.1 = value,
                MapKeyDedupPolicy::Exception => {
                    return Err(FunctionError::DuplicateMapKey {
                        function: self.function.to_string(),
                        key: key.to_string(),
                    });
                }
            },
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    /// Finish the map
    pub fn build(self) -> MapValue {
        MapValue::new(
            self.key_type,
            self.value_type,
            self.value_contains_null,
            self.entries,
        )
    }
}

/// Value for `key`; an absent key gives null, or an error under ANSI mode
pub fn element_at(map: &ScalarValue, key: &ScalarValue, ansi: bool) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "element_at";
    let Some(map) = map_arg(FUNCTION, map)? else {
        return Ok(ScalarValue::Null);
    };
    if key.is_null() {
        return Ok(ScalarValue::Null);
    }
    match map.entries.iter().find(|(k, _)| values_equal(k, key)) {
        Some((_, value)) => Ok(value.clone()),
        None if ansi => Err(FunctionError::MapKeyNotFound {
            function: FUNCTION.to_string(),
            key: key.to_string(),
        }),
        None => Ok(ScalarValue::Null),
    }
}

/// Map pairing `keys` and `values` by position
pub fn map_from_arrays(
    keys: &ScalarValue,
    values: &ScalarValue,
    policy: MapKeyDedupPolicy,
) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "map_from_arrays";
    let (Some(keys), Some(values)) = (array_arg(FUNCTION, keys)?, array_arg(FUNCTION, values)?)
    else {
        return Ok(ScalarValue::Null);
    };
    if keys.len() != values.len() {
        return Err(FunctionError::LengthMismatch {
            function: FUNCTION.to_string(),
            keys: keys.len(),
            values: values.len(),
        });
    }

    let mut builder = MapBuilder::new(
        FUNCTION,
        keys.element_type.clone(),
        values.element_type.clone(),
        values.contains_null,
        policy,
    );
    for (key, value) in keys.iter().zip(values.iter()) {
        builder.put(key.clone(), value.clone())?;
    }
    Ok(ScalarValue::Map(builder.build()))
}

/// Map built from an array of two-field structs; any null entry gives null
pub fn map_from_entries(entries: &ScalarValue, policy: MapKeyDedupPolicy) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "map_from_entries";
    let Some(entries) = array_arg(FUNCTION, entries)? else {
        return Ok(ScalarValue::Null);
    };
    let fields = match entries.element_type.struct_fields() {
        Some(fields) if fields.len() == 2 => fields,
        _ => {
            return Err(FunctionError::internal(
                FUNCTION,
                format!(
                    "expected array of two-field structs, got {}",
                    entries.data_type()
                ),
            ));
        }
    };

    let mut builder = MapBuilder::new(
        FUNCTION,
        fields[0].data_type.clone(),
        fields[1].data_type.clone(),
        fields[1].nullable,
        policy,
    );
    for entry in entries.iter() {
        let record = match entry {
            ScalarValue::Null => return Ok(ScalarValue::Null),
            ScalarValue::Struct(record) => record,
            other => return Err(mismatch(FUNCTION, "struct", other)),
        };
        let [key, value] = record.values.as_slice() else {
            return Err(FunctionError::internal(
                FUNCTION,
                format!("expected two fields, got {}", record.len()),
            ));
        };
        builder.put(key.clone(), value.clone())?;
    }
    Ok(ScalarValue::Map(builder.build()))
}

/// Struct fields produced by `map_entries`
pub fn entry_fields(
    key_type: &DataType,
    value_type: &DataType,
    value_contains_null: bool,
) -> Vec<StructField> {
    vec![
        StructField::new("key", key_type.clone(), false),
        StructField::new("value", value_type.clone(), value_contains_null),
    ]
}

/// Array of key/value structs in iteration order
pub fn map_entries(map: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(map) = map_arg("map_entries", map)? else {
        return Ok(ScalarValue::Null);
    };
    let fields = entry_fields(&map.key_type, &map.value_type, map.value_contains_null);
    let elements = map
        .entries
        .iter()
        .map(|(key, value)| {
            ScalarValue::Struct(StructValue::new(
                fields.clone(),
                vec![key.clone(), value.clone()],
            ))
        })
        .collect();
    Ok(ScalarValue::Array(ArrayValue::new(
        DataType::Struct(fields),
        false,
        elements,
    )))
}

/// Array of keys in iteration order
pub fn map_keys(map: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(map) = map_arg("map_keys", map)? else {
        return Ok(ScalarValue::Null);
    };
    Ok(ScalarValue::Array(ArrayValue::new(
        map.key_type.clone(),
        false,
        map.keys().cloned().collect(),
    )))
}

/// Array of values in iteration order
pub fn map_values(map: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(map) = map_arg("map_values", map)? else {
        return Ok(ScalarValue::Null);
    };
    Ok(ScalarValue::Array(ArrayValue::new(
        map.value_type.clone(),
        map.value_contains_null,
        map.values().cloned().collect(),
    )))
}
