//! Call arguments from the command line
//!
//! Each argument is a JSON literal:
//! - `null`, `true`, `42`, `1.5`, `"text"`
//! - `[1, 2, null]`: an array; integers mixed with floats become doubles
//! - `{"a": 1}`: a map with string keys
//! - `{"$map": [[1, "one"], [2, "two"]]}`: a map with keys of any type
//! - `{"$struct": [["id", 1], ["name", "x"]]}`: a struct with ordered fields
//! - `{"$binary": "0aff"}`: bytes in hex
//! - `{"$double": "NaN"}`: a double spelled as text (NaN, Infinity, -0.0)
//! - `{"$null": "bigint"}`: a typed null

use anyhow::{anyhow, bail, Context, Result};
use scalarfn_eval::functions::map::MapBuilder;
use scalarfn_eval::{MapKeyDedupPolicy, Operand};
use scalarfn_types::{ArrayValue, DataType, ScalarValue, StructField, StructValue};
use serde_json::{Map, Value};

/// A parsed argument: its resolution-time description and its value
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub operand: Operand,
    pub value: ScalarValue,
}

/// Parse one command-line argument
pub fn parse_argument(text: &str) -> Result<Argument> {
    let json: Value =
        serde_json::from_str(text).with_context(|| format!("Invalid JSON argument: {}", text))?;
    if let Some(data_type) = typed_null(&json)? {
        return Ok(Argument {
            operand: Operand::typed_null(data_type),
            value: ScalarValue::Null,
        });
    }
    let value = json_to_value(&json)?;
    Ok(Argument {
        operand: Operand::literal(value.clone()),
        value,
    })
}

/// Parse all command-line arguments in order
pub fn parse_arguments(texts: &[String]) -> Result<Vec<Argument>> {
    texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            parse_argument(text).with_context(|| format!("Argument {} is malformed", idx + 1))
        })
        .collect()
}

fn typed_null(json: &Value) -> Result<Option<DataType>> {
    let Some(name) = tagged(json, "$null") else {
        return Ok(None);
    };
    let name = name
        .as_str()
        .ok_or_else(|| anyhow!("$null expects a type name"))?;
    parse_type_name(name).map(Some)
}

/// Parse a scalar SQL type name
pub fn parse_type_name(name: &str) -> Result<DataType> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "boolean" => DataType::Boolean,
        "bigint" | "long" => DataType::Long,
        "double" => DataType::Double,
        "string" => DataType::String,
        "binary" => DataType::Binary,
        other => bail!("Unknown type name: {}", other),
    })
}

/// Convert a JSON literal into a value
pub fn json_to_value(json: &Value) -> Result<ScalarValue> {
    match json {
        Value::Null => Ok(ScalarValue::Null),
        Value::Bool(b) => Ok(ScalarValue::Boolean(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(l) => Ok(ScalarValue::Long(l)),
            None => n
                .as_f64()
                .map(ScalarValue::Double)
                .ok_or_else(|| anyhow!("Number out of range: {}", n)),
        },
        Value::String(s) => Ok(ScalarValue::string(s.as_str())),
        Value::Array(items) => {
            let elements = items.iter().map(json_to_value).collect::<Result<Vec<_>>>()?;
            let (element_type, elements) = unify(elements)?;
            Ok(ScalarValue::Array(ArrayValue::from_elements(
                element_type,
                elements,
            )))
        }
        Value::Object(object) => object_to_value(object),
    }
}

fn object_to_value(object: &Map<String, Value>) -> Result<ScalarValue> {
    if let Some(hex_text) = single(object, "$binary") {
        let text = hex_text
            .as_str()
            .ok_or_else(|| anyhow!("$binary expects a hex string"))?;
        let bytes = hex::decode(text).with_context(|| format!("Invalid hex: {}", text))?;
        return Ok(ScalarValue::Binary(bytes));
    }
    if let Some(text) = single(object, "$double") {
        let text = text
            .as_str()
            .ok_or_else(|| anyhow!("$double expects a string"))?;
        let d: f64 = text
            .parse()
            .with_context(|| format!("Invalid double: {}", text))?;
        return Ok(ScalarValue::Double(d));
    }
    if let Some(pairs) = single(object, "$struct") {
        let pairs = pairs_of(pairs, "$struct")?;
        let mut fields = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            let name = name
                .as_str()
                .ok_or_else(|| anyhow!("$struct field names must be strings"))?;
            let value = json_to_value(value)?;
            fields.push(StructField::new(name, value.data_type(), value.is_null()));
            values.push(value);
        }
        return Ok(ScalarValue::Struct(StructValue::new(fields, values)));
    }
    if let Some(pairs) = single(object, "$map") {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for (key, value) in pairs_of(pairs, "$map")? {
            keys.push(json_to_value(key)?);
            values.push(json_to_value(value)?);
        }
        return build_map(keys, values);
    }

    let keys = object.keys().map(|k| ScalarValue::string(k.as_str())).collect();
    let values = object
        .values()
        .map(json_to_value)
        .collect::<Result<Vec<_>>>()?;
    build_map(keys, values)
}

fn build_map(keys: Vec<ScalarValue>, values: Vec<ScalarValue>) -> Result<ScalarValue> {
    if keys.iter().any(ScalarValue::is_null) {
        bail!("Map keys must not be null");
    }
    let (key_type, keys) = unify(keys)?;
    let (value_type, values) = unify(values)?;
    let value_contains_null = values.iter().any(ScalarValue::is_null);
    let mut builder = MapBuilder::new(
        "$map",
        key_type,
        value_type,
        value_contains_null,
        MapKeyDedupPolicy::Exception,
    );
    for (key, value) in keys.into_iter().zip(values) {
        builder.put(key, value)?;
    }
    Ok(ScalarValue::Map(builder.build()))
}

/// Common element type of a list of values; bigints are widened to double
/// when the list also holds doubles
fn unify(values: Vec<ScalarValue>) -> Result<(DataType, Vec<ScalarValue>)> {
    let mut common = DataType::Null;
    let mut widen = false;
    for value in &values {
        let data_type = value.data_type();
        common = match common.merge(&data_type) {
            Some(merged) => merged,
            None if common.is_numeric() && data_type.is_numeric() => {
                widen = true;
                DataType::Double
            }
            None => bail!("Mixed element types {} and {}", common, data_type),
        };
    }
    if widen {
        let values = values
            .into_iter()
            .map(|value| match value {
                ScalarValue::Long(l) => ScalarValue::Double(l as f64),
                other => other,
            })
            .collect();
        return Ok((common, values));
    }
    Ok((common, values))
}

fn tagged<'a>(json: &'a Value, tag: &str) -> Option<&'a Value> {
    json.as_object().and_then(|object| single(object, tag))
}

fn single<'a>(object: &'a Map<String, Value>, tag: &str) -> Option<&'a Value> {
    if object.len() == 1 {
        object.get(tag)
    } else {
        None
    }
}

fn pairs_of<'a>(json: &'a Value, tag: &str) -> Result<Vec<(&'a Value, &'a Value)>> {
    let items = json
        .as_array()
        .ok_or_else(|| anyhow!("{} expects a list of pairs", tag))?;
    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([first, second]) => Ok((first, second)),
            _ => Err(anyhow!("{} entries must be two-element lists", tag)),
        })
        .collect()
}
