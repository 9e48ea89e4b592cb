//! JSON <-> AttributeValue conversion for the CLI surface.
//!
//! Items are given and printed as JSON objects; the adapter itself only
//! speaks `AttributeValue` maps.

use anyhow::{anyhow, bail, Result};
use docstore::{AttributeValue, Item};
use serde_json::{Map, Number, Value};

/// Parse a JSON object string into an item.
pub fn parse_item(input: &str) -> Result<Item> {
    let value: Value = serde_json::from_str(input)?;
    let Value::Object(map) = value else {
        bail!("expected a JSON object, got: {}", input);
    };
    map.into_iter()
        .map(|(name, value)| Ok((name, json_to_attribute(value)?)))
        .collect()
}

/// Convert one JSON value to an AttributeValue.
pub fn json_to_attribute(value: Value) -> Result<AttributeValue> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(
            values
                .into_iter()
                .map(json_to_attribute)
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(name, value)| Ok((name, json_to_attribute(value)?)))
                .collect::<Result<_>>()?,
        ),
    })
}

/// Render an item back to a JSON object.
pub fn item_to_json(item: &Item) -> Result<Value> {
    let mut map = Map::new();
    for (name, value) in item {
        map.insert(name.clone(), attribute_to_json(value)?);
    }
    Ok(Value::Object(map))
}

fn attribute_to_json(value: &AttributeValue) -> Result<Value> {
    Ok(match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(
            n.parse::<Number>()
                .map_err(|_| anyhow!("non-numeric N attribute: {}", n))?,
        ),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => {
            Value::Array(values.iter().map(attribute_to_json).collect::<Result<_>>()?)
        }
        AttributeValue::M(map) => {
            let mut object = Map::new();
            for (name, value) in map {
                object.insert(name.clone(), attribute_to_json(value)?);
            }
            Value::Object(object)
        }
        AttributeValue::Ss(values) => Value::Array(
            values
                .iter()
                .map(|s| Value::String(s.clone()))
                .collect(),
        ),
        other => bail!("unsupported attribute type: {:?}", other),
    })
}
