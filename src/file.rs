use std::io::{BufReader, Read};

use crate::error::Result;
use crate::types::{Key, Number, Value};

/// Parse a JSON document into a [`Value`] tree.
pub fn from_json_str(text: &str) -> Result<Value> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(parsed))
}

pub fn from_json_reader<R: Read>(reader: R) -> Result<Value> {
    let parsed: serde_json::Value = serde_json::from_reader(BufReader::new(reader))?;
    Ok(Value::from(parsed))
}

// Objects keep document order; integers that fit i64 stay integers.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as JsonValue;
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(match n.as_i64() {
                Some(i) => Number::Int(i),
                None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(a) => Value::Array(a.into_iter().map(Value::from).collect()),
            JsonValue::Object(m) => Value::Object(
                m.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
