use serde_json::{Map, Value};

/// Fields of a structured input line. All optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFields {
    pub key: Option<String>,
    pub value: Option<String>,
    pub partition: Option<i32>,
}

/// Result of classifying one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A JSON object with `key`/`value`/`partition` of the right types.
    Structured(LineFields),
    /// Anything else, kept as the original text.
    Raw(String),
}

/// Try the structured interpretation first, fall back to raw text.
///
/// The fallback is the normal path for free-text input, not an error.
/// A field repeated in the object keeps its last value.
pub fn classify_line(line: String) -> Line {
    match structured_fields(&line) {
        Ok(fields) => Line::Structured(fields),
        Err(reason) => {
            tracing::debug!(%line, error = %reason, "not a structured line, using it as value");
            Line::Raw(line)
        }
    }
}

fn structured_fields(line: &str) -> Result<LineFields, String> {
    let object: Map<String, Value> = serde_json::from_str(line).map_err(|e| e.to_string())?;
    Ok(LineFields {
        key: string_field(&object, "key")?,
        value: string_field(&object, "value")?,
        partition: partition_field(&object)?,
    })
}

fn string_field(object: &Map<String, Value>, name: &str) -> Result<Option<String>, String> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("field {name}: expected a string, got {other}")),
    }
}

fn partition_field(object: &Map<String, Value>) -> Result<Option<i32>, String> {
    match object.get("partition") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| format!("field partition: expected a 32-bit integer, got {v}")),
    }
}
