use super::descriptor::{Category, NodeDescriptor};
use crate::error::SkipReason;
use serde_json::{Map, Value};

/// A trait for registry entry formats that can be converted into a `NodeDescriptor`.
///
/// The loader works on raw JSON values so that a single malformed entry can be
/// skipped with a precise reason instead of failing the whole snapshot. Other
/// catalog formats can implement this trait to feed the same batch runner.
pub trait IntoDescriptor {
    /// Consumes the entry and converts it, or explains why it must be skipped.
    fn into_descriptor(self) -> Result<NodeDescriptor, SkipReason>;
}

impl IntoDescriptor for &Value {
    fn into_descriptor(self) -> Result<NodeDescriptor, SkipReason> {
        let entry = self.as_object().ok_or(SkipReason::NotAnObject)?;

        let name = required_str(entry, "name")?;
        let node_type = required_str(entry, "type")?;
        let category = required_str(entry, "category")?
            .parse::<Category>()
            .map_err(SkipReason::UnknownCategory)?;
        let inputs = port_list(entry, "inputs")?;
        let outputs = port_list(entry, "outputs")?;
        if outputs.is_empty() {
            return Err(SkipReason::Empty("outputs"));
        }

        let description = entry
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string);
        let latest_version = entry
            .get("latest_version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok());
        let source_file = entry
            .get("file")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(NodeDescriptor {
            name,
            node_type,
            category,
            inputs,
            outputs,
            description,
            latest_version,
            source_file,
        })
    }
}

impl IntoDescriptor for Value {
    fn into_descriptor(self) -> Result<NodeDescriptor, SkipReason> {
        (&self).into_descriptor()
    }
}

fn required_str(entry: &Map<String, Value>, field: &'static str) -> Result<String, SkipReason> {
    let value = entry.get(field).ok_or(SkipReason::MissingField(field))?;
    let text = value.as_str().ok_or(SkipReason::InvalidField {
        field,
        expected: "a string",
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(SkipReason::Empty(field));
    }
    if text.chars().any(char::is_control) {
        return Err(SkipReason::InvalidField {
            field,
            expected: "a single line of text",
        });
    }
    Ok(text.to_string())
}

fn port_list(entry: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, SkipReason> {
    let invalid = SkipReason::InvalidField {
        field,
        expected: "an array of strings",
    };
    let items = entry
        .get(field)
        .ok_or(SkipReason::MissingField(field))?
        .as_array()
        .ok_or_else(|| invalid.clone())?;

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| invalid.clone()))
        .collect()
}
