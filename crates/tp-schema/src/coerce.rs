//! Schema-driven coercion of rule values to typed HCL values

use crate::error::{Error, Result};
use crate::types::AttrType;
use tp_hcl::Value;

/// Coerce a rule-supplied YAML value to the schema's declared type.
///
/// Scalars convert leniently into strings (a YAML `42` satisfies a string
/// attribute), but structural mismatches are errors: the rule author is
/// asking for a write the provider would reject.
pub fn coerce(value: &serde_yaml::Value, target: &AttrType) -> Result<Value> {
    match target {
        AttrType::String => coerce_string(value),
        AttrType::Number => coerce_number(value),
        AttrType::Bool => coerce_bool(value),
        AttrType::List(inner) | AttrType::Set(inner) => coerce_list(value, inner),
        AttrType::Map(inner) => coerce_mapping(value, |_| inner.as_ref()),
        AttrType::Object(fields) => coerce_object(value, fields),
        AttrType::Dynamic => coerce_dynamic(value),
    }
}

fn coerce_string(value: &serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::String(s) => Ok(Value::string(s)),
        serde_yaml::Value::Number(n) => Ok(Value::string(n.to_string())),
        serde_yaml::Value::Bool(b) => Ok(Value::string(b.to_string())),
        other => Err(mismatch("string", other)),
    }
}

fn coerce_number(value: &serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| Error::coercion("number", "value out of range")),
        other => Err(mismatch("number", other)),
    }
}

fn coerce_bool(value: &serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        other => Err(mismatch("bool", other)),
    }
}

fn coerce_list(value: &serde_yaml::Value, inner: &AttrType) -> Result<Value> {
    match value {
        serde_yaml::Value::Sequence(items) => {
            let coerced = items
                .iter()
                .map(|item| coerce(item, inner))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(coerced))
        }
        other => Err(mismatch(&format!("list({inner})"), other)),
    }
}

fn coerce_mapping<'a>(
    value: &serde_yaml::Value,
    value_type: impl Fn(&str) -> &'a AttrType,
) -> Result<Value> {
    match value {
        serde_yaml::Value::Mapping(entries) => {
            let mut coerced = Vec::with_capacity(entries.len());
            for (key, entry) in entries {
                let key = key
                    .as_str()
                    .ok_or_else(|| Error::coercion("map", "keys must be strings"))?;
                coerced.push((key.to_string(), coerce(entry, value_type(key))?));
            }
            Ok(Value::Object(coerced))
        }
        other => Err(mismatch("map", other)),
    }
}

fn coerce_object(
    value: &serde_yaml::Value,
    fields: &std::collections::BTreeMap<String, AttrType>,
) -> Result<Value> {
    let serde_yaml::Value::Mapping(entries) = value else {
        return Err(mismatch("object", value));
    };

    let mut coerced = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        let key = key
            .as_str()
            .ok_or_else(|| Error::coercion("object", "keys must be strings"))?;
        let field_type = fields
            .get(key)
            .ok_or_else(|| Error::coercion("object", format!("unknown field `{key}`")))?;
        coerced.push((key.to_string(), coerce(entry, field_type)?));
    }
    Ok(Value::Object(coerced))
}

/// Best-effort conversion when the schema declares no concrete type.
fn coerce_dynamic(value: &serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::String(s) => Ok(Value::string(s)),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| Error::coercion("dynamic", "value out of range")),
        serde_yaml::Value::Sequence(items) => {
            let coerced = items
                .iter()
                .map(coerce_dynamic)
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(coerced))
        }
        serde_yaml::Value::Mapping(_) => coerce_mapping(value, |_| &AttrType::Dynamic),
        other => Err(mismatch("dynamic", other)),
    }
}

fn mismatch(expected: &str, got: &serde_yaml::Value) -> Error {
    Error::coercion(expected, format!("incompatible value {got:?}"))
}
