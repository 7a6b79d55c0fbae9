//! Declared attribute types, deserialized from Terraform's JSON type syntax

use serde::Deserialize;
use serde::de::{self, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// A cty-style attribute type as published by the schema authority.
///
/// Terraform encodes these as either a bare string (`"string"`) or a JSON
/// array (`["list", "string"]`, `["object", {"name": "string"}]`).
#[derive(Debug, Clone, PartialEq)]
pub enum AttrType {
    String,
    Number,
    Bool,
    List(Box<AttrType>),
    Set(Box<AttrType>),
    Map(Box<AttrType>),
    Object(BTreeMap<String, AttrType>),
    Dynamic,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::String => write!(f, "string"),
            AttrType::Number => write!(f, "number"),
            AttrType::Bool => write!(f, "bool"),
            AttrType::List(inner) => write!(f, "list({inner})"),
            AttrType::Set(inner) => write!(f, "set({inner})"),
            AttrType::Map(inner) => write!(f, "map({inner})"),
            AttrType::Object(_) => write!(f, "object"),
            AttrType::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl<'de> Deserialize<'de> for AttrType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        from_json(&raw).map_err(de::Error::custom)
    }
}

fn from_json(value: &serde_json::Value) -> Result<AttrType, String> {
    match value {
        serde_json::Value::String(name) => match name.as_str() {
            "string" => Ok(AttrType::String),
            "number" => Ok(AttrType::Number),
            "bool" => Ok(AttrType::Bool),
            "dynamic" => Ok(AttrType::Dynamic),
            other => Err(format!("unknown primitive type `{other}`")),
        },
        serde_json::Value::Array(parts) => {
            let kind = parts
                .first()
                .and_then(|v| v.as_str())
                .ok_or_else(|| "type constructor must start with a name".to_string())?;
            let argument = parts
                .get(1)
                .ok_or_else(|| format!("type constructor `{kind}` is missing its argument"))?;

            match kind {
                "list" => Ok(AttrType::List(Box::new(from_json(argument)?))),
                "set" => Ok(AttrType::Set(Box::new(from_json(argument)?))),
                "map" => Ok(AttrType::Map(Box::new(from_json(argument)?))),
                "object" => {
                    let fields = argument
                        .as_object()
                        .ok_or_else(|| "object type argument must be a mapping".to_string())?;
                    let mut result = BTreeMap::new();
                    for (name, field_type) in fields {
                        result.insert(name.clone(), from_json(field_type)?);
                    }
                    Ok(AttrType::Object(result))
                }
                other => Err(format!("unknown type constructor `{other}`")),
            }
        }
        _ => Err("type must be a string or an array".to_string()),
    }
}
