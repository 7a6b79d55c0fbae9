//! Typed values renderable as HCL expressions

use std::fmt;

/// A value the engine writes into a document.
///
/// Values are produced by schema-driven coercion of rule parameters and
/// rendered as HCL expression text on serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Value>),
    /// Ordered key/value pairs, rendered as an object expression.
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Render the value as a single-line HCL expression.
    pub fn to_expression(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", escape(s)),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::List(items) => {
                let rendered: Vec<_> = items.iter().map(Value::to_expression).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Object(entries) => {
                let rendered: Vec<_> = entries
                    .iter()
                    .map(|(k, v)| format!("{} = {}", render_key(k), v.to_expression()))
                    .collect();
                format!("{{ {} }}", rendered.join(", "))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_expression())
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        format!("\"{}\"", escape(key))
    }
}
