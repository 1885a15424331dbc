//! Structured output schemas.
//!
//! A [`Schema`] is rendered into Gemini's `responseSchema` to constrain the
//! model, and the same value validates the parsed reply before any of it is
//! trusted.

use serde_json::{json, Map, Value};
use std::fmt;

/// Declarative description of a JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Every listed property is required.
    Object {
        properties: Vec<(&'static str, Schema)>,
    },
    Array {
        items: Box<Schema>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    String {
        description: Option<&'static str>,
        format: Option<StringFormat>,
    },
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Integer {
        minimum: Option<i64>,
    },
}

/// Local-only string checks; the model only sees the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// `ORD-` followed by exactly six ASCII digits.
    OrderNumber,
}

impl StringFormat {
    pub fn matches(self, value: &str) -> bool {
        match self {
            StringFormat::OrderNumber => value
                .strip_prefix("ORD-")
                .map(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false),
        }
    }

    fn name(self) -> &'static str {
        match self {
            StringFormat::OrderNumber => "ORD-XXXXXX",
        }
    }
}

/// First violation found while validating, with a JSONPath-like location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl std::error::Error for SchemaViolation {}

impl Schema {
    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        Schema::Object { properties }
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    pub fn string() -> Self {
        Schema::String {
            description: None,
            format: None,
        }
    }

    pub fn number() -> Self {
        Schema::Number {
            minimum: None,
            maximum: None,
        }
    }

    pub fn integer() -> Self {
        Schema::Integer { minimum: None }
    }

    /// Pin an array to exactly `n` items.
    pub fn exactly(self, n: usize) -> Self {
        match self {
            Schema::Array { items, .. } => Schema::Array {
                items,
                min_items: Some(n),
                max_items: Some(n),
            },
            other => other,
        }
    }

    pub fn describe(self, text: &'static str) -> Self {
        match self {
            Schema::String { format, .. } => Schema::String {
                description: Some(text),
                format,
            },
            other => other,
        }
    }

    pub fn with_format(self, fmt: StringFormat) -> Self {
        match self {
            Schema::String { description, .. } => Schema::String {
                description,
                format: Some(fmt),
            },
            other => other,
        }
    }

    pub fn between(self, min: f64, max: f64) -> Self {
        match self {
            Schema::Number { .. } => Schema::Number {
                minimum: Some(min),
                maximum: Some(max),
            },
            other => other,
        }
    }

    pub fn at_least(self, min: i64) -> Self {
        match self {
            Schema::Integer { .. } => Schema::Integer { minimum: Some(min) },
            Schema::Number { maximum, .. } => Schema::Number {
                minimum: Some(min as f64),
                maximum,
            },
            other => other,
        }
    }

    /// Render as a Gemini `responseSchema` object.
    pub fn to_gemini(&self) -> Value {
        match self {
            Schema::Object { properties } => {
                let mut props = Map::new();
                for (name, schema) in properties {
                    props.insert((*name).to_string(), schema.to_gemini());
                }
                let names: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
                json!({
                    "type": "OBJECT",
                    "properties": props,
                    "required": names,
                    "propertyOrdering": names,
                })
            }
            Schema::Array {
                items,
                min_items,
                max_items,
            } => {
                let mut out = json!({ "type": "ARRAY", "items": items.to_gemini() });
                if let Some(min) = min_items {
                    out["minItems"] = json!(min);
                }
                if let Some(max) = max_items {
                    out["maxItems"] = json!(max);
                }
                out
            }
            Schema::String {
                description,
                format,
            } => {
                let mut out = json!({ "type": "STRING" });
                match (description, format) {
                    (Some(d), _) => out["description"] = json!(d),
                    (None, Some(f)) => out["description"] = json!(format!("格式：{}", f.name())),
                    (None, None) => {}
                }
                out
            }
            Schema::Number { minimum, maximum } => {
                let mut out = json!({ "type": "NUMBER" });
                if let Some(min) = minimum {
                    out["minimum"] = json!(min);
                }
                if let Some(max) = maximum {
                    out["maximum"] = json!(max);
                }
                out
            }
            Schema::Integer { minimum } => {
                let mut out = json!({ "type": "INTEGER" });
                if let Some(min) = minimum {
                    out["minimum"] = json!(min);
                }
                out
            }
        }
    }

    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        let violation = |reason: String| SchemaViolation {
            path: path.to_string(),
            reason,
        };

        match self {
            Schema::Object { properties } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| violation(format!("expected object, got {}", kind(value))))?;
                for (name, schema) in properties {
                    let child_path = format!("{}.{}", path, name);
                    match map.get(*name) {
                        None | Some(Value::Null) => {
                            return Err(SchemaViolation {
                                path: child_path,
                                reason: "required field is missing".to_string(),
                            })
                        }
                        Some(child) => schema.validate_at(&child_path, child)?,
                    }
                }
                Ok(())
            }
            Schema::Array {
                items,
                min_items,
                max_items,
            } => {
                let list = value
                    .as_array()
                    .ok_or_else(|| violation(format!("expected array, got {}", kind(value))))?;
                if let Some(min) = min_items {
                    if list.len() < *min {
                        return Err(violation(format!(
                            "expected at least {} items, got {}",
                            min,
                            list.len()
                        )));
                    }
                }
                if let Some(max) = max_items {
                    if list.len() > *max {
                        return Err(violation(format!(
                            "expected at most {} items, got {}",
                            max,
                            list.len()
                        )));
                    }
                }
                for (i, item) in list.iter().enumerate() {
                    items.validate_at(&format!("{}[{}]", path, i), item)?;
                }
                Ok(())
            }
            Schema::String { format, .. } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| violation(format!("expected string, got {}", kind(value))))?;
                if let Some(fmt) = format {
                    if !fmt.matches(text) {
                        return Err(violation(format!(
                            "{:?} does not match {}",
                            text,
                            fmt.name()
                        )));
                    }
                }
                Ok(())
            }
            Schema::Number { minimum, maximum } => {
                let n = value
                    .as_f64()
                    .ok_or_else(|| violation(format!("expected number, got {}", kind(value))))?;
                check_range(n, *minimum, *maximum).map_err(violation)
            }
            Schema::Integer { minimum } => {
                let n = value
                    .as_i64()
                    .or_else(|| value.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
                    .ok_or_else(|| violation(format!("expected integer, got {}", kind(value))))?;
                check_range(n as f64, minimum.map(|m| m as f64), None).map_err(violation)
            }
        }
    }
}

fn check_range(n: f64, minimum: Option<f64>, maximum: Option<f64>) -> Result<(), String> {
    if let Some(min) = minimum {
        if n < min {
            return Err(format!("{} is below minimum {}", n, min));
        }
    }
    if let Some(max) = maximum {
        if n > max {
            return Err(format!("{} is above maximum {}", n, max));
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
