//! `Tree` implementation for `serde_json::Value`

use crate::path::Slice;
use crate::tree::{normalize_index, Tree};
use serde_json::Value;

impl Tree for Value {
    fn child_by_name(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(name))
    }

    fn child_by_index(&self, index: i64) -> Option<&Self> {
        let seq = self.as_array()?;
        seq.get(normalize_index(index, seq.len())?)
    }

    fn children_in_range(&self, slice: &Slice) -> Option<Vec<&Self>> {
        let seq = self.as_array()?;
        Some(slice.indices(seq.len()).into_iter().map(|i| &seq[i]).collect())
    }

    fn children(&self) -> Option<Vec<&Self>> {
        match self {
            Value::Object(map) => Some(map.values().collect()),
            Value::Array(seq) => Some(seq.iter().collect()),
            _ => None,
        }
    }

    fn is_text(&self) -> bool {
        self.is_string()
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
