//! `Tree` implementation for `serde_yaml::Value` (feature `yaml`)
//!
//! YAML mappings preserve insertion order and admit non-string keys, so
//! positions are also tried against numeric mapping keys. Tagged values are
//! transparent: they behave like the value they wrap.

use crate::path::Slice;
use crate::tree::{normalize_index, Tree};
use serde_yaml::Value;

impl Tree for Value {
    fn child_by_name(&self, name: &str) -> Option<&Self> {
        match self {
            Value::Mapping(map) => map
                .iter()
                .find(|(k, _)| k.as_str() == Some(name))
                .map(|(_, v)| v),
            Value::Tagged(tagged) => tagged.value.child_by_name(name),
            _ => None,
        }
    }

    fn child_by_index(&self, index: i64) -> Option<&Self> {
        match self {
            Value::Sequence(seq) => seq.get(normalize_index(index, seq.len())?),
            Value::Mapping(map) => map
                .iter()
                .find(|(k, _)| k.as_i64() == Some(index))
                .map(|(_, v)| v),
            Value::Tagged(tagged) => tagged.value.child_by_index(index),
            _ => None,
        }
    }

    fn children_in_range(&self, slice: &Slice) -> Option<Vec<&Self>> {
        match self {
            Value::Sequence(seq) => {
                Some(slice.indices(seq.len()).into_iter().map(|i| &seq[i]).collect())
            }
            Value::Tagged(tagged) => tagged.value.children_in_range(slice),
            _ => None,
        }
    }

    fn children(&self) -> Option<Vec<&Self>> {
        match self {
            Value::Mapping(map) => Some(map.iter().map(|(_, v)| v).collect()),
            Value::Sequence(seq) => Some(seq.iter().collect()),
            Value::Tagged(tagged) => tagged.value.children(),
            _ => None,
        }
    }

    fn is_text(&self) -> bool {
        match self {
            Value::String(_) => true,
            Value::Tagged(tagged) => tagged.value.is_text(),
            _ => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Tagged(tagged) => tagged.value.kind(),
        }
    }
}
