//! Best-effort conversion of loosely formatted input into maps and sequences.
//!
//! None of these parsers understand nesting or escaping. A separator inside a
//! quoted value splits it.

use tracing::trace;

use crate::value::{Value, ValueMap};

/// Turns structured, non-map input into a field map.
///
/// The object validator consults its converter only when coercion is on and
/// the input is neither a map nor text.
pub trait StructuralConverter: Send + Sync {
    fn to_map(&self, value: &Value) -> Option<ValueMap>;
}

/// Default converter: asks [`Value::Struct`] payloads for their fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldsConverter;

impl StructuralConverter for FieldsConverter {
    fn to_map(&self, value: &Value) -> Option<ValueMap> {
        match value {
            Value::Struct(s) => s.to_map(),
            _ => None,
        }
    }
}

impl<F> StructuralConverter for F
where
    F: Fn(&Value) -> Option<ValueMap> + Send + Sync,
{
    fn to_map(&self, value: &Value) -> Option<ValueMap> {
        self(value)
    }
}

/// Removes one pair of matching surrounding quotes, single or double.
pub(crate) fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Parses `{key: value, ...}`. Keys and values are trimmed and unquoted and
/// stay text; entries without a `:` are skipped.
pub(crate) fn parse_brace_map(text: &str) -> ValueMap {
    let trimmed = text.trim();
    let content = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    let mut map = ValueMap::new();
    for entry in content.split(',') {
        let Some((key, value)) = entry.split_once(':') else {
            continue;
        };
        let key = strip_quotes(key.trim());
        let value = strip_quotes(value.trim());
        map.insert(key.to_string(), Value::from(value));
    }
    trace!(entries = map.len(), "parsed brace text into map");
    map
}

/// Parses `key=value` pairs separated by `,`, `;` or `&`. Returns `None` when
/// no pair was found.
pub(crate) fn parse_key_values(text: &str) -> Option<ValueMap> {
    let mut map = ValueMap::new();
    for pair in text.split([',', ';', '&']) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        map.insert(key.trim().to_string(), Value::from(value.trim()));
    }
    trace!(entries = map.len(), "parsed key=value text into map");
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Splits text into sequence items.
///
/// `[a, "b"]` drops the brackets and one pair of quotes per item; other text
/// is split on commas as is. Items are trimmed. Blank content, bracketed or
/// not, is an empty sequence: `""` yields no items, unlike a plain comma
/// split, which would yield one empty item.
pub(crate) fn split_list(text: &str) -> Vec<Value> {
    let trimmed = text.trim();
    let bracketed = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'));
    let (content, unquote) = match bracketed {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };
    if content.trim().is_empty() {
        return Vec::new();
    }
    let items: Vec<Value> = content
        .split(',')
        .map(|part| {
            let part = part.trim();
            Value::from(if unquote { strip_quotes(part) } else { part })
        })
        .collect();
    trace!(items = items.len(), "split text into sequence");
    items
}
