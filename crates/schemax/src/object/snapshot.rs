use serde_json::Value as JsonValue;

use crate::value::{Value, ValueMap};

/// Field values produced by a successful object parse.
///
/// Holds only fields that parsed to a present value, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSnapshot {
    values: ValueMap,
}

impl ObjectSnapshot {
    pub fn new(values: ValueMap) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer field narrowed to `i32`; `None` when absent, not an integer or
    /// out of range.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get_i64(key).and_then(|i| i32::try_from(i).ok())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_map(&self, key: &str) -> Option<&ValueMap> {
        self.get(key).and_then(Value::as_map)
    }

    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    /// Field value, or `default` when the field is absent.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_map(&self) -> ValueMap {
        self.values.clone()
    }

    pub fn into_map(self) -> ValueMap {
        self.values
    }

    pub fn to_json(&self) -> JsonValue {
        Value::Map(self.values.clone()).to_json()
    }
}

impl From<ValueMap> for ObjectSnapshot {
    fn from(values: ValueMap) -> Self {
        Self::new(values)
    }
}

impl From<ObjectSnapshot> for Value {
    fn from(snapshot: ObjectSnapshot) -> Self {
        Value::Map(snapshot.values)
    }
}
