//! Runs many independently bound validators and merges their outcomes.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::debug;

use crate::constants::Check;
use crate::error::{SchemaError, ValidationFault};
use crate::result::{Errors, ParseResult};
use crate::validator::{DynValidator, Validator};
use crate::value::{Value, ValueMap};

/// Named registry of bound validators.
#[derive(Default)]
pub struct BatchValidator {
    rules: IndexMap<String, Box<dyn DynValidator>>,
}

impl fmt::Debug for BatchValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchValidator")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BatchValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` under `name`, replacing an earlier one with the
    /// same name in place.
    pub fn add<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.rule(name, validator);
        self
    }

    pub fn rule<V>(&mut self, name: impl Into<String>, validator: V) -> &mut Self
    where
        V: Validator + 'static,
    {
        self.rules.insert(name.into(), Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parses every bound value. Entries are reported in registration order.
    pub fn validate(&self) -> BatchReport {
        let mut values = ValueMap::new();
        let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();

        for (name, validator) in &self.rules {
            let Some(bound) = validator.bound_value() else {
                errors.insert(name.clone(), vec![Check::Unbound.message().to_string()]);
                continue;
            };
            match validator.parse_value(bound) {
                ParseResult::Success(Some(value)) => {
                    values.insert(name.clone(), value);
                }
                ParseResult::Success(None) => {}
                ParseResult::Failure(failure) => {
                    errors.insert(name.clone(), failure.messages());
                }
            }
        }

        debug!(
            rules = self.rules.len(),
            passed = values.len(),
            failed = errors.len(),
            "batch validated"
        );
        BatchReport { values, errors }
    }
}

/// Runs the rules registered by `build` and returns their report.
pub fn validate_batch(build: impl FnOnce(&mut BatchValidator)) -> BatchReport {
    let mut batch = BatchValidator::new();
    build(&mut batch);
    batch.validate()
}

/// Successful values and failure messages of one batch run, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    values: ValueMap,
    errors: IndexMap<String, Vec<String>>,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn errors_for(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(Vec::as_slice)
    }

    /// Every message as `[name] message`.
    pub fn flattened_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .flat_map(|(name, messages)| messages.iter().map(move |m| format!("[{name}] {m}")))
            .collect()
    }

    pub fn values_json(&self) -> JsonValue {
        Value::Map(self.values.clone()).to_json()
    }

    pub fn to_parse_result(&self) -> ParseResult<ValueMap> {
        if self.has_errors() {
            ParseResult::Failure(Errors::FieldLists(self.errors.clone()))
        } else {
            ParseResult::success(self.values.clone())
        }
    }

    /// The values, or a fault carrying the flattened messages and the
    /// values that did parse.
    pub fn into_result(self) -> Result<ValueMap, SchemaError> {
        if !self.has_errors() {
            return Ok(self.values);
        }
        let errors = Errors::List(self.flattened_errors());
        Err(ValidationFault::new(errors, Value::Map(self.values)).into())
    }
}
