//! Faults raised at the explicit escalation points.

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

use crate::constants::FAULT_HEADER;
use crate::result::{Errors, ParseResult};
use crate::value::Value;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    /// Data failed validation.
    #[error("{0}")]
    Invalid(Box<ValidationFault>),
    /// `parse_bound` was called before any value was bound.
    #[error("no value bound to validator; call bind() before parse_bound()")]
    Unbound,
}

impl SchemaError {
    pub fn fault(&self) -> Option<&ValidationFault> {
        match self {
            SchemaError::Invalid(fault) => Some(fault),
            SchemaError::Unbound => None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, SchemaError::Unbound)
    }
}

impl From<ValidationFault> for SchemaError {
    fn from(fault: ValidationFault) -> Self {
        SchemaError::Invalid(Box::new(fault))
    }
}

/// A failed parse together with the input that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFault {
    message: String,
    errors: Errors,
    original: Value,
}

impl ValidationFault {
    pub fn new(errors: Errors, original: Value) -> Self {
        Self {
            message: FAULT_HEADER.to_string(),
            errors,
            original,
        }
    }

    /// Builds a fault from a failed result. A successful result yields an
    /// empty error list.
    pub fn from_result<T>(result: ParseResult<T>, original: Value) -> Self {
        let errors = match result {
            ParseResult::Failure(errors) => errors,
            ParseResult::Success(_) => Errors::List(Vec::new()),
        };
        Self::new(errors, original)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_set(&self) -> &Errors {
        &self.errors
    }

    /// The failure as a `ParseResult`.
    pub fn result(&self) -> ParseResult<Value> {
        ParseResult::Failure(self.errors.clone())
    }

    pub fn original(&self) -> &Value {
        &self.original
    }

    /// Flat messages; empty for field-keyed failures.
    pub fn errors(&self) -> &[String] {
        match &self.errors {
            Errors::List(list) => list,
            _ => &[],
        }
    }

    pub fn field_errors(&self) -> Option<&IndexMap<String, String>> {
        match &self.errors {
            Errors::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn has_field_errors(&self) -> bool {
        match &self.errors {
            Errors::Fields(fields) => !fields.is_empty(),
            Errors::FieldLists(fields) => !fields.is_empty(),
            Errors::List(_) => false,
        }
    }

    pub fn has_simple_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

impl fmt::Display for ValidationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match &self.errors {
            Errors::Fields(fields) if !fields.is_empty() => {
                f.write_str("\nField errors:")?;
                for (field, message) in fields {
                    write!(f, "\n  - {field}: {message}")?;
                }
            }
            Errors::FieldLists(fields) if !fields.is_empty() => {
                f.write_str("\nField errors:")?;
                for (field, messages) in fields {
                    for message in messages {
                        write!(f, "\n  - {field}: {message}")?;
                    }
                }
            }
            _ => {}
        }
        if self.has_simple_errors() {
            f.write_str("\nErrors:")?;
            for message in self.errors() {
                write!(f, "\n  - {message}")?;
            }
        }
        write!(f, "\nOriginal value: {}", self.original)
    }
}

impl std::error::Error for ValidationFault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_field_errors_then_flat_errors_then_input() {
        let mut fields = IndexMap::new();
        fields.insert("name".to_string(), "required".to_string());
        let fault = ValidationFault::new(Errors::Fields(fields), Value::from("x"));
        assert_eq!(
            fault.to_string(),
            "Schema validation failed\nField errors:\n  - name: required\nOriginal value: x"
        );
        assert!(fault.has_field_errors());
        assert!(!fault.has_simple_errors());
    }

    #[test]
    fn display_flat_errors() {
        let fault = ValidationFault::from_result(
            ParseResult::<i32>::failure(vec!["a".into(), "b".into()]),
            Value::Int(3),
        );
        assert_eq!(
            fault.to_string(),
            "Schema validation failed\nErrors:\n  - a\n  - b\nOriginal value: 3"
        );
        assert_eq!(fault.errors(), ["a", "b"]);
        assert!(fault.field_errors().is_none());
    }

    #[test]
    fn schema_error_wraps_fault() {
        let err: SchemaError = ValidationFault::new(Errors::List(vec!["e".into()]), Value::Null)
            .with_message("Batch failed")
            .into();
        assert!(err.to_string().starts_with("Batch failed\nErrors:\n  - e"));
        assert_eq!(err.fault().map(|f| f.message()), Some("Batch failed"));
        assert!(!err.is_unbound());
        assert!(SchemaError::Unbound.fault().is_none());
    }
}
