//! The validator contract and shared configuration.

use std::fmt;

use crate::error::{SchemaError, ValidationFault};
use crate::result::ParseResult;
use crate::value::Value;

/// A configured rule turning an untyped [`Value`] into a typed output.
///
/// `parse` is pure: it depends only on the configuration and the input, and
/// reports invalid data through [`ParseResult::Failure`] rather than an error.
pub trait Validator: Send + Sync {
    type Output: Clone + fmt::Debug + PartialEq + Into<Value> + Send + Sync + 'static;

    fn parse(&self, input: &Value) -> ParseResult<Self::Output>;

    /// Value attached through `bind`, if any.
    fn bound(&self) -> Option<&Value>;

    /// Parses `input`, escalating a failure into [`SchemaError::Invalid`].
    fn try_parse(&self, input: &Value) -> Result<Option<Self::Output>, SchemaError> {
        match self.parse(input) {
            ParseResult::Success(value) => Ok(value),
            ParseResult::Failure(errors) => {
                Err(ValidationFault::new(errors, input.clone()).into())
            }
        }
    }

    /// Parsed value, or `None` on failure or absence.
    fn parse_optional(&self, input: &Value) -> Option<Self::Output> {
        self.parse(input).into_value()
    }

    /// Parses the bound value.
    fn parse_bound(&self) -> Result<ParseResult<Self::Output>, SchemaError> {
        let value = self.bound().ok_or(SchemaError::Unbound)?;
        Ok(self.parse(value))
    }

    fn try_parse_bound(&self) -> Result<Option<Self::Output>, SchemaError> {
        let value = self.bound().ok_or(SchemaError::Unbound)?;
        self.try_parse(value)
    }
}

/// Object-safe view of a [`Validator`] whose output is erased to [`Value`].
///
/// Composite validators and the batch registry hold children of different
/// output types through this trait.
pub trait DynValidator: Send + Sync {
    fn parse_value(&self, input: &Value) -> ParseResult<Value>;

    fn bound_value(&self) -> Option<&Value>;
}

impl<V: Validator> DynValidator for V {
    fn parse_value(&self, input: &Value) -> ParseResult<Value> {
        self.parse(input).map(Into::into)
    }

    fn bound_value(&self) -> Option<&Value> {
        self.bound()
    }
}

/// Settings shared by every validator.
#[derive(Debug, Clone)]
pub struct BaseConfig<D> {
    pub coerce: bool,
    pub optional: bool,
    pub default: Option<D>,
    pub bound: Option<Value>,
}

impl<D> Default for BaseConfig<D> {
    fn default() -> Self {
        Self {
            coerce: false,
            optional: false,
            default: None,
            bound: None,
        }
    }
}

impl<D> BaseConfig<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for a null input: the converted default, then absence when
    /// optional, then `parse_error`.
    pub fn resolve_null<T>(
        &self,
        convert: impl FnOnce(&D) -> ParseResult<T>,
        parse_error: &str,
    ) -> ParseResult<T> {
        if let Some(default) = &self.default {
            return convert(default);
        }
        if self.optional {
            return ParseResult::absent();
        }
        ParseResult::fail(parse_error)
    }
}
