//! Parse outcomes.

use indexmap::IndexMap;

/// Error set of a failed parse.
///
/// Leaf and array validators report a flat list, the object validator one
/// message per field, and batch reports a full list per field.
#[derive(Debug, Clone, PartialEq)]
pub enum Errors {
    List(Vec<String>),
    Fields(IndexMap<String, String>),
    FieldLists(IndexMap<String, Vec<String>>),
}

impl Errors {
    pub fn is_empty(&self) -> bool {
        match self {
            Errors::List(list) => list.is_empty(),
            Errors::Fields(fields) => fields.is_empty(),
            Errors::FieldLists(fields) => fields.values().all(Vec::is_empty),
        }
    }

    /// Number of individual messages.
    pub fn len(&self) -> usize {
        match self {
            Errors::List(list) => list.len(),
            Errors::Fields(fields) => fields.len(),
            Errors::FieldLists(fields) => fields.values().map(Vec::len).sum(),
        }
    }

    /// Flattens into plain messages.
    ///
    /// Field errors render as `field: message`, field lists as
    /// `[field] message`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Errors::List(list) => list.clone(),
            Errors::Fields(fields) => fields
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect(),
            Errors::FieldLists(fields) => fields
                .iter()
                .flat_map(|(field, messages)| {
                    messages.iter().map(move |m| format!("[{field}] {m}"))
                })
                .collect(),
        }
    }

    pub fn first_message(&self) -> Option<String> {
        match self {
            Errors::List(list) => list.first().cloned(),
            _ => self.messages().into_iter().next(),
        }
    }
}

/// Outcome of one `parse` call.
///
/// `Success(None)` is produced only by an optional validator without a
/// default receiving a null input; composites treat it as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Success(Option<T>),
    Failure(Errors),
}

impl<T> ParseResult<T> {
    pub fn success(value: T) -> Self {
        ParseResult::Success(Some(value))
    }

    pub fn absent() -> Self {
        ParseResult::Success(None)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ParseResult::Failure(Errors::List(vec![message.into()]))
    }

    pub fn failure(messages: Vec<String>) -> Self {
        ParseResult::Failure(Errors::List(messages))
    }

    pub fn field_failure(fields: IndexMap<String, String>) -> Self {
        ParseResult::Failure(Errors::Fields(fields))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Success(value) => value.as_ref(),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            ParseResult::Success(value) => value,
            ParseResult::Failure(_) => None,
        }
    }

    pub fn error_set(&self) -> Option<&Errors> {
        match self {
            ParseResult::Success(_) => None,
            ParseResult::Failure(errors) => Some(errors),
        }
    }

    /// Flat error list; empty on success or for field-keyed failures.
    pub fn errors(&self) -> &[String] {
        match self {
            ParseResult::Failure(Errors::List(list)) => list,
            _ => &[],
        }
    }

    /// Field-keyed errors of an object failure.
    pub fn field_errors(&self) -> Option<&IndexMap<String, String>> {
        match self {
            ParseResult::Failure(Errors::Fields(fields)) => Some(fields),
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_set().is_some_and(|errors| !errors.is_empty())
    }

    /// All failure messages flattened, see [`Errors::messages`].
    pub fn messages(&self) -> Vec<String> {
        self.error_set().map(Errors::messages).unwrap_or_default()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Success(value) => ParseResult::Success(value.map(f)),
            ParseResult::Failure(errors) => ParseResult::Failure(errors),
        }
    }

    /// Runs `f` on a present success value.
    pub fn on_success(self, f: impl FnOnce(&T)) -> Self {
        if let ParseResult::Success(Some(value)) = &self {
            f(value);
        }
        self
    }

    pub fn on_failure(self, f: impl FnOnce(&Errors)) -> Self {
        if let ParseResult::Failure(errors) = &self {
            f(errors);
        }
        self
    }

    pub fn into_result(self) -> Result<Option<T>, Errors> {
        match self {
            ParseResult::Success(value) => Ok(value),
            ParseResult::Failure(errors) => Err(errors),
        }
    }
}
