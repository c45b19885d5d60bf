//! Text validator.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::constants::{exact_text_length, Check};
use crate::result::ParseResult;
use crate::validator::{BaseConfig, Validator};
use crate::value::Value;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9]{10,}$").expect("phone pattern compiles"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("url pattern compiles")
    })
}

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
        )
        .expect("uuid pattern compiles")
    })
}

pub(crate) fn is_email(text: &str) -> bool {
    email_regex().is_match(text)
}

/// Digits with an optional leading `+`, ignoring whitespace, dashes and
/// parentheses; at least ten digits.
pub(crate) fn is_phone(text: &str) -> bool {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    phone_regex().is_match(&normalized)
}

pub(crate) fn is_url(text: &str) -> bool {
    url_regex().is_match(text)
}

/// Hyphenated RFC 4122 form, versions 1 to 5.
pub(crate) fn is_uuid(text: &str) -> bool {
    uuid_regex().is_match(text)
}

/// User pattern, compiled once as a full-string match.
#[derive(Debug, Clone)]
struct UserPattern {
    source: String,
    compiled: Option<Regex>,
}

impl UserPattern {
    fn new(source: String) -> Self {
        let compiled = match Regex::new(&format!("^(?:{source})$")) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(pattern = %source, error = %err, "pattern does not compile; every value will fail it");
                None
            }
        };
        Self { source, compiled }
    }

    fn is_match(&self, text: &str) -> bool {
        self.compiled
            .as_ref()
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }
}

/// Validates text, optionally coercing scalars into their canonical text.
///
/// Transformations run before validation in the order trim, lowercase,
/// uppercase. With both case flags set the uppercase step runs last and wins.
/// Validation accumulates every failing check.
#[derive(Debug, Clone)]
pub struct StringValidator {
    base: BaseConfig<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    email: bool,
    phone: bool,
    url: bool,
    uuid: bool,
    pattern: Option<UserPattern>,
    trim: bool,
    lowercase: bool,
    uppercase: bool,
    parse_error: String,
    min_length_error: String,
    max_length_error: String,
    email_error: String,
    phone_error: String,
    url_error: String,
    uuid_error: String,
    pattern_error: String,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self {
            base: BaseConfig::new(),
            min_length: None,
            max_length: None,
            email: false,
            phone: false,
            url: false,
            uuid: false,
            pattern: None,
            trim: false,
            lowercase: false,
            uppercase: false,
            parse_error: Check::StrParse.message().to_string(),
            min_length_error: Check::StrMinLen.message().to_string(),
            max_length_error: Check::StrMaxLen.message().to_string(),
            email_error: Check::Email.message().to_string(),
            phone_error: Check::Phone.message().to_string(),
            url_error: Check::Url.message().to_string(),
            uuid_error: Check::Uuid.message().to_string(),
            pattern_error: Check::Pattern.message().to_string(),
        }
    }
}

impl StringValidator {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Shared settings

    pub fn coerce(self) -> Self {
        self.with_coerce(true)
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.base.coerce = coerce;
        self
    }

    pub fn optional(self) -> Self {
        self.with_optional(true)
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.base.optional = optional;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.base.default = Some(value.into());
        self
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.base.bound = Some(value.into());
        self
    }

    pub fn is_coerce(&self) -> bool {
        self.base.coerce
    }

    pub fn is_optional(&self) -> bool {
        self.base.optional
    }

    // ------------------------------------------------------------------
    // Length

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Exact length: sets both bounds with an "exactly n" message.
    pub fn length(self, exact: usize) -> Self {
        self.length_with(exact, exact_text_length(exact))
    }

    pub fn length_with(mut self, exact: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        self.min_length = Some(exact);
        self.max_length = Some(exact);
        self.min_length_error = message.clone();
        self.max_length_error = message;
        self
    }

    pub fn non_empty(self) -> Self {
        self.non_empty_with(Check::StrNonEmpty.message())
    }

    pub fn non_empty_with(mut self, message: impl Into<String>) -> Self {
        self.min_length = Some(1);
        self.min_length_error = message.into();
        self
    }

    // ------------------------------------------------------------------
    // Formats

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn email_with(self, message: impl Into<String>) -> Self {
        self.email().email_error(message)
    }

    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    pub fn phone_with(self, message: impl Into<String>) -> Self {
        self.phone().phone_error(message)
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    pub fn url_with(self, message: impl Into<String>) -> Self {
        self.url().url_error(message)
    }

    pub fn uuid(mut self) -> Self {
        self.uuid = true;
        self
    }

    pub fn uuid_with(self, message: impl Into<String>) -> Self {
        self.uuid().uuid_error(message)
    }

    /// Requires the whole text to match `pattern`. A pattern that fails to
    /// compile makes every value fail this check.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(UserPattern::new(pattern.into()));
        self
    }

    pub fn pattern_with(self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern(pattern).pattern_error(message)
    }

    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_ref().map(|p| p.source.as_str())
    }

    // ------------------------------------------------------------------
    // Transformations

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    // ------------------------------------------------------------------
    // Messages

    pub fn parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = message.into();
        self
    }

    pub fn min_length_error(mut self, message: impl Into<String>) -> Self {
        self.min_length_error = message.into();
        self
    }

    pub fn max_length_error(mut self, message: impl Into<String>) -> Self {
        self.max_length_error = message.into();
        self
    }

    pub fn email_error(mut self, message: impl Into<String>) -> Self {
        self.email_error = message.into();
        self
    }

    pub fn phone_error(mut self, message: impl Into<String>) -> Self {
        self.phone_error = message.into();
        self
    }

    pub fn url_error(mut self, message: impl Into<String>) -> Self {
        self.url_error = message.into();
        self
    }

    pub fn uuid_error(mut self, message: impl Into<String>) -> Self {
        self.uuid_error = message.into();
        self
    }

    pub fn pattern_error(mut self, message: impl Into<String>) -> Self {
        self.pattern_error = message.into();
        self
    }

    // ------------------------------------------------------------------

    fn to_text(&self, input: &Value) -> Option<String> {
        match input {
            Value::Str(s) => Some(s.clone()),
            Value::Int(_)
            | Value::BigInt(_)
            | Value::Float(_)
            | Value::Decimal(_)
            | Value::Bool(_)
            | Value::Char(_)
                if self.base.coerce =>
            {
                Some(input.to_string())
            }
            _ => None,
        }
    }

    fn transform(&self, text: &str) -> String {
        let mut out = if self.trim {
            text.trim().to_string()
        } else {
            text.to_string()
        };
        if self.lowercase {
            out = out.to_lowercase();
        }
        if self.uppercase {
            out = out.to_uppercase();
        }
        out
    }

    fn check(&self, text: &str) -> Vec<String> {
        let mut errors = Vec::new();
        let length = text.chars().count();
        if self.min_length.is_some_and(|min| length < min) {
            errors.push(self.min_length_error.clone());
        }
        if self.max_length.is_some_and(|max| length > max) {
            errors.push(self.max_length_error.clone());
        }
        if self.email && !is_email(text) {
            errors.push(self.email_error.clone());
        }
        if self.phone && !is_phone(text) {
            errors.push(self.phone_error.clone());
        }
        if self.url && !is_url(text) {
            errors.push(self.url_error.clone());
        }
        if self.uuid && !is_uuid(text) {
            errors.push(self.uuid_error.clone());
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                errors.push(self.pattern_error.clone());
            }
        }
        errors
    }
}

impl Validator for StringValidator {
    type Output = String;

    fn parse(&self, input: &Value) -> ParseResult<String> {
        if input.is_null() {
            return self.base.resolve_null(
                |default| ParseResult::success(self.transform(default)),
                &self.parse_error,
            );
        }
        let Some(text) = self.to_text(input) else {
            return ParseResult::fail(&self.parse_error);
        };
        let text = self.transform(&text);
        let errors = self.check(&text);
        if errors.is_empty() {
            ParseResult::success(text)
        } else {
            ParseResult::failure(errors)
        }
    }

    fn bound(&self) -> Option<&Value> {
        self.base.bound.as_ref()
    }
}
