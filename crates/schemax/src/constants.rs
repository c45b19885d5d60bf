//! Check identifiers and their default messages.
//!
//! Every message can be overridden per validator through its builder.

/// One validation check performed by a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    StrParse,
    StrMinLen,
    StrMaxLen,
    StrNonEmpty,
    Email,
    Phone,
    Url,
    Uuid,
    Pattern,
    NumParse,
    NumType,
    NumMin,
    NumMax,
    BoolParse,
    BoolTrue,
    BoolFalse,
    ArrParse,
    ArrElement,
    ArrNonEmpty,
    ArrUnique,
    ObjNull,
    ObjParse,
    ObjUnknownKey,
    ObjInvalidField,
    Unbound,
}

impl Check {
    pub fn name(self) -> &'static str {
        match self {
            Self::StrParse => "STR",
            Self::StrMinLen => "STR_MIN_LEN",
            Self::StrMaxLen => "STR_MAX_LEN",
            Self::StrNonEmpty => "STR_NON_EMPTY",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Url => "URL",
            Self::Uuid => "UUID",
            Self::Pattern => "PATTERN",
            Self::NumParse => "NUM",
            Self::NumType => "NUM_TYPE",
            Self::NumMin => "NUM_MIN",
            Self::NumMax => "NUM_MAX",
            Self::BoolParse => "BOOL",
            Self::BoolTrue => "BOOL_TRUE",
            Self::BoolFalse => "BOOL_FALSE",
            Self::ArrParse => "ARR",
            Self::ArrElement => "ARR_ELEMENT",
            Self::ArrNonEmpty => "ARR_NON_EMPTY",
            Self::ArrUnique => "ARR_UNIQUE",
            Self::ObjNull => "OBJ_NULL",
            Self::ObjParse => "OBJ",
            Self::ObjUnknownKey => "OBJ_UNKNOWN_KEY",
            Self::ObjInvalidField => "OBJ_INVALID_FIELD",
            Self::Unbound => "UNBOUND",
        }
    }

    /// Default message. Length checks on arrays and exact-length checks
    /// build their message from the configured bound instead.
    pub fn message(self) -> &'static str {
        match self {
            Self::StrParse => "The provided value is not a string",
            Self::StrMinLen => "The text length is less than the required length",
            Self::StrMaxLen => "The text length is bigger than the required length",
            Self::StrNonEmpty => "The string must not be empty",
            Self::Email => "The provided email is not a valid email",
            Self::Phone => "The provided phone is not a valid phone",
            Self::Url => "The provided url is not a valid url",
            Self::Uuid => "Invalid UUID format",
            Self::Pattern => "The provided value does not match the required regex",
            Self::NumParse => "The provided value is not a number",
            Self::NumType => "The provided number does not match the required type",
            Self::NumMin => "The provided number is less than the minimum required",
            Self::NumMax => "The provided number is bigger than the maximum required",
            Self::BoolParse => "The provided value is not a boolean",
            Self::BoolTrue => "Must be true",
            Self::BoolFalse => "Must be false",
            Self::ArrParse => "The provided value is not an array",
            Self::ArrElement => "One or more array elements are invalid",
            Self::ArrNonEmpty => "Array must not be empty",
            Self::ArrUnique => "Array must contain unique elements",
            Self::ObjNull => "Value cannot be null",
            Self::ObjParse => "The provided value is not a valid object or parseable string",
            Self::ObjUnknownKey => "Unknown property not allowed in strict mode",
            Self::ObjInvalidField => "Invalid value",
            Self::Unbound => "No value bound to schema for validation",
        }
    }
}

/// Header line of a validation fault.
pub const FAULT_HEADER: &str = "Schema validation failed";

pub(crate) fn exact_text_length(n: usize) -> String {
    format!("The text length must be exactly {n} characters")
}

pub(crate) fn array_min_length(n: usize) -> String {
    format!("Array must have at least {n} elements")
}

pub(crate) fn array_max_length(n: usize) -> String {
    format!("Array must have at most {n} elements")
}

pub(crate) fn array_exact_length(n: usize) -> String {
    format!("Array must have exactly {n} elements")
}
