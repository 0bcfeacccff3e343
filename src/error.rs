//! All error types for the langmarkup crate.
//!
//! Every fallible operation (parsing, formatting, plural selection, validation) returns
//! this error. Failures are all-or-nothing: no partial AST or chunk list is ever returned.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("string has unbalanced tags: {0}")]
    UnbalancedTags(String),

    #[error("tags in string should not have attributes: {0}")]
    TagHasAttributes(String),

    #[error("tag nesting is deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("value `{0}` wasn't provided")]
    MissingValue(String),

    #[error("invalid plural forms: locale `{locale}` expects {expected} forms, found {found}")]
    InvalidPluralForms {
        locale: String,
        expected: usize,
        found: usize,
    },

    #[error("unable to resolve plural form {index} for key `{key}` ({forms} forms available)")]
    MessageKeyResolution {
        key: String,
        index: usize,
        forms: usize,
    },

    #[error("unable to find message for key `{0}`")]
    MessageNotFound(String),
}

impl Error {
    /// Creates a new unbalanced tags error for the given message.
    pub fn unbalanced(message: impl Into<String>) -> Self {
        Error::UnbalancedTags(message.into())
    }

    /// Creates a new missing value error for the given tag or placeholder name.
    pub fn missing_value(name: impl Into<String>) -> Self {
        Error::MissingValue(name.into())
    }

    /// Returns true for errors raised while parsing a message.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::UnbalancedTags(_) | Error::TagHasAttributes(_) | Error::NestingTooDeep { .. }
        )
    }
}
