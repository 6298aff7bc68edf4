//! Errors surfaced to the user by the converter

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Provider,
}

/// Failure of a single conversion attempt.
///
/// Both variants go through the same notification channel. Only the kind
/// lets a renderer tell bad input apart from an unavailable rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConverterError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Provider(String),
}

impl ConverterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConverterError::Validation(_) => ErrorKind::Validation,
            ConverterError::Provider(_) => ErrorKind::Provider,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ConverterError::Validation(msg) | ConverterError::Provider(msg) => msg,
        }
    }
}
