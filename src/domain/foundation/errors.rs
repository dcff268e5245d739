//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,

    // Not found errors
    PersonNotFound,
    RoleNotFound,
    AdUserNotFound,
    AdGroupNotFound,

    // Run-aborting errors
    Connectivity,
    StoreWrite,

    // Non-aborting data defects
    DataQuality,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::PersonNotFound => "PERSON_NOT_FOUND",
            ErrorCode::RoleNotFound => "ROLE_NOT_FOUND",
            ErrorCode::AdUserNotFound => "AD_USER_NOT_FOUND",
            ErrorCode::AdGroupNotFound => "AD_GROUP_NOT_FOUND",
            ErrorCode::Connectivity => "CONNECTIVITY_ERROR",
            ErrorCode::StoreWrite => "STORE_WRITE_ERROR",
            ErrorCode::DataQuality => "DATA_QUALITY_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a directory-connectivity error.
    ///
    /// The message must describe the cause without echoing credentials.
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Connectivity, message)
    }

    /// Creates a store-write error.
    pub fn store_write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreWrite, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Whether this error indicates a directory-connectivity failure.
    pub fn is_connectivity(&self) -> bool {
        self.code == ErrorCode::Connectivity
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
