//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an input value breaks a field rule (empty
//!   name, malformed email, non-positive amount).
//! - [`Uniqueness`] thrown when a donor name/email or a campaign title is
//!   already taken.
//! - [`NotFound`] thrown when an id does not resolve.
//! - [`Referential`] thrown when a donation points to a missing donor or
//!   campaign.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Uniqueness`]: EngineError::Uniqueness
//!  [`NotFound`]: EngineError::NotFound
//!  [`Referential`]: EngineError::Referential
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid value: {0}")]
    Validation(String),
    #[error("\"{0}\" already present!")]
    Uniqueness(String),
    #[error("{0} not found!")]
    NotFound(String),
    #[error("Missing reference: {0}")]
    Referential(String),
    #[error("username \"{0}\" already exists")]
    UsernameTaken(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Session store: {0}")]
    Session(String),
    #[error("Password hashing: {0}")]
    Password(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Uniqueness(a), Self::Uniqueness(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Referential(a), Self::Referential(b)) => a == b,
            (Self::UsernameTaken(a), Self::UsernameTaken(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Session(a), Self::Session(b)) => a == b,
            (Self::Password(a), Self::Password(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Session(value.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Session(value.to_string())
    }
}
