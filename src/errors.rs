// Copyright 2025 Cowboy AI, LLC.

//! Error types for presenter operations

use thiserror::Error;

/// Errors that can occur while declaring, registering or resolving presenters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    /// No presenter is registered for the type of a related value
    #[error(
        "Name resolution failed: {}",
        resolution_detail(.type_name, .presenter_name, .registered_for.as_deref())
    )]
    NameResolution {
        /// Runtime type name of the value that needed a presenter
        type_name: String,
        /// Presenter name derived from the type name by convention
        presenter_name: String,
        /// Type already served by a presenter of that name, if any
        registered_for: Option<String>,
    },

    /// Neither the presenter nor its subject answers a call
    #[error("Missing capability: {presenter} does not respond to `{capability}`")]
    MissingCapability {
        /// Presenter that received the call
        presenter: String,
        /// Name of the member that was requested
        capability: String,
    },

    /// A presenter's name does not follow the naming convention for its subject
    #[error("Convention mismatch: {presenter} should be named {expected}")]
    ConventionMismatch {
        /// Name the presenter was declared with
        presenter: String,
        /// Name the naming policy derives for the subject type
        expected: String,
    },

    /// A presenter is already registered for the subject type or name
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// A presenter constructor received a subject of another type
    #[error("Subject mismatch: {expected} cannot present a {found}")]
    SubjectMismatch {
        /// Presenter whose constructor was invoked
        expected: String,
        /// Runtime type name of the value it received
        found: String,
    },

    /// Naming policy is not usable
    #[error("Invalid naming policy: {0}")]
    InvalidPolicy(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn resolution_detail(type_name: &str, presenter_name: &str, registered_for: Option<&str>) -> String {
    match registered_for {
        Some(served) => format!("{presenter_name} is registered for {served}, not {type_name}"),
        None => format!("no {presenter_name} registered for {type_name}"),
    }
}

/// Result type for presenter operations
pub type PresenterResult<T> = Result<T, PresenterError>;

impl From<serde_json::Error> for PresenterError {
    fn from(err: serde_json::Error) -> Self {
        PresenterError::Serialization(err.to_string())
    }
}

impl PresenterError {
    /// Build a name resolution error
    pub fn name_resolution(type_name: impl Into<String>, presenter_name: impl Into<String>) -> Self {
        PresenterError::NameResolution {
            type_name: type_name.into(),
            presenter_name: presenter_name.into(),
            registered_for: None,
        }
    }

    /// Build a name resolution error for a presenter name that already serves
    /// another type
    pub fn name_registered_for(
        type_name: impl Into<String>,
        presenter_name: impl Into<String>,
        registered_for: impl Into<String>,
    ) -> Self {
        PresenterError::NameResolution {
            type_name: type_name.into(),
            presenter_name: presenter_name.into(),
            registered_for: Some(registered_for.into()),
        }
    }

    /// Build a missing capability error
    pub fn missing_capability(presenter: impl Into<String>, capability: impl Into<String>) -> Self {
        PresenterError::MissingCapability {
            presenter: presenter.into(),
            capability: capability.into(),
        }
    }

    /// Check if this is a name resolution error
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, PresenterError::NameResolution { .. })
    }

    /// Check if this is a missing capability error
    pub fn is_missing_capability(&self) -> bool {
        matches!(self, PresenterError::MissingCapability { .. })
    }

    /// Check if this error was raised while registering a presenter
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            PresenterError::ConventionMismatch { .. } | PresenterError::AlreadyRegistered(_)
        )
    }
}
