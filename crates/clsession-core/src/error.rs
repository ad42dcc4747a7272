//! Error types for device selection and session construction.
//!
//! This module defines the error taxonomy used throughout the crate:
//! recoverable query failures, selection failures, construction failures
//! and kernel argument binding failures. Native runtime errors are carried
//! inside these as [`NativeError`].

use thiserror::Error;

/// An error reported by the native compute runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {})", fmt_status(.status))]
pub struct NativeError {
    /// Native status code, when the runtime reported one
    pub status: Option<i32>,
    /// Human readable description of the failed call
    pub message: String,
}

fn fmt_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

impl NativeError {
    /// No device of the requested type exists on the platform.
    pub const DEVICE_NOT_FOUND: i32 = -1;
    /// A parameter value passed to the runtime is invalid.
    pub const INVALID_VALUE: i32 = -30;
    /// The platform handle is invalid.
    pub const INVALID_PLATFORM: i32 = -32;
    /// The device handle is invalid.
    pub const INVALID_DEVICE: i32 = -33;
    /// The kernel argument index is out of range.
    pub const INVALID_ARG_INDEX: i32 = -49;
    /// The kernel argument value is invalid.
    pub const INVALID_ARG_VALUE: i32 = -50;
    /// The kernel argument size does not match the declared parameter.
    pub const INVALID_ARG_SIZE: i32 = -51;
    /// A context property name or value is invalid.
    pub const INVALID_PROPERTY: i32 = -64;

    /// Create an error carrying a native status code.
    pub fn new<S: Into<String>>(status: i32, message: S) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an error without a known status code.
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the runtime reported that no device of the requested type exists.
    pub fn is_device_not_found(&self) -> bool {
        self.status == Some(Self::DEVICE_NOT_FOUND)
    }
}

/// Errors that can occur while selecting a device and building a session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A single attribute query against a device failed.
    ///
    /// The parameter query framework recovers from these locally; this
    /// variant only escapes from direct calls such as extension listing.
    #[error("Query of {param} failed: {source}")]
    Query {
        /// Display name of the queried attribute
        param: String,
        /// Underlying native error
        source: NativeError,
    },

    /// No platform or device matched the request.
    ///
    /// Raised when the class-filtered device list is empty, when the
    /// picker found nothing, or when a platform override matches nothing.
    #[error("Device selection failed: {reason}")]
    Selection {
        /// Description of what could not be found
        reason: String,
    },

    /// Native context or command queue creation failed.
    ///
    /// The session is not usable after this error.
    #[error("Failed to construct {stage}: {reason}")]
    Construction {
        /// Construction step that failed
        stage: String,
        /// Description of the failure
        reason: String,
        /// Underlying native error, if the runtime produced one
        source: Option<NativeError>,
    },

    /// A kernel argument could not be bound to its parameter slot.
    #[error("Failed to bind kernel argument {slot}: {source}")]
    Binding {
        /// Parameter slot that rejected the argument
        slot: u32,
        /// Underlying native error
        source: NativeError,
    },
}

impl SessionError {
    /// Create a Query error for a named attribute.
    pub fn query<S: Into<String>>(param: S, source: NativeError) -> Self {
        Self::Query {
            param: param.into(),
            source,
        }
    }

    /// Create a Selection error with a custom reason.
    pub fn selection<S: Into<String>>(reason: S) -> Self {
        Self::Selection {
            reason: reason.into(),
        }
    }

    /// Create a Construction error wrapping a native failure.
    pub fn construction<S: Into<String>>(stage: S, source: NativeError) -> Self {
        Self::Construction {
            stage: stage.into(),
            reason: source.message.clone(),
            source: Some(source),
        }
    }

    /// Create a Construction error that has no native cause.
    pub fn invalid_construction<S1, S2>(stage: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::Construction {
            stage: stage.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a Binding error for a parameter slot.
    pub fn binding(slot: u32, source: NativeError) -> Self {
        Self::Binding { slot, source }
    }

    /// Whether this is a selection failure.
    pub fn is_selection(&self) -> bool {
        matches!(self, Self::Selection { .. })
    }

    /// Whether this is a construction failure.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction { .. })
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
