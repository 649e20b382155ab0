//! Error types module
//!
//! `TunerError` covers everything that can stop a run. Collection failures are
//! their own enum so a `MetricsCollector` never has to know about engine
//! errors, and the engine never sees a collection failure.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected conditions like an operator aborting a prompt
    Debug,
    /// Warning level - for problems the operator can fix by adjusting input
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error is presented on the command line
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "MISSING_METRIC")
    fn error_code(&self) -> &'static str;

    /// Process exit code
    fn exit_code(&self) -> i32;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("No services matching '{pattern}' detected")]
    NoServicesDetected { pattern: String },

    #[error("Multiple services match: {}", .candidates.join(", "))]
    AmbiguousService { candidates: Vec<String> },

    #[error("Service selection aborted")]
    SelectionAborted,

    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Command `{command}` timed out after {timeout_secs}s")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    #[error("System information unavailable: {0}")]
    SystemInfo(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TunerError {
    #[error("Missing metric: {metric}")]
    MissingMetric { metric: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Static metadata per variant: (error_code, exit_code, suggested_action, log_level).
fn collection_error_static_metadata(
    err: &CollectionError,
) -> (&'static str, i32, Option<&'static str>, LogLevel) {
    match err {
        CollectionError::ServiceNotFound(_) => (
            "SERVICE_NOT_FOUND",
            3,
            Some("Check the unit name with `systemctl list-units --type=service`"),
            LogLevel::Warn,
        ),
        CollectionError::NoServicesDetected { .. } => (
            "NO_SERVICES_DETECTED",
            3,
            Some("Use --service to specify the unit manually"),
            LogLevel::Warn,
        ),
        CollectionError::AmbiguousService { .. } => (
            "AMBIGUOUS_SERVICE",
            3,
            Some("Use --service to pick one of the matching units"),
            LogLevel::Warn,
        ),
        CollectionError::SelectionAborted => ("SELECTION_ABORTED", 130, None, LogLevel::Debug),
        CollectionError::CommandFailed { .. } => (
            "COMMAND_FAILED",
            4,
            Some("Run with --verbose to see the failing command"),
            LogLevel::Error,
        ),
        CollectionError::CommandTimedOut { .. } => (
            "COMMAND_TIMED_OUT",
            4,
            Some("Raise TUNER_COMMAND_TIMEOUT_SECS and retry"),
            LogLevel::Error,
        ),
        CollectionError::SystemInfo(_) => ("SYSTEM_INFO_UNAVAILABLE", 4, None, LogLevel::Error),
        CollectionError::Io(_) => ("IO_ERROR", 4, None, LogLevel::Error),
    }
}

impl ErrorMetadata for CollectionError {
    fn error_code(&self) -> &'static str {
        collection_error_static_metadata(self).0
    }

    fn exit_code(&self) -> i32 {
        collection_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        collection_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        collection_error_static_metadata(self).3
    }
}

impl ErrorMetadata for TunerError {
    fn error_code(&self) -> &'static str {
        match self {
            TunerError::MissingMetric { .. } => "MISSING_METRIC",
            TunerError::InvalidConfig(_) => "INVALID_CONFIG",
            TunerError::Collection(err) => err.error_code(),
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            TunerError::MissingMetric { .. } => 5,
            TunerError::InvalidConfig(_) => 2,
            TunerError::Collection(err) => err.exit_code(),
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            TunerError::MissingMetric { .. } => {
                Some("Run with --show-facts --verbose to inspect what was collected")
            }
            TunerError::InvalidConfig(_) => Some("Check TUNER_* environment variables"),
            TunerError::Collection(err) => err.suggested_action(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            TunerError::MissingMetric { .. } => LogLevel::Error,
            TunerError::InvalidConfig(_) => LogLevel::Warn,
            TunerError::Collection(err) => err.log_level(),
        }
    }
}
