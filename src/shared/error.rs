use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and schedulers to distinguish between
/// different types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid site path, store I/O, file write, etc.)
    ApplicationError = 3,
    /// The license is missing, invalid, or was rejected by the Portal
    LicenseFailure = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error returned by the application layer
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CompatError>() {
            Some(CompatError::LicenseRequired) | Some(CompatError::LicenseRejected { .. }) => {
                ExitCode::LicenseFailure
            }
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::LicenseFailure => write!(f, "License Failure (4)"),
        }
    }
}

/// Application-specific errors for compatibility checking.
///
/// Remote metadata and audit lookups never produce these: they degrade to
/// "No Data" instead. Only site discovery, the local store, output writing,
/// authorization and the licensed Portal surface errors to the caller.
#[derive(Debug, Error)]
pub enum CompatError {
    #[error("Invalid WordPress site path: {path}\nReason: {reason}\n\n💡 Hint: Point --site at the directory containing wp-content/")]
    InvalidSitePath { path: PathBuf, reason: String },

    #[error("A validated Portal license is required for this action\n\n💡 Hint: Run `wp-plugin-compat validate-license <KEY>` first")]
    LicenseRequired,

    #[error("License validation failed: {message}")]
    LicenseRejected { message: String },

    #[error("Portal request failed: {message}")]
    PortalRequestFailed { message: String },

    #[error("Forbidden: '{action}' requires the {capability} capability")]
    Forbidden { action: String, capability: String },

    #[error("State store error at {path}\nDetails: {details}\n\n💡 Hint: Please verify that the state directory exists and is writable")]
    StoreError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CompatError {
    /// Generic message used when the Portal gave no explanation of its own
    pub const NETWORK_ERROR_MESSAGE: &'static str =
        "Network error while contacting the Portal. Please check connectivity.";
}
