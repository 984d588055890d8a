//! Unified error type definition

use thiserror::Error;

// Re-export library error type
pub use nicru_dns_provider::{CredentialValidationError, ProviderError};

/// Failure category reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Token acquisition failed.
    AuthError,
    /// Creating or committing the challenge record failed.
    AddRecordError,
    /// Listing, deleting or committing during cleanup failed.
    DeleteRecordError,
    /// Credentials missing, invalid or unreadable.
    ConfigError,
}

/// Authenticator error type
#[derive(Error, Debug)]
pub enum PluginError {
    /// Authentication against the provider failed
    #[error("Get token error: {0}")]
    Auth(ProviderError),

    /// Record creation (or its commit) failed
    #[error("Add record error: {0}")]
    AddRecord(ProviderError),

    /// Record listing, deletion (or its commit) failed
    #[error("Delete record error: {0}")]
    DeleteRecord(ProviderError),

    /// Credentials configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PluginError {
    /// Failure category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Auth(_) => FailureKind::AuthError,
            Self::AddRecord(_) => FailureKind::AddRecordError,
            Self::DeleteRecord(_) => FailureKind::DeleteRecordError,
            Self::Config(_) => FailureKind::ConfigError,
        }
    }

    /// Whether it is expected behavior (bad credentials, unknown zone, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Auth(e) | Self::AddRecord(e) | Self::DeleteRecord(e) => e.is_expected(),
            Self::Config(_) => true,
        }
    }
}

impl From<CredentialValidationError> for PluginError {
    fn from(err: CredentialValidationError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Authenticator layer Result type alias
pub type PluginResult<T> = std::result::Result<T, PluginError>;
