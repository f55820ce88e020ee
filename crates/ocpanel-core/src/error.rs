//! Error types shared across the panel core.

use thiserror::Error;
use tonic::{Code, Status};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Refusing to store an empty token")]
    EmptyToken,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Malformed base address {address:?}: {reason}")]
    MalformedAddress { address: String, reason: String },

    #[error("Unsupported scheme in base address {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Base address {0:?} has no host")]
    MissingAuthority(String),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] tonic::transport::Error),
}

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Authentication failed - token may be expired: {0}")]
    Authentication(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server unavailable: {0}")]
    Unavailable(String),

    #[error("Method not implemented by server: {0}")]
    Unimplemented(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("RPC failed: {0}")]
    Status(Status),
}

/// Maximum length for server-provided messages in error text
const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

impl RpcError {
    /// Truncate a status message to avoid logging excessive data
    fn truncate_message(message: &str) -> String {
        if message.len() <= MAX_ERROR_MESSAGE_LENGTH {
            return message.to_string();
        }
        let mut end = MAX_ERROR_MESSAGE_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &message[..end],
            message.len()
        )
    }

    pub fn from_status(status: Status) -> Self {
        let message = Self::truncate_message(status.message());
        match status.code() {
            Code::Unauthenticated | Code::PermissionDenied => RpcError::Authentication(message),
            Code::NotFound => RpcError::NotFound(message),
            Code::Unavailable => RpcError::Unavailable(message),
            Code::Unimplemented => RpcError::Unimplemented(message),
            Code::InvalidArgument
            | Code::FailedPrecondition
            | Code::AlreadyExists
            | Code::OutOfRange => RpcError::InvalidRequest(message),
            Code::Internal | Code::Unknown | Code::DataLoss => RpcError::Server(message),
            _ => RpcError::Status(status),
        }
    }

    /// True when the server rejected the credential attached to the call
    pub fn is_authentication(&self) -> bool {
        matches!(self, RpcError::Authentication(_))
    }
}

impl From<Status> for RpcError {
    fn from(status: Status) -> Self {
        Self::from_status(status)
    }
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("No route matches {0:?}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Login succeeded but the token could not be saved: {0}")]
    Storage(#[from] StorageError),
}
