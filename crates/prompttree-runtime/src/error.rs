use std::fmt;

use prompttree_types::ImportError;

/// Result type for prompttree-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Request never produced a response (connection refused, timeout, ...)
    Transport(reqwest::Error),

    /// Server rejected the request
    Server { status: u16, message: String },

    /// Record no longer exists on the server
    NotFound(String),

    /// Response arrived but its body could not be understood
    Protocol(String),

    /// Import document rejected before any request was made
    Import(ImportError),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl Error {
    /// True when the failure means the client acted on a record that was
    /// already deleted server-side
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Network error: {}", err),
            Error::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Protocol(msg) => write!(f, "Unexpected response: {}", msg),
            Error::Import(err) => write!(f, "Import rejected: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Import(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Server { .. }
            | Error::NotFound(_)
            | Error::Protocol(_)
            | Error::Config(_)
            | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<ImportError> for Error {
    fn from(err: ImportError) -> Self {
        Error::Import(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
